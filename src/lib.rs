//! # Parts Ledger
//!
//! > **Replacement-part orders tracked on a key-value ledger.**
//!
//! Each order is one JSON document keyed by its id. The order contract creates
//! records, updates their fields one at a time, appends to their custody and
//! event logs, and enumerates everything stored.
//!
//! ## 🏗️ Design
//!
//! ### Contracts hosted by a runtime
//! Business logic implements [`Contract`](ledger::Contract): one `invoke` per
//! request against a [`StateStore`](ledger::StateStore). A
//! [`LedgerRuntime`](ledger::LedgerRuntime) owns the store in its own Tokio task
//! and runs invocations one at a time, so each invocation sees a consistent
//! snapshot and no locks are needed.
//!
//! ### All-or-nothing invocations
//! The contract writes into a [`Transaction`](ledger::Transaction). `submit`
//! commits the write set only when the invocation succeeds; `evaluate` never
//! commits. A failed update leaves the stored record untouched.
//!
//! ### Two ledger variants
//! [`Variant::Orders`](config::Variant) keeps the basic record, where the
//! custody chain doubles as the event log. [`Variant::Products`](config::Variant)
//! adds secondary identifiers, a separate event log and current-owner lookup.
//!
//! ## 🗺️ Module Tour
//!
//! - [`ledger`]: store trait, in-memory store, transactions, runtime, client and mocks
//! - [`order_contract`]: the order [`Contract`](ledger::Contract) and its request/response/error types
//! - [`model`]: the persisted [`Order`](model::Order) document and enumeration output
//! - [`clients`]: [`OrderClient`](clients::OrderClient), one typed method per operation
//! - [`lifecycle`]: [`LedgerSystem`](lifecycle::LedgerSystem) startup/shutdown and [`setup_tracing`](lifecycle::setup_tracing)
//! - [`config`]: [`LedgerConfig`](config::LedgerConfig) from defaults, JSON or `PARTS_LEDGER_*` variables
//! - [`clock`]: injectable time source for record timestamps
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Orders ledger demo
//! RUST_LOG=info cargo run
//!
//! # Products ledger demo
//! PARTS_LEDGER_VARIANT=products RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod clock;
pub mod config;
pub mod ledger;
pub mod lifecycle;
pub mod model;
pub mod order_contract;
