//! # System Lifecycle & Orchestration
//!
//! Starts the ledger runtime with its store and clock, hands out the typed
//! client, and shuts everything down in order.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the client** - Closes the sender side of the runtime's channel
//! 2. **Runtime detects closure** - `receiver.recv()` returns `None` once queued invocations are done
//! 3. **Await completion** - [`LedgerSystem::shutdown`] waits for the runtime task
//!
//! Clones of the client held elsewhere keep the runtime alive; drop them first.
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the subscriber once per process. See the
//! [`tracing`] module for the log layout.

pub mod ledger_system;
pub mod tracing;

pub use ledger_system::*;
pub use tracing::*;
