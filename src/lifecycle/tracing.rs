//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber` formatter filtered
//! by `RUST_LOG`. Module paths are hidden (`with_target(false)`); the runtime
//! tags its lines with `contract_type` instead.
//!
//! ## What Gets Logged
//!
//! - **Runtime lifecycle**: `Runtime started` and `Shutdown` with the total committed writes
//! - **Invocations**: `Submit` / `Evaluate` with the full request at `debug`
//! - **Commits**: `Committed` with the number of keys written, at `info`
//! - **Record changes**: `Order created`, `Order initialized` at `info`; field and log updates at `debug`
//! - **Failures**: rejected invocations and undecodable records at `warn`
//!
//! Client methods open a span per call (`#[instrument]`). The runtime runs in
//! its own task, so its lines are not nested under those spans:
//!
//! ```text
//! INFO Runtime started contract_type="OrderContract"
//! INFO Committed contract_type="OrderContract" writes=1
//! WARN Evaluation failed contract_type="OrderContract" error=The order with Order ID: 999 does not exist
//! ```
//!
//! ```bash
//! RUST_LOG=info cargo run      # Commits and record changes
//! RUST_LOG=debug cargo run     # Full requests
//! ```

/// Installs the global subscriber. Call once, at process start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
