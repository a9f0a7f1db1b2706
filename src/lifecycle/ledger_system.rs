use crate::clients::OrderClient;
use crate::clock::{Clock, SystemClock};
use crate::config::LedgerConfig;
use crate::ledger::{MemoryStore, StateStore};
use std::sync::Arc;
use tracing::{error, info};

/// A running order ledger: one runtime task plus the client that talks to it.
///
/// ```rust
/// use parts_ledger::config::LedgerConfig;
/// use parts_ledger::lifecycle::LedgerSystem;
///
/// #[tokio::main]
/// async fn main() -> Result<(), String> {
///     let system = LedgerSystem::new(LedgerConfig::default());
///     system.order_client.initialize_default_orders().await.map_err(|e| e.to_string())?;
///     system.shutdown().await
/// }
/// ```
pub struct LedgerSystem {
    pub order_client: OrderClient,
    handle: tokio::task::JoinHandle<()>,
}

impl LedgerSystem {
    /// Starts a ledger backed by an empty [`MemoryStore`] and the wall clock.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_parts(config, Arc::new(SystemClock), MemoryStore::new())
    }

    /// Starts a ledger over the given clock and store.
    pub fn with_parts(
        config: LedgerConfig,
        clock: Arc<dyn Clock>,
        store: impl StateStore + 'static,
    ) -> Self {
        info!(variant = %config.variant, create_policy = ?config.create_policy, "Starting ledger");
        let (runtime, client) = crate::order_contract::new(config, clock);
        let handle = tokio::spawn(async move {
            runtime.run(store).await;
        });

        Self {
            order_client: OrderClient::new(client),
            handle,
        }
    }

    /// Drops the client and waits for the runtime to finish queued invocations.
    ///
    /// Returns `Err` if the runtime task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down ledger...");
        drop(self.order_client);

        if let Err(e) = self.handle.await {
            error!("Runtime task failed: {:?}", e);
            return Err(format!("Runtime task failed: {:?}", e));
        }

        info!("Ledger shutdown complete.");
        Ok(())
    }
}
