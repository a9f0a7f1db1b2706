use parts_ledger::config::{LedgerConfig, Variant};
use parts_ledger::lifecycle::{setup_tracing, LedgerSystem};
use parts_ledger::model::SecondaryIdentifiers;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = LedgerConfig::from_env().map_err(|e| e.to_string())?;
    let variant = config.variant;
    info!(%variant, "Starting parts ledger demo");

    let system = LedgerSystem::new(config);
    let client = &system.order_client;

    let seeded = client
        .initialize_default_orders()
        .await
        .map_err(|e| e.to_string())?;
    info!(seeded, "Default orders written");

    let span = tracing::info_span!("order_intake");
    async {
        let document = match variant {
            Variant::Orders => client.create_order("123459", "Dishwasher Pump").await,
            Variant::Products => {
                client
                    .create_product_order(
                        "123459",
                        "Dishwasher Pump",
                        SecondaryIdentifiers::new("954321", "959595", "9999999"),
                    )
                    .await
            }
        }
        .map_err(|e| e.to_string())?;
        info!(%document, "Order created");

        client
            .update_source("123459", "Vendor Y")
            .await
            .map_err(|e| e.to_string())?;
        client
            .update_estd_delivery_date("123459", "2005-11-04")
            .await
            .map_err(|e| e.to_string())?;
        client
            .update_chain_of_custody("123459", "FedEx")
            .await
            .map_err(|e| e.to_string())?;
        client
            .update_track_id("123459", "FX-4411")
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    if variant == Variant::Products {
        let tracking = async {
            client.add_event("123459", "Shipped from Vendor Y").await?;
            client.get_current_owner("123459").await
        }
        .instrument(tracing::info_span!("order_tracking"))
        .await;
        match tracking {
            Ok(owner) => info!(%owner, "Current custodian"),
            Err(e) => error!(error = %e, "Tracking failed"),
        }
    }

    let custody = client
        .get_chain_of_custody("123459")
        .await
        .map_err(|e| e.to_string())?;
    info!(%custody, "Chain of custody");

    // Reads report the read-path message for unknown ids
    if let Err(e) = client.get_order_details("000000").await {
        info!(error = %e, "Lookup of unknown order");
    }

    let orders = client.get_all_orders().await.map_err(|e| e.to_string())?;
    for entry in &orders {
        let status = entry.record.as_order().map(|o| o.status.as_str()).unwrap_or("<raw>");
        info!(key = %entry.key, status, "Stored order");
    }

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
