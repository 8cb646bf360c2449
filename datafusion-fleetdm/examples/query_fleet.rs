//! Example: Query a Fleet server with SQL
//!
//! Registers every Fleet table under the `fleet` catalog and runs a few
//! queries against a live server.
//!
//! ```bash
//! FLEETDM_URL=https://fleet.example.com \
//! FLEETDM_API_TOKEN=... \
//! RUST_LOG=datafusion_fleetdm=info,fleetdm_client=debug \
//! cargo run --example query_fleet
//! ```

use datafusion::prelude::*;
use datafusion_fleetdm::{FleetCatalog, FleetConfig};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SessionConfig::new()
        .with_target_partitions(1)
        .with_default_catalog_and_schema("fleet", "default");
    let ctx = SessionContext::new_with_config(config);
    ctx.register_catalog("fleet", Arc::new(FleetCatalog::new(FleetConfig::from_env())));

    let queries = [
        (
            "Hosts by status",
            "SELECT status, COUNT(*) AS hosts FROM fleetdm_host GROUP BY status ORDER BY hosts DESC",
        ),
        (
            "Most installed vulnerable software",
            "SELECT name, hosts_count, versions_count FROM fleetdm_software_title \
             WHERE vulnerable_only = true ORDER BY hosts_count DESC LIMIT 10",
        ),
        (
            "Failing policies",
            "SELECT name, failing_host_count, passing_host_count FROM fleetdm_policy \
             WHERE failing_host_count > 0 ORDER BY failing_host_count DESC",
        ),
        (
            "App Store apps per team",
            "SELECT team_name, COUNT(*) AS apps FROM fleetdm_app_store_app GROUP BY team_name",
        ),
        (
            "Recent activities",
            "SELECT created_at, actor_full_name, \"type\" FROM fleetdm_activity \
             ORDER BY created_at DESC LIMIT 10",
        ),
    ];

    for (title, sql) in queries {
        println!("=== {} ===", title);
        match ctx.sql(sql).await {
            Ok(df) => {
                if let Err(e) = df.show().await {
                    println!("Query failed: {}\n", e);
                }
            }
            Err(e) => println!("Planning failed: {}\n", e),
        }
    }

    Ok(())
}
