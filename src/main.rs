use std::sync::Arc;

use onboard_intake::config::{DatabaseConfig, ServerConfig};
use onboard_intake::onboarding::OnboardingService;
use onboard_intake::server;
use onboard_intake::store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| "Failed to install rustls crypto provider")?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let server_config = ServerConfig::from_env()?;

    eprintln!("Onboard Intake v{}", env!("CARGO_PKG_VERSION"));
    eprintln!(
        "   Onboarding API: http://{}/api/onboarding",
        server_config.address()
    );

    // ── Database ─────────────────────────────────────────────────────────
    let service = match DatabaseConfig::from_env()? {
        Some(db_config) => {
            let factory = store::factory_from_config(&db_config)?;
            eprintln!(
                "   Database: {} ({:?} mode{})",
                factory.backend(),
                db_config.mode,
                if db_config.atomic_writes { ", atomic writes" } else { "" }
            );

            if db_config.apply_schema {
                store::apply_schema(factory.as_ref()).await?;
            }

            OnboardingService::new(Some(factory)).with_atomic_writes(db_config.atomic_writes)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; every submission will fail until it is configured");
            eprintln!("   Database: not configured");
            OnboardingService::new(None)
        }
    };

    // ── HTTP ─────────────────────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    server::serve(listener, server::app(Arc::new(service))).await?;

    Ok(())
}
