use std::sync::Arc;

use intake::config::IntakeConfig;
use intake::flow::Flow;
use intake::gate::CompletionGate;
use intake::routes::{FlowRouteState, flow_routes};
use intake::store::{FlowStore, LibSqlStore, SettingsStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = IntakeConfig::from_env();

    eprintln!("Intake v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Database: {}", config.db_path);
    eprintln!(
        "   Status API: http://0.0.0.0:{}/api/flows/{{flow}}/status",
        config.http_port
    );

    let store: Arc<dyn SettingsStore> = Arc::new(
        LibSqlStore::new_local(std::path::Path::new(&config.db_path))
            .await
            .unwrap_or_else(|e| {
                eprintln!(
                    "Error: Failed to open settings store at {}: {}",
                    config.db_path, e
                );
                std::process::exit(1);
            }),
    );
    let flow_store = FlowStore::new(store);

    let onboarding = Arc::new(CompletionGate::new(
        Flow::Onboarding,
        config.flow_enabled(Flow::Onboarding),
        flow_store.clone(),
    ));
    let user_info = Arc::new(CompletionGate::new(
        Flow::UserInfo,
        config.flow_enabled(Flow::UserInfo),
        flow_store.clone(),
    ));

    // Resolve both gates once at startup, the way the app's root router
    // would before deciding what to show.
    let onboarding_status = onboarding.load().await;
    let user_info_status = user_info.load().await;
    tracing::info!(
        onboarding = ?onboarding_status,
        user_info = ?user_info_status,
        "Gates resolved"
    );

    let app = flow_routes(FlowRouteState {
        onboarding,
        user_info,
    });
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port)).await?;
    tracing::info!(port = config.http_port, "Flow status server started");
    axum::serve(listener, app).await?;

    Ok(())
}
