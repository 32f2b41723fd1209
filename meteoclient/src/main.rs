use meteoclient::{Gateway, GatewayConfig, HttpTransport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_env_filter(
            std::env::var("METEO_LOG").unwrap_or_else(|_| "info".to_string()),
        )
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(
            "%Y-%m-%dT%H:%M:%S".to_string(),
        ))
        .init();

    let base_url =
        std::env::var("METEO_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let username = std::env::var("METEO_USER").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("METEO_PASSWORD").unwrap_or_else(|_| "admin24".to_string());

    tracing::info!("Starting MeteoEvents gateway smoke run against {}\n", base_url);

    let config = GatewayConfig::new(base_url);
    let transport = HttpTransport::new(&config)?;
    let gateway = Gateway::new(config, transport);

    tracing::info!("Test 1: Logging in as {}...", username);
    let session = gateway.login(&username, &password).await?;
    tracing::info!("✅ Logged in, role: {:?}\n", session.role);

    tracing::info!("Test 2: Listing events...");
    let events = gateway.list_events().await?;
    tracing::info!("✅ {} events\n", events.len());

    tracing::info!("Test 3: Listing measures...");
    let measures = gateway.list_measures().await?;
    tracing::info!("✅ {} measures\n", measures.len());

    let event_id = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<i64>().ok())
        .or_else(|| events.first().and_then(|e| e.id));

    if let Some(event_id) = event_id {
        tracing::info!("Test 4: Weather risk for event {}...", event_id);
        match gateway.event_weather(event_id).await {
            Ok(risk) => {
                tracing::info!(
                    "✅ Severity {} ({}), {} participants",
                    risk.severity.level(),
                    risk.severity.label(),
                    risk.participants.len()
                );
                for action in &risk.actions {
                    tracing::info!("   action: {}", action);
                }
            }
            Err(e) => tracing::warn!("Weather fetch failed: {}", e),
        }
        tracing::info!("");
    } else {
        tracing::warn!("No event available, skipping the weather test\n");
    }

    tracing::info!("Test 5: Logging out...");
    gateway.logout().await?;
    tracing::info!("✅ Done");

    Ok(())
}
