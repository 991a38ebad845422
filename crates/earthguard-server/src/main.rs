mod api;
mod middleware;

use earthguard_core::Directory;
use earthguard_gemini::{ChatGateway, GeminiClient};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = earthguard_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let directory = Directory::from_config(&config)?;
    tracing::info!(
        facilities = directory.records().len(),
        source = %config
            .facilities_path
            .as_deref()
            .map_or_else(|| "bundled".to_string(), |p| p.display().to_string()),
        "facility directory loaded"
    );

    let chat = match config.gemini_api_key.as_deref() {
        Some(api_key) => {
            let client = GeminiClient::with_base_url(
                api_key,
                &config.gemini_model,
                config.gemini_timeout_secs,
                &config.gemini_base_url,
            )?;
            tracing::info!(model = client.model(), "chat assistant enabled");
            Some(ChatGateway::new(client))
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set; chat endpoint will answer 503");
            None
        }
    };

    let app = build_app(AppState::new(directory, chat));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "earthguard server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
