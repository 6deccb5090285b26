use anyhow::Context;
use fitgen_runtime::runtime_relay::build_relay_from_settings;
use fitgen_runtime::settings::RelaySettings;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = RelaySettings::from_process_env().context("load relay settings")?;
    log::info!("settings: {settings:?}");

    let addr = settings.bind_addr()?;
    let relay = Arc::new(build_relay_from_settings(&settings));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    log::info!("relay listening on http://{}", listener.local_addr()?);

    fitgen_server::serve(listener, relay, shutdown_signal()).await?;
    log::info!("relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("shutdown requested");
}
