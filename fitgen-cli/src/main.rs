mod cli;

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;

use cli::Cli;
use fitgen_core::types::Flow;
use fitgen_engine::session::{FormSession, GenerationState};
use fitgen_engine::traits::RelayClient;
use fitgen_runtime::relay_client::HttpRelayClient;
use fitgen_runtime::runtime_relay::build_relay_from_settings;
use fitgen_runtime::settings::RelaySettings;

/// Text for the output panel in each state.
fn render(flow: Flow, state: &GenerationState) -> String {
    match state {
        GenerationState::Idle => flow.placeholder().to_string(),
        GenerationState::Pending => flow.loading_message().to_string(),
        GenerationState::Success { text } => text.clone(),
        GenerationState::Failure { message } => format!("Error: {message}"),
    }
}

fn relay_client(cli: &Cli) -> anyhow::Result<Arc<dyn RelayClient>> {
    if cli.local {
        let settings = RelaySettings::from_process_env().context("load relay settings")?;
        return Ok(Arc::new(build_relay_from_settings(&settings)));
    }
    log::debug!("using relay at {}", cli.relay_url);
    Ok(Arc::new(HttpRelayClient::new(&cli.relay_url)))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let flow = cli.command.flow();

    let session = FormSession::new(flow, relay_client(&cli)?);
    for (name, value) in cli.command.field_values() {
        session.set_field(name, value);
    }

    println!("{}\n", flow.title());

    if cli.print_prompt || cli.dry_run {
        println!("{}\n", session.prompt());
    }
    if cli.dry_run {
        println!("{}", render(flow, &session.state()));
        return Ok(ExitCode::SUCCESS);
    }

    let state = session
        .generate_with_hook(|state| async move {
            if state.is_pending() {
                eprintln!("{}", render(flow, &state));
            }
        })
        .await?;

    println!("{}", render(flow, &state));
    Ok(match state {
        GenerationState::Failure { .. } => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}
