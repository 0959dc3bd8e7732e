//! Send command handler - delivers one payload to a running relay

use crate::domain::config::ProviderConfig;
use crate::domain::payload::PushPayload;

use super::args::SendArgs;
use super::presenter::Presenter;

/// Build the payload described by the send arguments
pub fn build_payload(args: &SendArgs) -> Result<PushPayload, String> {
    if let Some(raw) = &args.json {
        return PushPayload::from_json(raw).map_err(|e| format!("Invalid payload JSON: {}", e));
    }

    if args.title.is_none() && args.body.is_none() && args.data.is_empty() {
        return Err("Nothing to send. Use --title/--body/--data or --json".to_string());
    }

    let mut payload = if args.title.is_some() || args.body.is_some() {
        PushPayload::new(args.title.clone(), args.body.clone())
    } else {
        PushPayload::default()
    };
    if !args.data.is_empty() {
        payload = payload.with_string_data(args.data.iter().cloned());
    }

    Ok(payload)
}

/// Handle send subcommand
#[cfg(unix)]
pub async fn handle_send_command(
    args: SendArgs,
    provider_config: &ProviderConfig,
    presenter: &Presenter,
) -> Result<(), String> {
    use crate::infrastructure::{SocketPath, SocketSender};

    let payload = build_payload(&args)?;
    let sender = SocketSender::new(SocketPath::for_config(provider_config));

    if !sender.is_relay_running() {
        return Err(format!(
            "No relay listening for project '{}'. Start one with: push-relay",
            provider_config.project_id
        ));
    }

    let response = sender
        .send(&payload)
        .await
        .map_err(|e| format!("Failed to communicate with relay: {}", e))?;

    if let Some(stripped) = response.strip_prefix("error:") {
        return Err(stripped.trim().to_string());
    }

    presenter.success("Payload delivered to relay");
    Ok(())
}

/// Handle send subcommand
#[cfg(not(unix))]
pub async fn handle_send_command(
    _args: SendArgs,
    _provider_config: &ProviderConfig,
    _presenter: &Presenter,
) -> Result<(), String> {
    Err("The send command needs the socket transport, which is only available on Unix".to_string())
}
