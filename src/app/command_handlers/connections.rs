use crate::app::command_support::{api_client, load_settings};
use crate::api::ServiceConnection;

pub fn cmd_connections(args: &[String]) -> Result<String, String> {
    if !args.is_empty() {
        return Err("usage: connections".to_string());
    }
    let settings = load_settings()?;
    let connections = api_client(&settings)
        .list_connections()
        .map_err(|e| e.to_string())?;
    Ok(render_connections(&connections))
}

pub fn render_connections(connections: &[ServiceConnection]) -> String {
    if connections.is_empty() {
        return "no services".to_string();
    }
    connections
        .iter()
        .map(|c| {
            format!(
                "{}\t{}",
                c.service,
                if c.connected { "connected" } else { "not connected" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
