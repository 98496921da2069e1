//! `--add_mac`: put a device on the WLAN access list.

use fritz_api::{FritzClient, MacAddress};
use tracing::info;

use crate::error::CliError;
use crate::output;

/// Runs once and alone; the caller exits afterwards.
pub async fn handle(client: &mut FritzClient, mac: &MacAddress) -> Result<(), CliError> {
    output::print_lines(&[format!("Adding device with MAC {mac}")]);
    let reply = client.add_mac(mac).await?;
    if !reply.is_ok() {
        return Err(CliError::AddMacRejected {
            mac: mac.to_string(),
            reply: reply.add_mac.unwrap_or_else(|| "(none)".into()),
        });
    }
    info!(%mac, "device added");
    output::print_lines(&[output::green("Success!")]);
    Ok(())
}
