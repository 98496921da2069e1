//! `--overview`: product, firmware, the active uplink and device names.

use fritz_api::FritzClient;
use fritz_api::models::Overview;
use tracing::warn;

use crate::error::CliError;

const MISSING: &str = "-";

pub async fn handle(client: &mut FritzClient) -> Result<Vec<String>, CliError> {
    let overview = client.overview().await?;
    Ok(render(&overview))
}

fn field(label: &str, value: Option<&str>) -> String {
    format!("{label:<15} {}", value.unwrap_or(MISSING))
}

/// Fixed projection of the overview page, one `label value` per line.
pub fn render(overview: &Overview) -> Vec<String> {
    let mut lines = vec![
        field("fritzbox", overview.fritzos.product_name.as_deref()),
        field("fritzos", overview.fritzos.nspver.as_deref()),
        field("lan", overview.lan.txt.as_deref()),
        field("callsToday", overview.foncalls.calls_today.as_deref()),
        field("dect", overview.dect.txt.as_deref()),
        field("active_devices", overview.net.active_count.as_deref()),
    ];

    if let Some(con) = overview.active_connection() {
        lines.extend([
            field("isp", con.provider_id.as_deref()),
            field("ipv4", con.ipv4.ip.as_deref()),
            field("ipv6", con.ipv6.ip.as_deref()),
            field("downstream", con.downstream.as_deref()),
            field("upstream", con.upstream.as_deref()),
            field("uplink", con.ethernet_port_name.as_deref()),
        ]);
    } else {
        warn!(
            connections = overview.internet.connections.len(),
            "no active internet connection"
        );
    }

    lines.push(format!("devices ({})", overview.net.devices.len()));
    lines.extend(
        overview
            .net
            .devices
            .iter()
            .map(|d| format!("  {}", d.summary())),
    );
    lines
}
