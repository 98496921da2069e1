//! `--devices`: active and passive devices from the network page.

use chrono::{DateTime, Local};
use fritz_api::FritzClient;
use fritz_api::models::{NetDevice, NetDevices};

use crate::error::CliError;
use crate::output;

pub async fn handle(client: &mut FritzClient) -> Result<Vec<String>, CliError> {
    let devices = client.net_devices().await?;
    Ok(render(devices, Local::now()))
}

/// Sort ascending by the last IPv4 octet. Unparsable addresses go first
/// and keep their relative order.
pub fn sort_by_last_octet(devices: &mut [NetDevice]) {
    devices.sort_by_key(NetDevice::ipv4_last_octet);
}

pub fn render(mut devices: NetDevices, now: DateTime<Local>) -> Vec<String> {
    let ip_width = devices
        .active
        .iter()
        .map(|d| d.ipv4.ip.len())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for (group, list) in [("active", &mut devices.active), ("passive", &mut devices.passive)] {
        sort_by_last_octet(list);
        lines.push(format!("{group} {}", list.len()));
        if list.is_empty() {
            continue;
        }
        let indirect = list.iter().filter(|d| d.is_indirect()).count();
        lines.push(format!("Indirectly connected devices: {indirect}"));
        lines.extend(list.iter().map(|d| device_line(d, ip_width, now)));
        lines.push(String::new());
    }
    lines.push(format!(
        "countpassive {}",
        devices.countpassive.as_deref().unwrap_or("-")
    ));
    lines
}

fn device_line(device: &NetDevice, ip_width: usize, now: DateTime<Local>) -> String {
    let ago = device.ipv4.lastused.map_or_else(
        || "-".to_owned(),
        |ts| output::format_ago(output::age_since(ts, now)),
    );
    let props = device
        .properties
        .iter()
        .map(|p| p.txt.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut line = format!(
        "{} {:<ip_width$} {} {ago} [{props}] {}",
        output::dimmed(&device.mac),
        device.ipv4.ip,
        output::blue(&device.name),
        device.device_type.as_deref().unwrap_or("-"),
    );
    if device.is_indirect() {
        line.push(' ');
        line.push_str(&output::yellow(&device.parent.name));
    }
    line
}
