// `data.lua` response types
//
// Every JSON page wraps its payload as `{ "pid": …, "data": { … } }`. The
// models cover the fields the reports use; everything is optional or
// defaulted because field presence varies with firmware and device kind.

use serde::{Deserialize, Serialize};

use crate::lenient;

// ── Response Envelope ────────────────────────────────────────────────

/// Standard `data.lua` envelope.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

// ── Overview (`overview`) ────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Overview {
    #[serde(default)]
    pub fritzos: FritzOs,
    #[serde(default)]
    pub lan: Summary,
    #[serde(default)]
    pub foncalls: FonCalls,
    #[serde(default)]
    pub dect: Summary,
    #[serde(default)]
    pub net: OverviewNet,
    #[serde(default)]
    pub internet: Internet,
}

impl Overview {
    /// The first internet connection flagged `active`.
    pub fn active_connection(&self) -> Option<&Connection> {
        self.internet.connections.iter().find(|c| c.active)
    }
}

/// Product and firmware identification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FritzOs {
    #[serde(default, rename = "Productname")]
    pub product_name: Option<String>,
    /// Firmware version string, e.g. `"7.57"`.
    #[serde(default)]
    pub nspver: Option<String>,
}

/// A section that only carries a display text (`lan`, `dect`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub txt: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FonCalls {
    #[serde(default, rename = "callsToday", deserialize_with = "lenient::opt_string_from_any")]
    pub calls_today: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverviewNet {
    #[serde(default, deserialize_with = "lenient::opt_string_from_any")]
    pub active_count: Option<String>,
    #[serde(default)]
    pub devices: Vec<OverviewDevice>,
}

/// Compact device entry on the overview page (no IP or MAC).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverviewDevice {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default, rename = "type")]
    pub device_type: Option<String>,
}

impl OverviewDevice {
    /// `name (description)`, falling back to the device type.
    pub fn summary(&self) -> String {
        let detail = self
            .desc
            .as_deref()
            .or(self.device_type.as_deref())
            .unwrap_or_default();
        format!("{} ({detail})", self.name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Internet {
    #[serde(default)]
    pub connections: Vec<Connection>,
}

/// One internet uplink as shown on the overview page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Connection {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub ipv4: Address,
    #[serde(default)]
    pub ipv6: Address,
    #[serde(default, deserialize_with = "lenient::opt_string_from_any")]
    pub downstream: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string_from_any")]
    pub upstream: Option<String>,
    #[serde(default)]
    pub ethernet_port_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub ip: Option<String>,
}

// ── Network devices (`netDev`) ───────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetDevices {
    #[serde(default)]
    pub active: Vec<NetDevice>,
    #[serde(default)]
    pub passive: Vec<NetDevice>,
    /// Passed through verbatim for display.
    #[serde(default, deserialize_with = "lenient::opt_string_from_any")]
    pub countpassive: Option<String>,
}

/// Full device entry from the network page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetDevice {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mac: String,
    #[serde(default)]
    pub ipv4: DeviceIpv4,
    #[serde(default, rename = "type")]
    pub device_type: Option<String>,
    #[serde(default)]
    pub parent: Parent,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl NetDevice {
    /// Last octet of the IPv4 address, if the address has one.
    pub fn ipv4_last_octet(&self) -> Option<u8> {
        self.ipv4.ip.rsplit('.').next()?.parse().ok()
    }

    /// Devices behind a repeater or mesh node carry their parent's name.
    pub fn is_indirect(&self) -> bool {
        !self.parent.name.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceIpv4 {
    #[serde(default)]
    pub ip: String,
    /// Unix seconds of last use.
    #[serde(default, deserialize_with = "lenient::opt_i64_from_any")]
    pub lastused: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Parent {
    #[serde(default)]
    pub name: String,
}

/// Connection property label (e.g. "LAN 1 mit 1 Gbit/s").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Property {
    #[serde(default)]
    pub txt: String,
}

// ── WLAN access list (`wKey`) ────────────────────────────────────────

/// Reply to an add-device request on the WLAN access list page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddMacReply {
    #[serde(default)]
    pub add_mac: Option<String>,
}

impl AddMacReply {
    /// The router signals success with `add_mac == "ok"`.
    pub fn is_ok(&self) -> bool {
        self.add_mac.as_deref() == Some("ok")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn overview_picks_first_active_connection() {
        let env: DataEnvelope<Overview> = serde_json::from_value(json!({
            "pid": "overview",
            "data": {
                "fritzos": { "Productname": "FRITZ!Box 7590", "nspver": "7.57" },
                "foncalls": { "callsToday": 3 },
                "net": {
                    "active_count": 12,
                    "devices": [
                        { "name": "nas", "desc": "LAN" },
                        { "name": "phone", "type": "wlan" }
                    ]
                },
                "internet": { "connections": [
                    { "active": false, "provider_id": "backup" },
                    { "active": true, "provider_id": "isp-a", "ipv4": { "ip": "203.0.113.7" },
                      "downstream": 250000, "upstream": "40000" },
                    { "active": true, "provider_id": "isp-b" }
                ]}
            }
        }))
        .unwrap();

        let overview = env.data;
        assert_eq!(overview.fritzos.product_name.as_deref(), Some("FRITZ!Box 7590"));
        assert_eq!(overview.foncalls.calls_today.as_deref(), Some("3"));
        assert_eq!(overview.net.active_count.as_deref(), Some("12"));

        let con = overview.active_connection().unwrap();
        assert_eq!(con.provider_id.as_deref(), Some("isp-a"));
        assert_eq!(con.ipv4.ip.as_deref(), Some("203.0.113.7"));
        assert_eq!(con.downstream.as_deref(), Some("250000"));
        assert_eq!(con.upstream.as_deref(), Some("40000"));
        assert!(con.ipv6.ip.is_none());

        let summaries: Vec<_> = overview.net.devices.iter().map(OverviewDevice::summary).collect();
        assert_eq!(summaries, ["nas (LAN)", "phone (wlan)"]);
    }

    #[test]
    fn overview_without_active_connection() {
        let overview: Overview = serde_json::from_value(json!({
            "internet": { "connections": [{ "active": false }] }
        }))
        .unwrap();
        assert!(overview.active_connection().is_none());
    }

    #[test]
    fn net_device_fields() {
        let devices: NetDevices = serde_json::from_value(json!({
            "active": [{
                "name": "repeater-client",
                "mac": "AA:BB:CC:DD:EE:FF",
                "ipv4": { "ip": "192.168.178.20", "lastused": "1700000000" },
                "type": "wlan",
                "parent": { "name": "Repeater 600" },
                "properties": [{ "txt": "5 GHz" }]
            }],
            "countpassive": 0
        }))
        .unwrap();

        let d = &devices.active[0];
        assert_eq!(d.ipv4_last_octet(), Some(20));
        assert_eq!(d.ipv4.lastused, Some(1_700_000_000));
        assert!(d.is_indirect());
        assert_eq!(d.properties[0].txt, "5 GHz");
        assert!(devices.passive.is_empty());
        assert_eq!(devices.countpassive.as_deref(), Some("0"));
    }

    #[test]
    fn unparsable_octet() {
        let d = NetDevice::default();
        assert_eq!(d.ipv4_last_octet(), None);
        assert!(!d.is_indirect());
    }

    #[test]
    fn add_mac_reply() {
        let ok: AddMacReply = serde_json::from_value(json!({ "add_mac": "ok" })).unwrap();
        let bad: AddMacReply = serde_json::from_value(json!({ "add_mac": "exists" })).unwrap();
        let empty: AddMacReply = serde_json::from_value(json!({})).unwrap();
        assert!(ok.is_ok());
        assert!(!bad.is_ok());
        assert!(!empty.is_ok());
    }
}
