// Typed page endpoints
//
// One method per `data.lua` page the CLI reports on. Read-only pages
// first, then the single mutating call.

use tracing::debug;

use crate::client::FritzClient;
use crate::counter::{self, CounterData};
use crate::error::Error;
use crate::mac::MacAddress;
use crate::models::{AddMacReply, NetDevices, Overview};
use crate::page::{PageRequest, names};

impl FritzClient {
    /// Home page summary: product, firmware, uplinks, device names.
    ///
    /// `POST /data.lua` with `page=overview`
    pub async fn overview(&mut self) -> Result<Overview, Error> {
        debug!("fetching overview");
        self.call_json(&PageRequest::json(names::OVERVIEW)).await
    }

    /// Active and passive network devices with addresses and last use.
    ///
    /// `POST /data.lua` with `page=netDev`
    pub async fn net_devices(&mut self) -> Result<NetDevices, Error> {
        debug!("fetching network devices");
        self.call_json(&PageRequest::json(names::NET_DEVICES)).await
    }

    /// Online counter, parsed out of the HTML page.
    ///
    /// `POST /data.lua` with `page=netCnt`
    pub async fn net_counter(&mut self) -> Result<CounterData, Error> {
        debug!("fetching online counter");
        let html = self.call_text(&PageRequest::html(names::NET_COUNTER)).await?;
        counter::parse_counter_page(&html)
    }

    /// Put a device on the WLAN access list by MAC address.
    ///
    /// `POST /data.lua` with `page=wKey&mac0=…&…&mac5=…&mac=…`. The reply
    /// is returned as-is; check [`AddMacReply::is_ok`].
    pub async fn add_mac(&mut self, mac: &MacAddress) -> Result<AddMacReply, Error> {
        debug!(%mac, "adding device to the WLAN access list");
        let request = PageRequest::json(names::WLAN_KEY).with_params(mac.form_params());
        self.call_json(&request).await
    }
}
