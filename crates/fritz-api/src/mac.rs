use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A MAC address as typed by the user: six colon-separated hex octets.
///
/// The original spelling (including letter case) is kept because the
/// router receives it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacAddress {
    raw: String,
}

impl MacAddress {
    pub fn octets(&self) -> impl Iterator<Item = &str> {
        self.raw.split(':')
    }

    /// Form parameters for the WLAN access list: `mac0`…`mac5` with the
    /// octets in input order, then `mac` with the full address.
    pub fn form_params(&self) -> Vec<(String, String)> {
        self.octets()
            .enumerate()
            .map(|(i, octet)| (format!("mac{i}"), octet.to_owned()))
            .chain(std::iter::once(("mac".to_owned(), self.raw.clone())))
            .collect()
    }
}

impl FromStr for MacAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| Error::InvalidMac {
            value: s.to_owned(),
            reason: reason.to_owned(),
        };
        let raw = s.trim();
        let octets: Vec<&str> = raw.split(':').collect();
        if octets.len() != 6 {
            return Err(invalid("expected six colon-separated octets"));
        }
        if let Some(bad) = octets
            .iter()
            .find(|o| o.len() != 2 || !o.chars().all(|c| c.is_ascii_hexdigit()))
        {
            return Err(invalid(&format!("'{bad}' is not a two-digit hex octet")));
        }
        Ok(Self { raw: raw.to_owned() })
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
