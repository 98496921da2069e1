// fritz-api: Async Rust client for the FRITZ!Box web management API

pub mod client;
pub mod counter;
pub mod error;
mod lenient;
pub mod mac;
pub mod models;
pub mod page;
mod pages;
pub mod session;
pub mod snapshot;
pub mod transport;

pub use client::FritzClient;
pub use counter::{CounterData, CounterPeriod, Period, Traffic};
pub use error::Error;
pub use mac::MacAddress;
pub use page::{ContentKind, PageBody, PageRequest};
pub use session::Credentials;
pub use snapshot::SnapshotStore;
pub use transport::{TlsMode, TransportConfig};
