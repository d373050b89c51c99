use pnet::util::MacAddr;

use super::DeviceId;

/// Signal strength in dBm.
pub type Rssi = i16;

/// One discovery report from the radio stack.
///
/// Events are ephemeral: the tracking store folds them into a
/// [`DeviceRecord`](super::record::DeviceRecord) and drops them.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvertisementEvent {
    pub id: DeviceId,
    pub address: Option<MacAddr>,
    pub rssi: Rssi,
    pub name: Option<String>,
    pub manufacturer_data: Option<Vec<u8>>,
    pub services: Vec<String>,
}

impl AdvertisementEvent {
    pub fn new(id: impl Into<DeviceId>, rssi: Rssi) -> Self {
        Self {
            id: id.into(),
            address: None,
            rssi,
            name: None,
            manufacturer_data: None,
            services: Vec::new(),
        }
    }

    pub fn with_address(mut self, address: MacAddr) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_manufacturer_data(mut self, bytes: Vec<u8>) -> Self {
        self.manufacturer_data = Some(bytes);
        self
    }

    pub fn with_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.services = services.into_iter().map(Into::into).collect();
        self
    }

    /// The advertised name, ignoring empty or whitespace-only strings.
    pub fn known_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}
