//! Protocol payloads carried inside QR symbols

/// Wi-Fi network credentials (`WIFI:` payloads)
pub mod wifi;

pub use wifi::{Security, WiFiCredential, build_wifi_payload, parse_wifi_payload};
