//! `WIFI:` network credential payloads
//!
//! Wire format understood by phone camera apps:
//! `WIFI:T:<WPA|WEP|nopass>;S:<ssid>;P:<password>;H:<true|false>;;`
//! with `\ ; , " :` escaped by a leading backslash inside values.

use crate::error::PayloadError;
use std::fmt;
use std::str::FromStr;

const PREFIX: &str = "WIFI:";
const RESERVED: [char; 5] = ['\\', ';', ',', '"', ':'];

/// Network authentication type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Security {
    /// WPA/WPA2/WPA3 personal
    #[default]
    Wpa,
    /// Legacy WEP
    Wep,
    /// No password
    Open,
}

impl Security {
    /// Value of the `T:` field
    pub fn token(&self) -> &'static str {
        match self {
            Security::Wpa => "WPA",
            Security::Wep => "WEP",
            Security::Open => "nopass",
        }
    }

    /// Whether the network needs a password
    pub fn requires_password(&self) -> bool {
        !matches!(self, Security::Open)
    }
}

impl fmt::Display for Security {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Security {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wpa" => Ok(Security::Wpa),
            "wep" => Ok(Security::Wep),
            "nopass" | "open" | "" => Ok(Security::Open),
            other => Err(PayloadError::Malformed(format!(
                "unknown security type '{other}'"
            ))),
        }
    }
}

/// Credentials of one Wi-Fi network
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WiFiCredential {
    /// Network name
    pub ssid: String,
    /// Pre-shared key; ignored for open networks
    pub password: String,
    /// Authentication type
    pub security: Security,
    /// The network does not broadcast its SSID
    pub hidden: bool,
}

impl WiFiCredential {
    /// Visible network with the given credentials
    pub fn new(ssid: impl Into<String>, password: impl Into<String>, security: Security) -> Self {
        Self {
            ssid: ssid.into(),
            password: password.into(),
            security,
            hidden: false,
        }
    }

    /// Open network, no password
    pub fn open(ssid: impl Into<String>) -> Self {
        Self::new(ssid, "", Security::Open)
    }

    /// Mark the network as hidden or visible
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Check the builder invariants: a non-blank SSID, and a password unless
    /// the network is open
    pub fn validate(&self) -> Result<(), PayloadError> {
        if self.ssid.trim().is_empty() {
            return Err(PayloadError::EmptySsid);
        }
        if self.security.requires_password() && self.password.is_empty() {
            return Err(PayloadError::MissingPassword(self.security.token()));
        }
        Ok(())
    }
}

/// Build the `WIFI:` payload string for a credential
pub fn build_wifi_payload(cred: &WiFiCredential) -> Result<String, PayloadError> {
    cred.validate()?;
    let password = if cred.security.requires_password() {
        escape_field(&cred.password)
    } else {
        String::new()
    };
    Ok(format!(
        "{PREFIX}T:{};S:{};P:{};H:{};;",
        cred.security.token(),
        escape_field(&cred.ssid),
        password,
        cred.hidden
    ))
}

/// Parse a scanned `WIFI:` payload. Fields may come in any order, unknown
/// fields are skipped, a missing `T:` means an open network and a missing
/// `H:` means visible.
pub fn parse_wifi_payload(text: &str) -> Result<WiFiCredential, PayloadError> {
    let body = text
        .get(..PREFIX.len())
        .filter(|head| head.eq_ignore_ascii_case(PREFIX))
        .map(|_| &text[PREFIX.len()..])
        .ok_or_else(|| PayloadError::Malformed("missing WIFI: prefix".to_owned()))?;

    let mut cred = WiFiCredential::open("");
    let mut ssid = None;
    for field in split_fields(body)? {
        let Some((key, value)) = field.split_once(':') else {
            return Err(PayloadError::Malformed(format!("field without key: '{field}'")));
        };
        let value = unescape(value);
        match key {
            "T" => cred.security = value.parse()?,
            "S" => ssid = Some(value),
            "P" => cred.password = value,
            "H" => {
                cred.hidden = match value.to_ascii_lowercase().as_str() {
                    "true" => true,
                    "false" | "" => false,
                    other => {
                        return Err(PayloadError::Malformed(format!(
                            "invalid hidden flag '{other}'"
                        )));
                    }
                }
            }
            _ => tracing::trace!(key, "skipping unknown Wi-Fi field"),
        }
    }

    cred.ssid = ssid.ok_or(PayloadError::EmptySsid)?;
    if cred.ssid.trim().is_empty() {
        return Err(PayloadError::EmptySsid);
    }
    Ok(cred)
}

fn escape_field(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        if RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Raw `K:value` fields up to the first empty field. Escapes are kept so a
/// value may still contain `\:`.
fn split_fields(body: &str) -> Result<Vec<&str>, PayloadError> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            ';' => {
                if i == start {
                    return Ok(fields);
                }
                fields.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if escaped {
        return Err(PayloadError::Malformed("dangling escape".to_owned()));
    }
    if start < body.len() {
        fields.push(&body[start..]);
    }
    Ok(fields)
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            _ => out.push(c),
        }
    }
    out
}
