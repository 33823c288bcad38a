//! Persisted settings document
//!
//! The JSON shape is shared with the monitor process, so key names and
//! casing (`mode`, `Standard`, `Auto`, camelCase inside) are fixed.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use crate::constants::auto::DEFAULT_SCAN_INTERVAL_MS;

/// Settings file could not be parsed into a [`ConfigDocument`]
#[derive(Debug, Error)]
#[error("malformed settings document")]
pub struct DecodeError(#[from] serde_json::Error);

/// Operating mode of the wake utility
///
/// `AutoInactive`/`AutoActive` are both the user's "automatic" choice; the
/// monitor writes back which one it observed. All four round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Disabled,
    Enabled,
    AutoInactive,
    AutoActive,
}

impl Mode {
    pub fn ordinal(self) -> u8 {
        match self {
            Mode::Disabled => 0,
            Mode::Enabled => 1,
            Mode::AutoInactive => 2,
            Mode::AutoActive => 3,
        }
    }

    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        match ordinal {
            0 => Some(Mode::Disabled),
            1 => Some(Mode::Enabled),
            2 => Some(Mode::AutoInactive),
            3 => Some(Mode::AutoActive),
            _ => None,
        }
    }

    /// Accepts both the plain variant name and the underscored spelling
    /// older settings files used.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Disabled" => Some(Mode::Disabled),
            "Enabled" => Some(Mode::Enabled),
            "AutoInactive" | "Auto_Inactive" => Some(Mode::AutoInactive),
            "AutoActive" | "Auto_Active" => Some(Mode::AutoActive),
            _ => None,
        }
    }

    pub fn is_auto(self) -> bool {
        matches!(self, Mode::AutoInactive | Mode::AutoActive)
    }

    /// Label shown to the user
    pub fn label(self) -> &'static str {
        match self {
            Mode::Disabled => "Disabled",
            Mode::Enabled => "Enabled",
            Mode::AutoInactive => "Auto (inactive)",
            Mode::AutoActive => "Auto (active)",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Mode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.ordinal())
    }
}

/// Accepts either the ordinal (written by us) or the variant name
impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OrdinalOrName {
            Ordinal(i64),
            Name(String),
        }

        match OrdinalOrName::deserialize(deserializer)? {
            OrdinalOrName::Ordinal(n) => Mode::from_ordinal(n)
                .ok_or_else(|| D::Error::custom(format!("mode ordinal {n} out of range 0..=3"))),
            OrdinalOrName::Name(name) => Mode::from_name(&name)
                .ok_or_else(|| D::Error::custom(format!("unknown mode name '{name}'"))),
        }
    }
}

/// Settings for the always-on mode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardMode {
    #[serde(rename = "keepDisplayOn")]
    pub keep_display_on: bool,
}

/// Settings for the automatic mode
///
/// The three lists are the persisted form of one matcher list, split by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoMode {
    #[serde(rename = "keepDisplayOn")]
    pub keep_display_on: bool,
    /// Not validated; the monitor decides what 0 or a negative value means
    #[serde(rename = "scanInterval")]
    pub scan_interval_ms: i32,
    #[serde(rename = "processPaths")]
    pub process_paths: Vec<String>,
    #[serde(rename = "processNames")]
    pub process_names: Vec<String>,
    #[serde(rename = "windowTitles")]
    pub window_titles: Vec<String>,
}

impl Default for AutoMode {
    fn default() -> Self {
        Self {
            keep_display_on: false,
            scan_interval_ms: DEFAULT_SCAN_INTERVAL_MS,
            process_paths: Vec::new(),
            process_names: Vec::new(),
            window_titles: Vec::new(),
        }
    }
}

/// Root settings document, always fully populated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigDocument {
    pub mode: Mode,
    #[serde(rename = "Standard")]
    pub standard: StandardMode,
    #[serde(rename = "Auto")]
    pub auto: AutoMode,
}

impl ConfigDocument {
    /// Parse a settings document; missing keys take their defaults
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Pretty-printed JSON, keys in declaration order
    pub fn encode(&self) -> Vec<u8> {
        // Plain structs, string keys and integer/bool/string leaves: serde_json cannot fail here.
        serde_json::to_vec_pretty(self).expect("settings document is always serializable")
    }
}
