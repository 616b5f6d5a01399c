//! Position gap configuration with flexible parsing.
//!
//! This module provides the [`GapSetting`] type which supports three forms:
//!
//! - `"current"`: the gap used by current Planka servers (65536)
//! - `"legacy"`: the gap used by older data (65535)
//! - a positive integer: any custom gap
//!
//! # Examples
//!
//! ```
//! use planka_config::GapSetting;
//!
//! let gap: GapSetting = serde_json::from_str(r#""legacy""#).unwrap();
//! assert_eq!(gap.resolve().get(), 65_535);
//!
//! let gap: GapSetting = serde_json::from_str("1024").unwrap();
//! assert_eq!(gap.resolve().get(), 1024);
//! ```

use std::fmt;
use std::str::FromStr;

use planka_protocol::PositionGap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, Result};

/// The configured distance between adjacent positions.
///
/// # Examples
///
/// ```
/// use planka_config::GapSetting;
///
/// assert_eq!(GapSetting::default(), GapSetting::Current);
/// assert_eq!("legacy".parse::<GapSetting>().unwrap(), GapSetting::Legacy);
/// assert!("0".parse::<GapSetting>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GapSetting {
    /// The current gap (65536).
    #[default]
    Current,
    /// The legacy gap (65535).
    Legacy,
    /// A custom positive gap.
    Custom(PositionGap),
}

impl GapSetting {
    /// Returns the gap this setting stands for.
    #[must_use]
    pub fn resolve(self) -> PositionGap {
        match self {
            Self::Current => PositionGap::CURRENT,
            Self::Legacy => PositionGap::LEGACY,
            Self::Custom(gap) => gap,
        }
    }

    /// Builds a custom setting from an integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero or negative.
    pub fn custom(value: i64) -> Result<Self> {
        PositionGap::new(value)
            .map(Self::Custom)
            .map_err(|_| ConfigError::InvalidPositionGap(value.to_string()))
    }
}

impl FromStr for GapSetting {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "current" => Ok(Self::Current),
            "legacy" => Ok(Self::Legacy),
            other => other
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidPositionGap(s.to_string()))
                .and_then(Self::custom),
        }
    }
}

impl fmt::Display for GapSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => f.write_str("current"),
            Self::Legacy => f.write_str("legacy"),
            Self::Custom(gap) => write!(f, "{gap}"),
        }
    }
}

impl Serialize for GapSetting {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Presets are written by name, custom gaps as plain numbers
        match self {
            Self::Custom(gap) => serializer.serialize_i64(gap.get()),
            preset => serializer.collect_str(preset),
        }
    }
}

impl<'de> Deserialize<'de> for GapSetting {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct GapVisitor;

        impl Visitor<'_> for GapVisitor {
            type Value = GapSetting;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("\"current\", \"legacy\" or a positive integer")
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.parse().map_err(de::Error::custom)
            }

            fn visit_i64<E>(self, v: i64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                GapSetting::custom(v).map_err(de::Error::custom)
            }

            fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                let v = i64::try_from(v)
                    .map_err(|_| de::Error::custom(ConfigError::InvalidPositionGap(v.to_string())))?;
                self.visit_i64(v)
            }
        }

        deserializer.deserialize_any(GapVisitor)
    }
}
