//! Part attributes
//!
//! Provides [`AttributeKey`], the closed set of attributes a part can
//! inherit from its base, and [`PartAttribute`], one locally stored entry.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Inheritable part attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AttributeKey {
    /// Manufacturer part number
    #[serde(rename = "MPN")]
    Mpn,
    /// Component value (e.g. "10k")
    #[serde(rename = "value")]
    Value,
    /// Manufacturer name
    #[serde(rename = "manufacturer")]
    Manufacturer,
    /// Datasheet URL
    #[serde(rename = "datasheet")]
    Datasheet,
    /// Free-form description
    #[serde(rename = "description")]
    Description,
}

impl AttributeKey {
    /// All keys, in report column order
    pub const ALL: [AttributeKey; 5] = [
        AttributeKey::Mpn,
        AttributeKey::Value,
        AttributeKey::Manufacturer,
        AttributeKey::Datasheet,
        AttributeKey::Description,
    ];

    /// Column label
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            AttributeKey::Mpn => "MPN",
            AttributeKey::Value => "Value",
            AttributeKey::Manufacturer => "Manufacturer",
            AttributeKey::Datasheet => "Datasheet",
            AttributeKey::Description => "Description",
        }
    }
}

impl Display for AttributeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Locally stored attribute of a part
///
/// When `inherited` is set the local `value` is ignored and the effective
/// value comes from the base part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartAttribute {
    /// Locally authored value
    #[serde(default)]
    pub value: String,
    /// Take the value from the base part instead
    #[serde(default)]
    pub inherited: bool,
}

impl PartAttribute {
    /// Locally authored value
    #[inline]
    #[must_use]
    pub fn local(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            inherited: false,
        }
    }

    /// Value taken from the base part
    #[inline]
    #[must_use]
    pub fn inherited() -> Self {
        Self {
            value: String::new(),
            inherited: true,
        }
    }
}
