//! Discrepancy records - one row of audit output

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Sentinel `found_value` for an LC field the supporting documents never mention
pub const NOTHING_TO_COMPARE: &str = "nothing to compare of";

/// Area of the document set a check belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Parties: applicant, beneficiary, banks
    Identity,
    /// Dates, ports, shipment terms
    Logistics,
    /// Goods description, quantities, weights
    Product,
}

impl Category {
    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Identity => "Identity",
            Category::Logistics => "Logistics",
            Category::Product => "Product",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "identity" => Ok(Category::Identity),
            "logistics" => Ok(Category::Logistics),
            "product" => Ok(Category::Product),
            other => Err(format!(
                "unknown category '{}' (expected Identity, Logistics or Product)",
                other
            )),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Documents agree with the LC
    Match,
    /// Documents contradict the LC
    Discrepancy,
    /// The LC field has no counterpart in the supporting documents
    NotComparable,
}

impl Status {
    /// Canonical wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Match => "MATCH",
            Status::Discrepancy => "DISCREPANCY",
            Status::NotComparable => "NOT_COMPARABLE",
        }
    }

    /// Whether this status counts towards the discrepancy total
    pub fn is_discrepancy(&self) -> bool {
        self.as_str().contains("DISCREPANCY")
    }
}

impl FromStr for Status {
    type Err = String;

    /// Case-insensitive; spaces and hyphens stand in for underscores
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();

        match normalized.as_str() {
            "MATCH" => Ok(Status::Match),
            "DISCREPANCY" => Ok(Status::Discrepancy),
            "NOT_COMPARABLE" => Ok(Status::NotComparable),
            _ => Err(format!(
                "unknown status '{}' (expected MATCH, DISCREPANCY or NOT_COMPARABLE)",
                s
            )),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! serde_via_str {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

serde_via_str!(Category);
serde_via_str!(Status);

/// One row of the audit output
///
/// `field` mirrors the LC's own label for the requirement so rows can be
/// grouped and joined on it downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscrepancyRecord {
    /// Identity, Logistics or Product
    pub category: Category,

    /// Field name as the LC words it
    pub field: String,

    /// Expected value taken from the LC
    pub requirement: String,

    /// Observed value, or [`NOTHING_TO_COMPARE`]
    #[serde(deserialize_with = "found_value_or_absent")]
    pub found_value: String,

    /// Outcome of the check
    pub status: Status,

    /// UCP 600 article cited for the check
    pub ucp_ref: String,
}

impl DiscrepancyRecord {
    /// Whether the supporting documents had nothing to compare against
    pub fn is_absent(&self) -> bool {
        self.found_value.trim().eq_ignore_ascii_case(NOTHING_TO_COMPARE)
    }
}

/// Accepts a string, a bare scalar (written as text) or null (the sentinel)
fn found_value_or_absent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    deserializer.deserialize_any(FoundValueVisitor)
}

struct FoundValueVisitor;

impl<'de> Visitor<'de> for FoundValueVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_none<E: de::Error>(self) -> Result<String, E> {
        Ok(NOTHING_TO_COMPARE.to_string())
    }

    fn visit_unit<E: de::Error>(self) -> Result<String, E> {
        Ok(NOTHING_TO_COMPARE.to_string())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<String, D::Error> {
        deserializer.deserialize_any(self)
    }
}
