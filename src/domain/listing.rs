// src/domain/listing.rs

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// The enumerated `type` field of a listing.
///
/// Anything other than `"rent"` or `"sale"` decodes as `Other`, which never
/// matches a property-type predicate and is never shown in a rent/sale section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingType {
    Rent,
    Sale,
    #[default]
    Other,
}

impl ListingType {
    /// Parse user or store input. Only the two enumerated values are accepted.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "rent" => Some(ListingType::Rent),
            "sale" => Some(ListingType::Sale),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Rent => "rent",
            ListingType::Sale => "sale",
            ListingType::Other => "other",
        }
    }
}

/// A listing record as stored in the `listings` collection.
///
/// Decoding is lenient: every field is optional and a field holding the wrong
/// JSON type is treated as absent, so one bad record can't take down a page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_type")]
    pub listing_type: ListingType,

    #[serde(default, deserialize_with = "lenient_price")]
    pub discounted_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub regular_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub offer: bool,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,

    // Display-only attributes
    #[serde(default, deserialize_with = "lenient_count")]
    pub bedrooms: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub bathrooms: Option<u32>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub parking: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub furnished: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub img_urls: Vec<String>,
}

impl Listing {
    /// Decode a raw document body. Non-object bodies become an empty listing.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            warn!(error = %e, "listing record is not an object, treating as empty");
            Listing::default()
        })
    }

    /// Price shown on cards: the discounted price for offers, otherwise the regular one.
    pub fn display_price(&self) -> Option<f64> {
        if self.offer {
            self.discounted_price.or(self.regular_price)
        } else {
            self.regular_price.or(self.discounted_price)
        }
    }
}

/// One fetched document: the store-assigned id plus the decoded record.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDoc {
    pub id: String,
    pub data: Listing,
}

impl ListingDoc {
    pub fn new(id: impl Into<String>, data: Listing) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    pub fn from_raw(id: impl Into<String>, raw: Value) -> Self {
        Self::new(id, Listing::from_value(raw))
    }
}

// ----- lenient field decoders -----

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_type<'de, D: Deserializer<'de>>(d: D) -> Result<ListingType, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => ListingType::parse(&s).unwrap_or(ListingType::Other),
        _ => ListingType::Other,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(d)?, Value::Bool(true)))
}

fn lenient_price<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(numeric(&Value::deserialize(d)?).filter(|p| *p >= 0.0))
}

fn lenient_count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Ok(numeric(&Value::deserialize(d)?)
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= u32::MAX as f64)
        .map(|n| n as u32))
}

fn lenient_strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Accepts RFC 3339 strings, epoch seconds, or a `{seconds, nanoseconds}` map.
fn lenient_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match &value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        Value::Object(map) => {
            let secs = map.get("seconds").and_then(numeric);
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("nanos"))
                .and_then(numeric)
                .unwrap_or(0.0);
            secs.and_then(|s| Utc.timestamp_opt(s as i64, nanos as u32).single())
        }
        _ => None,
    })
}

/// Numbers pass through; numeric strings are parsed. Everything else is absent.
pub fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}
