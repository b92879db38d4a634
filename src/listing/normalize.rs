// src/listing/normalize.rs

use serde::Serialize;
use serde_json::Value;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

// Upstream record
//  ├── id            (string | number, required)
//  ├── name
//  ├── price         (number | numeric string)
//  ├── city / state  (or location.city / location.state)
//  ├── types[]       (first entry is shown)
//  ├── images[]      (strings or { url })
//  └── image

/// Canonical, render-ready listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub id: String,
    pub name: String,
    pub price: Option<f64>,
    pub location: Location,
    pub property_type: Option<String>,
    pub image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    pub city: Option<String>,
    pub state: Option<String>,
}

impl Location {
    /// "City, State", whichever parts are present.
    pub fn display(&self) -> Option<String> {
        let parts: Vec<&str> = [self.city.as_deref(), self.state.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Known wrappers around the list of records, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Envelope {
    BareArray,
    Data,
    Items,
    Results,
    Properties,
}

impl Envelope {
    fn extract(self, payload: &Value) -> Option<&Vec<Value>> {
        match self {
            Envelope::BareArray => payload.as_array(),
            Envelope::Data => payload.get("data")?.as_array(),
            Envelope::Items => payload.get("items")?.as_array(),
            Envelope::Results => payload.get("results")?.as_array(),
            Envelope::Properties => payload.get("properties")?.as_array(),
        }
    }

    /// First envelope that matches `payload`, with the records it wraps.
    pub fn detect(payload: &Value) -> Option<(Envelope, &Vec<Value>)> {
        Envelope::iter().find_map(|envelope| envelope.extract(payload).map(|items| (envelope, items)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub records: Vec<PropertyRecord>,
    /// Elements excluded because they were not objects or had no usable id.
    pub dropped: usize,
    /// `None` when no envelope matched and the page is treated as empty.
    pub envelope: Option<Envelope>,
}

/// Why an upstream element did not become a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
enum Rejected {
    #[error("not an object")]
    NotAnObject,
    #[error("missing id")]
    MissingId,
}

pub struct ResponseNormalizer {
    placeholder_image: String,
}

impl ResponseNormalizer {
    pub fn new(placeholder_image: impl Into<String>) -> Self {
        Self {
            placeholder_image: placeholder_image.into(),
        }
    }

    pub fn normalize(&self, payload: &Value) -> Normalized {
        let Some((envelope, items)) = Envelope::detect(payload) else {
            log::debug!("no known envelope in upstream payload; treating page as empty");
            return Normalized {
                records: Vec::new(),
                dropped: 0,
                envelope: None,
            };
        };

        let mut records = Vec::with_capacity(items.len());
        let mut dropped = 0;

        for (index, item) in items.iter().enumerate() {
            match self.to_record(item) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    dropped += 1;
                    log::debug!("dropping upstream record #{index}: {reason}");
                }
            }
        }

        Normalized {
            records,
            dropped,
            envelope: Some(envelope),
        }
    }

    fn to_record(&self, item: &Value) -> Result<PropertyRecord, Rejected> {
        let obj = item.as_object().ok_or(Rejected::NotAnObject)?;
        let id = obj
            .get("id")
            .and_then(record_id)
            .ok_or(Rejected::MissingId)?;

        let nested = obj.get("location");
        let location = Location {
            city: text_field(obj.get("city"))
                .or_else(|| text_field(nested.and_then(|l| l.get("city")))),
            state: text_field(obj.get("state"))
                .or_else(|| text_field(nested.and_then(|l| l.get("state")))),
        };

        Ok(PropertyRecord {
            id,
            name: text_field(obj.get("name")).unwrap_or_default(),
            price: obj.get("price").and_then(numeric),
            location,
            property_type: obj
                .get("types")
                .and_then(Value::as_array)
                .and_then(|types| types.first())
                .and_then(|first| text_field(Some(first))),
            image_url: self.image_url(item),
        })
    }

    /// `images[0]` as a string, then `images[0].url`, then `image`, then the
    /// placeholder.
    fn image_url(&self, item: &Value) -> String {
        let first = item
            .get("images")
            .and_then(Value::as_array)
            .and_then(|images| images.first());

        first
            .and_then(|f| text_field(Some(f)))
            .or_else(|| first.and_then(|f| text_field(f.get("url"))))
            .or_else(|| text_field(item.get("image")))
            .unwrap_or_else(|| self.placeholder_image.clone())
    }
}

fn record_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_field(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}
