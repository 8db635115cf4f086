//! Typed decoding of raw slot values.
//!
//! Every slot is JSON text. A value that is missing, malformed, of the wrong
//! type or negative is replaced by the slot's documented default.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::db::StoreError;
use crate::models::{PricingConfig, Quote, SettingKey, SlotKind, TreeItem};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum SlotDecodeError {
    #[error("not valid JSON: {0}")]
    Json(String),

    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("negative value {0}")]
    Negative(Decimal),

    #[error("value {0} exceeds {max}", max = PricingConfig::MAX_VALUE)]
    TooLarge(Decimal),
}

impl From<serde_json::Error> for SlotDecodeError {
    fn from(err: serde_json::Error) -> Self {
        SlotDecodeError::Json(err.to_string())
    }
}

/// A Rust type that one [`SlotKind`] decodes to.
pub(crate) trait SlotValue: Sized + Default {
    const KIND: SlotKind;

    fn decode(raw: &str) -> Result<Self, SlotDecodeError>;

    fn encode(&self) -> Result<String, StoreError>;
}

/// Decode `raw` for `key`, falling back to the key's default.
pub(crate) fn resolve<T: SlotValue>(
    key: SettingKey,
    raw: Option<&str>,
) -> T {
    debug_assert_eq!(key.kind(), T::KIND, "slot {} read as wrong kind", key.as_str());

    if let Some(raw) = raw {
        match T::decode(raw) {
            Ok(value) => return value,
            Err(error) => warn!(
                key = key.as_str(),
                %error,
                "discarding unreadable slot value, using default"
            ),
        }
    }

    T::decode(key.default_raw()).unwrap_or_default()
}

impl SlotValue for Decimal {
    const KIND: SlotKind = SlotKind::Number;

    fn decode(raw: &str) -> Result<Self, SlotDecodeError> {
        let value = match parse_decimal_text(raw) {
            Some(value) => value,
            None => match serde_json::from_str::<Value>(raw)? {
                Value::String(s) => {
                    parse_decimal_text(&s).ok_or(SlotDecodeError::NotANumber(s))?
                }
                Value::Number(n) => {
                    let text = n.to_string();
                    parse_decimal_text(&text).ok_or(SlotDecodeError::NotANumber(text))?
                }
                other => {
                    return Err(SlotDecodeError::WrongType {
                        expected: "number",
                        found: json_type_name(&other),
                    });
                }
            },
        };

        if value < Decimal::ZERO {
            return Err(SlotDecodeError::Negative(value));
        }
        if value > PricingConfig::MAX_VALUE {
            return Err(SlotDecodeError::TooLarge(value));
        }
        Ok(value)
    }

    /// Plain JSON number literal with the exact decimal digits.
    fn encode(&self) -> Result<String, StoreError> {
        Ok(self.normalize().to_string())
    }
}

impl SlotValue for bool {
    const KIND: SlotKind = SlotKind::Boolean;

    fn decode(raw: &str) -> Result<Self, SlotDecodeError> {
        match serde_json::from_str::<Value>(raw)? {
            Value::Bool(b) => Ok(b),
            Value::String(s) if s == "true" => Ok(true),
            Value::String(s) if s == "false" => Ok(false),
            other => Err(SlotDecodeError::WrongType {
                expected: "boolean",
                found: json_type_name(&other),
            }),
        }
    }

    fn encode(&self) -> Result<String, StoreError> {
        Ok(self.to_string())
    }
}

impl SlotValue for Vec<Quote> {
    const KIND: SlotKind = SlotKind::QuoteList;

    /// Entries that fail to parse, carry no trees, or hold a tree with an
    /// out-of-range measurement are dropped individually; the rest of the
    /// history survives.
    fn decode(raw: &str) -> Result<Self, SlotDecodeError> {
        let entries = match serde_json::from_str::<Value>(raw)? {
            Value::Array(entries) => entries,
            other => {
                return Err(SlotDecodeError::WrongType {
                    expected: "array",
                    found: json_type_name(&other),
                });
            }
        };

        let quotes = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<Quote>(entry) {
                Ok(quote) if quote.trees.is_empty() => {
                    warn!(index, id = %quote.id, "dropping stored quote without trees");
                    None
                }
                Ok(quote) => match quote.trees.iter().try_for_each(TreeItem::validate) {
                    Ok(()) => Some(quote),
                    Err(error) => {
                        warn!(
                            index,
                            id = %quote.id,
                            %error,
                            "dropping stored quote with invalid tree"
                        );
                        None
                    }
                },
                Err(error) => {
                    warn!(index, %error, "dropping unreadable stored quote");
                    None
                }
            })
            .collect();

        Ok(quotes)
    }

    fn encode(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }
}

fn parse_decimal_text(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
