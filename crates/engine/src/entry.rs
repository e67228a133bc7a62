//! The module contains the [`ExpenseEntry`] type, one recorded cost.
//!
//! Entries come back from persisted JSON written by older versions or by
//! hand, so reading them never fails on a single field: amounts that are not
//! numbers become [`Amount::NAN`], text fields that are not strings become
//! empty. Rejecting bad input is the job of [`crate::validation`].
use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

/// Category used when an entry has none.
pub const FALLBACK_CATEGORY: &str = "egyeb";

/// Stored amount of an entry.
///
/// Holds `None` when the persisted value was missing or not a number. Use
/// [`Amount::coerced`] to get the value the aggregator works with.
///
/// # Examples
///
/// ```rust
/// use engine::Amount;
///
/// assert_eq!(Amount::new(12.5).coerced(), 12.5);
/// assert_eq!(Amount::NAN.coerced(), 0.0);
/// assert_eq!(Amount::new(f64::INFINITY).coerced(), 0.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Amount(Option<f64>);

impl Amount {
    /// An amount that is not a number.
    pub const NAN: Amount = Amount(None);

    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(Some(value))
    }

    /// Returns the raw value, if any.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        self.0
    }

    /// Returns the value when it is a finite number, 0 otherwise.
    #[must_use]
    pub fn coerced(self) -> f64 {
        match self.0 {
            Some(value) if value.is_finite() => value,
            _ => 0.0,
        }
    }

    /// Parses user or stored text the way a lenient numeric conversion
    /// would: surrounding whitespace is ignored and blank text is 0.
    #[must_use]
    pub fn parse_lenient(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self::new(0.0);
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Self::new(value),
            _ => Self::NAN,
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(value) if value.is_finite() => serializer.serialize_f64(value),
            _ => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    /// Works on the raw JSON text so that numbers outside the `f64` range
    /// (`1e400`) become infinite, and thus coerce to 0, instead of failing
    /// the whole history.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(match Raw::classify(&raw) {
            Raw::Number(text) => text.parse::<f64>().map_or(Amount::NAN, Amount::new),
            Raw::String(text) => Amount::parse_lenient(&text),
            Raw::Other => Amount::NAN,
        })
    }
}

/// Payment method tag. Not used by aggregation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Payment {
    #[default]
    Cash,
    Card,
    Transfer,
    Other(String),
}

impl Payment {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Payment::Cash => "cash",
            Payment::Card => "card",
            Payment::Transfer => "transfer",
            Payment::Other(tag) => tag,
        }
    }
}

impl From<&str> for Payment {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "cash" => Payment::Cash,
            "card" => Payment::Card,
            "transfer" => Payment::Transfer,
            _ => Payment::Other(value.trim().to_string()),
        }
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Payment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Payment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = lenient_string(deserializer)?;
        Ok(Payment::from(text.as_str()))
    }
}

/// One recorded expense.
///
/// Entries are immutable once stored; the engine only ever reads them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    /// Free-form calendar date as typed by the user. Never parsed.
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub category: String,
    pub amount: Amount,
    #[serde(deserialize_with = "lenient_string")]
    pub label: String,
    #[serde(deserialize_with = "lenient_string")]
    pub notes: String,
    pub payment: Payment,
    /// Creation timestamp (RFC 3339). Informational only.
    #[serde(rename = "createdAt", deserialize_with = "lenient_string")]
    pub created_at: String,
}

impl ExpenseEntry {
    /// Shorthand used by tests and tools: an entry with only the fields the
    /// aggregator looks at.
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<Amount>,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            amount: amount.into(),
            ..Default::default()
        }
    }

    /// Grouping key: the category, or [`FALLBACK_CATEGORY`] when empty.
    #[must_use]
    pub fn category_key(&self) -> &str {
        if self.category.is_empty() {
            FALLBACK_CATEGORY
        } else {
            &self.category
        }
    }
}

impl fmt::Display for ExpenseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date,
            self.category_key(),
            crate::format::format_forint(self.amount.coerced()),
            self.payment
        )
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = Box::<RawValue>::deserialize(deserializer)?;
    Ok(match Raw::classify(&raw) {
        Raw::Number(text) => text.to_string(),
        Raw::String(text) => text,
        Raw::Other => String::new(),
    })
}

/// Shape of one stored JSON value, read without converting numbers.
enum Raw<'a> {
    Number(&'a str),
    String(String),
    Other,
}

impl<'a> Raw<'a> {
    fn classify(raw: &'a RawValue) -> Self {
        let text = raw.get();
        match text.as_bytes().first() {
            Some(b'-' | b'0'..=b'9') => Raw::Number(text),
            Some(b'"') => serde_json::from_str(text).map_or(Raw::Other, Raw::String),
            _ => Raw::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_reads_numbers_and_numeric_strings() {
        let entry: ExpenseEntry =
            serde_json::from_str(r#"{"id":"a","category":"food","amount":" 12.5 "}"#).unwrap();
        assert_eq!(entry.amount.coerced(), 12.5);

        let entry: ExpenseEntry = serde_json::from_str(r#"{"amount":300}"#).unwrap();
        assert_eq!(entry.amount, Amount::new(300.0));
    }

    #[test]
    fn amount_that_is_not_a_number_coerces_to_zero() {
        for raw in [r#"{"amount":"abc"}"#, r#"{"amount":null}"#, r#"{"amount":true}"#, "{}"] {
            let entry: ExpenseEntry = serde_json::from_str(raw).unwrap();
            assert_eq!(entry.amount.coerced(), 0.0, "input: {raw}");
        }
    }

    #[test]
    fn out_of_range_amount_keeps_the_other_fields() {
        let entry: ExpenseEntry =
            serde_json::from_str(r#"{"id":"b","category":"food","amount":1e400,"label":12}"#)
                .unwrap();
        assert_eq!(entry.category, "food");
        assert_eq!(entry.label, "12");
        assert_eq!(entry.amount.value(), Some(f64::INFINITY));
        assert_eq!(entry.amount.coerced(), 0.0);
    }

    #[test]
    fn missing_category_falls_back() {
        let entry: ExpenseEntry = serde_json::from_str(r#"{"category":"","amount":200}"#).unwrap();
        assert_eq!(entry.category_key(), FALLBACK_CATEGORY);

        let entry: ExpenseEntry = serde_json::from_str(r#"{"category":null}"#).unwrap();
        assert_eq!(entry.category_key(), FALLBACK_CATEGORY);
    }

    #[test]
    fn serializes_with_original_keys() {
        let mut entry = ExpenseEntry::new("e_1", "food", 1000.0);
        entry.payment = Payment::Card;
        entry.created_at = "2024-05-01T10:00:00+00:00".to_string();

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["createdAt"], "2024-05-01T10:00:00+00:00");
        assert_eq!(json["payment"], "card");
        assert_eq!(json["amount"], 1000.0);
    }

    #[test]
    fn unknown_payment_is_kept() {
        let entry: ExpenseEntry = serde_json::from_str(r#"{"payment":"szep-kartya"}"#).unwrap();
        assert_eq!(entry.payment, Payment::Other("szep-kartya".to_string()));
        assert_eq!(entry.payment.to_string(), "szep-kartya");
    }
}
