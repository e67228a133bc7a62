//! Validation of user input before an entry is created.
//!
//! Every field is checked and all failures are reported together, so a form
//! or a command line can show each message next to its field.
use core::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::{Amount, ExpenseEntry, Payment};

/// Field an input error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Date,
    Category,
    Amount,
    Payment,
    Confirm,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Category => "category",
            Self::Amount => "amount",
            Self::Payment => "payment",
            Self::Confirm => "confirm",
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::Date => "A dátum megadása kötelező.",
            Self::Category => "Kérlek válassz kategóriát.",
            Self::Amount => "Adj meg egy 0-nál nagyobb összeget.",
            Self::Payment => "Válassz fizetési módot.",
            Self::Confirm => "Kérlek jelöld be, hogy ellenőrizted az adatokat.",
        }
    }
}

/// One rejected field with its user-facing message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl From<Field> for FieldError {
    fn from(field: Field) -> Self {
        Self {
            field,
            message: field.message(),
        }
    }
}

/// All the fields rejected by [`ExpenseDraft::validate`], in form order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.iter().any(|err| err.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<_> = self.0.iter().map(|err| err.message).collect();
        f.write_str(&messages.join(" "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw input for a new entry, as typed by the user.
#[derive(Clone, Debug, Default)]
pub struct ExpenseDraft {
    pub date: String,
    pub category: String,
    pub amount: String,
    pub label: Option<String>,
    pub notes: Option<String>,
    pub payment: Option<String>,
    pub confirmed: bool,
}

impl ExpenseDraft {
    /// Checks every field and builds the entry stamped with `now`.
    pub fn validate(self, now: DateTime<Utc>) -> Result<ExpenseEntry, ValidationErrors> {
        let mut errors = Vec::new();

        if self.date.trim().is_empty() {
            errors.push(Field::Date.into());
        }
        if self.category.is_empty() {
            errors.push(Field::Category.into());
        }
        let amount = match Amount::parse_lenient(&self.amount).value() {
            Some(value) if value > 0.0 => value,
            _ => {
                errors.push(Field::Amount.into());
                0.0
            }
        };
        let payment = match self.payment.as_deref().map(str::trim) {
            Some(tag) if !tag.is_empty() => Payment::from(tag),
            _ => {
                errors.push(Field::Payment.into());
                Payment::default()
            }
        };
        if !self.confirmed {
            errors.push(Field::Confirm.into());
        }

        if !errors.is_empty() {
            tracing::debug!(rejected = errors.len(), "expense input rejected");
            return Err(ValidationErrors(errors));
        }

        Ok(ExpenseEntry {
            id: format!("e_{}", Uuid::new_v4().simple()),
            date: self.date,
            category: self.category,
            amount: Amount::new(amount),
            label: self.label.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            payment,
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    fn valid_draft() -> ExpenseDraft {
        ExpenseDraft {
            date: "2024-05-01".to_string(),
            category: "food".to_string(),
            amount: "1250".to_string(),
            label: Some("Tesco".to_string()),
            notes: None,
            payment: Some("card".to_string()),
            confirmed: true,
        }
    }

    #[test]
    fn valid_draft_builds_entry() {
        let entry = valid_draft().validate(now()).unwrap();
        assert!(entry.id.starts_with("e_"));
        assert_eq!(entry.amount.coerced(), 1250.0);
        assert_eq!(entry.payment, Payment::Card);
        assert_eq!(entry.label, "Tesco");
        assert_eq!(entry.notes, "");
        assert_eq!(entry.created_at, "2024-05-01T10:00:00.000Z");
    }

    #[test]
    fn empty_draft_reports_every_field() {
        let errors = ExpenseDraft::default().validate(now()).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|err| err.field).collect();
        assert_eq!(
            fields,
            vec![
                Field::Date,
                Field::Category,
                Field::Amount,
                Field::Payment,
                Field::Confirm
            ]
        );
    }

    #[test]
    fn amount_must_be_positive_number() {
        for amount in ["0", "-5", "abc", "", "inf"] {
            let draft = ExpenseDraft {
                amount: amount.to_string(),
                ..valid_draft()
            };
            let errors = draft.validate(now()).unwrap_err();
            assert!(errors.contains(Field::Amount), "amount: {amount:?}");
            assert_eq!(errors.0.len(), 1);
        }
    }

    #[test]
    fn messages_join_for_display() {
        let draft = ExpenseDraft {
            confirmed: false,
            date: " ".to_string(),
            ..valid_draft()
        };
        let errors = draft.validate(now()).unwrap_err();
        assert_eq!(
            errors.to_string(),
            "A dátum megadása kötelező. Kérlek jelöld be, hogy ellenőrizted az adatokat."
        );
    }
}
