//! Financial entries and the ingestion boundary that normalises backend rows.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Direction of an entry. Decided once when a row is ingested.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    Income,
    Expense,
    Purchase,
}

impl EntryType {
    pub const ALL: [EntryType; 3] = [EntryType::Income, EntryType::Expense, EntryType::Purchase];

    /// Normalises the loose type tags found in stored rows.
    ///
    /// Tags are compared case-insensitively: anything starting with `REC`
    /// (`RECEITA`, `RECCEITA`) is income, anything starting with `COMP`
    /// (`COMPRA`) is a purchase, and everything else is an expense.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().to_uppercase();
        if tag == "INCOME" || tag.starts_with("REC") {
            EntryType::Income
        } else if tag == "PURCHASE" || tag.starts_with("COMP") {
            EntryType::Purchase
        } else {
            EntryType::Expense
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            EntryType::Income => "INCOME",
            EntryType::Expense => "EXPENSE",
            EntryType::Purchase => "PURCHASE",
        }
    }

    /// +1 for money in, -1 for money out.
    pub fn sign(&self) -> f64 {
        match self {
            EntryType::Income => 1.0,
            EntryType::Expense | EntryType::Purchase => -1.0,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryType::Income => "Income",
            EntryType::Expense => "Expense",
            EntryType::Purchase => "Purchase",
        };
        f.write_str(label)
    }
}

/// A dated financial record in its canonical shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub id: String,
    /// `None` when the stored date could not be read; such entries never
    /// appear in period-bounded views.
    pub date: Option<NaiveDate>,
    pub entry_type: EntryType,
    pub category_id: String,
    pub description: String,
    pub payment_method_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<String>,
    pub client_name: String,
    pub value: f64,
}

impl Entry {
    pub fn from_draft(id: impl Into<String>, draft: EntryDraft) -> Self {
        Self {
            id: id.into(),
            date: Some(draft.date),
            entry_type: draft.entry_type,
            category_id: draft.category_id,
            description: draft.description,
            payment_method_id: draft.payment_method_id,
            bank_id: draft.bank_id.filter(|bank| !bank.is_empty()),
            client_name: draft.client_name,
            value: draft.value.abs(),
        }
    }

    /// Normalises a backend row: type tag, magnitude and calendar date.
    pub fn from_record(record: EntryRecord) -> Self {
        Self {
            date: parse_entry_date(&record.date),
            entry_type: EntryType::from_tag(&record.entry_type),
            value: record.value.abs(),
            bank_id: record.bank_id.filter(|bank| !bank.is_empty()),
            id: record.id,
            category_id: record.category_id,
            description: record.description,
            payment_method_id: record.payment_method_id,
            client_name: record.client_name,
        }
    }

    pub fn to_record(&self) -> EntryRecord {
        EntryRecord {
            id: self.id.clone(),
            date: self
                .date
                .map(|date| date.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            entry_type: self.entry_type.as_tag().to_string(),
            category_id: self.category_id.clone(),
            description: self.description.clone(),
            payment_method_id: self.payment_method_id.clone(),
            bank_id: self.bank_id.clone(),
            client_name: self.client_name.clone(),
            value: self.amount(),
        }
    }

    /// The non-negative amount every aggregation reads.
    pub fn amount(&self) -> f64 {
        self.value.abs()
    }

    /// Amount with the direction implied by the entry type.
    pub fn signed_amount(&self) -> f64 {
        self.entry_type.sign() * self.amount()
    }

    /// Case-insensitive substring match on description or client name.
    pub fn matches_search(&self, needle_lowercase: &str) -> bool {
        needle_lowercase.is_empty()
            || self.description.to_lowercase().contains(needle_lowercase)
            || self.client_name.to_lowercase().contains(needle_lowercase)
    }
}

/// Everything an entry carries except its backend-assigned id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntryDraft {
    pub date: NaiveDate,
    pub entry_type: EntryType,
    pub category_id: String,
    pub description: String,
    pub payment_method_id: String,
    #[serde(default)]
    pub bank_id: Option<String>,
    pub client_name: String,
    pub value: f64,
}

impl EntryDraft {
    pub fn new(date: NaiveDate, entry_type: EntryType, value: f64) -> Self {
        Self {
            date,
            entry_type,
            category_id: String::new(),
            description: String::new(),
            payment_method_id: String::new(),
            bank_id: None,
            client_name: String::new(),
            value,
        }
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = category_id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_client(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = client_name.into();
        self
    }

    pub fn with_payment_method(mut self, payment_method_id: impl Into<String>) -> Self {
        self.payment_method_id = payment_method_id.into();
        self
    }

    pub fn with_bank(mut self, bank_id: impl Into<String>) -> Self {
        self.bank_id = Some(bank_id.into());
        self
    }
}

/// Row shape as stored by the backend.
///
/// Field names accept both the camelCase used by stored rows and snake_case.
/// Older rows may hold signed values, values as text, or no bank at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub entry_type: String,
    #[serde(default, alias = "category_id", deserialize_with = "null_as_default")]
    pub category_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(
        default,
        alias = "payment_method_id",
        deserialize_with = "null_as_default"
    )]
    pub payment_method_id: String,
    #[serde(default, alias = "bank_id", skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<String>,
    #[serde(default, alias = "client_name", deserialize_with = "null_as_default")]
    pub client_name: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub value: f64,
}

/// Nullable columns come back as `null`; read them as the empty value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Missing(()),
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(value) => value,
        RawAmount::Text(text) => parse_amount_text(&text).unwrap_or_else(|| {
            warn!(value = %text, "unreadable amount, read as 0");
            0.0
        }),
        RawAmount::Missing(()) => 0.0,
    };
    Ok(if amount.is_finite() { amount } else { 0.0 })
}

/// Reads an amount typed as text, in either `1.234,56` or `1,234.56` style.
///
/// Whichever separator comes last is the decimal one. Blank text is zero.
pub fn parse_amount_text(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }
    let normalized = match (text.rfind(','), text.rfind('.')) {
        (Some(comma), Some(dot)) if dot > comma => text.replace(',', ""),
        (Some(_), _) => text.replace('.', "").replace(',', "."),
        _ => text.to_string(),
    };
    normalized.parse().ok()
}

/// Reads the calendar date of a stored entry.
///
/// The date is taken exactly as written: `2024-03-01T00:30:00-03:00` is the
/// 1st of March no matter which timezone the process runs in. A trailing time
/// is accepted only when it is itself well formed.
pub fn parse_entry_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let split = raw.find(['T', 't', ' ']).unwrap_or(raw.len());
    let (date_part, time_part) = raw.split_at(split);
    let date = NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()?;
    if time_part.is_empty() {
        return Some(date);
    }

    let normalized = format!("{}T{}", date_part, &time_part[1..]);
    let time_is_valid = DateTime::parse_from_rfc3339(&normalized).is_ok()
        || NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M").is_ok();
    time_is_valid.then_some(date)
}
