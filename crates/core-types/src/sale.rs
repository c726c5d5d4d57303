use crate::error::CoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded property sale.
///
/// Records are immutable once appended to the ledger. The serialized keys match
/// the document written by earlier deployments of the bot, so existing
/// `database.json` files load without conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// In-game character id of the buyer.
    #[serde(rename = "vendidoPara")]
    pub buyer_id: String,
    /// Interior value in whole currency units.
    #[serde(rename = "valorInterior")]
    pub interior_value: u64,
    /// Free-text yes/no answer.
    #[serde(rename = "temTranca")]
    pub has_lock: String,
    /// Free-text yes/no answer.
    #[serde(rename = "comGaragem")]
    pub has_garage: String,
    /// Agent name or id, as typed by the agent.
    #[serde(rename = "vendidoPor")]
    pub sold_by: String,
    pub timestamp: DateTime<Utc>,
}

impl SaleRecord {
    /// The agent name used as a grouping key: `sold_by` with backticks removed.
    ///
    /// Agents often paste their name wrapped in code markup; nothing else is
    /// normalized, so "Bob" and "bob" remain distinct agents.
    pub fn agent_key(&self) -> String {
        self.sold_by.replace('`', "")
    }

    /// Case-insensitive substring match against `sold_by`.
    pub fn sold_by_matches(&self, query: &str) -> bool {
        self.sold_by.to_lowercase().contains(&query.to_lowercase())
    }
}

/// The raw, unvalidated contents of the sale entry form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleForm {
    pub buyer_id: String,
    pub interior_value: String,
    pub has_lock: String,
    pub has_garage: String,
    pub sold_by: String,
}

impl SaleForm {
    /// Validates the form and stamps it into a `SaleRecord`.
    ///
    /// Text fields are stored as typed. The interior value is parsed with
    /// [`parse_interior_value`].
    pub fn into_record(self, timestamp: DateTime<Utc>) -> Result<SaleRecord, CoreError> {
        let interior_value = parse_interior_value(&self.interior_value)?;

        for (name, value) in [
            ("buyer_id", &self.buyer_id),
            ("has_lock", &self.has_lock),
            ("has_garage", &self.has_garage),
            ("sold_by", &self.sold_by),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::MissingField(name.to_string()));
            }
        }

        Ok(SaleRecord {
            buyer_id: self.buyer_id,
            interior_value,
            has_lock: self.has_lock,
            has_garage: self.has_garage,
            sold_by: self.sold_by,
            timestamp,
        })
    }
}

/// Parses a free-text amount such as `"$ 1.500.000"` into whole units.
///
/// Every non-digit character is discarded before parsing. Input with no
/// digits at all, or a number that does not fit in a `u64`, is rejected.
pub fn parse_interior_value(raw: &str) -> Result<u64, CoreError> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    digits
        .parse::<u64>()
        .map_err(|_| CoreError::InvalidNumericInput {
            field: "interior_value".to_string(),
            value: raw.to_string(),
        })
}
