//! Transaction primitives.
//!
//! A `Transaction` is a single money movement between a sender and a
//! receiver. New records are built from a [`TransactionNew`] command and
//! changed in place through a [`TransactionPatch`].

use crate::{EngineError, ResultEngine};

/// Names of the fields a new transaction must carry, in report order.
const REQUIRED_FIELDS: [&str; 7] = [
    "type",
    "amount",
    "sender",
    "receiver",
    "timestamp",
    "status",
    "description",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub id: i64,
    pub kind: String,
    pub amount: i64,
    pub sender: String,
    pub receiver: String,
    pub timestamp: String,
    pub status: String,
    pub description: String,
}

/// Amount before coercion to an integer.
#[derive(Clone, Debug, PartialEq)]
pub enum RawAmount {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawAmount {
    /// Coerce the amount to an integer.
    ///
    /// Floats are truncated toward zero, strings must hold an integer.
    pub fn coerce(&self) -> ResultEngine<i64> {
        match self {
            Self::Integer(value) => Ok(*value),
            Self::Float(value) => {
                if !value.is_finite() || *value >= i64::MAX as f64 || *value < i64::MIN as f64 {
                    return Err(EngineError::InvalidAmount(format!("{value} is out of range")));
                }
                Ok(value.trunc() as i64)
            }
            Self::Text(value) => value
                .trim()
                .parse()
                .map_err(|_| EngineError::InvalidAmount(format!("\"{value}\" is not an integer"))),
        }
    }
}

impl From<i64> for RawAmount {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// Command to create a transaction. The id is assigned by the engine.
#[derive(Clone, Debug, Default)]
pub struct TransactionNew {
    pub kind: Option<String>,
    pub amount: Option<RawAmount>,
    pub sender: Option<String>,
    pub receiver: Option<String>,
    pub timestamp: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
}

impl TransactionNew {
    fn missing_fields(&self) -> Vec<String> {
        let present = [
            self.kind.is_some(),
            self.amount.is_some(),
            self.sender.is_some(),
            self.receiver.is_some(),
            self.timestamp.is_some(),
            self.status.is_some(),
            self.description.is_some(),
        ];

        REQUIRED_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Check the command and build the record it describes.
    ///
    /// Validation happens before any id is consumed so a rejected command
    /// leaves no trace.
    pub(crate) fn validate(self) -> ResultEngine<Validated> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(EngineError::MissingFields(missing));
        }

        Ok(Validated(Transaction {
            id: 0,
            kind: required(self.kind, "type")?,
            amount: required(self.amount, "amount")?.coerce()?,
            sender: required(self.sender, "sender")?,
            receiver: required(self.receiver, "receiver")?,
            timestamp: required(self.timestamp, "timestamp")?,
            status: required(self.status, "status")?,
            description: required(self.description, "description")?,
        }))
    }
}

fn required<T>(value: Option<T>, name: &str) -> ResultEngine<T> {
    value.ok_or_else(|| EngineError::MissingFields(vec![name.to_string()]))
}

/// A new transaction that passed validation and only lacks its id.
#[derive(Debug)]
pub(crate) struct Validated(Transaction);

impl Validated {
    pub(crate) fn with_id(self, id: i64) -> Transaction {
        Transaction { id, ..self.0 }
    }
}

/// Partial update of a transaction. `None` fields keep their current value.
#[derive(Clone, Debug, Default)]
pub struct TransactionPatch {
    pub kind: Option<String>,
    pub amount: Option<RawAmount>,
    pub sender: Option<String>,
    pub receiver: Option<String>,
    pub timestamp: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
}

impl TransactionPatch {
    /// Returns `tx` with the patch applied. The id never changes.
    pub(crate) fn apply(self, tx: &Transaction) -> ResultEngine<Transaction> {
        let amount = match self.amount {
            Some(amount) => amount.coerce()?,
            None => tx.amount,
        };

        Ok(Transaction {
            id: tx.id,
            kind: self.kind.unwrap_or_else(|| tx.kind.clone()),
            amount,
            sender: self.sender.unwrap_or_else(|| tx.sender.clone()),
            receiver: self.receiver.unwrap_or_else(|| tx.receiver.clone()),
            timestamp: self.timestamp.unwrap_or_else(|| tx.timestamp.clone()),
            status: self.status.unwrap_or_else(|| tx.status.clone()),
            description: self.description.unwrap_or_else(|| tx.description.clone()),
        })
    }
}
