//! Seed loader.
//!
//! Reads the XML export of mobile money SMS messages and turns it into
//! [`Transaction`]s. The document looks like:
//!
//! ```xml
//! <transactions>
//!   <transaction id="1">
//!     <type>transfer</type>
//!     <amount>5000</amount>
//!     <sender>+250788123456</sender>
//!     <receiver>+250789654321</receiver>
//!     <timestamp>2024-01-15T10:30:00Z</timestamp>
//!     <status>completed</status>
//!     <description>Money transfer</description>
//!   </transaction>
//! </transactions>
//! ```
//!
//! Loading never fails: a broken seed results in an empty list and a log
//! line, so the service can still start and accept writes.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::Transaction;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse seed file: {0}")]
    Xml(#[from] quick_xml::DeError),
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(rename = "transaction", default)]
    transactions: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct Record {
    #[serde(rename = "@id")]
    id: i64,
    #[serde(rename = "type")]
    kind: String,
    amount: i64,
    sender: String,
    receiver: String,
    timestamp: String,
    status: String,
    description: String,
}

impl From<Record> for Transaction {
    fn from(value: Record) -> Self {
        Self {
            id: value.id,
            kind: value.kind,
            amount: value.amount,
            sender: value.sender,
            receiver: value.receiver,
            timestamp: value.timestamp,
            status: value.status,
            description: value.description,
        }
    }
}

/// Parse an XML document into transactions, ids as written in the document.
pub fn parse(document: &str) -> Result<Vec<Transaction>, LoadError> {
    let document: Document = quick_xml::de::from_str(document)?;
    Ok(document.transactions.into_iter().map(Into::into).collect())
}

/// Read and parse the seed file at `path`.
pub fn try_load(path: impl AsRef<Path>) -> Result<Vec<Transaction>, LoadError> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

/// Read the seed file at `path`, returning no transactions on any failure.
pub fn load(path: impl AsRef<Path>) -> Vec<Transaction> {
    let path = path.as_ref();
    match try_load(path) {
        Ok(transactions) => {
            tracing::info!(
                "loaded {} transactions from {}",
                transactions.len(),
                path.display()
            );
            transactions
        }
        Err(err) => {
            tracing::error!("{err} ({}), starting with no transactions", path.display());
            Vec::new()
        }
    }
}
