use serde::{Deserialize, Serialize};

/// JSON body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    pub status_code: u16,
}

pub mod transaction {
    use super::*;

    /// Amount as sent by a client.
    ///
    /// Clients are not strict about the JSON type of `amount`, so numbers and
    /// numeric strings are all accepted here and coerced by the engine.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum Amount {
        Integer(i64),
        Float(f64),
        Text(String),
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Transaction {
        pub id: i64,
        #[serde(rename = "type")]
        pub kind: String,
        pub amount: i64,
        pub sender: String,
        pub receiver: String,
        pub timestamp: String,
        pub status: String,
        pub description: String,
    }

    /// Payload of `POST /transactions`.
    ///
    /// Every field is optional at the wire level so that the engine can report
    /// all the missing ones at once.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct TransactionNew {
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub amount: Option<Amount>,
        pub sender: Option<String>,
        pub receiver: Option<String>,
        pub timestamp: Option<String>,
        pub status: Option<String>,
        pub description: Option<String>,
    }

    /// Payload of `PUT /transactions/{id}`. Absent fields are left untouched.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub amount: Option<Amount>,
        pub sender: Option<String>,
        pub receiver: Option<String>,
        pub timestamp: Option<String>,
        pub status: Option<String>,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub transactions: Vec<Transaction>,
        pub count: usize,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionDeleted {
        pub message: String,
        pub status_code: u16,
    }
}

#[cfg(test)]
mod tests {
    use super::transaction::*;
    use super::*;

    #[test]
    fn amount_accepts_numbers_and_strings() {
        let payload: TransactionNew =
            serde_json::from_str(r#"{"amount": 100}"#).unwrap();
        assert_eq!(payload.amount, Some(Amount::Integer(100)));

        let payload: TransactionNew =
            serde_json::from_str(r#"{"amount": 12.5}"#).unwrap();
        assert_eq!(payload.amount, Some(Amount::Float(12.5)));

        let payload: TransactionNew =
            serde_json::from_str(r#"{"amount": "250"}"#).unwrap();
        assert_eq!(payload.amount, Some(Amount::Text("250".to_string())));
    }

    #[test]
    fn update_ignores_id() {
        let payload: TransactionUpdate =
            serde_json::from_str(r#"{"id": 42, "status": "pending"}"#).unwrap();
        assert_eq!(payload.status.as_deref(), Some("pending"));
        assert!(payload.kind.is_none());
    }

    #[test]
    fn transaction_uses_type_key() {
        let tx = Transaction {
            id: 1,
            kind: "deposit".to_string(),
            amount: 10,
            sender: "a".to_string(),
            receiver: "b".to_string(),
            timestamp: "t".to_string(),
            status: "completed".to_string(),
            description: "d".to_string(),
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["type"], "deposit");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn error_body_skips_empty_message() {
        let body = ErrorBody {
            error: "Endpoint not found".to_string(),
            message: None,
            status_code: 404,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("message").is_none());
        assert_eq!(value["status_code"], 404);
    }
}
