//! Transactions API endpoints

use api_types::transaction::{
    Amount, Transaction, TransactionDeleted, TransactionListResponse, TransactionNew,
    TransactionUpdate,
};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{ServerError, server::ServerState};

fn map_amount(amount: Amount) -> engine::RawAmount {
    match amount {
        Amount::Integer(value) => engine::RawAmount::Integer(value),
        Amount::Float(value) => engine::RawAmount::Float(value),
        Amount::Text(value) => engine::RawAmount::Text(value),
    }
}

fn map_transaction(tx: engine::Transaction) -> Transaction {
    Transaction {
        id: tx.id,
        kind: tx.kind,
        amount: tx.amount,
        sender: tx.sender,
        receiver: tx.receiver,
        timestamp: tx.timestamp,
        status: tx.status,
        description: tx.description,
    }
}

fn transaction_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, ServerError> {
    id.map(|Path(id)| id).map_err(|err| {
        tracing::debug!("invalid transaction id: {err}");
        ServerError::InvalidId
    })
}

/// Read a non-empty JSON object from the request body.
///
/// The `Content-Type` header is not checked.
fn json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ServerError> {
    let value: Value = serde_json::from_slice(body).map_err(|err| {
        tracing::debug!("invalid JSON body: {err}");
        ServerError::InvalidJson
    })?;

    match &value {
        Value::Object(fields) if !fields.is_empty() => {}
        _ => return Err(ServerError::InvalidJson),
    }

    serde_json::from_value(value).map_err(|err| {
        tracing::debug!("unexpected JSON body: {err}");
        ServerError::InvalidJson
    })
}

/// `/transactions/` with nothing after the slash.
pub async fn missing_id() -> ServerError {
    ServerError::InvalidId
}

pub async fn list(State(state): State<ServerState>) -> Json<TransactionListResponse> {
    let transactions: Vec<Transaction> = state
        .engine
        .list()
        .await
        .into_iter()
        .map(map_transaction)
        .collect();

    Json(TransactionListResponse {
        count: transactions.len(),
        transactions,
    })
}

pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Transaction>, ServerError> {
    let id = transaction_id(id)?;
    let tx = state.engine.get(id).await?;

    Ok(Json(map_transaction(tx)))
}

pub async fn create(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Transaction>), ServerError> {
    let payload: TransactionNew = json_body(&body)?;
    let tx = state
        .engine
        .create(engine::TransactionNew {
            kind: payload.kind,
            amount: payload.amount.map(map_amount),
            sender: payload.sender,
            receiver: payload.receiver,
            timestamp: payload.timestamp,
            status: payload.status,
            description: payload.description,
        })
        .await?;
    tracing::info!("transaction {} created", tx.id);

    Ok((StatusCode::CREATED, Json(map_transaction(tx))))
}

pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> Result<Json<Transaction>, ServerError> {
    let id = transaction_id(id)?;
    let payload: TransactionUpdate = json_body(&body)?;
    let tx = state
        .engine
        .update(
            id,
            engine::TransactionPatch {
                kind: payload.kind,
                amount: payload.amount.map(map_amount),
                sender: payload.sender,
                receiver: payload.receiver,
                timestamp: payload.timestamp,
                status: payload.status,
                description: payload.description,
            },
        )
        .await?;
    tracing::info!("transaction {id} updated");

    Ok(Json(map_transaction(tx)))
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<TransactionDeleted>, ServerError> {
    let id = transaction_id(id)?;
    state.engine.delete(id).await?;
    tracing::info!("transaction {id} deleted");

    Ok(Json(TransactionDeleted {
        message: format!("Transaction {id} deleted successfully"),
        status_code: StatusCode::OK.as_u16(),
    }))
}
