//! In-memory transaction repository.
//!
//! [`Engine`] owns every [`Transaction`] and keeps two views of them: the
//! records in load/creation order and an index by id. Both views live behind
//! a single lock, so every operation sees them agree.

use std::collections::HashMap;

use tokio::sync::RwLock;

pub use error::EngineError;
pub use transactions::{RawAmount, Transaction, TransactionNew, TransactionPatch};

mod error;
pub mod loader;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;

#[derive(Debug, Default)]
struct Store {
    ordered: Vec<Transaction>,
    by_id: HashMap<i64, Transaction>,
    /// Largest id ever stored, deleted or not.
    high_water: i64,
}

impl Store {
    fn insert(&mut self, tx: Transaction) {
        self.high_water = self.high_water.max(tx.id);
        self.by_id.insert(tx.id, tx.clone());
        self.ordered.push(tx);
    }

    fn next_id(&self) -> ResultEngine<i64> {
        self.high_water
            .checked_add(1)
            .ok_or(EngineError::IdsExhausted)
    }

    fn replace(&mut self, tx: Transaction) {
        if let Some(slot) = self.ordered.iter_mut().find(|t| t.id == tx.id) {
            *slot = tx.clone();
        }
        self.by_id.insert(tx.id, tx);
    }

    fn remove(&mut self, id: i64) -> Option<Transaction> {
        let removed = self.by_id.remove(&id)?;
        self.ordered.retain(|t| t.id != id);
        Some(removed)
    }
}

#[derive(Debug)]
pub struct Engine {
    store: RwLock<Store>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// All transactions in load/creation order.
    pub async fn list(&self) -> Vec<Transaction> {
        self.store.read().await.ordered.clone()
    }

    pub async fn get(&self, id: i64) -> ResultEngine<Transaction> {
        self.store
            .read()
            .await
            .by_id
            .get(&id)
            .cloned()
            .ok_or(EngineError::KeyNotFound(id))
    }

    /// Validate `cmd`, assign it the next id and store it.
    pub async fn create(&self, cmd: TransactionNew) -> ResultEngine<Transaction> {
        let validated = cmd.validate()?;

        let mut store = self.store.write().await;
        let tx = validated.with_id(store.next_id()?);
        store.insert(tx.clone());
        tracing::debug!("created transaction {}", tx.id);

        Ok(tx)
    }

    /// Merge `patch` onto the transaction `id` and return the merged record.
    pub async fn update(&self, id: i64, patch: TransactionPatch) -> ResultEngine<Transaction> {
        let mut store = self.store.write().await;
        let current = store.by_id.get(&id).ok_or(EngineError::KeyNotFound(id))?;
        let updated = patch.apply(current)?;
        store.replace(updated.clone());
        tracing::debug!("updated transaction {id}");

        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> ResultEngine<()> {
        let mut store = self.store.write().await;
        store.remove(id).ok_or(EngineError::KeyNotFound(id))?;
        tracing::debug!("deleted transaction {id}");

        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.ordered.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// The builder for `Engine`
#[derive(Debug, Default)]
pub struct EngineBuilder {
    transactions: Vec<Transaction>,
}

impl EngineBuilder {
    /// Seed the engine with already identified transactions.
    ///
    /// Ids are kept as given. When an id repeats only its first occurrence
    /// is stored.
    pub fn transactions(mut self, transactions: Vec<Transaction>) -> EngineBuilder {
        self.transactions = transactions;
        self
    }

    pub fn build(self) -> Engine {
        let mut store = Store::default();
        for tx in self.transactions {
            if store.by_id.contains_key(&tx.id) {
                tracing::warn!("skipping duplicated transaction id {}", tx.id);
                continue;
            }
            store.insert(tx);
        }

        Engine {
            store: RwLock::new(store),
        }
    }
}
