use std::{collections::HashSet, path::PathBuf, sync::Arc};

use engine::{Engine, EngineError, RawAmount, TransactionNew, TransactionPatch, loader};
use uuid::Uuid;

const SEED: &str = r#"<transactions>
  <transaction id="1">
    <type>transfer</type>
    <amount>5000</amount>
    <sender>+250788123456</sender>
    <receiver>+250789654321</receiver>
    <timestamp>2024-01-15T10:30:00Z</timestamp>
    <status>completed</status>
    <description>Money transfer to John</description>
  </transaction>
  <transaction id="2">
    <type>deposit</type>
    <amount>25000</amount>
    <sender>Bank</sender>
    <receiver>+250788123456</receiver>
    <timestamp>2024-01-15T11:00:00Z</timestamp>
    <status>completed</status>
    <description>Cash deposit</description>
  </transaction>
</transactions>"#;

fn write_seed(content: &str) -> PathBuf {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_data");
    std::fs::create_dir_all(&root).unwrap();

    let path = root.join(format!("seed_{}.xml", Uuid::new_v4()));
    std::fs::write(&path, content).unwrap();
    path
}

fn new_cmd(description: &str) -> TransactionNew {
    TransactionNew {
        kind: Some("deposit".to_string()),
        amount: Some(RawAmount::Integer(100_000)),
        sender: Some("+250788999999".to_string()),
        receiver: Some("+250789000000".to_string()),
        timestamp: Some("2024-01-16T20:00:00Z".to_string()),
        status: Some("completed".to_string()),
        description: Some(description.to_string()),
    }
}

#[tokio::test]
async fn engine_from_seed_file() {
    let path = write_seed(SEED);
    let engine = Engine::builder().transactions(loader::load(&path)).build();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(engine.len().await, 2);
    assert_eq!(engine.get(2).await.unwrap().description, "Cash deposit");

    let tx = engine.create(new_cmd("x")).await.unwrap();
    assert_eq!(tx.id, 3);
}

#[tokio::test]
async fn broken_seed_file_starts_empty() {
    let path = write_seed("<transactions><transaction id=\"1\"><type>transfer</type>");
    let engine = Engine::builder().transactions(loader::load(&path)).build();
    std::fs::remove_file(&path).unwrap();

    assert!(engine.is_empty().await);
    let tx = engine.create(new_cmd("first")).await.unwrap();
    assert_eq!(tx.id, 1);
}

#[tokio::test]
async fn create_list_delete_round_trip() {
    let engine = Engine::builder().build();
    let tx = engine.create(new_cmd("round trip")).await.unwrap();

    let listed = engine.list().await;
    assert_eq!(listed.iter().filter(|t| **t == tx).count(), 1);

    engine.delete(tx.id).await.unwrap();
    assert!(engine.list().await.iter().all(|t| t.id != tx.id));
    assert_eq!(engine.get(tx.id).await, Err(EngineError::KeyNotFound(tx.id)));
}

#[tokio::test]
async fn update_never_changes_id() {
    let engine = Engine::builder().build();
    let tx = engine.create(new_cmd("before")).await.unwrap();

    for (i, status) in ["pending", "failed", "completed"].iter().enumerate() {
        let patch = TransactionPatch {
            status: Some(status.to_string()),
            amount: Some(RawAmount::Float(i as f64 + 0.5)),
            ..Default::default()
        };
        let updated = engine.update(tx.id, patch).await.unwrap();
        assert_eq!(updated.id, tx.id);
        assert_eq!(updated.amount, i as i64);
        assert_eq!(updated.description, "before");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_distinct_ids() {
    let engine = Arc::new(Engine::builder().build());

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..64 {
        let engine = engine.clone();
        tasks.spawn(async move { engine.create(new_cmd(&format!("tx {i}"))).await });
    }

    let mut ids = HashSet::new();
    while let Some(result) = tasks.join_next().await {
        let tx = result.unwrap().unwrap();
        assert!(ids.insert(tx.id), "id {} allocated twice", tx.id);
    }

    assert_eq!(ids, (1..=64).collect::<HashSet<i64>>());
    assert_eq!(engine.len().await, 64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_deletes_of_same_id() {
    let engine = Arc::new(Engine::builder().build());
    let tx = engine.create(new_cmd("target")).await.unwrap();

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..8 {
        let engine = engine.clone();
        tasks.spawn(async move { engine.delete(tx.id).await });
    }

    let mut deleted = 0;
    while let Some(result) = tasks.join_next().await {
        if result.unwrap().is_ok() {
            deleted += 1;
        }
    }

    assert_eq!(deleted, 1);
    assert!(engine.is_empty().await);
}
