mod common;

use common::*;
use serde_json::json;
use std::io::Cursor;
use talent_indexer::application::indexer::{EventProcessor, EventReplayer, Indexer};
use talent_indexer::domain::errors::IndexerError;
use talent_indexer::domain::models::{EventCursor, EventEnvelope, Factory, Supporter, Token};
use talent_indexer::domain::protocol::ProtocolVersion;
use talent_indexer::infrastructure::persistence::{EntityStore, MemoryStore};

fn created_line(block: u64) -> String {
    json!({
        "blockNumber": block,
        "logIndex": 0,
        "type": "TalentCreated",
        "token": TOKEN_T,
        "talent": TALENT_A,
        "blockTimestamp": 100
    })
    .to_string()
}

fn stake_line(block: u64, log_index: u64, owner: &str) -> String {
    stake_line_with_amount(block, log_index, owner, "500000000000000000000")
}

fn stake_line_with_amount(block: u64, log_index: u64, owner: &str, amount: &str) -> String {
    json!({
        "blockNumber": block,
        "logIndex": log_index,
        "type": "Stake",
        "talentToken": TOKEN_T,
        "owner": owner,
        "talAmount": amount,
        "blockTimestamp": 200
    })
    .to_string()
}

fn input(lines: &[String]) -> Cursor<String> {
    Cursor::new(lines.join("\n"))
}

#[tokio::test]
async fn test_replay_applies_events_in_order() {
    let mut indexer = indexer(ProtocolVersion::V5).await;
    let lines = vec![
        created_line(10),
        String::new(),
        stake_line(11, 0, SUPPORTER_B),
        stake_line(11, 1, SUPPORTER_C),
    ];

    let summary = EventReplayer::new(2)
        .replay(&mut indexer, input(&lines))
        .await
        .unwrap();

    assert_eq!(summary.processed, 3);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.data_sources_created, 1);
    assert_eq!(summary.invariant_violations, 0);

    let token = indexer.store().get::<Token>(TOKEN_T).unwrap().unwrap();
    assert_eq!(token.supporter_count.to_string(), "2");
    assert_eq!(
        indexer.last_committed(),
        Some(EventCursor {
            block_number: 11,
            log_index: 1
        })
    );
}

#[tokio::test]
async fn test_restart_skips_committed_events() {
    let lines = vec![
        created_line(10),
        stake_line(11, 0, SUPPORTER_B),
        stake_line(12, 0, SUPPORTER_B),
    ];

    let mut first = indexer(ProtocolVersion::V5).await;
    EventReplayer::default()
        .replay(&mut first, input(&lines[..2]))
        .await
        .unwrap();
    let store = first.into_store();
    assert_eq!(
        store.load_cursor().await.unwrap(),
        Some(EventCursor {
            block_number: 11,
            log_index: 0
        })
    );

    let mut resumed = Indexer::new(protocol(ProtocolVersion::V5), store, reader())
        .await
        .unwrap();
    let summary = EventReplayer::default()
        .replay(&mut resumed, input(&lines))
        .await
        .unwrap();

    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.processed, 1);

    let factory = resumed.store().get::<Factory>(FACTORY).unwrap().unwrap();
    assert_eq!(factory.talent_count.to_string(), "1");
    let supporter = resumed.store().get::<Supporter>(SUPPORTER_B).unwrap().unwrap();
    assert_eq!(supporter.total_amount.to_string(), "1000000000000000000000");
}

#[tokio::test]
async fn test_out_of_order_event_stops_replay() {
    let mut indexer = indexer(ProtocolVersion::V5).await;
    let lines = vec![
        created_line(10),
        stake_line(12, 0, SUPPORTER_B),
        stake_line(11, 5, SUPPORTER_C),
    ];

    let result = EventReplayer::default()
        .replay(&mut indexer, input(&lines))
        .await;

    match result {
        Err(IndexerError::OutOfOrder { last, received }) => {
            assert_eq!(last.block_number, 12);
            assert_eq!(received.block_number, 11);
        }
        other => panic!("unexpected result {:?}", other),
    }
    assert!(indexer.store().get::<Supporter>(SUPPORTER_C).unwrap().is_none());
}

#[tokio::test]
async fn test_same_event_twice_is_out_of_order() {
    let mut indexer = indexer(ProtocolVersion::V5).await;
    let envelope: EventEnvelope = serde_json::from_str(&created_line(10)).unwrap();

    indexer.process(&envelope).await.unwrap();
    assert!(matches!(
        indexer.process(&envelope).await,
        Err(IndexerError::OutOfOrder { .. })
    ));
}

#[tokio::test]
async fn test_malformed_line_reports_its_number() {
    let mut indexer = indexer(ProtocolVersion::V5).await;
    let lines = vec![created_line(10), "{\"type\":\"Stake\"".to_string()];

    let result = EventReplayer::default()
        .replay(&mut indexer, input(&lines))
        .await;

    assert!(matches!(result, Err(IndexerError::JsonError { line: 2, .. })));
    assert_eq!(indexer.stats().events_processed, 1);
}

#[tokio::test]
async fn test_negative_amount_stops_replay() {
    let mut indexer = indexer(ProtocolVersion::V5).await;
    let lines = vec![
        created_line(10),
        stake_line(11, 0, SUPPORTER_B),
        stake_line_with_amount(12, 0, SUPPORTER_B, "-5"),
        stake_line(13, 0, SUPPORTER_C),
    ];

    let result = EventReplayer::default()
        .replay(&mut indexer, input(&lines))
        .await;

    assert!(matches!(result, Err(IndexerError::JsonError { line: 3, .. })));
    assert_eq!(
        indexer.last_committed(),
        Some(EventCursor {
            block_number: 11,
            log_index: 0
        })
    );
    let supporter = indexer.store().get::<Supporter>(SUPPORTER_B).unwrap().unwrap();
    assert_eq!(supporter.total_amount.to_string(), "500000000000000000000");
    assert!(indexer.store().get::<Supporter>(SUPPORTER_C).unwrap().is_none());
}

#[tokio::test]
async fn test_memory_store_resume_with_empty_input() {
    let store = MemoryStore::new();
    let mut indexer = Indexer::new(protocol(ProtocolVersion::V5), store, reader())
        .await
        .unwrap();

    let summary = EventReplayer::default()
        .replay(&mut indexer, input(&[]))
        .await
        .unwrap();

    assert_eq!(summary.processed, 0);
    assert_eq!(indexer.last_committed(), None);
}
