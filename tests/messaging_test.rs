//! Direct message store integration tests

mod common;

use chatline::messaging::db;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_history_matches_either_argument_order() {
    let pool = common::test_pool().await;

    let sent = db::insert_direct_message(&pool, "alice", "bob", "hi")
        .await
        .unwrap();

    let forward = db::get_messages_between(&pool, "alice", "bob").await.unwrap();
    let reverse = db::get_messages_between(&pool, "bob", "alice").await.unwrap();

    assert_eq!(forward.len(), 1);
    assert_eq!(forward, reverse);
    assert_eq!(forward[0].id, sent.id);
    assert_eq!(forward[0].text, "hi");
}

#[tokio::test]
async fn test_history_is_ordered_and_complete() {
    let pool = common::test_pool().await;

    for i in 0..10 {
        let (from, to) = if i % 2 == 0 {
            ("alice", "bob")
        } else {
            ("bob", "alice")
        };
        db::insert_direct_message(&pool, from, to, &format!("msg {i}"))
            .await
            .unwrap();
    }

    let history = db::get_messages_between(&pool, "alice", "bob").await.unwrap();

    assert_eq!(history.len(), 10);
    for pair in history.windows(2) {
        assert!(pair[0].created_at <= pair[1].created_at);
    }
    // Submission order survives the round trip.
    let texts: Vec<_> = history.iter().map(|m| m.text.as_str()).collect();
    let expected: Vec<String> = (0..10).map(|i| format!("msg {i}")).collect();
    assert_eq!(texts, expected.iter().map(String::as_str).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_history_excludes_other_conversations() {
    let pool = common::test_pool().await;

    db::insert_direct_message(&pool, "alice", "bob", "for bob")
        .await
        .unwrap();
    db::insert_direct_message(&pool, "alice", "carol", "for carol")
        .await
        .unwrap();

    let history = db::get_messages_between(&pool, "alice", "bob").await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].text, "for bob");
}
