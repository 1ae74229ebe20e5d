//! End-to-end poll cycles over in-memory Divar fakes and a real token file.

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use divar_notifier::adapter::outbound::file::JsonFileTokenStore;
use divar_notifier::application::{AdNotifier, PollSettings, Poller, RetryPolicy};
use divar_notifier::error::SendError;
use divar_notifier::port::{Destination, TokenStore};
use divar_notifier::testkit::domain::{ad, ad_with_images, token, tokens};
use divar_notifier::testkit::fakes::{MapDetails, RecordingMessenger, Sent, StaticSearch};
use tempfile::TempDir;
use tokio_test::assert_ok;

fn settings() -> PollSettings {
    PollSettings {
        pages: 1,
        interval: Duration::ZERO,
        send_interval: Duration::ZERO,
    }
}

fn poller(
    search: StaticSearch,
    details: MapDetails,
    store: &JsonFileTokenStore,
    messenger: Arc<RecordingMessenger>,
) -> Poller {
    let notifier = AdNotifier::new(
        messenger,
        Destination::Channel("@flats".into()),
        RetryPolicy::immediate(3),
        10,
    );
    Poller::new(
        Arc::new(search),
        Arc::new(details),
        Arc::new(JsonFileTokenStore::new(store.path())),
        notifier,
        settings(),
    )
}

fn stored(store: &JsonFileTokenStore) -> Vec<String> {
    let content = fs::read_to_string(store.path()).expect("token file");
    serde_json::from_str(&content).expect("token array")
}

#[tokio::test]
async fn first_run_notifies_everything_and_writes_token_file() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileTokenStore::new(dir.path().join("tokens.json"));
    let messenger = Arc::new(RecordingMessenger::new());

    let details = MapDetails::new()
        .with_ad(ad("b"))
        .with_ad(ad_with_images("a", 1))
        .with_ad(ad_with_images("c", 4));
    let poller = poller(
        StaticSearch::new(tokens(&["c", "a", "b"])),
        details,
        &store,
        messenger.clone(),
    );

    let report = assert_ok!(poller.run_cycle().await);

    assert_eq!(report.new, 3);
    assert_eq!(report.notified, 3);
    let sent = messenger.sent();
    assert!(matches!(sent[0], Sent::Album { .. }));
    assert!(matches!(sent[1], Sent::Photo { .. }));
    assert!(matches!(sent[2], Sent::Text { .. }));
    assert_eq!(stored(&store), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn restart_does_not_renotify_seen_tokens() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state").join("tokens.json");
    let store = JsonFileTokenStore::new(&path);

    let first = Arc::new(RecordingMessenger::new());
    let run = poller(
        StaticSearch::new(tokens(&["a"])),
        MapDetails::new().with_ad(ad("a")),
        &store,
        first.clone(),
    );
    assert_ok!(run.run_cycle().await);
    assert_eq!(first.sent().len(), 1);

    let second = Arc::new(RecordingMessenger::new());
    let run = poller(
        StaticSearch::new(tokens(&["b", "a"])),
        MapDetails::new().with_ad(ad("a")).with_ad(ad("b")),
        &store,
        second.clone(),
    );
    let report = assert_ok!(run.run_cycle().await);

    assert_eq!(report.listed, 2);
    assert_eq!(report.new, 1);
    match &second.sent()[0] {
        Sent::Text { text, .. } => assert!(text.contains("Listing b")),
        other => panic!("expected text for b, got {other:?}"),
    }
    assert_eq!(stored(&store), vec!["a", "b"]);
}

#[tokio::test]
async fn failure_mid_cycle_keeps_earlier_tokens() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileTokenStore::new(dir.path().join("tokens.json"));
    let messenger = Arc::new(RecordingMessenger::new());
    messenger.push_response(Ok(()));
    messenger.push_response(Err(SendError::Transport("connection reset".into())));

    let run = poller(
        StaticSearch::new(tokens(&["z", "y"])),
        MapDetails::new().with_ad(ad("y")).with_ad(ad("z")),
        &store,
        messenger,
    );

    assert!(run.run_cycle().await.is_err());
    assert_eq!(stored(&store), vec!["z"]);

    let seen = store.load().unwrap();
    assert!(seen.contains(&token("z")));
    assert!(!seen.contains(&token("y")));
}

#[tokio::test]
async fn persistent_rate_limit_drops_and_records_token() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileTokenStore::new(dir.path().join("tokens.json"));
    let messenger = Arc::new(RecordingMessenger::new());
    for _ in 0..3 {
        messenger.push_response(Err(SendError::RateLimited {
            retry_after: Some(Duration::ZERO),
        }));
    }

    let run = poller(
        StaticSearch::new(tokens(&["slow"])),
        MapDetails::new().with_ad(ad("slow")),
        &store,
        messenger.clone(),
    );
    let report = assert_ok!(run.run_cycle().await);

    assert_eq!(report.dropped, 1);
    assert_eq!(messenger.attempts(), 3);
    assert_eq!(stored(&store), vec!["slow"]);
}

#[tokio::test]
async fn rejected_photo_does_not_block_later_ads() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileTokenStore::new(dir.path().join("tokens.json"));
    let messenger = Arc::new(RecordingMessenger::new());
    messenger.push_response(Err(SendError::BadRequest(
        "failed to get HTTP URL content".into(),
    )));

    let details = MapDetails::new()
        .with_ad(ad_with_images("badimg", 1))
        .with_ad(ad("next"));
    let run = poller(
        StaticSearch::new(tokens(&["badimg", "next"])),
        details,
        &store,
        messenger.clone(),
    );

    let first = assert_ok!(run.run_cycle().await);
    assert_eq!(first.dropped, 1);
    assert_eq!(first.notified, 1);
    assert_eq!(stored(&store), vec!["badimg", "next"]);

    let second = assert_ok!(run.run_cycle().await);
    assert_eq!(second.new, 0);
    assert_eq!(messenger.attempts(), 2);
    match &messenger.sent()[..] {
        [Sent::Text { text, .. }] => assert!(text.contains("Listing next")),
        other => panic!("expected one text for next, got {other:?}"),
    }
}

#[tokio::test]
async fn corrupt_token_file_fails_the_cycle_without_sending() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tokens.json");
    fs::write(&path, "{not json").unwrap();
    let store = JsonFileTokenStore::new(&path);
    let messenger = Arc::new(RecordingMessenger::new());

    let run = poller(
        StaticSearch::new(tokens(&["a"])),
        MapDetails::new().with_ad(ad("a")),
        &store,
        messenger.clone(),
    );

    assert!(run.run_cycle().await.is_err());
    assert!(messenger.sent().is_empty());
}
