use std::time::{Duration, Instant};

use audiohub_core::{ConnectionState, TaskId, TaskStatus};
use audiohub_engine::{EventKind, PushChannel, PushEvent, PushSettings, RECONNECT_DELAY};
use futures_util::{SinkExt, StreamExt};
use pretty_assertions::assert_eq;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

const WAIT: Duration = Duration::from_secs(5);

async fn bind() -> (TcpListener, Url) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let url = Url::parse(&format!("ws://127.0.0.1:{port}/ws/progress")).unwrap();
    (listener, url)
}

fn channel(url: Url, delay_ms: u64) -> PushChannel {
    PushChannel::new(
        url,
        PushSettings {
            reconnect_delay: Duration::from_millis(delay_ms),
        },
    )
}

fn collect(channel: &PushChannel, kind: EventKind) -> mpsc::UnboundedReceiver<PushEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    channel.on_event(kind, move |event| {
        let _ = tx.send(event.clone());
    });
    rx
}

async fn next_state(rx: &mut mpsc::UnboundedReceiver<PushEvent>) -> ConnectionState {
    match tokio::time::timeout(WAIT, rx.recv()).await {
        Ok(Some(PushEvent::Connection(state))) => state,
        other => panic!("expected connection event, got {other:?}"),
    }
}

#[test]
fn default_reconnect_delay_is_three_seconds() {
    assert_eq!(RECONNECT_DELAY, Duration::from_millis(3000));
    assert_eq!(PushSettings::default().reconnect_delay, RECONNECT_DELAY);
}

#[tokio::test]
async fn progress_frames_are_dispatched_and_garbage_dropped() {
    audiohub_logging::initialize_for_tests();
    let (listener, url) = bind().await;
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        ws.send(Message::Text("pong".into())).await.unwrap();
        ws.send(Message::Text(r#"{"type":"stats","data":{}}"#.into()))
            .await
            .unwrap();
        ws.send(Message::Text(
            r#"{"type":"progress","data":{"video_id":"v1","title":"Song","status":"downloading","progress":55}}"#
                .into(),
        ))
        .await
        .unwrap();
        // Keep the socket open until the client goes away.
        while ws.next().await.is_some() {}
    });

    let channel = channel(url, 100);
    let mut progress = collect(&channel, EventKind::Progress);
    let handle = channel.connect();

    let event = tokio::time::timeout(WAIT, progress.recv())
        .await
        .expect("progress in time")
        .expect("sender alive");
    let PushEvent::Progress(event) = event else {
        panic!("expected progress event");
    };
    assert_eq!(event.id, TaskId::remote("v1"));
    assert_eq!(event.status, TaskStatus::Downloading);
    assert_eq!(event.progress, 55.0);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(progress.try_recv().is_err());
    assert_eq!(channel.current_state(), ConnectionState::Connected);

    handle.abort();
    server.abort();
}

#[tokio::test]
async fn closed_channel_reconnects_after_delay() {
    audiohub_logging::initialize_for_tests();
    let delay = Duration::from_millis(200);
    let (listener, url) = bind().await;
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut first = accept_async(stream).await.unwrap();
        let first_open = Instant::now();
        first.close(None).await.unwrap();
        drop(first);

        let (stream, _) = listener.accept().await.unwrap();
        let second_open = Instant::now();
        let mut second = accept_async(stream).await.unwrap();
        let gap = second_open.duration_since(first_open);
        tokio::spawn(async move { while second.next().await.is_some() {} });
        gap
    });

    let channel = channel(url, delay.as_millis() as u64);
    let mut states = collect(&channel, EventKind::Connection);
    let handle = channel.connect();

    let mut seen = Vec::new();
    for _ in 0..5 {
        seen.push(next_state(&mut states).await);
    }
    assert_eq!(
        seen,
        vec![
            ConnectionState::Connecting,
            ConnectionState::Connected,
            ConnectionState::Disconnected,
            ConnectionState::Connecting,
            ConnectionState::Connected,
        ]
    );

    let gap = tokio::time::timeout(WAIT, server).await.unwrap().unwrap();
    assert!(gap >= delay, "reconnected after {gap:?}");
    assert_eq!(channel.current_state(), ConnectionState::Connected);
    handle.abort();
}

#[tokio::test]
async fn refused_connection_keeps_retrying() {
    audiohub_logging::initialize_for_tests();
    let url = {
        let (listener, url) = bind().await;
        drop(listener);
        url
    };

    let channel = channel(url, 30);
    let mut states = collect(&channel, EventKind::Connection);
    let watcher = channel.subscribe();
    let handle = channel.connect();

    for _ in 0..3 {
        assert_eq!(next_state(&mut states).await, ConnectionState::Connecting);
        assert_eq!(next_state(&mut states).await, ConnectionState::Disconnected);
    }
    assert!(watcher.has_changed().unwrap());
    assert!(!handle.is_finished());
    handle.abort();
}
