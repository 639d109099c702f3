use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use audiohub_core::ConnectionState;
use audiohub_logging::{hub_debug, hub_info, hub_warn, TARGET_SYNC};
use futures_util::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

use crate::frame::decode_frame;
use crate::{Dispatcher, EventKind, PushEvent};

/// Delay between losing the channel and the next connection attempt.
pub const RECONNECT_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone)]
pub struct PushSettings {
    /// Fixed: no backoff growth and no retry limit.
    pub reconnect_delay: Duration,
}

impl Default for PushSettings {
    fn default() -> Self {
        Self {
            reconnect_delay: RECONNECT_DELAY,
        }
    }
}

struct Shared {
    endpoint: Url,
    settings: PushSettings,
    dispatcher: RwLock<Dispatcher>,
    state: watch::Sender<ConnectionState>,
}

impl Shared {
    fn dispatch(&self, event: &PushEvent) {
        let dispatcher = self
            .dispatcher
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        dispatcher.dispatch(event);
    }

    fn transition(&self, next: ConnectionState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            hub_debug!(target: TARGET_SYNC, "push channel {:?} -> {:?}", previous, next);
            self.dispatch(&PushEvent::Connection(next));
        }
    }
}

/// Owns the single logical connection to the server's progress channel.
///
/// `ConnectionState` is written only here; observers read it through
/// [`PushChannel::current_state`], [`PushChannel::subscribe`] or
/// `EventKind::Connection` handlers.
pub struct PushChannel {
    shared: Arc<Shared>,
}

impl PushChannel {
    pub fn new(endpoint: Url, settings: PushSettings) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            shared: Arc::new(Shared {
                endpoint,
                settings,
                dispatcher: RwLock::new(Dispatcher::new()),
                state,
            }),
        }
    }

    /// Registers a handler. Handlers must not register further handlers.
    pub fn on_event<F>(&self, kind: EventKind, handler: F)
    where
        F: Fn(&PushEvent) + Send + Sync + 'static,
    {
        let mut dispatcher = self
            .shared
            .dispatcher
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        dispatcher.on(kind, handler);
    }

    pub fn current_state(&self) -> ConnectionState {
        *self.shared.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.shared.state.subscribe()
    }

    pub fn endpoint(&self) -> &Url {
        &self.shared.endpoint
    }

    /// Spawns the connection loop. It never gives up; abort the handle to stop it.
    pub fn connect(&self) -> JoinHandle<()> {
        let shared = self.shared.clone();
        tokio::spawn(async move { run(shared).await })
    }
}

async fn run(shared: Arc<Shared>) {
    loop {
        shared.transition(ConnectionState::Connecting);
        match connect_async(shared.endpoint.as_str()).await {
            Ok((stream, _response)) => {
                hub_info!(target: TARGET_SYNC, "push channel connected to {}", shared.endpoint);
                shared.transition(ConnectionState::Connected);
                pump(&shared, stream).await;
            }
            Err(err) => {
                hub_warn!(target: TARGET_SYNC, "push channel connect failed: {}", err);
            }
        }
        shared.transition(ConnectionState::Disconnected);
        hub_info!(
            target: TARGET_SYNC,
            "push channel reconnecting in {} ms",
            shared.settings.reconnect_delay.as_millis()
        );
        tokio::time::sleep(shared.settings.reconnect_delay).await;
    }
}

async fn pump<S>(shared: &Shared, mut stream: S)
where
    S: futures_util::Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    while let Some(message) = stream.next().await {
        match message {
            Ok(Message::Text(text)) => handle_text(shared, &text),
            Ok(Message::Binary(bytes)) => match std::str::from_utf8(&bytes) {
                Ok(text) => handle_text(shared, text),
                Err(_) => hub_warn!(target: TARGET_SYNC, "dropping non-utf8 binary frame"),
            },
            Ok(Message::Close(frame)) => {
                hub_info!(target: TARGET_SYNC, "push channel closed by server: {:?}", frame);
                break;
            }
            Ok(_) => {}
            Err(err) => {
                hub_warn!(target: TARGET_SYNC, "push channel error: {}", err);
                break;
            }
        }
    }
}

fn handle_text(shared: &Shared, text: &str) {
    match decode_frame(text) {
        Ok(Some(event)) => {
            if let PushEvent::Progress(progress) = &event {
                hub_debug!(
                    target: TARGET_SYNC,
                    "progress {} {:?} {:.1}",
                    progress.id,
                    progress.status,
                    progress.progress
                );
            }
            shared.dispatch(&event);
        }
        Ok(None) => {}
        Err(err) => hub_warn!(target: TARGET_SYNC, "dropping frame: {}", err),
    }
}
