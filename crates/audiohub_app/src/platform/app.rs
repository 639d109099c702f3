use std::sync::Arc;

use audiohub_core::{
    render_change, update, AppState, AppViewModel, CoreSettings, DownloadOptions, DownloadTarget,
    MediaKind, Msg,
};
use audiohub_engine::{
    push_endpoint, EndpointError, EventKind, Gateway, GatewayError, GatewaySettings, PushChannel,
    PushEvent, ReqwestGateway,
};
use audiohub_logging::{hub_debug, hub_info, TARGET_SYNC};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::effects::EffectRunner;
use super::input::{self, Command, ParseError};
use super::ui::render;
use super::ui::screen::Screen;
use crate::config::ClientConfig;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("console input failed: {0}")]
    Console(#[from] std::io::Error),
}

/// Owns the core state and drives it: every message goes through `update`,
/// registry changes become patches on the screen, effects go to the runner.
pub struct Session {
    state: AppState,
    runner: EffectRunner,
    screen: Screen,
    last_view: AppViewModel,
    msg_tx: UnboundedSender<Msg>,
    msg_rx: UnboundedReceiver<Msg>,
}

impl Session {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        settings: CoreSettings,
        options: DownloadOptions,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let state = AppState::with_settings(settings, options);
        let last_view = state.view();
        Self {
            state,
            runner: EffectRunner::new(gateway, msg_tx.clone()),
            screen: Screen::new(),
            last_view,
            msg_tx,
            msg_rx,
        }
    }

    /// Sender for messages produced outside the session (push events).
    pub fn sender(&self) -> UnboundedSender<Msg> {
        self.msg_tx.clone()
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Applies one message and returns the console lines it produced.
    pub fn dispatch(&mut self, msg: Msg) -> Vec<String> {
        hub_debug!(target: TARGET_SYNC, "dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);

        let mut lines = Vec::new();
        for change in state.drain_changes() {
            let patch = render_change(&change);
            self.screen.apply(&patch);
            lines.push(render::patch_line(&patch, &self.screen));
        }

        if state.consume_dirty() {
            let view = state.view();
            lines.extend(render::view_lines(&self.last_view, &view, &self.screen));
            self.last_view = view;
        }
        self.state = state;

        for effect in self.runner.enqueue(effects) {
            lines.extend(render::local_effect_line(&effect));
        }
        lines
    }

    /// Dispatches everything already waiting in the inbox.
    pub fn drain_pending(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            lines.extend(self.dispatch(msg));
        }
        lines
    }

    /// Waits for the next message from the runner or the push channel.
    pub async fn next_message(&mut self) -> Option<Msg> {
        self.msg_rx.recv().await
    }

    pub fn command(&mut self, command: Command) -> Vec<String> {
        match command {
            Command::Type(text) => self.dispatch(Msg::SearchInputChanged(text)),
            Command::Key(key) => self.dispatch(Msg::SuggestionKey(key)),
            Command::Pick(index) => self.dispatch(Msg::SuggestionPicked(index)),
            Command::Search(Some(text)) => {
                let mut lines = self.dispatch(Msg::SearchInputChanged(text));
                lines.extend(self.dispatch(Msg::SearchSubmitted));
                lines
            }
            Command::Search(None) => self.dispatch(Msg::SearchSubmitted),
            Command::Get(index) => {
                let target = self
                    .state
                    .view()
                    .results
                    .get(index)
                    .map(DownloadTarget::from);
                match target {
                    Some(target) => self.dispatch(Msg::DownloadRequested(target)),
                    None => vec![format!("no search result #{}", index + 1)],
                }
            }
            Command::Url(url) => self.dispatch(Msg::DownloadRequested(DownloadTarget {
                url,
                video_id: None,
                title: None,
            })),
            Command::Format(kind) => self.dispatch(Msg::FormatSelected(kind)),
            Command::Playlist(on) => self.dispatch(Msg::PlaylistToggled(on)),
            Command::Quality(MediaKind::Audio, quality) => {
                self.dispatch(Msg::AudioQualitySelected(quality))
            }
            Command::Quality(MediaKind::Video, quality) => {
                self.dispatch(Msg::VideoQualitySelected(quality))
            }
            Command::Files => self.dispatch(Msg::FilesRequested),
            Command::Remove(name) => self.dispatch(Msg::DeleteFileRequested(name)),
            Command::Play(name) => self.dispatch(Msg::PlayFileRequested(name)),
            Command::Preview(index) => self.dispatch(Msg::PreviewRequested(index)),
            Command::Status => render::status_lines(&self.state.view(), &self.screen),
            Command::Help => input::HELP.iter().map(|line| line.to_string()).collect(),
            Command::Quit => Vec::new(),
        }
    }
}

/// Runs the console session until `quit` or end of input.
pub async fn run_app(config: ClientConfig) -> Result<(), AppError> {
    let base_url = config.base_url()?;
    let gateway = ReqwestGateway::new(GatewaySettings::new(base_url.clone()))?;
    let mut session = Session::new(
        Arc::new(gateway),
        config.core_settings(),
        config.download_options(),
    );

    let channel = PushChannel::new(push_endpoint(&base_url)?, config.push_settings());
    let tx = session.sender();
    channel.on_event(EventKind::Progress, move |event| {
        if let PushEvent::Progress(progress) = event {
            let _ = tx.send(Msg::Progress(progress.clone()));
        }
    });
    let tx = session.sender();
    channel.on_event(EventKind::Connection, move |event| {
        if let PushEvent::Connection(state) = event {
            let _ = tx.send(Msg::ConnectionChanged(*state));
        }
    });
    hub_info!(target: TARGET_SYNC, "connecting push channel at {}", channel.endpoint());
    let push = channel.connect();

    emit(input::HELP.iter().map(|line| line.to_string()).collect());
    emit(session.dispatch(Msg::FilesRequested));

    let mut console = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = console.next_line() => {
                let Some(line) = line? else { break };
                match input::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => emit(session.command(command)),
                    Err(ParseError::Empty) => {}
                    Err(err) => emit(vec![format!("? {err}")]),
                }
            }
            Some(msg) = session.next_message() => {
                let mut lines = session.dispatch(msg);
                lines.extend(session.drain_pending());
                emit(lines);
            }
        }
    }

    push.abort();
    hub_info!(target: TARGET_SYNC, "session closed");
    Ok(())
}

fn emit(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
