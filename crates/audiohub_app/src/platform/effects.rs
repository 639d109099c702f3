use std::sync::Arc;

use audiohub_core::{Effect, Msg};
use audiohub_engine::{Gateway, GatewayError};
use audiohub_logging::{hub_debug, hub_info, hub_warn, TARGET_GATEWAY};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Executes effects off the update loop and feeds their outcome back as `Msg`s.
pub struct EffectRunner {
    gateway: Arc<dyn Gateway>,
    msg_tx: UnboundedSender<Msg>,
    suggestion_timer: Option<JoinHandle<()>>,
}

impl EffectRunner {
    pub fn new(gateway: Arc<dyn Gateway>, msg_tx: UnboundedSender<Msg>) -> Self {
        Self {
            gateway,
            msg_tx,
            suggestion_timer: None,
        }
    }

    /// Starts every effect that needs IO or a timer and hands back the ones
    /// the front end presents itself.
    pub fn enqueue(&mut self, effects: Vec<Effect>) -> Vec<Effect> {
        let mut local = Vec::new();
        for effect in effects {
            match effect {
                Effect::ScheduleSuggestions { generation, after } => {
                    // Deadline taken now, not when the task first runs.
                    let deadline = Instant::now() + after;
                    if let Some(previous) = self.suggestion_timer.take() {
                        previous.abort();
                    }
                    let tx = self.msg_tx.clone();
                    self.suggestion_timer = Some(tokio::spawn(async move {
                        sleep_until(deadline).await;
                        let _ = tx.send(Msg::SuggestionTimerElapsed { generation });
                    }));
                }
                Effect::FetchSuggestions { generation, query } => {
                    hub_debug!(target: TARGET_GATEWAY, "suggestions for {:?}", query);
                    let gateway = self.gateway.clone();
                    self.spawn(async move {
                        let result = gateway.suggest(&query).await.map_err(describe);
                        Msg::SuggestionsLoaded { generation, result }
                    });
                }
                Effect::Search { query, max_results } => {
                    hub_info!(target: TARGET_GATEWAY, "search {:?} (max {})", query, max_results);
                    let gateway = self.gateway.clone();
                    self.spawn(async move {
                        Msg::SearchCompleted(
                            gateway.search(&query, max_results).await.map_err(describe),
                        )
                    });
                }
                Effect::SubmitDownload { task_id, spec } => {
                    hub_info!(
                        target: TARGET_GATEWAY,
                        "submit {} {} playlist={}",
                        task_id,
                        spec.url,
                        spec.is_playlist
                    );
                    let gateway = self.gateway.clone();
                    self.spawn(async move {
                        let result = gateway.submit_download(&spec).await.map_err(describe);
                        Msg::DownloadSubmitted { task_id, result }
                    });
                }
                Effect::ScheduleRemoval {
                    task_id,
                    ticket,
                    after,
                } => {
                    let deadline = Instant::now() + after;
                    self.spawn(async move {
                        sleep_until(deadline).await;
                        Msg::HoldElapsed { task_id, ticket }
                    });
                }
                Effect::ListFiles => {
                    let gateway = self.gateway.clone();
                    self.spawn(async move {
                        Msg::FilesLoaded(gateway.list_files().await.map_err(describe))
                    });
                }
                Effect::DeleteFile { name } => {
                    let gateway = self.gateway.clone();
                    self.spawn(async move {
                        let result = gateway.delete_file(&name).await.map_err(describe);
                        Msg::FileDeleted { name, result }
                    });
                }
                Effect::Notify { .. } | Effect::PlayAudio { .. } | Effect::OpenPreview { .. } => {
                    local.push(effect);
                }
            }
        }
        local
    }

    fn spawn<F>(&self, work: F)
    where
        F: std::future::Future<Output = Msg> + Send + 'static,
    {
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(work.await);
        });
    }
}

impl Drop for EffectRunner {
    fn drop(&mut self) {
        if let Some(timer) = self.suggestion_timer.take() {
            timer.abort();
        }
    }
}

fn describe(err: GatewayError) -> String {
    hub_warn!(target: TARGET_GATEWAY, "{}: {}", err.kind, err.message);
    err.message
}
