use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::client::kanban::models::{Board, Card, CardPosition, CardUpdate, NewCard};
use crate::client::kanban::services::KanbanApi;
use crate::error::{ApiError, ApiResult};
use crate::notify::{Notice, Notifier};

/// Periodic board refresh, owned by this handle.
///
/// The first fetch happens immediately, then once per interval. Ticks are
/// skipped while the settings panel is open. Dropping the handle stops the
/// task.
pub struct BoardPoller {
    shutdown: watch::Sender<bool>,
    settings_open: watch::Sender<bool>,
    boards: watch::Receiver<Option<Vec<Board>>>,
    handle: Option<JoinHandle<()>>,
}

impl BoardPoller {
    pub fn start<A: KanbanApi, N: Notifier>(api: A, notifier: N, every: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let (settings_tx, settings_rx) = watch::channel(false);
        let (boards_tx, boards_rx) = watch::channel(None);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        if *settings_rx.borrow() {
                            continue;
                        }
                        match api.boards().await {
                            Ok(boards) => {
                                boards_tx.send_replace(Some(boards));
                            }
                            Err(e) => {
                                tracing::warn!("board poll failed: {}", e);
                                notifier.notify(Notice::from_api_error("refreshing the board", &e));
                            }
                        }
                    }
                }
            }
            tracing::debug!("board poller stopped");
        });

        BoardPoller {
            shutdown: shutdown_tx,
            settings_open: settings_tx,
            boards: boards_rx,
            handle: Some(handle),
        }
    }

    pub fn set_settings_open(&self, open: bool) {
        self.settings_open.send_replace(open);
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Vec<Board>>> {
        self.boards.clone()
    }

    pub fn latest(&self) -> Option<Vec<Board>> {
        self.boards.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the timer and waits for an in-flight fetch to finish.
    pub async fn stop(mut self) {
        self.shutdown.send_replace(true);
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!("board poller ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for BoardPoller {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Kanban board screen. Mutations refetch; polling feeds `apply_snapshot`.
pub struct KanbanBoardView<A: KanbanApi, N: Notifier> {
    api: A,
    notifier: N,
    boards: Vec<Board>,
    settings_open: bool,
}

impl<A: KanbanApi, N: Notifier> KanbanBoardView<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        KanbanBoardView {
            api,
            notifier,
            boards: Vec::new(),
            settings_open: false,
        }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, id: i64) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id)
    }

    pub fn find_card(&self, card_id: i64) -> Option<&Card> {
        self.boards.iter().find_map(|b| b.find_card(card_id))
    }

    pub fn settings_open(&self) -> bool {
        self.settings_open
    }

    /// Mirrors the panel state into the poller so it pauses while open.
    pub fn set_settings_open(&mut self, open: bool, poller: Option<&BoardPoller>) {
        self.settings_open = open;
        if let Some(poller) = poller {
            poller.set_settings_open(open);
        }
    }

    /// Takes the latest polled state, unless the settings panel is open.
    pub fn apply_snapshot(&mut self, snapshot: Option<Vec<Board>>) -> bool {
        match snapshot {
            Some(boards) if !self.settings_open => {
                self.boards = boards;
                true
            }
            _ => false,
        }
    }

    pub async fn refresh(&mut self) -> ApiResult<()> {
        match self.api.boards().await {
            Ok(boards) => {
                self.boards = boards;
                Ok(())
            }
            Err(e) => Err(self.report("loading the board", e)),
        }
    }

    pub async fn create_card(&mut self, body: NewCard) -> ApiResult<Option<Card>> {
        let card = match self.api.create_card(&body).await {
            Ok(card) => card,
            Err(e) => return Err(self.report("creating the card", e)),
        };
        self.reload_after_write().await;
        Ok(card)
    }

    pub async fn update_card(&mut self, card_id: i64, body: CardUpdate) -> ApiResult<()> {
        if let Err(e) = self.api.update_card(card_id, &body).await {
            return Err(self.report("updating the card", e));
        }
        self.reload_after_write().await;
        Ok(())
    }

    pub async fn move_card(&mut self, card_id: i64, list_id: i64, position: i64) -> ApiResult<()> {
        let target = CardPosition { list_id, position };
        if let Err(e) = self.api.move_card(card_id, target).await {
            return Err(self.report("moving the card", e));
        }
        self.reload_after_write().await;
        Ok(())
    }

    pub async fn delete_card(&mut self, card_id: i64) -> ApiResult<()> {
        if let Err(e) = self.api.delete_card(card_id).await {
            return Err(self.report("deleting the card", e));
        }
        self.reload_after_write().await;
        Ok(())
    }

    pub async fn apply_checklist_template(&mut self, card_id: i64, template_id: i64) -> ApiResult<()> {
        if let Err(e) = self.api.apply_checklist_template(card_id, template_id).await {
            return Err(self.report("applying the checklist template", e));
        }
        self.reload_after_write().await;
        Ok(())
    }

    /// Completing the last item may let the server move the card; the
    /// refetch picks that up.
    pub async fn toggle_checklist_item(&mut self, item_id: i64, completed: bool) -> ApiResult<()> {
        if let Err(e) = self.api.toggle_checklist_item(item_id, completed).await {
            return Err(self.report("updating the checklist", e));
        }
        self.reload_after_write().await;
        Ok(())
    }

    /// The write already went through; a failed reload has been reported and
    /// leaves the previous state on screen.
    async fn reload_after_write(&mut self) {
        let _ = self.refresh().await;
    }

    fn report(&self, context: &str, err: ApiError) -> ApiError {
        tracing::error!("{} failed: {}", context, err);
        self.notifier.notify(Notice::from_api_error(context, &err));
        err
    }
}
