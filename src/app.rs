use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::models::{
    ActionReport, CollectionContext, Confirmation, Followup, Item, Notice, PendingConfirm,
    PopupNotice,
};
use crate::network::{AlbumApi, ApiError};
use crate::page::{AlbumPage, parse_album_page};
use crate::prompts;
use crate::selection::SelectionController;
use crate::utils::timestamp;

/// Results of background requests, applied on the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    Report(ActionReport),
    PageLoaded(Result<AlbumPage, ApiError>),
}

pub struct App<A> {
    pub controller: SelectionController,
    pub cursor: usize,
    pub popup: PopupNotice,
    pub confirm: Option<PendingConfirm>,
    /// Requests sent but not answered yet. Nothing waits on this.
    pub pending: usize,
    pub running: bool,
    /// Server path to continue at after the TUI closes.
    pub exit_to: Option<String>,
    api: A,
    handle: Handle,
    tx: UnboundedSender<AppEvent>,
    rx: UnboundedReceiver<AppEvent>,
}

impl<A> App<A>
where
    A: AlbumApi + Clone + 'static,
{
    pub fn new(api: A, handle: Handle, context: CollectionContext, items: Vec<Item>) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            controller: SelectionController::new(context, items),
            cursor: 0,
            popup: PopupNotice {
                visible: false,
                notice: None,
                timestamp: String::new(),
            },
            confirm: None,
            pending: 0,
            running: true,
            exit_to: None,
            api,
            handle,
            tx,
            rx,
        }
    }

    pub fn current_item_id(&self) -> Option<String> {
        self.controller.items().get(self.cursor).map(|item| item.id.clone())
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let len = self.controller.items().len();
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn show_notice(&mut self, notice: Notice) {
        self.popup.visible = true;
        self.popup.notice = Some(notice);
        self.popup.timestamp = timestamp();
    }

    pub fn close_popups(&mut self) {
        self.popup.visible = false;
        self.confirm = None;
    }

    /// Sends the batch deletion from a snapshot of the current selection.
    /// Nothing is spawned while the selection is empty.
    pub fn submit_deletion(&mut self) {
        if self.controller.deletion_request().is_none() {
            self.show_notice(Notice::warning(prompts::NOTHING_SELECTED));
            return;
        }
        let snapshot = self.controller.clone();
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.pending += 1;
        self.handle.spawn(async move {
            let report = snapshot.submit_deletion(&api).await;
            let _ = tx.send(AppEvent::Report(report));
        });
    }

    pub fn ask_delete_album(&mut self) {
        self.confirm = Some(PendingConfirm {
            prompt: prompts::CONFIRM_DELETE_ALBUM.to_string(),
        });
    }

    pub fn answer_confirm(&mut self, confirmation: Confirmation) {
        if self.confirm.take().is_none() {
            return;
        }
        if confirmation == Confirmation::Declined {
            log::debug!("Album deletion declined");
            return;
        }
        let snapshot = self.controller.clone();
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.pending += 1;
        self.handle.spawn(async move {
            let report = snapshot.delete_collection(&api, confirmation).await;
            let _ = tx.send(AppEvent::Report(report));
        });
    }

    pub fn reload(&mut self) {
        let album_id = self.controller.context().album_id.clone();
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.pending += 1;
        self.handle.spawn(async move {
            let page = api
                .fetch_album_page(&album_id)
                .await
                .map(|html| parse_album_page(&html));
            let _ = tx.send(AppEvent::PageLoaded(page));
        });
    }

    pub fn apply_event(&mut self, event: AppEvent) {
        self.pending = self.pending.saturating_sub(1);
        match event {
            AppEvent::Report(report) => {
                if let Some(notice) = report.notice {
                    self.show_notice(notice);
                }
                match report.followup {
                    Followup::None => {}
                    Followup::ReloadView => self.reload(),
                    Followup::Navigate(path) => {
                        self.exit_to = Some(path);
                        self.running = false;
                    }
                }
            }
            AppEvent::PageLoaded(Ok(page)) => self.replace_view(page),
            AppEvent::PageLoaded(Err(err)) => {
                log::error!("Reloading album {}: {err}", self.controller.context().album_id);
                self.show_notice(Notice::error(format!("Failed to reload the album: {err}")));
            }
        }
    }

    /// Starts over with a fresh controller for the reloaded page.
    fn replace_view(&mut self, page: AlbumPage) {
        let context = self.controller.context().clone();
        if let Some(album_id) = page.album_id.as_deref() {
            if album_id != context.album_id {
                log::warn!(
                    "Album page reports id {album_id}, expected {}",
                    context.album_id
                );
            }
        }
        log::info!("Loaded {} image(s) of album {}", page.items.len(), context.album_id);
        self.controller = SelectionController::new(context, page.items);
        let len = self.controller.items().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn drain_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            self.apply_event(event);
        }
    }

    #[cfg(test)]
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use reqwest::StatusCode;

    use super::*;
    use crate::models::{CollectionKind, NoticeLevel};
    use crate::selection::tests::{Call, FakeApi, Reply};

    pub fn app(api: Arc<FakeApi>) -> App<Arc<FakeApi>> {
        let context = CollectionContext {
            album_id: "4".into(),
            event_id: "12".into(),
            kind: CollectionKind::NamedCollection,
        };
        let items = ["a", "b", "c"].into_iter().map(Item::new).collect();
        App::new(api, Handle::current(), context, items)
    }

    #[tokio::test]
    async fn successful_submit_reloads_a_fresh_view() {
        let mut api = FakeApi::replying(Reply::Ok);
        api.page = r#"<div data-album-id="4"><div data-image-id="b"></div></div>"#.into();
        let api = Arc::new(api);
        let mut app = app(api.clone());
        app.cursor = 2;
        app.controller.toggle_edit_mode();
        app.controller.toggle_item_selection("a");
        app.controller.toggle_item_selection("c");

        app.submit_deletion();
        let event = app.next_event().await.unwrap();
        app.apply_event(event);
        assert_eq!(app.popup.notice, Some(Notice::info(prompts::IMAGES_DELETED)));

        let event = app.next_event().await.unwrap();
        app.apply_event(event);
        assert_eq!(app.pending, 0);
        assert!(!app.controller.state().is_edit_mode());
        assert_eq!(app.controller.items(), &[Item::new("b")]);
        assert_eq!(app.cursor, 0);
        assert_eq!(
            api.calls().last(),
            Some(&Call::FetchPage("4".into()))
        );
    }

    #[tokio::test]
    async fn rejected_submit_keeps_selection() {
        let api = Arc::new(FakeApi::replying(Reply::Reject(StatusCode::BAD_REQUEST, None)));
        let mut app = app(api.clone());
        app.controller.toggle_edit_mode();
        app.controller.toggle_item_selection("b");

        app.submit_deletion();
        let event = app.next_event().await.unwrap();
        app.apply_event(event);
        assert_eq!(app.popup.notice.as_ref().unwrap().level, NoticeLevel::Error);
        assert!(app.controller.state().is_selected("b"));
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn album_deletion_exits_towards_event() {
        let api = Arc::new(FakeApi::replying(Reply::Ok));
        let mut app = app(api.clone());
        app.ask_delete_album();
        assert!(app.confirm.is_some());
        app.answer_confirm(Confirmation::Confirmed);
        let event = app.next_event().await.unwrap();
        app.apply_event(event);
        assert!(!app.running);
        assert_eq!(app.exit_to.as_deref(), Some("/events/12"));
        assert_eq!(api.calls(), vec![Call::DeleteAlbum("4".into())]);
    }

    #[tokio::test]
    async fn declined_album_deletion_sends_nothing() {
        let api = Arc::new(FakeApi::replying(Reply::Ok));
        let mut app = app(api.clone());
        app.ask_delete_album();
        app.answer_confirm(Confirmation::Declined);
        assert!(app.confirm.is_none());
        assert_eq!(app.pending, 0);
        assert!(api.calls().is_empty());
        assert!(app.running);
    }

    #[tokio::test]
    async fn empty_submit_warns_without_pending_request() {
        let api = Arc::new(FakeApi::replying(Reply::Ok));
        let mut app = app(api.clone());
        app.controller.toggle_edit_mode();

        app.submit_deletion();
        assert_eq!(app.pending, 0);
        assert_eq!(app.popup.notice, Some(Notice::warning(prompts::NOTHING_SELECTED)));
        app.drain_events();
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_reload_is_reported() {
        let api = Arc::new(FakeApi::replying(Reply::Reject(StatusCode::FORBIDDEN, None)));
        let mut app = app(api);
        app.reload();
        let event = app.next_event().await.unwrap();
        app.apply_event(event);
        let notice = app.popup.notice.clone().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.text.starts_with("Failed to reload the album"));
        assert_eq!(app.controller.items().len(), 3);
    }

    #[tokio::test]
    async fn cursor_stays_in_bounds() {
        let mut app = app(Arc::new(FakeApi::replying(Reply::Ok)));
        app.move_up();
        assert_eq!(app.cursor, 0);
        for _ in 0..5 {
            app.move_down();
        }
        assert_eq!(app.cursor, 2);
        assert_eq!(app.current_item_id().as_deref(), Some("c"));
    }
}
