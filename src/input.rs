use crossterm::event::KeyCode;

use crate::app::App;
use crate::models::Confirmation;
use crate::network::AlbumApi;

/// Applies one key press. Returns `false` once the app should quit.
pub fn handle_key<A>(key: KeyCode, app: &mut App<A>) -> bool
where
    A: AlbumApi + Clone + 'static,
{
    // An open confirmation swallows every other key.
    if app.confirm.is_some() {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.answer_confirm(Confirmation::Confirmed),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.answer_confirm(Confirmation::Declined)
            }
            _ => {}
        }
        return app.running;
    }

    let edit_mode = app.controller.state().is_edit_mode();
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::Char('e') => {
            app.controller.toggle_edit_mode();
        }
        // Selecting is only wired while editing.
        KeyCode::Char(' ') | KeyCode::Enter if edit_mode => {
            if let Some(id) = app.current_item_id() {
                app.controller.toggle_item_selection(&id);
            }
        }
        KeyCode::Char('d') if edit_mode => app.submit_deletion(),
        KeyCode::Char('D') if !edit_mode => app.ask_delete_album(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Esc => app.close_popups(),
        KeyCode::Char('q') => app.running = false,
        _ => {}
    }
    app.running
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::app::tests::app;
    use crate::models::Notice;
    use crate::prompts;
    use crate::selection::tests::{Call, FakeApi, Reply};

    #[tokio::test]
    async fn space_selects_only_in_edit_mode() {
        let mut app = app(Arc::new(FakeApi::replying(Reply::Ok)));
        handle_key(KeyCode::Char('j'), &mut app);
        handle_key(KeyCode::Char(' '), &mut app);
        assert_eq!(app.controller.state().selected_count(), 0);

        handle_key(KeyCode::Char('e'), &mut app);
        handle_key(KeyCode::Char(' '), &mut app);
        assert!(app.controller.state().is_selected("b"));
        handle_key(KeyCode::Enter, &mut app);
        assert!(!app.controller.state().is_selected("b"));
    }

    #[tokio::test]
    async fn delete_keys_follow_mode() {
        let api = Arc::new(FakeApi::replying(Reply::Ok));
        let mut app = app(api.clone());

        // `d` is not wired outside edit mode
        handle_key(KeyCode::Char('d'), &mut app);
        assert_eq!(app.pending, 0);

        handle_key(KeyCode::Char('e'), &mut app);
        handle_key(KeyCode::Char('D'), &mut app);
        assert!(app.confirm.is_none());

        handle_key(KeyCode::Char('d'), &mut app);
        assert_eq!(app.pending, 0);
        assert_eq!(app.popup.notice, Some(Notice::warning(prompts::NOTHING_SELECTED)));
        assert!(api.calls().is_empty());

        handle_key(KeyCode::Char(' '), &mut app);
        handle_key(KeyCode::Char('d'), &mut app);
        assert_eq!(app.pending, 1);
        let event = app.next_event().await.unwrap();
        app.apply_event(event);
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn confirmation_keys() {
        let api = Arc::new(FakeApi::replying(Reply::Ok));
        let mut app = app(api.clone());
        handle_key(KeyCode::Char('D'), &mut app);
        assert!(app.confirm.is_some());
        // navigation is blocked while asking
        handle_key(KeyCode::Char('j'), &mut app);
        assert_eq!(app.cursor, 0);
        handle_key(KeyCode::Esc, &mut app);
        assert!(app.confirm.is_none());
        assert!(api.calls().is_empty());

        handle_key(KeyCode::Char('D'), &mut app);
        handle_key(KeyCode::Char('y'), &mut app);
        let event = app.next_event().await.unwrap();
        app.apply_event(event);
        assert_eq!(api.calls(), vec![Call::DeleteAlbum("4".into())]);
        assert!(!app.running);
    }

    #[tokio::test]
    async fn q_quits() {
        let mut app = app(Arc::new(FakeApi::replying(Reply::Ok)));
        assert!(handle_key(KeyCode::Char('e'), &mut app));
        assert!(!handle_key(KeyCode::Char('q'), &mut app));
    }
}
