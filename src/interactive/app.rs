//! Application state and key handling for the interactive UI

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};

use crate::board::{Board, Outcome};
use crate::delegate::ListAction;
use crate::render::{ListRegion, Row, RowKind};

use super::form::{FormData, FormField};

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    /// Browsing the activity list
    Normal,
    /// Keyboard focus is in the signup form
    Signup,
    /// Waiting for a yes/no answer before unregistering
    ConfirmUnregister(ListAction),
    /// Help screen
    Help,
}

/// Main application state
pub struct App {
    pub board: Board,
    /// API base URL, shown in the header
    pub base_url: String,
    pub mode: AppMode,
    /// Cursor over the rendered list rows
    pub selected_row: usize,
    pub form: FormData,
    /// When the catalog was last fetched
    pub last_loaded: Option<DateTime<Local>>,
}

impl App {
    pub fn new(board: Board, base_url: impl Into<String>) -> Self {
        Self {
            board,
            base_url: base_url.into(),
            mode: AppMode::Normal,
            selected_row: 0,
            form: FormData::new(),
            last_loaded: None,
        }
    }

    /// Fetch and re-render the catalog
    pub async fn refresh(&mut self) {
        self.board.load_catalog().await;
        self.after_reload();
    }

    /// A successful load rebuilds the selector, which starts at its
    /// placeholder. A failed one leaves the selector untouched. Either way
    /// the row cursor must stay inside the list.
    fn after_reload(&mut self) {
        if matches!(self.board.view().list, ListRegion::Cards(_)) {
            self.last_loaded = Some(Local::now());
            self.form.activity.clear();
        }
        let rows = self.board.view().rows().len();
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
    }

    pub fn rows(&self) -> Vec<Row> {
        self.board.view().rows()
    }

    pub fn selected(&self) -> Option<Row> {
        self.rows().into_iter().nth(self.selected_row)
    }

    /// Handle a key press. Returns `false` when the application should exit.
    pub async fn handle_event(&mut self, event: KeyEvent) -> bool {
        match self.mode.clone() {
            AppMode::Normal => return self.handle_normal_mode(event).await,
            AppMode::Signup => self.handle_signup_mode(event).await,
            AppMode::ConfirmUnregister(action) => self.handle_confirm_mode(event, action).await,
            AppMode::Help => self.mode = AppMode::Normal,
        }
        true
    }

    async fn handle_normal_mode(&mut self, event: KeyEvent) -> bool {
        match event.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return false,
            KeyCode::Char('?') => self.mode = AppMode::Help,
            KeyCode::Char('r') | KeyCode::Char('R') => self.refresh().await,
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Tab => {
                self.mode = AppMode::Signup;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let last = self.rows().len().saturating_sub(1);
                self.selected_row = (self.selected_row + 1).min(last);
            }
            KeyCode::PageUp => self.jump_to_card(false),
            KeyCode::PageDown => self.jump_to_card(true),
            KeyCode::Enter | KeyCode::Delete | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.activate_selected();
            }
            _ => {}
        }
        true
    }

    /// Hand the selected row to the list observer; a matched delete control
    /// opens the confirmation prompt.
    fn activate_selected(&mut self) {
        if let Some(row) = self.selected() {
            if let Some(action) = self.board.resolve(&row) {
                self.mode = AppMode::ConfirmUnregister(action);
            }
        }
    }

    /// Move the cursor to the next or previous card title
    fn jump_to_card(&mut self, forward: bool) {
        let rows = self.rows();
        let titles: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.kind == RowKind::Title)
            .map(|(i, _)| i)
            .collect();
        let target = if forward {
            titles.iter().find(|&&i| i > self.selected_row)
        } else {
            titles.iter().rev().find(|&&i| i < self.selected_row)
        };
        if let Some(&i) = target {
            self.selected_row = i;
        }
    }

    async fn handle_signup_mode(&mut self, event: KeyEvent) {
        match event.code {
            KeyCode::Esc => self.mode = AppMode::Normal,
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.previous_field(),
            KeyCode::Enter => {
                let outcome = self.board.sign_up(&mut self.form).await;
                if outcome == Outcome::Succeeded {
                    self.after_reload();
                }
            }
            _ => match self.form.current_field {
                FormField::Email => self.form.handle_email_key(event),
                FormField::Activity => {
                    let options = self.board.view().options.clone();
                    match event.code {
                        KeyCode::Right | KeyCode::Char(' ') => {
                            self.form.select_next_activity(&options)
                        }
                        KeyCode::Left => self.form.select_previous_activity(&options),
                        _ => {}
                    }
                }
            },
        }
    }

    async fn handle_confirm_mode(&mut self, event: KeyEvent, action: ListAction) {
        let accepted = matches!(event.code, KeyCode::Char('y') | KeyCode::Char('Y'));
        self.mode = AppMode::Normal;
        let outcome = self
            .board
            .run_action(action, &mut |_: &str| accepted)
            .await;
        if outcome == Outcome::Succeeded {
            self.after_reload();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ActivityApi, ApiResponse};
    use crate::board::SignupFields;
    use crate::error::ApiError;
    use crate::models::{Activity, ApiReply, Catalog};
    use async_trait::async_trait;
    use crossterm::event::KeyModifiers;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingApi {
        fetches: AtomicUsize,
        signups: AtomicUsize,
        unregisters: AtomicUsize,
        offline: AtomicBool,
    }

    #[async_trait]
    impl ActivityApi for CountingApi {
        async fn fetch_catalog(&self) -> Result<Catalog, ApiError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.offline.load(Ordering::SeqCst) {
                return Err(ApiError::ConnectionFailed("connection refused".to_string()));
            }
            Ok(vec![
                (
                    "Chess Club".to_string(),
                    Activity {
                        description: "d".to_string(),
                        schedule: "s".to_string(),
                        max_participants: 12,
                        participants: vec!["michael@mergington.edu".to_string()],
                    },
                ),
                (
                    "Gym Class".to_string(),
                    Activity {
                        description: "d".to_string(),
                        schedule: "s".to_string(),
                        max_participants: 30,
                        participants: vec![],
                    },
                ),
            ]
            .into_iter()
            .collect())
        }

        async fn signup(&self, _: &str, email: &str) -> Result<ApiResponse, ApiError> {
            self.signups.fetch_add(1, Ordering::SeqCst);
            Ok(ApiResponse::new(
                200,
                ApiReply {
                    message: Some(format!("Signed up {}", email)),
                    detail: None,
                },
            ))
        }

        async fn unregister(&self, _: &str, _: &str) -> Result<ApiResponse, ApiError> {
            self.unregisters.fetch_add(1, Ordering::SeqCst);
            Ok(ApiResponse::new(200, ApiReply::default()))
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn app_with(api: &Arc<CountingApi>) -> App {
        let mut app = App::new(Board::new(api.clone()), "http://localhost:8000");
        app.refresh().await;
        app
    }

    /// Index of the first participant row
    fn participant_row(app: &App) -> usize {
        app.rows()
            .iter()
            .position(|r| r.kind == RowKind::Participant)
            .unwrap()
    }

    #[tokio::test]
    async fn test_quit() {
        let api = Arc::new(CountingApi::default());
        let mut app = app_with(&api).await;
        assert!(!app.handle_event(key(KeyCode::Char('q'))).await);
    }

    #[tokio::test]
    async fn test_enter_on_participant_asks_for_confirmation() {
        let api = Arc::new(CountingApi::default());
        let mut app = app_with(&api).await;
        app.selected_row = participant_row(&app);

        app.handle_event(key(KeyCode::Enter)).await;
        assert_eq!(
            app.mode,
            AppMode::ConfirmUnregister(ListAction::Unregister {
                activity: "Chess Club".to_string(),
                email: "michael@mergington.edu".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_enter_on_title_does_nothing() {
        let api = Arc::new(CountingApi::default());
        let mut app = app_with(&api).await;
        app.selected_row = 0;

        app.handle_event(key(KeyCode::Enter)).await;
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[tokio::test]
    async fn test_declining_confirmation_sends_no_request() {
        let api = Arc::new(CountingApi::default());
        let mut app = app_with(&api).await;
        app.selected_row = participant_row(&app);

        app.handle_event(key(KeyCode::Char('d'))).await;
        app.handle_event(key(KeyCode::Char('n'))).await;

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(api.unregisters.load(Ordering::SeqCst), 0);
        assert_eq!(api.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_confirming_unregisters_and_reloads() {
        let api = Arc::new(CountingApi::default());
        let mut app = app_with(&api).await;
        app.selected_row = participant_row(&app);

        app.handle_event(key(KeyCode::Delete)).await;
        app.handle_event(key(KeyCode::Char('y'))).await;

        assert_eq!(api.unregisters.load(Ordering::SeqCst), 1);
        assert_eq!(api.fetches.load(Ordering::SeqCst), 2);
        assert_eq!(app.board.banner().text(), Some("Participant removed"));
    }

    #[tokio::test]
    async fn test_signup_through_form() {
        let api = Arc::new(CountingApi::default());
        let mut app = app_with(&api).await;

        app.handle_event(key(KeyCode::Char('s'))).await;
        assert_eq!(app.mode, AppMode::Signup);
        for c in "ava@m.edu".chars() {
            app.handle_event(key(KeyCode::Char(c))).await;
        }
        app.handle_event(key(KeyCode::Tab)).await;
        app.handle_event(key(KeyCode::Right)).await;
        app.handle_event(key(KeyCode::Right)).await;
        assert_eq!(app.form.activity(), "Gym Class");

        app.handle_event(key(KeyCode::Enter)).await;

        assert_eq!(api.signups.load(Ordering::SeqCst), 1);
        assert_eq!(api.fetches.load(Ordering::SeqCst), 2);
        assert_eq!(app.form.email(), "");
        assert_eq!(app.form.activity(), "");
        assert_eq!(app.board.banner().text(), Some("Signed up ava@m.edu"));
    }

    #[tokio::test]
    async fn test_cursor_stays_in_bounds() {
        let api = Arc::new(CountingApi::default());
        let mut app = app_with(&api).await;
        let last = app.rows().len() - 1;

        app.handle_event(key(KeyCode::Up)).await;
        assert_eq!(app.selected_row, 0);
        for _ in 0..50 {
            app.handle_event(key(KeyCode::Down)).await;
        }
        assert_eq!(app.selected_row, last);
    }

    #[tokio::test]
    async fn test_page_down_jumps_to_next_card() {
        let api = Arc::new(CountingApi::default());
        let mut app = app_with(&api).await;

        app.handle_event(key(KeyCode::PageDown)).await;
        let row = app.selected().unwrap();
        assert_eq!(row.kind, RowKind::Title);
        assert_eq!(row.text, "Gym Class");
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_selected_activity() {
        let api = Arc::new(CountingApi::default());
        let mut app = app_with(&api).await;
        let loaded_at = app.last_loaded;

        app.handle_event(key(KeyCode::Char('s'))).await;
        app.handle_event(key(KeyCode::Tab)).await;
        app.handle_event(key(KeyCode::Right)).await;
        app.handle_event(key(KeyCode::Esc)).await;
        assert_eq!(app.form.activity(), "Chess Club");

        api.offline.store(true, Ordering::SeqCst);
        app.handle_event(key(KeyCode::Char('r'))).await;

        assert!(matches!(app.board.view().list, ListRegion::Failed(_)));
        assert_eq!(app.form.activity(), "Chess Club");
        assert_eq!(app.last_loaded, loaded_at);
        assert_eq!(app.selected_row, 0);
    }

    #[tokio::test]
    async fn test_successful_reload_resets_selected_activity() {
        let api = Arc::new(CountingApi::default());
        let mut app = app_with(&api).await;

        app.handle_event(key(KeyCode::Char('s'))).await;
        app.handle_event(key(KeyCode::Tab)).await;
        app.handle_event(key(KeyCode::Right)).await;
        app.handle_event(key(KeyCode::Esc)).await;
        app.handle_event(key(KeyCode::Char('r'))).await;

        assert_eq!(app.form.activity(), "");
        assert_eq!(api.fetches.load(Ordering::SeqCst), 2);
    }
}
