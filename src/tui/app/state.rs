use crate::card::{Card, CardId};
use crate::quick_pick::quick_pick_seeded;
use crate::rules::RuleMode;
use crate::session::{Announcement, CardStatus, Session, WinAnnouncer};
use crate::store::{self, Store, StoreError, Theme};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Play,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleTheme,
    EntryDigit(u8),
    EntryBackspace,
    EntrySubmit,
    EntryCancel,
    UndoCall,
    ResetCalls,
    NewCard,
    DeleteCard,
    FocusNext,
    FocusPrev,
    DismissBanner,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub started: Instant,
    pub session: Session,
    pub announcer: WinAnnouncer,
    pub theme: Theme,
    // Focused card index
    pub focus: usize,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_rule_mode: RuleMode,
    pub cfg_detect_wins: bool,
    pub cfg_theme: Theme,
    pub cfg_seed: u64,
    // Seed for the next quick-pick card
    pub next_seed: u64,
    help_open: bool,
    entry: String,
    entry_error: Option<String>,
    banner: Option<Announcement>,
    banner_at: Option<Instant>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_session(Session::default(), Theme::default())
    }
}

impl AppState {
    const ENTRY_MAX_DIGITS: usize = 2;
    const BANNER_TTL: Duration = Duration::from_secs(6);

    fn with_session(session: Session, theme: Theme) -> Self {
        let mut app = Self {
            scene: Scene::Menu,
            started: Instant::now(),
            cfg_rule_mode: session.rule_mode,
            cfg_detect_wins: session.detect_wins,
            session,
            announcer: WinAnnouncer::new(),
            theme,
            focus: 0,
            menu_index: 0,
            cfg_theme: theme,
            cfg_seed: 1,
            next_seed: 1,
            help_open: false,
            entry: String::new(),
            entry_error: None,
            banner: None,
            banner_at: None,
            dirty: false,
        };
        if app.session.cards().is_empty() {
            app.add_quick_pick();
        }
        // wins already on the board when the app opens are not celebrated again
        let _ = app.announcer.observe_session(&app.session);
        app.dirty = false;
        app
    }

    /// Restore session and theme from `store`.
    pub fn load(store: &dyn Store) -> Result<Self, StoreError> {
        let session = store::load_session(store)?;
        Ok(Self::with_session(session, store::load_theme(store)))
    }

    /// Write session and theme back if anything changed.
    pub fn persist(&mut self, store: &mut dyn Store) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }
        store::save_session(store, &self.session)?;
        store::save_theme(store, self.theme)?;
        self.dirty = false;
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    pub fn entry_text(&self) -> &str {
        &self.entry
    }

    pub fn entry_error(&self) -> Option<&str> {
        self.entry_error.as_deref()
    }

    pub fn banner(&self) -> Option<&Announcement> {
        self.banner.as_ref()
    }

    pub fn focused_card(&self) -> Option<&Card> {
        self.session.cards().get(self.focus)
    }

    /// Marks and verdict for every card, in display order.
    pub fn statuses(&self) -> Vec<(CardId, CardStatus)> {
        self.session.evaluate_all()
    }

    fn session_changed(&mut self) {
        self.dirty = true;
        let fresh = self.announcer.observe_session(&self.session);
        if let Some(last) = fresh.into_iter().last() {
            self.banner = Some(last);
            self.banner_at = Some(Instant::now());
        }
    }

    fn entry_push_digit(&mut self, digit: u8) {
        if self.entry.len() < Self::ENTRY_MAX_DIGITS {
            self.entry.push(char::from(b'0' + digit));
        }
        self.entry_error = None;
    }

    fn entry_backspace(&mut self) {
        self.entry.pop();
        self.entry_error = None;
    }

    fn entry_cancel(&mut self) {
        self.entry.clear();
        self.entry_error = None;
    }

    fn entry_submit(&mut self) -> bool {
        if self.entry.is_empty() {
            return false;
        }
        let n = match self.entry.parse::<u8>() {
            Ok(v) => v,
            Err(_) => {
                self.entry_error = Some("Invalid number".to_string());
                return false;
            }
        };
        match self.session.call_number(n) {
            Ok(true) => {
                self.entry.clear();
                self.entry_error = None;
                self.session_changed();
                true
            }
            Ok(false) => {
                self.entry_error = Some(format!("{n} already called"));
                false
            }
            Err(err) => {
                self.entry_error = Some(err.to_string());
                false
            }
        }
    }

    fn undo_call(&mut self) -> bool {
        if self.session.undo_last().is_none() {
            return false;
        }
        self.session_changed();
        true
    }

    fn reset_calls(&mut self) {
        self.session.reset_calls();
        self.announcer.clear();
        self.banner = None;
        self.session_changed();
    }

    fn add_quick_pick(&mut self) {
        let mut n = self.session.cards().len() + 1;
        while self.session.card(&CardId::new(format!("card-{n}"))).is_some() {
            n += 1;
        }
        let card = quick_pick_seeded(format!("card-{n}"), format!("Card {n}"), self.next_seed);
        self.next_seed = self.next_seed.wrapping_add(1);
        if self.session.add_card(card).is_ok() {
            self.focus = self.session.cards().len() - 1;
        }
    }

    fn delete_focused_card(&mut self) -> bool {
        let Some(id) = self.focused_card().map(|c| c.id().clone()) else {
            return false;
        };
        if self.session.remove_card(&id).is_err() {
            return false;
        }
        self.announcer.forget(&id);
        if self.banner.as_ref().is_some_and(|b| b.card == id) {
            self.banner = None;
        }
        self.focus = self.focus.min(self.session.cards().len().saturating_sub(1));
        self.session_changed();
        true
    }

    pub fn focus_next(&mut self) {
        let n = self.session.cards().len();
        if n == 0 {
            return;
        }
        self.focus = (self.focus + 1) % n;
    }

    pub fn focus_prev(&mut self) {
        let n = self.session.cards().len();
        if n == 0 {
            return;
        }
        self.focus = (self.focus + n - 1) % n;
    }

    /// Clear a banner that has been up long enough.
    pub fn on_tick(&mut self) {
        if let Some(at) = self.banner_at {
            if at.elapsed() >= Self::BANNER_TTL {
                self.banner = None;
                self.banner_at = None;
            }
        }
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Play {
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleTheme => {
                self.theme = self.theme.toggled();
                self.cfg_theme = self.theme;
                self.dirty = true;
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::EntryDigit(d) => {
                if self.scene == Scene::Play && d <= 9 {
                    self.entry_push_digit(d);
                }
                false
            }
            InputAction::EntryBackspace => {
                self.entry_backspace();
                false
            }
            InputAction::EntrySubmit => self.scene == Scene::Play && self.entry_submit(),
            InputAction::EntryCancel => {
                self.entry_cancel();
                false
            }
            InputAction::UndoCall => self.scene == Scene::Play && self.undo_call(),
            InputAction::ResetCalls => {
                if self.scene == Scene::Play {
                    self.reset_calls();
                }
                false
            }
            InputAction::NewCard => {
                if self.scene == Scene::Play {
                    self.add_quick_pick();
                    self.session_changed();
                }
                false
            }
            InputAction::DeleteCard => self.scene == Scene::Play && self.delete_focused_card(),
            InputAction::FocusNext => {
                if self.scene == Scene::Play {
                    self.focus_next();
                }
                false
            }
            InputAction::FocusPrev => {
                if self.scene == Scene::Play {
                    self.focus_prev();
                }
                false
            }
            InputAction::DismissBanner => {
                self.banner = None;
                self.banner_at = None;
                false
            }
        }
    }

    pub(crate) fn after_menu_apply(&mut self) {
        self.session_changed();
    }
}
