use crate::card::{Card, CardId, MAX_NUMBER};
use crate::geometry::LineId;
use crate::rules::{self, Evaluation, RuleMode, WinResult};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("{0} is not a bingo number (1-75)")]
    OutOfRange(u8),
    #[error("a card with id '{0}' already exists")]
    DuplicateCard(CardId),
    #[error("no card with id '{0}'")]
    UnknownCard(CardId),
}

/// Game progress: the ordered called numbers, the rule in force, and the
/// cards being played.
///
/// ```
/// use bingo_tracker::quick_pick::quick_pick_seeded;
/// use bingo_tracker::rules::RuleMode;
/// use bingo_tracker::session::Session;
///
/// let mut session = Session::new(RuleMode::Blackout);
/// session.add_card(quick_pick_seeded("a", "Card A", 1)).unwrap();
/// session.call_number(12).unwrap();
/// assert_eq!(session.called(), &[12]);
/// assert!(!session.evaluate_all()[0].1.result.is_win());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    called: Vec<u8>,
    pub rule_mode: RuleMode,
    pub detect_wins: bool,
    cards: Vec<Card>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(RuleMode::default())
    }
}

/// Per-card marks and verdict handed to renderers.
pub type CardStatus = Evaluation;

impl Session {
    pub fn new(rule_mode: RuleMode) -> Self {
        Self { called: Vec::new(), rule_mode, detect_wins: true, cards: Vec::new() }
    }

    // --- Called numbers ---

    /// Numbers in the order they were called.
    pub fn called(&self) -> &[u8] {
        &self.called
    }

    pub fn called_set(&self) -> HashSet<u8> {
        self.called.iter().copied().collect()
    }

    pub fn is_called(&self, n: u8) -> bool {
        self.called.contains(&n)
    }

    /// Record a call. Returns `false` if the number had already been called.
    pub fn call_number(&mut self, n: u8) -> Result<bool, SessionError> {
        if !(1..=MAX_NUMBER).contains(&n) {
            return Err(SessionError::OutOfRange(n));
        }
        if self.is_called(n) {
            return Ok(false);
        }
        self.called.push(n);
        log::debug!("called {n} ({} so far)", self.called.len());
        Ok(true)
    }

    /// Take back a call made by mistake.
    pub fn uncall_number(&mut self, n: u8) -> bool {
        let before = self.called.len();
        self.called.retain(|&c| c != n);
        before != self.called.len()
    }

    /// Call `n` if it is not called yet, otherwise take it back. Returns
    /// whether `n` is called afterwards.
    pub fn toggle_number(&mut self, n: u8) -> Result<bool, SessionError> {
        if self.uncall_number(n) {
            return Ok(false);
        }
        self.call_number(n)
    }

    pub fn undo_last(&mut self) -> Option<u8> {
        let n = self.called.pop();
        if let Some(n) = n {
            log::debug!("undid call {n}");
        }
        n
    }

    pub fn reset_calls(&mut self) {
        log::info!("resetting {} called numbers", self.called.len());
        self.called.clear();
    }

    // --- Cards ---

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id() == id)
    }

    pub fn card_mut(&mut self, id: &CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id() == id)
    }

    pub fn add_card(&mut self, card: Card) -> Result<(), SessionError> {
        if self.card(card.id()).is_some() {
            return Err(SessionError::DuplicateCard(card.id().clone()));
        }
        self.cards.push(card);
        Ok(())
    }

    pub fn remove_card(&mut self, id: &CardId) -> Result<Card, SessionError> {
        let pos = self
            .cards
            .iter()
            .position(|c| c.id() == id)
            .ok_or_else(|| SessionError::UnknownCard(id.clone()))?;
        Ok(self.cards.remove(pos))
    }

    // --- Evaluation ---

    /// Marks and verdict for one card. With detection switched off the
    /// verdict is a plain non-win and the rules are not consulted.
    pub fn evaluate_card(&self, card: &Card) -> CardStatus {
        self.evaluate_with(card, &self.called_set())
    }

    pub fn evaluate_all(&self) -> Vec<(CardId, CardStatus)> {
        let called = self.called_set();
        self.cards.iter().map(|c| (c.id().clone(), self.evaluate_with(c, &called))).collect()
    }

    fn evaluate_with(&self, card: &Card, called: &HashSet<u8>) -> CardStatus {
        if self.detect_wins {
            rules::evaluate(card, called, self.rule_mode)
        } else {
            let marks = rules::compute_marks_with(card, called);
            Evaluation { marks, result: WinResult::DISABLED }
        }
    }
}

/// A win that has not been celebrated yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub card: CardId,
    pub card_name: String,
    pub mode: RuleMode,
    pub win_type: &'static str,
    pub lines: Vec<LineId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct WinKey {
    card: CardId,
    mode: RuleMode,
    lines: Vec<LineId>,
}

/// Remembers which wins were already announced so repeated evaluation does
/// not celebrate the same win twice. A different set of winning lines on the
/// same card counts as a new win.
#[derive(Debug, Clone, Default)]
pub struct WinAnnouncer {
    seen: HashSet<WinKey>,
}

impl WinAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an announcement the first time a given win is observed.
    pub fn observe(&mut self, card: &Card, result: &WinResult) -> Option<Announcement> {
        let win = result.win()?;
        let mut lines = win.lines().to_vec();
        lines.sort_by_key(|l| l.ordinal());
        let key = WinKey { card: card.id().clone(), mode: win.mode, lines: lines.clone() };
        if !self.seen.insert(key) {
            return None;
        }
        log::info!("card {} won: {}", card.id(), win.win_type());
        Some(Announcement {
            card: card.id().clone(),
            card_name: card.name().to_string(),
            mode: win.mode,
            win_type: win.win_type(),
            lines,
        })
    }

    /// Observe every card of a session, returning the new announcements.
    pub fn observe_session(&mut self, session: &Session) -> Vec<Announcement> {
        let called = session.called_set();
        session
            .cards()
            .iter()
            .filter_map(|card| {
                let status = session.evaluate_with(card, &called);
                self.observe(card, &status.result)
            })
            .collect()
    }

    pub fn forget(&mut self, card: &CardId) {
        self.seen.retain(|k| &k.card != card);
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }

    pub fn announced_count(&self) -> usize {
        self.seen.len()
    }
}
