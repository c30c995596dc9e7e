use crate::card::{Card, CardError};
use crate::rules::RuleMode;
use crate::session::Session;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const CARDS_KEY: &str = "bingo.cards";
pub const SESSION_KEY: &str = "bingo.session";
pub const THEME_KEY: &str = "bingo.theme";

/// String key-value storage supplied by the host.
pub trait Store {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// `Store` backed by a `HashMap`; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// `Store` kept as one JSON object in a file, rewritten on every change.
///
/// A missing file is an empty store; the parent directory is created on the
/// first write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|source| StoreError::FileFormat { path: path.clone(), source })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        log::debug!("opened store {} ({} keys)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .map_err(|source| StoreError::Io { path: dir.to_path_buf(), source })?;
        }
        let data = serde_json::to_string_pretty(&self.entries)
            .map_err(|source| StoreError::FileFormat { path: self.path.clone(), source })?;
        fs::write(&self.path, data)
            .map_err(|source| StoreError::Io { path: self.path.clone(), source })
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum StoreError {
    #[error("stored value under '{key}' is not valid JSON: {source}")]
    Json {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("stored card is invalid: {0}")]
    InvalidCard(#[from] CardError),
    #[error("store file {} is not a JSON object of strings: {source}", .path.display())]
    FileFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot access store file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Light or dark colour scheme for the terminal view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }
}

// Rule mode is kept as its text key and parsed leniently on load.
#[derive(Serialize, Deserialize)]
struct StoredSession {
    called: Vec<u8>,
    rule_mode: String,
    detect_wins: bool,
}

fn encode<T: Serialize>(key: &'static str, value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|source| StoreError::Json { key, source })
}

fn decode<T: for<'de> Deserialize<'de>>(key: &'static str, raw: &str) -> Result<T, StoreError> {
    serde_json::from_str(raw).map_err(|source| StoreError::Json { key, source })
}

pub fn save_cards(store: &mut dyn Store, cards: &[Card]) -> Result<(), StoreError> {
    store.set(CARDS_KEY, encode(CARDS_KEY, &cards)?)?;
    log::debug!("saved {} cards", cards.len());
    Ok(())
}

/// Load saved cards, re-checking each one. Missing key means no cards.
pub fn load_cards(store: &dyn Store) -> Result<Vec<Card>, StoreError> {
    let Some(raw) = store.get(CARDS_KEY) else {
        return Ok(Vec::new());
    };
    let cards: Vec<Card> = decode(CARDS_KEY, &raw)?;
    for card in &cards {
        card.validate()?;
    }
    Ok(cards)
}

/// Save the session: progress under [`SESSION_KEY`], cards under [`CARDS_KEY`].
pub fn save_session(store: &mut dyn Store, session: &Session) -> Result<(), StoreError> {
    let stored = StoredSession {
        called: session.called().to_vec(),
        rule_mode: session.rule_mode.key().to_string(),
        detect_wins: session.detect_wins,
    };
    store.set(SESSION_KEY, encode(SESSION_KEY, &stored)?)?;
    save_cards(store, session.cards())
}

/// Restore a session. Numbers outside 1..=75 and unknown rule modes are
/// dropped rather than failing the load.
pub fn load_session(store: &dyn Store) -> Result<Session, StoreError> {
    let mut session = Session::default();
    if let Some(raw) = store.get(SESSION_KEY) {
        let stored: StoredSession = decode(SESSION_KEY, &raw)?;
        session.rule_mode = RuleMode::from_str_or_disabled(&stored.rule_mode);
        session.detect_wins = stored.detect_wins;
        for n in stored.called {
            if let Err(err) = session.call_number(n) {
                log::warn!("dropping stored call: {err}");
            }
        }
    }
    for card in load_cards(store)? {
        if let Err(err) = session.add_card(card) {
            log::warn!("dropping stored card: {err}");
        }
    }
    Ok(session)
}

pub fn save_theme(store: &mut dyn Store, theme: Theme) -> Result<(), StoreError> {
    store.set(THEME_KEY, encode(THEME_KEY, &theme)?)
}

/// Saved theme, or the default when nothing usable is stored.
pub fn load_theme(store: &dyn Store) -> Theme {
    store
        .get(THEME_KEY)
        .and_then(|raw| decode::<Theme>(THEME_KEY, &raw).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_basics() {
        let mut s = MemoryStore::new();
        assert!(s.is_empty());
        s.set("k", "v".into()).unwrap();
        assert_eq!(s.get("k").as_deref(), Some("v"));
        s.remove("k").unwrap();
        assert_eq!(s.get("k"), None);
    }

    #[test]
    fn missing_keys_give_defaults() {
        let s = MemoryStore::new();
        assert!(load_cards(&s).unwrap().is_empty());
        assert_eq!(load_session(&s).unwrap(), Session::default());
        assert_eq!(load_theme(&s), Theme::Dark);
    }

    #[test]
    fn unknown_rule_mode_disables_detection() {
        let mut s = MemoryStore::new();
        let raw = r#"{"called":[1,99,2],"rule_mode":"diamond","detect_wins":true}"#;
        s.set(SESSION_KEY, raw.into()).unwrap();
        let session = load_session(&s).unwrap();
        assert_eq!(session.rule_mode, RuleMode::None);
        assert_eq!(session.called(), &[1, 2]);
    }

    #[test]
    fn corrupt_json_is_an_error() {
        let mut s = MemoryStore::new();
        s.set(CARDS_KEY, "not json".into()).unwrap();
        assert!(matches!(load_cards(&s), Err(StoreError::Json { key: CARDS_KEY, .. })));
    }

    #[test]
    fn theme_round_trip_and_toggle() {
        let mut s = MemoryStore::new();
        save_theme(&mut s, Theme::Dark.toggled()).unwrap();
        assert_eq!(load_theme(&s), Theme::Light);
        s.set(THEME_KEY, "\"Neon\"".into()).unwrap();
        assert_eq!(load_theme(&s), Theme::Dark);
    }

    #[test]
    fn loaded_session_keeps_call_and_card_invariants() {
        let mut s = MemoryStore::new();
        let card = crate::quick_pick::quick_pick_seeded("a", "A", 4);
        save_cards(&mut s, &[card.clone(), card]).unwrap();
        let raw = r#"{"called":[0,99,5,5,40],"rule_mode":"standard","detect_wins":true}"#;
        s.set(SESSION_KEY, raw.into()).unwrap();

        let session = load_session(&s).unwrap();
        assert_eq!(session.called(), &[5, 40]);
        assert_eq!(session.cards().len(), 1);
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut s = FileStore::open(&path).unwrap();
        assert_eq!(s.get(THEME_KEY), None);
        save_theme(&mut s, Theme::Light).unwrap();
        s.set("scratch", "x".into()).unwrap();
        s.remove("scratch").unwrap();
        assert!(path.exists());

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.path(), path.as_path());
        assert_eq!(load_theme(&reopened), Theme::Light);
        assert_eq!(reopened.get("scratch"), None);
    }

    #[test]
    fn corrupt_store_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(FileStore::open(&path), Err(StoreError::FileFormat { .. })));
    }
}
