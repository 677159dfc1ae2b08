use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

/// Concrete rendering variant after resolving `System`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Light,
    Dark,
}

impl ThemeMode {
    /// Terminals give no reliable light/dark signal, so `System` resolves
    /// to the dark variant.
    pub fn resolve(self) -> ThemeVariant {
        match self {
            ThemeMode::Light => ThemeVariant::Light,
            ThemeMode::Dark | ThemeMode::System => ThemeVariant::Dark,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPreferences {
    theme: ThemeMode,
}

/// Process-wide theme preference. Every read and write goes through this
/// service; the preference survives restarts as a JSON file in the
/// platform config directory.
pub struct ThemeService {
    tx: watch::Sender<ThemeMode>,
    path: Option<PathBuf>,
}

impl ThemeService {
    pub fn new() -> Self {
        Self::with_path(preference_file_path())
    }

    fn with_path(path: Option<PathBuf>) -> Self {
        let mode = path
            .as_deref()
            .map(load_stored)
            .unwrap_or_default();
        let (tx, _) = watch::channel(mode);
        Self { tx, path }
    }

    pub fn mode(&self) -> ThemeMode {
        *self.tx.borrow()
    }

    pub fn variant(&self) -> ThemeVariant {
        self.mode().resolve()
    }

    pub fn set(&self, mode: ThemeMode) {
        self.tx.send_replace(mode);
        if let Some(path) = &self.path {
            store(path, mode);
        }
    }

    /// Switches to the opposite of the currently resolved variant.
    pub fn toggle(&self) {
        let next = match self.variant() {
            ThemeVariant::Dark => ThemeMode::Light,
            ThemeVariant::Light => ThemeMode::Dark,
        };
        self.set(next);
    }

    pub fn subscribe(&self) -> watch::Receiver<ThemeMode> {
        self.tx.subscribe()
    }
}

impl Default for ThemeService {
    fn default() -> Self {
        Self::new()
    }
}

fn preference_file_path() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "oxford-flashcards")?;
    Some(dirs.config_dir().join("preferences.json"))
}

fn load_stored(path: &Path) -> ThemeMode {
    let Ok(bytes) = fs::read(path) else {
        return ThemeMode::default();
    };
    match serde_json::from_slice::<StoredPreferences>(&bytes) {
        Ok(stored) => stored.theme,
        Err(error) => {
            warn!("ignoring unreadable theme preferences: {error}");
            ThemeMode::default()
        }
    }
}

// Persistence failures are logged and otherwise ignored; the in-memory
// preference stays authoritative for the session.
fn store(path: &Path, theme: ThemeMode) {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&StoredPreferences { theme })?;
        fs::write(path, json)
    };
    if let Err(error) = write() {
        warn!("failed to persist theme preference: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_preferences(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("oxford-flashcards-test-{}", std::process::id()))
            .join(name)
            .join("preferences.json")
    }

    #[test]
    fn defaults_to_system_resolving_dark() {
        let service = ThemeService::with_path(None);
        assert_eq!(service.mode(), ThemeMode::System);
        assert_eq!(service.variant(), ThemeVariant::Dark);
    }

    #[test]
    fn toggling_twice_returns_to_the_same_variant() {
        let service = ThemeService::with_path(None);
        let before = service.variant();
        service.toggle();
        assert_ne!(service.variant(), before);
        service.toggle();
        assert_eq!(service.variant(), before);
    }

    #[test]
    fn set_survives_a_restart() {
        let path = temp_preferences("restart");
        let service = ThemeService::with_path(Some(path.clone()));
        service.set(ThemeMode::Light);
        drop(service);

        let reopened = ThemeService::with_path(Some(path));
        assert_eq!(reopened.mode(), ThemeMode::Light);
    }

    #[test]
    fn corrupt_preferences_fall_back_to_default() {
        let path = temp_preferences("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"{broken").unwrap();
        let service = ThemeService::with_path(Some(path));
        assert_eq!(service.mode(), ThemeMode::System);
    }

    #[test]
    fn subscribers_see_changes() {
        let service = ThemeService::with_path(None);
        let mut changes = service.subscribe();
        assert!(!changes.has_changed().unwrap());
        service.set(ThemeMode::Dark);
        assert!(changes.has_changed().unwrap());
        assert_eq!(*changes.borrow_and_update(), ThemeMode::Dark);
    }
}
