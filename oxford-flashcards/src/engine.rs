use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use vocabulary::{Accent, VocabularyEntry};

use crate::AppEvent;

/// Reference cadence of the carousel.
pub const AUTO_ADVANCE_PERIOD: Duration = Duration::from_secs(7);

/// Cycling state over the loaded word list: a 0-indexed position that wraps
/// in both directions, the auto-advance flag and the selected accent.
///
/// Every operation is synchronous and total; the empty collection turns the
/// navigation operations into no-ops.
pub struct CardEngine {
    entries: Vec<VocabularyEntry>,
    current_index: usize,
    auto_advance: bool,
    accent: Accent,
}

/// Read-only view handed to the renderer.
pub struct Snapshot<'a> {
    pub entry: Option<&'a VocabularyEntry>,
    pub index: usize,
    pub total: usize,
    pub auto_advance: bool,
    pub accent: Accent,
}

impl CardEngine {
    pub fn new(entries: Vec<VocabularyEntry>, accent: Accent) -> Self {
        Self {
            entries,
            current_index: 0,
            // The carousel starts running; space pauses it.
            auto_advance: true,
            accent,
        }
    }

    pub fn advance_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.current_index = (self.current_index + 1) % self.entries.len();
    }

    pub fn advance_previous(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.current_index = (self.current_index + self.entries.len() - 1) % self.entries.len();
    }

    /// Jumps straight to a position; indexes wrap like the step operations.
    pub fn jump_to(&mut self, index: usize) {
        if self.entries.is_empty() {
            return;
        }
        self.current_index = index % self.entries.len();
    }

    pub fn toggle_auto_advance(&mut self) -> bool {
        self.auto_advance = !self.auto_advance;
        self.auto_advance
    }

    pub fn set_accent(&mut self, accent: Accent) {
        self.accent = accent;
    }

    pub fn accent(&self) -> Accent {
        self.accent
    }

    pub fn is_auto_advancing(&self) -> bool {
        self.auto_advance
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_entry(&self) -> Option<&VocabularyEntry> {
        self.entries.get(self.current_index)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            entry: self.current_entry(),
            index: self.current_index,
            total: self.entries.len(),
            auto_advance: self.auto_advance,
            accent: self.accent,
        }
    }
}

/// The periodic driver behind auto-advance. The spawned task is kept by
/// handle and aborted on `stop` and on drop, so no tick outlives the view
/// or a toggle-off.
pub struct AdvanceTimer {
    handle: Option<JoinHandle<()>>,
}

impl AdvanceTimer {
    pub fn stopped() -> Self {
        Self { handle: None }
    }

    /// Starts ticking after one full period; restarts if already running.
    pub fn start(&mut self, tx: mpsc::Sender<AppEvent>, period: Duration) {
        self.stop();
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(AppEvent::Tick).await.is_err() {
                    break;
                }
            }
        });
        self.handle = Some(handle);
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for AdvanceTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
