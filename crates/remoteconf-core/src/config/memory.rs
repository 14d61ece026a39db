//! In-memory section storage

use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::RwLock;

use super::section::Section;
use super::traits::{ConfigResult, SectionStorage};

/// In-memory storage for testing and ephemeral use
///
/// Saves can be switched off with [`MemoryStorage::set_fail_saves`] to
/// exercise the store's behavior when persisting fails.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    sections: RwLock<Vec<Section>>,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStorage {
    /// Create a new empty memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory storage with initial sections
    pub fn with_sections(sections: Vec<Section>) -> Self {
        Self {
            sections: RwLock::new(sections),
            ..Self::default()
        }
    }

    /// Make every subsequent save fail with an IO error
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// What the last successful save wrote
    pub fn snapshot(&self) -> Vec<Section> {
        self.sections.read().clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl SectionStorage for MemoryStorage {
    fn load(&self) -> ConfigResult<Vec<Section>> {
        Ok(self.sections.read().clone())
    }

    fn save(&self, sections: &[Section]) -> ConfigResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::Other, "memory storage: saves disabled").into());
        }
        *self.sections.write() = sections.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
