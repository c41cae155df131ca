use std::sync::atomic::{AtomicU64, Ordering};

use crate::controller::section::Section;

/// Captured when a section refresh starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    section: Section,
    generation: u64,
}

impl Ticket {
    pub fn section(&self) -> Section {
        self.section
    }
}

/// Per-section request generations. A response is only rendered when its
/// ticket is still the newest one for that section.
#[derive(Debug, Default)]
pub struct SectionGenerations {
    counters: [AtomicU64; Section::ALL.len()],
}

impl SectionGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, section: Section) -> Ticket {
        let generation = self.counters[section.index()].fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            section,
            generation,
        }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.counters[ticket.section.index()].load(Ordering::SeqCst) == ticket.generation
    }

    /// Makes every outstanding ticket stale.
    pub fn invalidate_all(&self) {
        for counter in &self.counters {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }
}
