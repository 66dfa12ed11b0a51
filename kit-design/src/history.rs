// Undo/redo history of design snapshots.

use std::collections::VecDeque;
use tracing::{debug, trace};

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Where the cursor sits relative to the stored entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryPosition {
    Empty,
    SingleEntry,
    /// Undo impossible, redo possible.
    AtStart,
    /// Undo and redo both possible.
    MidStack,
    /// Undo possible, redo impossible.
    AtEnd,
}

/// Bounded, linear snapshot history with a cursor.
///
/// Pushing while the cursor is behind the newest entry abandons the redo
/// branch. Once `capacity` is reached the oldest entry is evicted, so the
/// cursor stays on the newest entry instead of running past the cap.
#[derive(Debug, Clone)]
pub struct HistoryStack<T> {
    entries: VecDeque<T>,
    cursor: Option<usize>,
    capacity: usize,
}

impl<T: Clone> Default for HistoryStack<T> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl<T: Clone> HistoryStack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        debug!(capacity, "creating history stack");
        Self {
            entries: VecDeque::with_capacity(capacity),
            cursor: None,
            capacity,
        }
    }

    pub fn push(&mut self, entry: T) {
        match self.cursor {
            Some(cursor) => {
                let dropped = self.entries.len() - (cursor + 1);
                if dropped > 0 {
                    trace!(dropped, "discarding redo branch");
                }
                self.entries.truncate(cursor + 1);
            }
            None => self.entries.clear(),
        }

        self.entries.push_back(entry);

        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            trace!(capacity = self.capacity, "evicted oldest history entry");
        }

        self.cursor = Some(self.entries.len() - 1);
        trace!(len = self.entries.len(), cursor = ?self.cursor, "history push");
    }

    pub fn undo(&mut self) -> Option<&T> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                trace!(cursor = cursor - 1, "history undo");
                self.entries.get(cursor - 1)
            }
            _ => None,
        }
    }

    pub fn redo(&mut self) -> Option<&T> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => {
                self.cursor = Some(cursor + 1);
                trace!(cursor = cursor + 1, "history redo");
                self.entries.get(cursor + 1)
            }
            _ => None,
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.cursor.and_then(|cursor| self.entries.get(cursor))
    }

    /// `None` when empty (the -1 sentinel).
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor + 1 < self.entries.len())
    }

    pub fn position(&self) -> HistoryPosition {
        match (self.entries.len(), self.can_undo(), self.can_redo()) {
            (0, _, _) => HistoryPosition::Empty,
            (1, _, _) => HistoryPosition::SingleEntry,
            (_, true, true) => HistoryPosition::MidStack,
            (_, false, _) => HistoryPosition::AtStart,
            (_, true, false) => HistoryPosition::AtEnd,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}
