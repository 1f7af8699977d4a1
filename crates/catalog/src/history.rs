use crate::command::Command;
use crate::store::CatalogStore;

/// Linear undo log: the executed command sequence plus the applied-prefix
/// cursor. No redo is exposed; executing with undone commands pending
/// discards them first (classic linear-history truncation).
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Command>,
    applied: usize,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `command` against the store and record it. Any previously undone
    /// suffix is truncated before the append.
    pub fn execute(&mut self, command: Command, store: &mut CatalogStore) {
        command.apply(store);
        log::debug!("execute: {}", command.label);
        self.entries.truncate(self.applied);
        self.entries.push(command);
        self.applied += 1;
    }

    /// Revert the most recently applied command. Returns false when there
    /// is nothing to undo.
    pub fn undo(&mut self, store: &mut CatalogStore) -> bool {
        if self.applied == 0 {
            return false;
        }
        self.applied -= 1;
        let command = &self.entries[self.applied];
        log::debug!("undo: {}", command.label);
        command.revert(store);
        true
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    /// Label of the last applied command
    #[must_use]
    pub fn last_action(&self) -> Option<&str> {
        self.applied
            .checked_sub(1)
            .map(|index| self.entries[index].label.as_str())
    }

    /// Labels of the most recent `n` applied commands, newest first
    #[must_use]
    pub fn recent_labels(&self, n: usize) -> Vec<&str> {
        self.entries[..self.applied]
            .iter()
            .rev()
            .take(n)
            .map(|command| command.label.as_str())
            .collect()
    }

    #[must_use]
    pub fn entries(&self) -> &[Command] {
        &self.entries
    }

    /// Index of the last applied command, `None` when nothing is applied
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
