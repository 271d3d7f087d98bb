//! Tick-keyed continuations for delayed slots.
//!
//! A slot with an execution delay does not block. Its pre-execution hooks
//! run in order with the rest of the cycle, then a [`Continuation`] is
//! parked here until the tick counter reaches its due tick. Entries due on
//! the same tick come back in the order they were scheduled.

use std::collections::BTreeMap;

use verdant_types::{DefinitionId, OrganismId};

/// A deferred slot execution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Continuation {
    /// Organism the slot belongs to.
    pub organism_id: OrganismId,
    /// Slot to execute.
    pub slot_index: usize,
    /// Active that was paid for. A slot now holding anything else is not
    /// fired.
    pub definition_id: DefinitionId,
    /// Effect multiplier captured from the pre-execution hooks.
    pub effect_multiplier: f64,
    /// Tick the cycle that scheduled this ran on.
    pub scheduled_at: u64,
}

/// Pending continuations ordered by `(due_tick, insertion order)`.
#[derive(Debug, Clone, Default)]
pub struct ContinuationTable {
    entries: BTreeMap<(u64, u64), Continuation>,
    next_sequence: u64,
}

impl ContinuationTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Park `continuation` until `due_tick`.
    pub fn schedule(&mut self, due_tick: u64, continuation: Continuation) {
        let key = (due_tick, self.next_sequence);
        self.next_sequence = self.next_sequence.saturating_add(1);
        self.entries.insert(key, continuation);
    }

    /// Remove and return every continuation due at or before `tick`.
    pub fn take_due(&mut self, tick: u64) -> Vec<Continuation> {
        let later = self.entries.split_off(&(tick.saturating_add(1), 0));
        let due = std::mem::replace(&mut self.entries, later);
        due.into_values().collect()
    }

    /// Drop every continuation belonging to `organism`. Returns how many
    /// were dropped.
    pub fn cancel_organism(&mut self, organism: OrganismId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, c| c.organism_id != organism);
        before.saturating_sub(self.entries.len())
    }

    /// Pending continuations for `organism`.
    pub fn pending_for(&self, organism: OrganismId) -> usize {
        self.entries
            .values()
            .filter(|c| c.organism_id == organism)
            .count()
    }

    /// Number of pending continuations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn continuation(organism_id: OrganismId, slot_index: usize) -> Continuation {
        Continuation {
            organism_id,
            slot_index,
            definition_id: DefinitionId::new(),
            effect_multiplier: 1.0,
            scheduled_at: 0,
        }
    }

    #[test]
    fn due_entries_come_back_in_order() {
        let id = OrganismId::new();
        let mut table = ContinuationTable::new();
        table.schedule(5, continuation(id, 2));
        table.schedule(3, continuation(id, 1));
        table.schedule(5, continuation(id, 0));

        assert!(table.take_due(2).is_empty());
        let at3: Vec<usize> = table.take_due(3).iter().map(|c| c.slot_index).collect();
        assert_eq!(at3, vec![1]);
        let at5: Vec<usize> = table.take_due(5).iter().map(|c| c.slot_index).collect();
        assert_eq!(at5, vec![2, 0]);
        assert!(table.is_empty());
    }

    #[test]
    fn take_due_includes_overdue() {
        let id = OrganismId::new();
        let mut table = ContinuationTable::new();
        table.schedule(1, continuation(id, 0));
        assert_eq!(table.take_due(10).len(), 1);
    }

    #[test]
    fn cancel_drops_only_that_organism() {
        let a = OrganismId::new();
        let b = OrganismId::new();
        let mut table = ContinuationTable::new();
        table.schedule(4, continuation(a, 0));
        table.schedule(4, continuation(b, 0));
        table.schedule(6, continuation(a, 1));
        assert_eq!(table.cancel_organism(a), 2);
        assert_eq!(table.pending_for(b), 1);
        assert_eq!(table.len(), 1);
    }
}
