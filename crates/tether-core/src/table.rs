//! The untyped handle table.
//!
//! [`PointerTable`] is an ordered, index-addressed sequence of [`Slot`]s
//! with a fixed [`Retention`] mode. It is the type-erased storage layer
//! underneath the typed `tether::ObjectArray` façade; the façade delegates
//! every operation here one-for-one.

use std::any::Any;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::retention::Retention;
use crate::slot::Slot;

/// Inline slot capacity before the table spills to the heap.
///
/// Tables of this kind overwhelmingly hold observer-list-sized populations.
const INLINE_SLOTS: usize = 4;

/// An ordered table of weak or strong object handles.
///
/// Insertion order is significant, indices are the addressing scheme, and
/// duplicates of the same underlying object are permitted. Dead slots —
/// weakly-held entries whose referent was dropped elsewhere — are removed
/// lazily: by [`count`](Self::count), by [`last`](Self::last), and by the
/// pass that runs after every insert. Between those points, the raw
/// [`len`](Self::len) can overcount and a dead slot reads as `None`.
///
/// Index validity is therefore only guaranteed immediately after a
/// compacting call; in weak mode, dropping the last owner of a referent
/// between reads silently shrinks the sequence.
#[derive(Debug)]
pub struct PointerTable {
    retention: Retention,
    slots: SmallVec<[Slot; INLINE_SLOTS]>,
}

impl PointerTable {
    /// Create an empty table with the given retention mode.
    ///
    /// The mode is fixed for the table's lifetime.
    pub fn new(retention: Retention) -> Self {
        Self {
            retention,
            slots: SmallVec::new(),
        }
    }

    /// The retention mode this table was created with.
    pub fn retention(&self) -> Retention {
        self.retention
    }

    /// Raw slot count, dead slots included.
    ///
    /// This does not compact; use [`count`](Self::count) for the number of
    /// surviving entries.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the table currently holds no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Remove every dead slot, preserving the order of survivors.
    pub fn compact(&mut self) {
        self.slots.retain(|slot| slot.is_live());
    }

    /// Number of surviving entries, after compaction.
    pub fn count(&mut self) -> usize {
        self.compact();
        self.slots.len()
    }

    /// The last surviving entry, after compaction. `None` when the table
    /// is empty once dead slots are gone.
    pub fn last(&mut self) -> Option<Rc<dyn Any>> {
        self.compact();
        self.slots.last().and_then(Slot::get)
    }

    /// Insert `object` at the current end of the table.
    ///
    /// `None` is a no-op: no placeholder slot is created for an absent
    /// object.
    pub fn push(&mut self, object: Option<&Rc<dyn Any>>) {
        self.insert(self.slots.len(), object);
    }

    /// Insert `object` before the slot at `index`, shifting later slots
    /// right, then run a compaction pass.
    ///
    /// `None` is a no-op. Note that if dead slots precede `index`, the
    /// post-insert compaction shifts the new entry's effective position.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&mut self, index: usize, object: Option<&Rc<dyn Any>>) {
        let Some(object) = object else { return };
        self.slots.insert(index, Slot::retain(self.retention, object));
        self.compact();
    }

    /// Overwrite the slot at `index` in place.
    ///
    /// `None` is a no-op that leaves the existing slot — and its retention —
    /// untouched: passing `None` does NOT clear a slot.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn replace(&mut self, index: usize, object: Option<&Rc<dyn Any>>) {
        let Some(object) = object else { return };
        self.slots[index] = Slot::retain(self.retention, object);
    }

    /// The entry at `index`, bounds-checked against the raw length.
    ///
    /// Returns `None` when `index` is out of the current (uncompacted)
    /// range or the slot is dead. Never panics.
    pub fn get(&self, index: usize) -> Option<Rc<dyn Any>> {
        self.slots.get(index).and_then(Slot::get)
    }

    /// Delete the slot at `index` unconditionally, shifting later slots
    /// left. Dead slots are deleted like any other.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&mut self, index: usize) {
        self.slots.remove(index);
    }

    /// Iterate over the currently-live entries in order.
    ///
    /// Does not compact; dead slots are skipped, not removed.
    pub fn live(&self) -> impl Iterator<Item = Rc<dyn Any>> + '_ {
        self.slots.iter().filter_map(Slot::get)
    }
}

impl Default for PointerTable {
    /// A weak-mode table, the common observer-list configuration.
    fn default() -> Self {
        Self::new(Retention::Weak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn erased(n: u32) -> Rc<dyn Any> {
        Rc::new(n)
    }

    fn value(object: &Rc<dyn Any>) -> u32 {
        *object.downcast_ref::<u32>().unwrap()
    }

    #[test]
    fn new_table_is_empty() {
        let mut table = PointerTable::new(Retention::Weak);
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
        assert_eq!(table.count(), 0);
        assert!(table.last().is_none());
    }

    #[test]
    fn push_appends_in_order() {
        let mut table = PointerTable::new(Retention::Strong);
        let a = erased(1);
        let b = erased(2);
        table.push(Some(&a));
        table.push(Some(&b));
        assert_eq!(table.count(), 2);
        assert_eq!(value(&table.get(0).unwrap()), 1);
        assert_eq!(value(&table.get(1).unwrap()), 2);
    }

    #[test]
    fn push_none_is_a_no_op() {
        let mut table = PointerTable::new(Retention::Strong);
        table.push(None);
        assert_eq!(table.count(), 0);
    }

    #[test]
    fn dead_slot_lingers_until_a_compacting_read() {
        let mut table = PointerTable::new(Retention::Weak);
        let a = erased(1);
        let b = erased(2);
        table.push(Some(&a));
        table.push(Some(&b));
        drop(a);
        // Nothing happened at drop time: the raw length still counts the
        // dead slot, and reading it yields None rather than a panic.
        assert_eq!(table.len(), 2);
        assert!(table.get(0).is_none());
        assert_eq!(value(&table.get(1).unwrap()), 2);
        // The compacting read removes it and the survivor shifts down.
        assert_eq!(table.count(), 1);
        assert_eq!(value(&table.get(0).unwrap()), 2);
    }

    #[test]
    fn insert_shifts_right() {
        let mut table = PointerTable::new(Retention::Strong);
        let a = erased(1);
        let c = erased(3);
        table.push(Some(&a));
        table.push(Some(&c));
        let b = erased(2);
        table.insert(1, Some(&b));
        assert_eq!(table.count(), 3);
        assert_eq!(value(&table.get(1).unwrap()), 2);
        assert_eq!(value(&table.get(2).unwrap()), 3);
    }

    #[test]
    fn insert_none_is_a_no_op_even_out_of_range() {
        let mut table = PointerTable::new(Retention::Strong);
        // The absent-object guard runs before the bounds check.
        table.insert(99, None);
        assert_eq!(table.count(), 0);
    }

    #[test]
    #[should_panic]
    fn insert_past_the_end_panics() {
        let mut table = PointerTable::new(Retention::Strong);
        let a = erased(1);
        table.insert(1, Some(&a));
    }

    #[test]
    fn insert_runs_a_compaction_pass() {
        let mut table = PointerTable::new(Retention::Weak);
        let a = erased(1);
        let b = erased(2);
        table.push(Some(&a));
        table.push(Some(&b));
        drop(a);
        let c = erased(3);
        table.insert(2, Some(&c));
        // The dead slot is gone without any count() call.
        assert_eq!(table.len(), 2);
        assert_eq!(value(&table.get(0).unwrap()), 2);
        assert_eq!(value(&table.get(1).unwrap()), 3);
    }

    #[test]
    fn replace_overwrites_in_place() {
        let mut table = PointerTable::new(Retention::Strong);
        let a = erased(1);
        table.push(Some(&a));
        let b = erased(2);
        table.replace(0, Some(&b));
        assert_eq!(table.count(), 1);
        assert_eq!(value(&table.get(0).unwrap()), 2);
    }

    #[test]
    fn replace_none_does_not_clear() {
        let mut table = PointerTable::new(Retention::Strong);
        let a = erased(1);
        table.push(Some(&a));
        table.replace(0, None);
        assert_eq!(value(&table.get(0).unwrap()), 1);
    }

    #[test]
    #[should_panic]
    fn replace_out_of_range_panics() {
        let mut table = PointerTable::new(Retention::Strong);
        let a = erased(1);
        table.replace(0, Some(&a));
    }

    #[test]
    fn get_out_of_range_is_none() {
        let mut table = PointerTable::new(Retention::Strong);
        let a = erased(1);
        table.push(Some(&a));
        assert!(table.get(1).is_none());
        assert!(table.get(usize::MAX).is_none());
    }

    #[test]
    fn remove_shifts_left() {
        let mut table = PointerTable::new(Retention::Strong);
        let a = erased(1);
        let b = erased(2);
        let c = erased(3);
        table.push(Some(&a));
        table.push(Some(&b));
        table.push(Some(&c));
        table.remove(1);
        assert_eq!(table.count(), 2);
        assert_eq!(value(&table.get(0).unwrap()), 1);
        assert_eq!(value(&table.get(1).unwrap()), 3);
    }

    #[test]
    #[should_panic]
    fn remove_out_of_range_panics() {
        let mut table = PointerTable::new(Retention::Strong);
        table.remove(0);
    }

    #[test]
    fn last_compacts_first() {
        let mut table = PointerTable::new(Retention::Weak);
        let a = erased(1);
        let b = erased(2);
        table.push(Some(&a));
        table.push(Some(&b));
        drop(b);
        assert_eq!(value(&table.last().unwrap()), 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn last_on_fully_dead_table_is_none() {
        let mut table = PointerTable::new(Retention::Weak);
        let a = erased(1);
        table.push(Some(&a));
        drop(a);
        assert!(table.last().is_none());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn duplicates_are_permitted() {
        let mut table = PointerTable::new(Retention::Strong);
        let a = erased(1);
        table.push(Some(&a));
        table.push(Some(&a));
        assert_eq!(table.count(), 2);
    }

    #[test]
    fn strong_table_keeps_referents_alive() {
        let mut table = PointerTable::new(Retention::Strong);
        let a = erased(1);
        table.push(Some(&a));
        drop(a);
        assert_eq!(table.count(), 1);
        assert_eq!(value(&table.get(0).unwrap()), 1);
    }

    #[test]
    fn live_skips_dead_slots_without_removing_them() {
        let mut table = PointerTable::new(Retention::Weak);
        let a = erased(1);
        let b = erased(2);
        let c = erased(3);
        table.push(Some(&a));
        table.push(Some(&b));
        table.push(Some(&c));
        drop(b);
        let seen: Vec<u32> = table.live().map(|object| value(&object)).collect();
        assert_eq!(seen, vec![1, 3]);
        assert_eq!(table.len(), 3, "live() must not compact");
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn strong_count_equals_pushes(values in proptest::collection::vec(0u32..100, 0..32)) {
                let mut table = PointerTable::new(Retention::Strong);
                let owners: Vec<Rc<dyn Any>> =
                    values.iter().map(|&v| erased(v)).collect();
                for owner in &owners {
                    table.push(Some(owner));
                }
                drop(owners);
                prop_assert_eq!(table.count(), values.len());
            }

            #[test]
            fn weak_count_equals_surviving_owners(
                keep in proptest::collection::vec(proptest::bool::ANY, 0..32),
            ) {
                let mut table = PointerTable::new(Retention::Weak);
                let mut owners = Vec::new();
                for (i, &kept) in keep.iter().enumerate() {
                    let object = erased(i as u32);
                    table.push(Some(&object));
                    if kept {
                        owners.push(object);
                    }
                }
                prop_assert_eq!(table.count(), owners.len());
                // Survivors keep their relative order.
                let seen: Vec<u32> =
                    table.live().map(|object| value(&object)).collect();
                let expected: Vec<u32> =
                    owners.iter().map(value).collect();
                prop_assert_eq!(seen, expected);
            }

            #[test]
            fn remove_preserves_relative_order(
                len in 1usize..16,
                seed in 0usize..16,
            ) {
                let remove_at = seed % len;
                let mut table = PointerTable::new(Retention::Strong);
                let owners: Vec<Rc<dyn Any>> =
                    (0..len as u32).map(erased).collect();
                for owner in &owners {
                    table.push(Some(owner));
                }
                table.remove(remove_at);
                let seen: Vec<u32> =
                    table.live().map(|object| value(&object)).collect();
                let expected: Vec<u32> = (0..len as u32)
                    .filter(|&v| v != remove_at as u32)
                    .collect();
                prop_assert_eq!(seen, expected);
            }
        }
    }
}
