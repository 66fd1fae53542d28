//! The typed array façade.
//!
//! [`ObjectArray<T>`] narrows the untyped handles of a
//! [`PointerTable`] to a concrete `T` on every read. The narrowing is
//! silent: a slot holding an object that is not a `T` reads as `None`,
//! exactly like a dead or out-of-range slot. That contract is surprising
//! but deliberate — callers that share the underlying table across types
//! must treat `None` as "nothing for me here", not "empty".

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use tether_core::{PointerTable, Retention};

/// Type-erase a typed handle for the table.
///
/// Weak-mode tables downgrade from the erased clone; the clone itself is
/// dropped before the call returns, so no ownership leaks into the caller's
/// accounting.
fn erase<T: 'static>(object: Option<&Rc<T>>) -> Option<Rc<dyn Any>> {
    object.map(|object| Rc::clone(object) as Rc<dyn Any>)
}

/// An ordered array of weakly- or strongly-held `T` objects.
///
/// The retention mode is fixed at construction: [`weak`](Self::weak)
/// arrays never extend a referent's lifetime and their slots vacate
/// when the last outside owner drops; [`strong`](Self::strong) arrays
/// co-own every occupant. Vacated slots are removed lazily — by
/// [`count`](Self::count), [`last`](Self::last), and after every insert —
/// never at the moment the referent drops.
///
/// Indices are the addressing scheme and duplicates are permitted.
/// Index validity is only guaranteed immediately after a compacting
/// call; in weak mode a drop elsewhere silently shrinks the sequence.
pub struct ObjectArray<T: 'static> {
    table: PointerTable,
    _marker: PhantomData<Rc<T>>,
}

impl<T: 'static> ObjectArray<T> {
    /// An empty weak-mode array.
    pub fn weak() -> Self {
        Self::with_retention(Retention::Weak)
    }

    /// An empty strong-mode array.
    pub fn strong() -> Self {
        Self::with_retention(Retention::Strong)
    }

    /// An empty array with an explicit retention mode.
    pub fn with_retention(retention: Retention) -> Self {
        Self {
            table: PointerTable::new(retention),
            _marker: PhantomData,
        }
    }

    /// The retention mode this array was created with.
    pub fn retention(&self) -> Retention {
        self.table.retention()
    }

    /// Number of surviving elements, after compaction.
    pub fn count(&mut self) -> usize {
        self.table.count()
    }

    /// The last surviving element, after compaction.
    ///
    /// `None` when the array is empty once vacated slots are gone, or when
    /// the last slot holds an object that is not a `T`.
    pub fn last(&mut self) -> Option<Rc<T>> {
        self.table.last().and_then(|object| object.downcast().ok())
    }

    /// Append `object` at the current end.
    ///
    /// `None` is a no-op: no placeholder slot is created for an absent
    /// object.
    pub fn append(&mut self, object: Option<&Rc<T>>) {
        self.table.push(erase(object).as_ref());
    }

    /// Insert `object` before the element at `index`, shifting later
    /// elements right; a compaction pass runs after the insert.
    ///
    /// `None` is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if `index` is past the current end of the underlying table.
    pub fn insert(&mut self, index: usize, object: Option<&Rc<T>>) {
        self.table.insert(index, erase(object).as_ref());
    }

    /// Overwrite the slot at `index` in place.
    ///
    /// `None` is a no-op that leaves the existing occupant untouched —
    /// passing `None` does NOT clear the slot.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of the underlying table's range.
    pub fn replace(&mut self, index: usize, object: Option<&Rc<T>>) {
        self.table.replace(index, erase(object).as_ref());
    }

    /// The element at `index`, bounds-checked against the raw
    /// (uncompacted) range.
    ///
    /// Returns `None` when `index` is out of range, the slot has vacated,
    /// or the slot holds an object that is not a `T`. Never panics.
    pub fn get(&self, index: usize) -> Option<Rc<T>> {
        self.table.get(index).and_then(|object| object.downcast().ok())
    }

    /// Delete the slot at `index` unconditionally, shifting later
    /// elements left.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of the underlying table's range.
    pub fn remove(&mut self, index: usize) {
        self.table.remove(index);
    }

    /// Snapshot of the live, type-matching elements in order.
    ///
    /// Does not compact; vacated and foreign-typed slots are skipped.
    pub fn objects(&self) -> Vec<Rc<T>> {
        self.table
            .live()
            .filter_map(|object| object.downcast().ok())
            .collect()
    }

    /// The wrapped untyped table.
    pub fn as_table(&self) -> &PointerTable {
        &self.table
    }

    /// Mutable access to the wrapped untyped table.
    ///
    /// Writing a non-`T` object through the table is legal; it will read
    /// as `None` through this façade.
    pub fn table_mut(&mut self) -> &mut PointerTable {
        &mut self.table
    }
}

impl<T: PartialEq + 'static> ObjectArray<T> {
    /// Remove every element equal to `value`, each exactly once, leaving
    /// the non-matching elements in their original relative order.
    pub fn remove_all_equal(&mut self, value: &T) {
        self.table.compact();
        let mut index = 0;
        while index < self.table.len() {
            match self.get(index) {
                // Later elements shift down; do not advance past the
                // removed index.
                Some(object) if *object == *value => self.table.remove(index),
                _ => index += 1,
            }
        }
    }
}

impl<T: 'static> Default for ObjectArray<T> {
    /// A weak-mode array, the common observer-roster configuration.
    fn default() -> Self {
        Self::weak()
    }
}

impl<T: 'static> fmt::Debug for ObjectArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectArray")
            .field("retention", &self.table.retention())
            .field("len", &self.table.len())
            .finish()
    }
}
