//! Typed weak/strong object arrays with lazy compaction.
//!
//! [`ObjectArray<T>`] is a thin typed façade over the untyped
//! [`PointerTable`] from `tether-core`: an ordered, index-addressed
//! sequence of object handles whose retention mode — weak or strong —
//! is fixed at construction. Every operation is a direct delegation to
//! the table, translated between `Rc<T>` and the table's type-erased
//! `Rc<dyn Any>` handles.
//!
//! The classic use is an observer roster that must not keep its
//! observers alive:
//!
//! ```rust
//! use std::rc::Rc;
//! use tether::ObjectArray;
//!
//! let mut roster: ObjectArray<String> = ObjectArray::weak();
//! let alice = Rc::new("alice".to_owned());
//! let bob = Rc::new("bob".to_owned());
//! roster.append(Some(&alice));
//! roster.append(Some(&bob));
//! assert_eq!(roster.count(), 2);
//!
//! // Dropping the last outside owner vacates the slot; the array
//! // notices on the next compacting read, not at drop time.
//! drop(bob);
//! assert_eq!(roster.count(), 1);
//! assert_eq!(roster.last().unwrap().as_str(), "alice");
//! ```
//!
//! Strong mode makes the array a co-owner instead:
//!
//! ```rust
//! use std::rc::Rc;
//! use tether::ObjectArray;
//!
//! let mut pinned: ObjectArray<u32> = ObjectArray::strong();
//! let n = Rc::new(42);
//! pinned.append(Some(&n));
//! drop(n);
//! assert_eq!(pinned.count(), 1);
//! assert_eq!(*pinned.get(0).unwrap(), 42);
//! ```
//!
//! # Threading
//!
//! Handles are `Rc`/`Weak`, so both the array and the table are
//! `!Send + !Sync`: single-threaded use is a compile-time contract, not
//! a documentation footnote.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;

// Public re-exports for the primary API surface.
pub use array::ObjectArray;
pub use tether_core::{PointerTable, Retention, Slot};
