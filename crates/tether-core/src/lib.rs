//! Untyped weak/strong handle table with lazy compaction.
//!
//! This is the leaf crate of the Tether workspace. It defines
//! [`PointerTable`], an ordered sequence of type-erased object handles
//! whose retention mode — weak or strong — is fixed at construction.
//!
//! # Architecture
//!
//! ```text
//! PointerTable (ordered sequence, fixed Retention)
//! └── Slot[] (ownership-tagged handles)
//!     ├── Weak(rc::Weak<dyn Any>)   non-owning, can go dead
//!     └── Strong(Rc<dyn Any>)       co-owning, never dead
//! ```
//!
//! # Compaction model
//!
//! A weakly-held slot whose referent has been dropped elsewhere stays in
//! the table until the next compacting operation — [`PointerTable::count`],
//! [`PointerTable::last`], or the pass that runs after every insert. Nothing
//! happens at the moment the referent drops; compaction is pull-based.
//!
//! Most users want the typed façade in the `tether` crate rather than this
//! table directly.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod retention;
pub mod slot;
pub mod table;

// Public re-exports for the primary API surface.
pub use retention::Retention;
pub use slot::Slot;
pub use table::PointerTable;
