//! Ownership-tagged object handles.
//!
//! A [`Slot`] is one addressable position in a
//! [`PointerTable`](crate::PointerTable). The variant encodes the table's
//! retention mode: weak slots hold a non-owning handle that can go dead
//! when the referent is dropped elsewhere; strong slots co-own their
//! referent and are live for as long as they exist.

use std::any::Any;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::retention::Retention;

/// A single entry in a pointer table.
///
/// Slots are type-erased: they hold `dyn Any` handles, and it is the typed
/// façade's job to narrow reads back to a concrete type. Cloning a slot
/// clones the handle, not the referent.
#[derive(Clone)]
pub enum Slot {
    /// Non-owning handle. `get` succeeds only while strong owners exist
    /// elsewhere.
    Weak(Weak<dyn Any>),
    /// Co-owning handle. `get` always succeeds.
    Strong(Rc<dyn Any>),
}

impl Slot {
    /// Capture `object` with the given retention.
    ///
    /// Weak retention downgrades the caller's handle; the table never takes
    /// ownership. Strong retention clones it, making the slot a co-owner.
    pub fn retain(retention: Retention, object: &Rc<dyn Any>) -> Self {
        match retention {
            Retention::Weak => Self::Weak(Rc::downgrade(object)),
            Retention::Strong => Self::Strong(Rc::clone(object)),
        }
    }

    /// The held object, or `None` if the slot has gone dead.
    ///
    /// Strong slots always return `Some`; weak slots return `Some` only
    /// while the referent still has a strong owner somewhere.
    pub fn get(&self) -> Option<Rc<dyn Any>> {
        match self {
            Self::Weak(weak) => weak.upgrade(),
            Self::Strong(object) => Some(Rc::clone(object)),
        }
    }

    /// Whether the referent is still reachable through this slot.
    pub fn is_live(&self) -> bool {
        match self {
            Self::Weak(weak) => weak.strong_count() > 0,
            Self::Strong(_) => true,
        }
    }

    /// The retention mode this slot was created with.
    pub fn retention(&self) -> Retention {
        match self {
            Self::Weak(_) => Retention::Weak,
            Self::Strong(_) => Retention::Strong,
        }
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weak(weak) => f
                .debug_struct("Slot::Weak")
                .field("live", &(weak.strong_count() > 0))
                .finish(),
            Self::Strong(_) => f.debug_struct("Slot::Strong").finish(),
        }
    }
}
