//! The table-wide retention mode.

use std::fmt;

/// How a [`PointerTable`](crate::PointerTable) holds the objects placed in it.
///
/// Chosen once at construction and irrevocable for the table's lifetime;
/// a single table never mixes modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Retention {
    /// Slots hold non-owning handles. The table makes no lifetime claim on
    /// its referents; a slot whose referent is dropped elsewhere goes dead
    /// and is removed by the next compaction pass.
    Weak,
    /// Slots hold co-owning handles. Each referent stays alive at least as
    /// long as it occupies a slot.
    Strong,
}

impl fmt::Display for Retention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weak => write!(f, "weak"),
            Self::Strong => write!(f, "strong"),
        }
    }
}
