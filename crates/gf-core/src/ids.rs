//! Strongly typed identifier newtypes.
//!
//! Robots, orders, shelves, and stations are all addressed by small integers
//! into flat `Vec`s.  Each kind of id gets its own wrapper type so they
//! cannot be mixed up at call sites.  All ids are `Copy + Ord + Hash`, usable
//! as map keys and sort keys without ceremony; the inner integer is `pub` so
//! loaders and fixtures can construct ids directly, but indexing call sites
//! should go through the `.index()` helper.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Index of a robot in the fleet.  Lower ids win contested reservations.
    pub struct RobotId(u32);
}

typed_id! {
    /// Identifier of an order as declared in the scenario's order stream.
    pub struct OrderId(u32);
}

typed_id! {
    /// Identifier of a storage shelf.
    pub struct ShelfId(u32);
}

typed_id! {
    /// Identifier of a consolidation station.
    pub struct StationId(u32);
}
