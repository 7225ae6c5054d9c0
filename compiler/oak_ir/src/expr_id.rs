//! Typed indices and ranges into the expression arena.
//!
//! Every node reference is a `u32` index; every child list is a
//! `(start, len)` range into one of the arena's flattened side tables.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create from a raw index.
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Get the index into the arena table.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

macro_rules! define_range {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
        pub struct $name {
            pub start: u32,
            pub len: u32,
        }

        impl $name {
            /// Empty range.
            pub const EMPTY: $name = $name { start: 0, len: 0 };

            /// Create a new range.
            #[inline]
            pub const fn new(start: u32, len: u32) -> Self {
                $name { start, len }
            }

            /// Number of entries.
            #[inline]
            pub const fn len(&self) -> usize {
                self.len as usize
            }

            /// Check if the range is empty.
            #[inline]
            pub const fn is_empty(&self) -> bool {
                self.len == 0
            }

            /// Slice bounds into the backing table.
            #[inline]
            pub(crate) fn bounds(&self) -> std::ops::Range<usize> {
                let start = self.start as usize;
                start..start + self.len as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    concat!(stringify!($name), "({}..{})"),
                    self.start,
                    self.start + self.len
                )
            }
        }
    };
}

define_id!(
    /// Index of an expression node.
    ExprId
);
define_id!(
    /// Index of a match pattern.
    PatternId
);
define_id!(
    /// Index of a function literal definition.
    FunctionId
);
define_id!(
    /// Index of a string literal's bytes.
    StrId
);

define_range!(
    /// Range of expressions (call arguments, list elements, block bodies).
    ExprRange
);
define_range!(
    /// Range of patterns (list pattern elements, per-subject clause patterns).
    PatternRange
);
define_range!(
    /// Range of match clauses.
    ClauseRange
);
define_range!(
    /// Range of object literal entries.
    EntryRange
);
define_range!(
    /// Range of object pattern entries.
    PatternEntryRange
);
define_range!(
    /// Range of function parameter names.
    ParamRange
);
