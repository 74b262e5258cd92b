// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Arena handles returned by the declaration API.
//!
//! A handle is an index into one arena of the
//! [`ServiceBuilder`](crate::ServiceBuilder) that issued it, stamped with
//! that builder's owner id. Handles stay valid in the frozen
//! [`Service`](crate::Service) built from the same builder. A handle from
//! another builder is rejected with
//! [`ShapeError::UnknownHandle`](crate::ShapeError).

use std::{
    fmt,
    sync::atomic::{AtomicU32, Ordering}
};

/// Owner id never issued to a builder.
pub(crate) const DETACHED: u32 = 0;

static NEXT_OWNER: AtomicU32 = AtomicU32::new(DETACHED + 1);

/// Fresh owner id for a new builder.
pub(crate) fn next_owner() -> u32 {
    NEXT_OWNER.fetch_add(1, Ordering::Relaxed)
}

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            owner: u32,
            index: usize
        }

        impl $name {
            pub(crate) const KIND: &'static str = $kind;

            pub(crate) const fn new(owner: u32, index: usize) -> Self {
                Self {
                    owner,
                    index
                }
            }

            /// Arena index.
            #[must_use]
            pub const fn index(self) -> usize {
                self.index
            }

            /// Arena index if the handle was issued by `owner`.
            pub(crate) fn index_in(self, owner: u32) -> Option<usize> {
                (self.owner == owner).then_some(self.index)
            }

            #[allow(dead_code)]
            pub(crate) fn unknown(self) -> crate::ShapeError {
                crate::ShapeError::UnknownHandle {
                    kind:  Self::KIND,
                    index: self.index
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", Self::KIND, self.index)
            }
        }
    };
}

handle!(
    /// Handle of a declared resource.
    ResourceId,
    "resource"
);
handle!(
    /// Handle of a standalone shape.
    ShapeId,
    "shape"
);
handle!(
    /// Handle of a declared operation.
    OperationId,
    "operation"
);
