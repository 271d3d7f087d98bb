//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Organisms get time-ordered v7 identifiers when planted. Effect
//! definitions carry a stable key authored alongside the catalog; it is
//! parsed from the catalog rather than generated, so the same definition
//! keeps its identity across saves.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a planted organism.
    OrganismId
}

define_id! {
    /// Stable key of an effect definition in the catalog.
    DefinitionId
}

impl DefinitionId {
    /// The nil key, reserved for the inert placeholder definition.
    pub const PLACEHOLDER: Self = Self(Uuid::nil());

    /// Whether this key is the placeholder key.
    pub fn is_placeholder(self) -> bool {
        self.0.is_nil()
    }
}
