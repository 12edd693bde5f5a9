use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Machine-readable prefix every canonical role name carries
pub const ROLE_PREFIX: &str = "ROLE_";

/// A named permission grant, identified by its canonical name (`ROLE_LIBRARIAN`).
///
/// Call sites that need the human-facing form use [`Role::display_name`]
/// rather than slicing the name themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "ROLE_LIBRARIAN")]
pub struct Role(String);

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Role granted to library staff
    pub fn librarian() -> Self {
        Self::new("ROLE_LIBRARIAN")
    }

    /// Canonical name as stored
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Name with the fixed-length prefix removed.
    ///
    /// Removal is positional: the first `ROLE_PREFIX.len()` characters are
    /// dropped without checking them. Names shorter than the prefix come
    /// back unchanged.
    pub fn display_name(&self) -> &str {
        // Char boundaries plus the end of the string, so an exact-length name strips to "".
        let split = self
            .0
            .char_indices()
            .map(|(at, _)| at)
            .chain(std::iter::once(self.0.len()))
            .nth(ROLE_PREFIX.chars().count());

        match split {
            Some(at) => &self.0[at..],
            None => &self.0,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}
