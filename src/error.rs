//! Crate-level error types.

use std::fmt;

use crate::picking::{PickId, PickSpace};

/// Errors produced by the molscope crate.
#[derive(Debug)]
pub enum MolscopeError {
    /// Degenerate geometry input (non-positive radius, coincident cylinder
    /// endpoints, too few circle segments).
    InvalidArgument(String),
    /// An identifier space ran out of pick IDs.
    CapacityExceeded {
        /// The identifier space that is exhausted.
        space: PickSpace,
        /// Largest identifier the space can hand out.
        capacity: u32,
    },
    /// An atom referenced by pick ID is not part of the molecule.
    UnknownAtom(PickId),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Mesh or schema serialization failure.
    Serialize(String),
}

impl fmt::Display for MolscopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => {
                write!(f, "invalid argument: {msg}")
            }
            Self::CapacityExceeded { space, capacity } => write!(
                f,
                "{space} identifier space exhausted ({capacity} objects max)"
            ),
            Self::UnknownAtom(id) => write!(f, "no atom with pick id {id}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Serialize(msg) => write!(f, "serialization error: {msg}"),
        }
    }
}

impl std::error::Error for MolscopeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MolscopeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_message_names_space() {
        let err = MolscopeError::CapacityExceeded {
            space: PickSpace::Bond,
            capacity: 255,
        };
        assert_eq!(
            err.to_string(),
            "bond identifier space exhausted (255 objects max)"
        );
    }

    #[test]
    fn io_errors_keep_their_source() {
        use std::error::Error;

        let err = MolscopeError::from(std::io::Error::other("disk gone"));
        assert!(err.source().is_some());
        assert!(MolscopeError::InvalidArgument("x".into()).source().is_none());
    }
}
