//! Masker errors

use thiserror::Error;
use veilshare_field::FieldError;
use veilshare_threshold::{PartyId, ShamirError};
use veilshare_values::ValueError;

/// Masking and unmasking errors
///
/// `name` is the path of the offending value, e.g. `arr[2]` or `pair.left`.
/// It is empty for conditions that concern the whole jar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaskerError {
    #[error("invalid masker configuration: {0}")]
    InvalidConfig(String),

    #[error("insufficient shares for '{name}': got {got}, need {need}")]
    InsufficientShares {
        name: String,
        got: usize,
        need: usize,
    },

    #[error("'{name}' is missing from party {party}")]
    MissingParty { name: String, party: PartyId },

    #[error("type mismatch for '{name}' from party {party}: expected {expected}, found {found}")]
    TypeMismatch {
        name: String,
        party: PartyId,
        expected: String,
        found: String,
    },

    #[error("public value '{name}' from party {party} disagrees with the other parties")]
    Inconsistency { name: String, party: PartyId },

    #[error("shares of '{name}' are corrupted{}", blame(.party))]
    Corruption {
        name: String,
        party: Option<PartyId>,
    },

    #[error("jar was built by a masker with a different configuration")]
    ForeignJar,

    #[error("'{name}' is not a well-formed value: {source}")]
    InvalidValue {
        name: String,
        #[source]
        source: ValueError,
    },

    #[error("cannot encode '{name}': {source}")]
    Encoding {
        name: String,
        #[source]
        source: FieldError,
    },

    #[error(transparent)]
    Shamir(#[from] ShamirError),
}

fn blame(party: &Option<PartyId>) -> String {
    party
        .as_ref()
        .map(|p| format!(" (party {p})"))
        .unwrap_or_default()
}

impl MaskerError {
    /// Attach a value path to a sharing failure
    pub(crate) fn from_shamir(name: &str, err: ShamirError) -> Self {
        match err {
            ShamirError::InsufficientShares { got, need } => MaskerError::InsufficientShares {
                name: name.to_string(),
                got,
                need,
            },
            ShamirError::Corruption { party } | ShamirError::InvalidShare(party) => {
                MaskerError::Corruption {
                    name: name.to_string(),
                    party: Some(party),
                }
            }
            ShamirError::ZeroSecret => MaskerError::Corruption {
                name: name.to_string(),
                party: None,
            },
            other => MaskerError::Shamir(other),
        }
    }

    pub(crate) fn encoding(name: &str, source: FieldError) -> Self {
        MaskerError::Encoding {
            name: name.to_string(),
            source,
        }
    }
}
