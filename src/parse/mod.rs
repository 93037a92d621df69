//! Decoders for kubectl JSON output
//!
//! Pure functions from raw stdout to view records. Nothing here spawns
//! processes or touches shared state.

mod age;
mod lists;
mod pods;

pub use age::format_age;
pub use lists::{parse_contexts, parse_namespaces};
pub use pods::{parse_pods, parse_pods_at};

use serde::{Deserialize, Deserializer};

/// Decoding failure for a kubectl payload
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid {resource} JSON: {source}")]
    Malformed {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ParseError {
    pub(crate) fn malformed(resource: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| ParseError::Malformed { resource, source }
    }
}

/// kubectl emits explicit `null` for empty lists and unset fields; read it as the default
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Result type for decoders
pub type ParseResult<T> = Result<T, ParseError>;
