//! kubectl execution module
//!
//! Name validation and the process runner. Argument vectors are built by the
//! service layer.

pub mod runner;
pub mod validate;

pub use runner::{CommandRunner, KubectlRunner, TIMEOUT_MESSAGE};
pub use validate::{
    ValidationError, validate_context, validate_namespace, validate_pod_name,
    validate_required_context,
};

#[cfg(test)]
pub use runner::MockCommandRunner;
