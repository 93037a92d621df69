//! Input validation for names that end up in a kubectl argument vector
//!
//! Arguments are never passed through a shell, but a name starting with `-`
//! would still be read by kubectl as a flag, so names are checked before any
//! process is spawned.

/// Longest name accepted for namespaces, pods and contexts
pub const MAX_NAME_LEN: usize = 253;

/// Rejected input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("namespace is required")]
    NamespaceRequired,

    #[error("invalid namespace name")]
    InvalidNamespace,

    #[error("pod name is required")]
    PodNameRequired,

    #[error("invalid pod name")]
    InvalidPodName,

    #[error("context name is required")]
    ContextRequired,

    #[error("invalid context name")]
    InvalidContext,
}

/// Lowercase alphanumerics and hyphens, not starting or ending with a hyphen
fn is_dns_label(name: &str) -> bool {
    let bytes = name.as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };
    let alnum = |b: &u8| b.is_ascii_lowercase() || b.is_ascii_digit();

    alnum(first) && alnum(last) && bytes.iter().all(|b| alnum(b) || *b == b'-')
}

/// Conservative character set for kubeconfig context names
fn is_safe_context(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    first.is_ascii_alphanumeric()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | ':' | '@' | '/' | '-'))
}

pub fn validate_namespace(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::NamespaceRequired);
    }
    if name.len() > MAX_NAME_LEN || !is_dns_label(name) {
        return Err(ValidationError::InvalidNamespace);
    }
    Ok(())
}

pub fn validate_pod_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::PodNameRequired);
    }
    if name.len() > MAX_NAME_LEN || !is_dns_label(name) {
        return Err(ValidationError::InvalidPodName);
    }
    Ok(())
}

/// An empty context means "use the current one" and is accepted
pub fn validate_context(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Ok(());
    }
    if name.starts_with('-') || name.len() > MAX_NAME_LEN || !is_safe_context(name) {
        return Err(ValidationError::InvalidContext);
    }
    Ok(())
}

/// Like [`validate_context`], but for operations where a context must be named
pub fn validate_required_context(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::ContextRequired);
    }
    validate_context(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dns_labels() {
        assert!(validate_namespace("default").is_ok());
        assert!(validate_namespace("kube-system").is_ok());
        assert!(validate_namespace("a").is_ok());
        assert!(validate_pod_name("web-7d9c5b-x2x9z").is_ok());

        assert_eq!(
            validate_namespace(""),
            Err(ValidationError::NamespaceRequired)
        );
        assert_eq!(
            validate_namespace("Default"),
            Err(ValidationError::InvalidNamespace)
        );
        assert_eq!(
            validate_namespace("-n"),
            Err(ValidationError::InvalidNamespace)
        );
        assert_eq!(
            validate_namespace("trailing-"),
            Err(ValidationError::InvalidNamespace)
        );
        assert_eq!(
            validate_pod_name("web;rm -rf"),
            Err(ValidationError::InvalidPodName)
        );
        assert_eq!(
            validate_pod_name("web.example"),
            Err(ValidationError::InvalidPodName)
        );
        assert_eq!(validate_pod_name(""), Err(ValidationError::PodNameRequired));
    }

    #[test]
    fn test_length_limit() {
        let longest = "a".repeat(MAX_NAME_LEN);
        let too_long = "a".repeat(MAX_NAME_LEN + 1);
        assert!(validate_namespace(&longest).is_ok());
        assert_eq!(
            validate_namespace(&too_long),
            Err(ValidationError::InvalidNamespace)
        );
        assert_eq!(
            validate_context(&too_long),
            Err(ValidationError::InvalidContext)
        );
    }

    #[test]
    fn test_context_names() {
        assert!(validate_context("").is_ok());
        assert!(validate_context("kind-dev").is_ok());
        assert!(validate_context("arn:aws:eks:us-east-1:123456789012:cluster/prod").is_ok());
        assert!(validate_context("admin@Prod_Cluster.local").is_ok());

        assert_eq!(
            validate_context("--kubeconfig=/tmp/x"),
            Err(ValidationError::InvalidContext)
        );
        assert_eq!(
            validate_context("prod cluster"),
            Err(ValidationError::InvalidContext)
        );
        assert_eq!(
            validate_context(".hidden"),
            Err(ValidationError::InvalidContext)
        );
        assert_eq!(
            validate_required_context(""),
            Err(ValidationError::ContextRequired)
        );
    }
}
