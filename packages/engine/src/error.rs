//! Error types for the request engine

use thiserror::Error;

/// Structural rule violated by a request tree.
///
/// Every rule carries its own message so the caller can surface exactly what
/// is wrong with the tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A NOT request without a wrapped request
    #[error("A LogicalNotRequest without a wrapped request has been detected, which is not allowed.")]
    EmptyNot,

    /// A link filter directly under a NOT
    #[error("It is not allowed to wrap requests of type FilterByLink into a LogicalNotRequest.")]
    NegatedLink,

    /// A NOT somewhere below another NOT
    #[error("A chain of nested LogicalNotRequests has been detected, which is not allowed.")]
    NestedNot,

    /// A link filter somewhere below a NOT
    #[error("A FilterByLink nested in a LogicalNotRequest has been detected, which is not allowed.")]
    LinkUnderNot,

    /// A link filter inside an OR, or alone inside an AND
    #[error("It is not allowed to pull from links without any filtering (a FilterByLink needs to be wrapped into a LogicalAndRequest with at least one more request).")]
    LinkWithoutCoFilter,

    /// An AND/OR without any children
    #[error("A {0} without any wrapped requests has been detected, which is not allowed.")]
    EmptyLogical(&'static str),

    /// The tree nests deeper than allowed
    #[error("Request nesting exceeds the maximum depth of {0}.")]
    TooDeep(usize),
}

/// Main error type for splitting operations
#[derive(Error, Debug)]
pub enum SplitError {
    /// The request tree breaks a structural rule
    #[error("Invalid request: {0}")]
    Invalid(#[from] ValidationError),

    /// A link filter was the whole (sub)request
    #[error("It is not allowed to pull from links without any filtering (request of type FilterByLink needs to be wrapped into a LogicalAndRequest with at least one more request).")]
    UnfilteredLink,

    /// Selection and link filters in the same subtree
    #[error("It is not allowed to combine selection requests with link requests - Revit selection does not work with links.")]
    SelectionWithLink,

    /// Two or more link filters in one subtree
    #[error("More than one link in a single request branch is not supported: {}", .0.join(", "))]
    MultipleLinks(Vec<String>),

    /// No loaded link matches the title
    #[error("Active Revit document does not contain link named {0}.")]
    LinkNotFound(String),

    /// No loaded link matches the full path
    #[error("Active Revit document does not contain link under path {0}.")]
    LinkPathNotFound(String),

    /// Several loaded links share the title
    #[error("There is more than one link document named {0} - please use full link path in request instead of link name to pull.")]
    AmbiguousLink(String),

    /// Nothing is left once the link filter is removed
    #[error("Request for link {0} has no filter left once the link filter is removed.")]
    EmptyResidual(String),

    /// The request nests deeper than allowed
    #[error("Request nesting exceeds the maximum depth of {0}")]
    TooDeep(usize),

    /// Distributing the request produces too many branches
    #[error("Request splits into more than {0} independent branches")]
    TooManyBranches(usize),

    /// Failed to load or parse an input document
    #[error("Failed to load input: {0}")]
    LoadError(String),

    /// YAML parsing error
    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for splitting operations
pub type Result<T> = std::result::Result<T, SplitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SplitError::LinkNotFound("foo.rvt".to_string());
        assert_eq!(
            err.to_string(),
            "Active Revit document does not contain link named foo.rvt."
        );
    }

    #[test]
    fn test_validation_error_wraps_with_prefix() {
        let err = SplitError::from(ValidationError::EmptyNot);
        assert!(err.to_string().starts_with("Invalid request: "));
        assert!(err.to_string().contains("LogicalNotRequest"));
    }

    #[test]
    fn test_multiple_links_lists_names() {
        let err = SplitError::MultipleLinks(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            err.to_string(),
            "More than one link in a single request branch is not supported: a, b"
        );
    }

    #[test]
    fn test_empty_logical_names_the_request() {
        let err = ValidationError::EmptyLogical("LogicalOrRequest");
        assert!(err.to_string().starts_with("A LogicalOrRequest without"));
    }
}
