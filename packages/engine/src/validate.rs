//! Structural validation of request trees
//!
//! A link filter only makes sense as one conjunct of an AND that carries at
//! least one other filter: pulling a whole linked model unfiltered is not
//! allowed, and negating a link selection has no meaning in Revit. These rules
//! are checked on every branch before it is organized by link.

use crate::config;
use crate::diagnostics::Diagnostics;
use crate::error::ValidationError;
use crate::request::{Request, RequestKind};

/// Validate a request tree, recording the violated rule (if any).
///
/// Returns `true` when the tree may be organized by link. Never panics; the
/// caller aborts the split on `false`.
pub fn validate(request: &Request, diagnostics: &mut Diagnostics) -> bool {
    match check(request) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(request = %request, error = %err, "Request failed validation");
            diagnostics.error(&err);
            false
        }
    }
}

/// Validate a request tree, returning the first violated rule.
///
/// Trees nesting deeper than [`config::MAX_REQUEST_DEPTH`] are rejected
/// before any rule is checked.
pub fn check(request: &Request) -> Result<(), ValidationError> {
    if request.depth() > config::MAX_REQUEST_DEPTH {
        return Err(ValidationError::TooDeep(config::MAX_REQUEST_DEPTH));
    }
    check_rules(request)
}

fn check_rules(request: &Request) -> Result<(), ValidationError> {
    match request {
        Request::Not { request: None } => Err(ValidationError::EmptyNot),
        Request::Not {
            request: Some(child),
        } => {
            if child.is_link() {
                Err(ValidationError::NegatedLink)
            } else if child.contains_kind(RequestKind::Not) {
                Err(ValidationError::NestedNot)
            } else if child.contains_kind(RequestKind::Link) {
                Err(ValidationError::LinkUnderNot)
            } else {
                check_rules(child)
            }
        }
        Request::And { requests } | Request::Or { requests } => {
            if requests.is_empty() {
                return Err(ValidationError::EmptyLogical(request.type_name()));
            }

            let is_or = matches!(request, Request::Or { .. });
            if requests.iter().any(Request::is_link) && (is_or || requests.len() == 1) {
                return Err(ValidationError::LinkWithoutCoFilter);
            }

            requests.iter().try_for_each(check_rules)
        }
        _ => Ok(()),
    }
}
