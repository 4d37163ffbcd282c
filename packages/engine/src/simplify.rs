//! Leaf removal and canonical simplification of request trees
//!
//! Removing a leaf can leave combinators with a single child (or, on trees
//! that skipped validation, none). [`simplify`] brings such a tree back to a
//! canonical form:
//! - AND/OR with one child collapse to that child
//! - AND/OR with no children are dropped
//! - NOT is kept only while it still wraps a request
//!
//! A tree that simplifies away entirely yields `None`.

use crate::request::{Request, RequestKind};

/// Rebuild a tree without the leaves of the given kind.
///
/// Combinators are kept even when they lose all their children; a NOT whose
/// wrapped request is removed gets an empty slot. Returns `None` only when the
/// root itself is removed.
pub fn remove_kind(request: &Request, kind: RequestKind) -> Option<Request> {
    if request.is_leaf() && request.kind() == kind {
        return None;
    }

    Some(match request {
        Request::And { requests } => Request::and(
            requests
                .iter()
                .filter_map(|child| remove_kind(child, kind))
                .collect(),
        ),
        Request::Or { requests } => Request::or(
            requests
                .iter()
                .filter_map(|child| remove_kind(child, kind))
                .collect(),
        ),
        Request::Not { request: child } => Request::Not {
            request: child
                .as_deref()
                .and_then(|child| remove_kind(child, kind))
                .map(Box::new),
        },
        leaf => leaf.clone(),
    })
}

/// Bring a tree into canonical form (see module docs).
pub fn simplify(request: Request) -> Option<Request> {
    match request {
        Request::And { requests } => collapse(requests, Request::and),
        Request::Or { requests } => collapse(requests, Request::or),
        Request::Not {
            request: Some(child),
        } => simplify(*child).map(Request::not),
        Request::Not { request: None } => None,
        leaf => Some(leaf),
    }
}

fn collapse(requests: Vec<Request>, combine: fn(Vec<Request>) -> Request) -> Option<Request> {
    let mut kept: Vec<Request> = requests.into_iter().filter_map(simplify).collect();
    match kept.len() {
        0 => None,
        1 => kept.pop(),
        _ => Some(combine(kept)),
    }
}

/// Remove the leaves of the given kind and simplify what is left.
pub fn remove_and_simplify(request: &Request, kind: RequestKind) -> Option<Request> {
    remove_kind(request, kind).and_then(simplify)
}
