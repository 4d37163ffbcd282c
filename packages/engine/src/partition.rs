//! Splitting a request into independent branches by node kind
//!
//! Before a request can be organized per document, every branch that touches a
//! node of the target kind has to stand on its own. The request is rewritten
//! into a disjunction of branches by distributing AND over OR:
//!
//! ```text
//! AND(x, OR(AND(link, y), z))  ->  [AND(x, AND(link, y)), AND(x, z)]
//! ```
//!
//! Subtrees that do not contain the kind are never taken apart, so a request
//! without it comes back as a single unchanged branch.

use crate::config;
use crate::error::{Result, SplitError};
use crate::request::{Request, RequestKind};

/// Split a request into branches whose union is the original request.
///
/// # Rules
///
/// - a subtree without a node of `kind` is one branch, unchanged
/// - OR yields the branches of all its children, in order
/// - AND yields the cartesian product of its children's branches, each
///   combination wrapped in a new AND with the child order preserved
/// - NOT and leaves are one branch each
///
/// # Errors
///
/// Returns `SplitError::TooManyBranches` once an AND multiplies its
/// children's branches past [`config::MAX_SPLIT_BRANCHES`]. Branches that only
/// add up (OR alternatives, an AND with a single splitting child) grow with
/// the request itself and are not capped.
pub fn split_by_kind(request: &Request, kind: RequestKind) -> Result<Vec<Request>> {
    let branches = distribute(request, kind)?;
    tracing::debug!(kind = ?kind, branches = branches.len(), "Split request by kind");
    Ok(branches)
}

fn distribute(request: &Request, kind: RequestKind) -> Result<Vec<Request>> {
    if !request.contains_kind(kind) {
        return Ok(vec![request.clone()]);
    }

    match request {
        Request::Or { requests } => {
            let mut branches = Vec::new();
            for child in requests {
                branches.extend(distribute(child, kind)?);
            }
            Ok(branches)
        }
        Request::And { requests } => {
            let mut combinations: Vec<Vec<Request>> = vec![Vec::with_capacity(requests.len())];
            for child in requests {
                let child_branches = distribute(child, kind)?;
                if combinations.len() > 1 && child_branches.len() > 1 {
                    ensure_within_limit(combinations.len().saturating_mul(child_branches.len()))?;
                }

                combinations = combinations
                    .into_iter()
                    .flat_map(|prefix| {
                        child_branches.iter().map(move |branch| {
                            let mut combination = prefix.clone();
                            combination.push(branch.clone());
                            combination
                        })
                    })
                    .collect();
            }
            Ok(combinations.into_iter().map(Request::and).collect())
        }
        _ => Ok(vec![request.clone()]),
    }
}

fn ensure_within_limit(count: usize) -> Result<()> {
    if count > config::MAX_SPLIT_BRANCHES {
        tracing::warn!(
            branches = count,
            max = config::MAX_SPLIT_BRANCHES,
            "Request splits into too many branches"
        );
        return Err(SplitError::TooManyBranches(config::MAX_SPLIT_BRANCHES));
    }
    Ok(())
}
