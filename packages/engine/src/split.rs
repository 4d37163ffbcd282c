//! Splitting a request tree by linked documents
//!
//! A pull from Revit runs one query per document. The request handed over by
//! the query layer may mention linked documents through
//! [`Request::FilterByLink`], so before execution it is split into one
//! residual request per document:
//!
//! 1. The request is broken into independent branches
//!    ([`partition::split_by_kind`]).
//! 2. Each branch is validated, then organized:
//!    - no link filter: the branch runs against the active document
//!    - one link filter: the link is resolved, the filter removed, and the
//!      residual runs against the linked document
//!    - more link filters: rejected
//! 3. Residuals for the same document are combined under one OR.
//!
//! The first failing branch aborts the whole split; no partial map is
//! returned.
//!
//! # Example
//!
//! ```ignore
//! use revit_request_engine::{split_by_links, Request, SnapshotDocument};
//!
//! let document = SnapshotDocument::new("Main.rvt", r"C:\Main.rvt")
//!     .with_link("Structure.rvt", r"C:\Structure.rvt");
//! let request = Request::and(vec![
//!     Request::link("Structure"),
//!     Request::filter("FilterByCategory").with_parameter("CategoryName", "Columns"),
//! ]);
//!
//! let outcome = split_by_links(&request, &document);
//! for warning in outcome.diagnostics.warnings() {
//!     println!("{}", warning);
//! }
//! let partitions = outcome.into_result()?;
//! ```

use crate::config;
use crate::diagnostics::Diagnostics;
use crate::error::{Result, SplitError};
use crate::host::{linked_documents, HostDocument, LinkedDocument};
use crate::partition;
use crate::request::{Request, RequestKind};
use crate::simplify;
use crate::validate;
use std::collections::HashMap;
use std::hash::Hash;

/// Residual request per document.
pub type RequestsByDocument<H> = HashMap<H, Request>;

/// Result of a split together with everything recorded along the way.
///
/// Warnings are kept on success; on failure the diagnostics end with the
/// error that aborted the split.
#[derive(Debug)]
pub struct SplitOutcome<H> {
    pub result: Result<RequestsByDocument<H>>,
    pub diagnostics: Diagnostics,
}

impl<H> SplitOutcome<H> {
    /// Check if the split succeeded.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// The per-document requests, if the split succeeded.
    pub fn partitions(&self) -> Option<&RequestsByDocument<H>> {
        self.result.as_ref().ok()
    }

    /// The error that aborted the split, if any.
    pub fn error(&self) -> Option<&SplitError> {
        self.result.as_ref().err()
    }

    /// Drop the diagnostics and keep the result.
    pub fn into_result(self) -> Result<RequestsByDocument<H>> {
        self.result
    }
}

/// Split a request into one residual request per document.
///
/// The active document's link registry is queried once per call.
pub fn split_by_links<D: HostDocument>(request: &Request, document: &D) -> SplitOutcome<D::Handle> {
    let mut diagnostics = Diagnostics::new();
    let result = split_inner(request, document, &mut diagnostics);

    match &result {
        Ok(partitions) => {
            tracing::debug!(documents = partitions.len(), "Split request by links");
        }
        Err(err) => {
            tracing::warn!(error = %err, "Failed to split request by links");
            diagnostics.error(err);
        }
    }

    SplitOutcome {
        result,
        diagnostics,
    }
}

fn split_inner<D: HostDocument>(
    request: &Request,
    document: &D,
    diagnostics: &mut Diagnostics,
) -> Result<RequestsByDocument<D::Handle>> {
    if request.depth() > config::MAX_REQUEST_DEPTH {
        return Err(SplitError::TooDeep(config::MAX_REQUEST_DEPTH));
    }

    let links = linked_documents(document);
    let branches = partition::split_by_kind(request, RequestKind::Link)?;
    tracing::debug!(branches = branches.len(), links = links.len(), "Organizing request branches by link");

    let mut partitions = Partitions::new();
    for branch in branches {
        organize_by_link(branch, document, &links, &mut partitions, diagnostics)?;
    }

    Ok(partitions.into_requests())
}

/// Assign one independent branch to its document.
fn organize_by_link<D: HostDocument>(
    branch: Request,
    document: &D,
    links: &[LinkedDocument<D::Handle>],
    partitions: &mut Partitions<D::Handle>,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    if branch.is_link() {
        return Err(SplitError::UnfilteredLink);
    }

    validate::check(&branch)?;

    let link_names: Vec<String> = branch.link_names().into_iter().map(str::to_string).collect();
    match link_names.as_slice() {
        [] => {
            tracing::debug!(request = %branch, "Assigning branch to active document");
            partitions.add(document.handle(), branch);
            Ok(())
        }
        [link_name] => {
            if branch.contains_kind(RequestKind::Selection) {
                return Err(SplitError::SelectionWithLink);
            }

            let name = normalize_link_name(link_name, diagnostics);
            let linked = resolve_link(&name, links)?;

            let residual = simplify::remove_and_simplify(&branch, RequestKind::Link)
                .ok_or_else(|| SplitError::EmptyResidual(name.clone()))?;

            tracing::debug!(
                link = %name,
                document = ?linked.handle,
                request = %residual,
                "Assigning branch to linked document"
            );
            partitions.add(linked.handle.clone(), residual);
            Ok(())
        }
        names => Err(SplitError::MultipleLinks(names.to_vec())),
    }
}

/// Lower-case a link name and make sure it ends with the Revit extension.
///
/// A missing extension is appended and reported as a warning.
pub fn normalize_link_name(link_name: &str, diagnostics: &mut Diagnostics) -> String {
    let mut name = link_name.trim().to_lowercase();
    if !name.ends_with(config::LINK_FILE_EXTENSION) {
        tracing::warn!(link = %name, "Link name without extension, suffix added");
        diagnostics.warning(format!(
            "Link name {} inside a link request does not end with {} - the suffix has been added.",
            name,
            config::LINK_FILE_EXTENSION
        ));
        name.push_str(config::LINK_FILE_EXTENSION);
    }
    name
}

/// Find the single loaded link matching a normalized link name.
///
/// Names containing a path separator are matched against full paths, all
/// others against document titles; both case-insensitive. Titles without the
/// extension are only considered when no title matches exactly.
pub fn resolve_link<'a, H>(
    name: &str,
    links: &'a [LinkedDocument<H>],
) -> Result<&'a LinkedDocument<H>> {
    let by_path = name.contains(config::PATH_SEPARATORS);
    let candidates: Vec<&LinkedDocument<H>> = if by_path {
        matching(links, |linked| linked.path_name.to_lowercase() == name)
    } else {
        let exact = matching(links, |linked| linked.title.to_lowercase() == name);
        if exact.is_empty() {
            matching(links, |linked| title_matches_without_extension(&linked.title, name))
        } else {
            exact
        }
    };

    match candidates.as_slice() {
        [linked] => Ok(*linked),
        [] if by_path => Err(SplitError::LinkPathNotFound(name.to_string())),
        [] => Err(SplitError::LinkNotFound(name.to_string())),
        _ => Err(SplitError::AmbiguousLink(name.to_string())),
    }
}

fn matching<H>(
    links: &[LinkedDocument<H>],
    predicate: impl Fn(&LinkedDocument<H>) -> bool,
) -> Vec<&LinkedDocument<H>> {
    links.iter().filter(|linked| predicate(linked)).collect()
}

/// Titles may come without the extension, depending on the host's file name
/// display settings.
fn title_matches_without_extension(title: &str, name: &str) -> bool {
    let title = title.to_lowercase();
    !title.ends_with(config::LINK_FILE_EXTENSION)
        && name.strip_suffix(config::LINK_FILE_EXTENSION) == Some(title.as_str())
}

/// Requests collected per document, in encounter order.
struct Partitions<H> {
    by_document: HashMap<H, Vec<Request>>,
}

impl<H: Eq + Hash> Partitions<H> {
    fn new() -> Self {
        Self {
            by_document: HashMap::new(),
        }
    }

    fn add(&mut self, handle: H, request: Request) {
        self.by_document.entry(handle).or_default().push(request);
    }

    /// The first request is kept as-is; every later one is combined with
    /// what is already there under a new OR.
    fn into_requests(self) -> RequestsByDocument<H> {
        self.by_document
            .into_iter()
            .filter_map(|(handle, requests)| {
                let request = requests
                    .into_iter()
                    .reduce(|existing, next| Request::or(vec![existing, next]))?;
                Some((handle, request))
            })
            .collect()
    }
}
