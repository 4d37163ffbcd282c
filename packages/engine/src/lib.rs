//! Revit Request Engine
//!
//! Splits BHoM request trees across the active Revit document and the
//! documents it links. This library provides functionality for:
//! - Representing filter/query requests as trees of AND/OR/NOT over leaf filters
//! - Validating where link filters may appear in such a tree
//! - Partitioning a request into one residual request per document
//!
//! # Example
//!
//! ```ignore
//! use revit_request_engine::{split_by_links, Request, SnapshotDocument};
//!
//! let document = SnapshotDocument::from_file("host.yaml")?;
//! let request = Request::from_file("request.yaml")?;
//!
//! let outcome = split_by_links(&request, &document);
//! for (handle, residual) in outcome.into_result()? {
//!     println!("{}: {}", handle, residual);
//! }
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod host;
pub mod load;
pub mod partition;
pub mod request;
pub mod simplify;
pub mod split;
pub mod validate;

// Re-export commonly used items
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{Result, SplitError, ValidationError};
pub use host::{
    linked_documents, DocumentId, HostDocument, LinkInstance, LinkedDocument, SnapshotDocument,
    SnapshotLink,
};
pub use partition::split_by_kind;
pub use request::{Request, RequestKind};
pub use simplify::{remove_and_simplify, remove_kind, simplify};
pub use split::{
    normalize_link_name, resolve_link, split_by_links, RequestsByDocument, SplitOutcome,
};
pub use validate::validate;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }

    #[test]
    fn test_reexports() {
        let _request = Request::link("a");
        let _kind = RequestKind::Link;
        let _err = SplitError::UnfilteredLink;
        let _document = SnapshotDocument::new("Main.rvt", "");
    }
}
