//! Configuration constants for the request engine
//!
//! Centralized configuration values used while splitting request trees:
//! - Link name normalization (file extension, path separators)
//! - Recursion depth limits (prevent stack overflow)
//! - Resource constraints (branch explosion, input size)
//!
//! # Security Considerations
//!
//! Request trees arrive from a query/UI layer or from files handed to the CLI.
//! The limits below reject:
//! - Deeply nested trees before any recursive walk runs
//! - Conjunctions of disjunctions whose distribution explodes combinatorially
//! - Oversized request or host snapshot documents

/// File extension every linked Revit document carries.
///
/// Link names without it get it appended (with a warning) before matching.
pub const LINK_FILE_EXTENSION: &str = ".rvt";

/// Characters that mark a link name as a full path rather than a document title.
///
/// Revit stores Windows paths; forward slashes show up in server and cloud paths.
pub const PATH_SEPARATORS: &[char] = &['\\', '/'];

/// Maximum nesting depth of a request tree.
///
/// Real queries built in the UI stay well below 10 levels.
pub const MAX_REQUEST_DEPTH: usize = 64;

/// Maximum number of independent branches a request may be split into.
///
/// Distributing an AND over several ORs multiplies their branch counts.
pub const MAX_SPLIT_BRANCHES: usize = 256;

/// Maximum size in bytes of a serialized request or host snapshot (1 MB).
pub const MAX_REQUEST_SIZE: usize = 1_000_000;
