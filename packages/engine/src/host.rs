//! Host document model and link resolution
//!
//! The splitter never talks to Revit directly. It sees the active document
//! through [`HostDocument`], which exposes the document's own identity and
//! the link instances currently placed in it.
//!
//! [`SnapshotDocument`] is a serializable, in-memory host used by the CLI and
//! by tests: a JSON/YAML description of a document and its links.
//!
//! # Example
//!
//! ```ignore
//! use revit_request_engine::host::{linked_documents, SnapshotDocument};
//!
//! let document = SnapshotDocument::from_file("host.yaml")?;
//! for linked in linked_documents(&document) {
//!     println!("{} ({})", linked.title, linked.path_name);
//! }
//! ```

use crate::error::Result;
use crate::load::{self, InputFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::path::Path;

/// Access to the active document and its link registry.
///
/// Calls are read-only and must reflect the host state at call time; the
/// caller guarantees no document mutation runs concurrently.
pub trait HostDocument {
    /// Identity of a document, used as the partition key.
    type Handle: Clone + Eq + Hash + fmt::Debug;

    /// Handle of this (the active) document.
    fn handle(&self) -> Self::Handle;

    /// All link instances placed in this document.
    fn link_instances(&self) -> Vec<LinkInstance<Self::Handle>>;
}

/// A document loaded through a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedDocument<H> {
    pub handle: H,
    /// Document title, usually the file name
    pub title: String,
    /// Full path of the linked file
    pub path_name: String,
}

/// A placed link; its document is `None` while the link is unloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInstance<H> {
    pub name: String,
    pub document: Option<LinkedDocument<H>>,
}

/// Enumerate the documents currently loaded through links.
///
/// Unloaded instances are skipped; a document placed by several instances is
/// returned once.
pub fn linked_documents<D: HostDocument>(document: &D) -> Vec<LinkedDocument<D::Handle>> {
    let mut seen = HashSet::new();
    let mut documents = Vec::new();

    for instance in document.link_instances() {
        match instance.document {
            Some(linked) => {
                if seen.insert(linked.handle.clone()) {
                    documents.push(linked);
                }
            }
            None => {
                tracing::debug!(instance = %instance.name, "Skipping link instance without loaded document");
            }
        }
    }

    tracing::debug!(count = documents.len(), "Enumerated linked documents");
    documents
}

/// Identity of a document in a [`SnapshotDocument`]: its path, or its title
/// when the path is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serializable description of a host document and its links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub title: String,
    #[serde(default)]
    pub path_name: String,
    #[serde(default)]
    pub links: Vec<SnapshotLink>,
}

/// A link instance in a [`SnapshotDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotLink {
    /// Instance name; defaults to the linked document title
    #[serde(default)]
    pub name: Option<String>,
    pub title: String,
    #[serde(default)]
    pub path_name: String,
    #[serde(default = "default_loaded")]
    pub loaded: bool,
}

fn default_loaded() -> bool {
    true
}

fn document_id(title: &str, path_name: &str) -> DocumentId {
    if path_name.is_empty() {
        DocumentId(title.to_string())
    } else {
        DocumentId(path_name.to_string())
    }
}

impl SnapshotDocument {
    /// Create a document without links.
    pub fn new(title: impl Into<String>, path_name: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path_name: path_name.into(),
            links: Vec::new(),
        }
    }

    /// Add a loaded link.
    pub fn with_link(mut self, title: impl Into<String>, path_name: impl Into<String>) -> Self {
        self.links.push(SnapshotLink {
            name: None,
            title: title.into(),
            path_name: path_name.into(),
            loaded: true,
        });
        self
    }

    /// Add a link that is placed but not loaded.
    pub fn with_unloaded_link(mut self, title: impl Into<String>, path_name: impl Into<String>) -> Self {
        self.links.push(SnapshotLink {
            name: None,
            title: title.into(),
            path_name: path_name.into(),
            loaded: false,
        });
        self
    }

    /// Handle the given link's document is keyed under.
    pub fn link_id(link: &SnapshotLink) -> DocumentId {
        document_id(&link.title, &link.path_name)
    }

    /// Parse a snapshot from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self> {
        load::parse_str(content, InputFormat::Json)
    }

    /// Parse a snapshot from a YAML string.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        load::parse_str(content, InputFormat::Yaml)
    }

    /// Load a snapshot from a JSON or YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        load::read_file(path)
    }
}

impl HostDocument for SnapshotDocument {
    type Handle = DocumentId;

    fn handle(&self) -> DocumentId {
        document_id(&self.title, &self.path_name)
    }

    fn link_instances(&self) -> Vec<LinkInstance<DocumentId>> {
        self.links
            .iter()
            .map(|link| LinkInstance {
                name: link.name.clone().unwrap_or_else(|| link.title.clone()),
                document: link.loaded.then(|| LinkedDocument {
                    handle: Self::link_id(link),
                    title: link.title.clone(),
                    path_name: link.path_name.clone(),
                }),
            })
            .collect()
    }
}
