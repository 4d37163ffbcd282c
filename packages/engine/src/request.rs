//! Request trees
//!
//! A request is a filter/query over Revit elements, built by the query layer
//! as a tree of logical combinators (AND/OR/NOT) over leaf predicates. One of
//! the leaves, [`Request::FilterByLink`], selects elements that live in a
//! linked document instead of the active one.
//!
//! Trees are treated as immutable values: every rewrite builds new nodes, so
//! the same sub-request can safely end up in several partitions.
//!
//! # Serialization
//!
//! Requests are internally tagged on `type`, using the BHoM request names:
//!
//! ```yaml
//! type: LogicalAndRequest
//! requests:
//!   - type: FilterByLink
//!     link_name: Structure.rvt
//!   - type: Filter
//!     name: FilterByCategory
//!     parameters:
//!       CategoryName: Walls
//! ```

use crate::error::Result;
use crate::load::{self, InputFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// A node of a request tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Conjunction of the wrapped requests
    #[serde(rename = "LogicalAndRequest")]
    And { requests: Vec<Request> },

    /// Disjunction of the wrapped requests
    #[serde(rename = "LogicalOrRequest")]
    Or { requests: Vec<Request> },

    /// Negation; the slot may still be unfilled
    #[serde(rename = "LogicalNotRequest")]
    Not {
        #[serde(default)]
        request: Option<Box<Request>>,
    },

    /// Elements sourced from the linked document with this name or path
    FilterByLink { link_name: String },

    /// Elements in the host's current interactive selection
    #[serde(rename = "SelectionRequest")]
    Selection {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        element_ids: Vec<i64>,
    },

    /// Any other predicate, evaluated by the downstream query executor
    Filter {
        name: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        parameters: BTreeMap<String, serde_json::Value>,
    },
}

/// Discriminant of a [`Request`], used to search trees by node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    And,
    Or,
    Not,
    Link,
    Selection,
    Filter,
}

impl Request {
    /// Create a conjunction.
    pub fn and(requests: Vec<Request>) -> Self {
        Request::And { requests }
    }

    /// Create a disjunction.
    pub fn or(requests: Vec<Request>) -> Self {
        Request::Or { requests }
    }

    /// Create a negation of the given request.
    pub fn not(request: Request) -> Self {
        Request::Not {
            request: Some(Box::new(request)),
        }
    }

    /// Create a negation with an unfilled slot.
    pub fn empty_not() -> Self {
        Request::Not { request: None }
    }

    /// Create a link filter.
    pub fn link(link_name: impl Into<String>) -> Self {
        Request::FilterByLink {
            link_name: link_name.into(),
        }
    }

    /// Create a selection request.
    pub fn selection(element_ids: Vec<i64>) -> Self {
        Request::Selection { element_ids }
    }

    /// Create an opaque filter without parameters.
    pub fn filter(name: impl Into<String>) -> Self {
        Request::Filter {
            name: name.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Add a parameter to an opaque filter. Other nodes are returned unchanged.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        if let Request::Filter { parameters, .. } = &mut self {
            parameters.insert(key.into(), value.into());
        }
        self
    }

    /// Get the kind of this node.
    pub fn kind(&self) -> RequestKind {
        match self {
            Request::And { .. } => RequestKind::And,
            Request::Or { .. } => RequestKind::Or,
            Request::Not { .. } => RequestKind::Not,
            Request::FilterByLink { .. } => RequestKind::Link,
            Request::Selection { .. } => RequestKind::Selection,
            Request::Filter { .. } => RequestKind::Filter,
        }
    }

    /// BHoM type name of this node, used in messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Request::And { .. } => "LogicalAndRequest",
            Request::Or { .. } => "LogicalOrRequest",
            Request::Not { .. } => "LogicalNotRequest",
            Request::FilterByLink { .. } => "FilterByLink",
            Request::Selection { .. } => "SelectionRequest",
            Request::Filter { .. } => "Filter",
        }
    }

    /// Check if this node is a link filter.
    pub fn is_link(&self) -> bool {
        matches!(self, Request::FilterByLink { .. })
    }

    /// Check if this node is a leaf predicate.
    pub fn is_leaf(&self) -> bool {
        !matches!(
            self,
            Request::And { .. } | Request::Or { .. } | Request::Not { .. }
        )
    }

    /// Direct children of this node (the wrapped request for a filled NOT).
    pub fn children(&self) -> &[Request] {
        match self {
            Request::And { requests } | Request::Or { requests } => requests,
            Request::Not {
                request: Some(request),
            } => std::slice::from_ref(request.as_ref()),
            _ => &[],
        }
    }

    /// All nodes of the given kind in this tree, this node included, in pre-order.
    pub fn all_of_kind(&self, kind: RequestKind) -> Vec<&Request> {
        let mut found = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.kind() == kind {
                found.push(node);
            }
            stack.extend(node.children().iter().rev());
        }
        found
    }

    /// Check if this tree holds a node of the given kind, this node included.
    pub fn contains_kind(&self, kind: RequestKind) -> bool {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.kind() == kind {
                return true;
            }
            stack.extend(node.children());
        }
        false
    }

    /// Names of all link filters in this tree, in pre-order.
    pub fn link_names(&self) -> Vec<&str> {
        self.all_of_kind(RequestKind::Link)
            .into_iter()
            .filter_map(|node| match node {
                Request::FilterByLink { link_name } => Some(link_name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Nesting depth of this tree; a single leaf has depth 1.
    ///
    /// Walks iteratively so that hostile trees cannot overflow the stack
    /// before the depth limit is enforced.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(node.children().iter().map(|child| (child, depth + 1)));
        }
        max_depth
    }

    /// Parse a request from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self> {
        load::parse_str(content, InputFormat::Json)
    }

    /// Parse a request from a YAML string.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        load::parse_str(content, InputFormat::Yaml)
    }

    /// Load a request from a JSON or YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        load::read_file(path)
    }

    /// Render the tree as a human-readable multi-line string.
    ///
    /// Produces output like:
    /// ```text
    /// LogicalAndRequest
    /// +-- FilterByLink "structure.rvt"
    /// `-- Filter FilterByCategory {CategoryName: "Walls"}
    /// ```
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        self.render_into(&mut lines, "", "", "");
        lines.join("\n")
    }

    fn render_into(&self, lines: &mut Vec<String>, indent: &str, prefix: &str, child_indent: &str) {
        lines.push(format!("{}{}{}", indent, prefix, self.label()));

        let next_indent = format!("{}{}", indent, child_indent);
        match self {
            Request::Not { request: None } => {
                lines.push(format!("{}`-- <empty>", next_indent));
            }
            _ => {
                let children = self.children();
                for (i, child) in children.iter().enumerate() {
                    let is_last = i == children.len() - 1;
                    let (prefix, child_indent) = if is_last {
                        ("`-- ", "    ")
                    } else {
                        ("+-- ", "|   ")
                    };
                    child.render_into(lines, &next_indent, prefix, child_indent);
                }
            }
        }
    }

    /// Single-line label of this node, without children.
    fn label(&self) -> String {
        match self {
            Request::FilterByLink { link_name } => format!("FilterByLink {:?}", link_name),
            Request::Selection { element_ids } if !element_ids.is_empty() => {
                format!("SelectionRequest {:?}", element_ids)
            }
            Request::Filter { name, parameters } if !parameters.is_empty() => {
                let params: Vec<String> = parameters
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .collect();
                format!("Filter {} {{{}}}", name, params.join(", "))
            }
            Request::Filter { name, .. } => format!("Filter {}", name),
            _ => self.type_name().to_string(),
        }
    }
}

/// Compact single-line form, e.g. `AND(FilterByLink("a.rvt"), Filter(Walls))`.
impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Request::And { requests } | Request::Or { requests } => {
                let op = if matches!(self, Request::And { .. }) {
                    "AND"
                } else {
                    "OR"
                };
                write!(f, "{}(", op)?;
                for (i, request) in requests.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", request)?;
                }
                write!(f, ")")
            }
            Request::Not { request: Some(request) } => write!(f, "NOT({})", request),
            Request::Not { request: None } => write!(f, "NOT()"),
            Request::FilterByLink { link_name } => write!(f, "FilterByLink({:?})", link_name),
            Request::Selection { .. } => write!(f, "Selection"),
            Request::Filter { name, .. } => write!(f, "Filter({})", name),
        }
    }
}
