//! World struct for Cucumber BDD tests
//!
//! Contains the test state that persists across steps in a scenario.

use cucumber::World;
use revit_request_engine::{
    split_by_links, validate, Diagnostics, DocumentId, Request, SnapshotDocument, SplitOutcome,
};

/// Test world that holds state across steps in a Cucumber scenario.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct SplitWorld {
    /// Active document and its links
    pub document: SnapshotDocument,
    /// Request under test
    pub request: Option<Request>,
    /// Last split result
    pub outcome: Option<SplitOutcome<DocumentId>>,
    /// Last validation result with its diagnostics
    pub validation: Option<(bool, Diagnostics)>,
}

impl Default for SplitWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SplitWorld {
    /// Create a world with an untitled active document and no links.
    pub fn new() -> Self {
        Self {
            document: SnapshotDocument::new("Project1", ""),
            request: None,
            outcome: None,
            validation: None,
        }
    }

    fn request(&self) -> &Request {
        self.request
            .as_ref()
            .expect("No request given in this scenario")
    }

    /// Split the current request and store the outcome
    pub fn split(&mut self) {
        let outcome = split_by_links(self.request(), &self.document);
        self.outcome = Some(outcome);
    }

    /// Validate the current request and store the result
    pub fn validate(&mut self) {
        let mut diagnostics = Diagnostics::new();
        let valid = validate(self.request(), &mut diagnostics);
        self.validation = Some((valid, diagnostics));
    }

    /// Outcome of the last split
    pub fn outcome(&self) -> &SplitOutcome<DocumentId> {
        self.outcome
            .as_ref()
            .expect("The request has not been split")
    }
}
