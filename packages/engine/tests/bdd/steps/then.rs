//! Then step definitions
//!
//! Steps that verify outcomes and assertions.

use cucumber::{gherkin::Step, then};
use revit_request_engine::DocumentId;

use super::docstring_request;
use crate::world::SplitWorld;

// =============================================================================
// Split steps
// =============================================================================

#[then("the split succeeds")]
fn assert_split_succeeds(world: &mut SplitWorld) {
    let outcome = world.outcome();
    assert!(
        outcome.is_success(),
        "Expected successful split, got error: {:?}",
        outcome.error().map(|e| e.to_string())
    );
}

#[then(regex = r#"^the split fails with an error containing "([^"]*)"$"#)]
fn assert_split_fails(world: &mut SplitWorld, expected: String) {
    let outcome = world.outcome();
    assert!(outcome.partitions().is_none(), "Expected split to fail");

    let errors = outcome.diagnostics.errors();
    assert!(
        errors.iter().any(|e| e.contains(&expected)),
        "Expected an error containing {:?}, got {:?}",
        expected,
        errors
    );
}

#[then(regex = r"^the split yields (\d+) documents?$")]
fn assert_document_count(world: &mut SplitWorld, expected: usize) {
    let partitions = world
        .outcome()
        .partitions()
        .expect("Expected successful split");
    assert_eq!(partitions.len(), expected, "Partitions: {:?}", partitions);
}

#[then(regex = r#"^the request for document "([^"]*)" is:$"#)]
fn assert_document_request(world: &mut SplitWorld, document: String, step: &Step) {
    let expected = docstring_request(step);
    let partitions = world
        .outcome()
        .partitions()
        .expect("Expected successful split");

    let actual = partitions
        .get(&DocumentId(document.clone()))
        .unwrap_or_else(|| panic!("No request for document {document}, got {:?}", partitions));
    assert_eq!(
        actual, &expected,
        "\nactual:\n{}\nexpected:\n{}",
        actual.render(),
        expected.render()
    );
}

#[then(regex = r"^(\d+) warnings? (?:is|are) recorded$")]
fn assert_warning_count(world: &mut SplitWorld, expected: usize) {
    let warnings = world.outcome().diagnostics.warnings();
    assert_eq!(warnings.len(), expected, "Warnings: {:?}", warnings);
}

// =============================================================================
// Validation steps
// =============================================================================

#[then("the request is valid")]
fn assert_valid(world: &mut SplitWorld) {
    let (valid, diagnostics) = world.validation.as_ref().expect("Not validated");
    assert!(*valid, "Expected valid request, got {:?}", diagnostics.errors());
}

#[then(regex = r#"^the request is invalid because "([^"]*)"$"#)]
fn assert_invalid(world: &mut SplitWorld, expected: String) {
    let (valid, diagnostics) = world.validation.as_ref().expect("Not validated");
    assert!(!*valid, "Expected invalid request");

    let errors = diagnostics.errors();
    assert!(
        errors.iter().any(|e| e.contains(&expected)),
        "Expected an error containing {:?}, got {:?}",
        expected,
        errors
    );
}
