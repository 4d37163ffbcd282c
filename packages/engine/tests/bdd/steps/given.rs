//! Given step definitions
//!
//! Steps that set up the host document and the request.

use cucumber::{gherkin::Step, given};
use revit_request_engine::SnapshotDocument;

use super::docstring_request;
use crate::world::SplitWorld;

#[given(regex = r#"^an active document "([^"]*)" at "([^"]*)"$"#)]
fn set_active_document(world: &mut SplitWorld, title: String, path: String) {
    world.document = SnapshotDocument::new(title, path);
}

#[given(regex = r#"^a loaded link "([^"]*)" at "([^"]*)"$"#)]
fn add_loaded_link(world: &mut SplitWorld, title: String, path: String) {
    world.document = world.document.clone().with_link(title, path);
}

#[given(regex = r#"^an unloaded link "([^"]*)" at "([^"]*)"$"#)]
fn add_unloaded_link(world: &mut SplitWorld, title: String, path: String) {
    world.document = world.document.clone().with_unloaded_link(title, path);
}

#[given("the request:")]
fn set_request(world: &mut SplitWorld, step: &Step) {
    world.request = Some(docstring_request(step));
}
