//! Step definitions for Cucumber BDD tests
//!
//! This module contains all Given/When/Then step implementations.

pub mod given;
pub mod then;
pub mod when;

use cucumber::gherkin::Step;
use revit_request_engine::Request;

/// Parse the YAML doc string of a step as a request tree.
pub fn docstring_request(step: &Step) -> Request {
    let yaml = step
        .docstring
        .as_ref()
        .expect("Step needs a YAML doc string");
    Request::from_yaml_str(yaml).unwrap_or_else(|e| panic!("Invalid request YAML: {e}"))
}
