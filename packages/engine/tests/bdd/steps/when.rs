//! When step definitions
//!
//! Steps that run the operation under test.

use cucumber::when;

use crate::world::SplitWorld;

#[when("the request is split by links")]
fn split_request(world: &mut SplitWorld) {
    world.split();
}

#[when("the request is validated")]
fn validate_request(world: &mut SplitWorld) {
    world.validate();
}
