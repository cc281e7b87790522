//! Controller layer: UI events, input routing, and command orchestration.

pub mod events;
pub mod input;
pub mod orchestration;
