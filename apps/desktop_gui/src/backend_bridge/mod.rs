//! Backend worker: owns the document controller and its file capabilities.

pub mod commands;
pub mod picker;
pub mod runtime;
