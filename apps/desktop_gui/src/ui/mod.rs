//! UI layer for the editor window.

pub mod app;

pub use app::DaedalusApp;
