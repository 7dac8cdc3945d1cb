//! The municipal waste dashboard: data logic, widget state and panels.

pub mod gui;
pub mod logic;
pub mod model;

pub use gui::App;
