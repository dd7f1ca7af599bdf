//! # Rendering Module
//!
//! Plain-text rendering of the game screen for the terminal.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
