//! Display rendering
//!
//! - [`frame`] - Character grid composed each update
//! - [`screens`] - Layouts for init, error, main and menu screens
//! - [`glyphs`] - Custom CGRAM characters
//! - [`scheduler`] - Differential writer with shadow buffer

pub mod frame;
pub mod glyphs;
pub mod scheduler;
pub mod screens;

pub use frame::Frame;
pub use glyphs::{Glyph, GLYPHS};
pub use scheduler::Renderer;
pub use screens::{compose_error, compose_init, compose_main, compose_menu, MainView, Trend};
