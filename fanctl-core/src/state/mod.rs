//! Screen state machine
//!
//! The screen is a pure function of the previous screen and an event.

mod events;
mod machine;

pub use events::ScreenEvent;
pub use machine::ScreenMode;
