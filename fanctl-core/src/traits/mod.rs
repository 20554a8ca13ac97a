//! Hardware abstraction traits
//!
//! These traits define the interface between the control logic and
//! hardware-specific implementations.

pub mod display;
pub mod fan;
pub mod input;
pub mod sensor;

pub use display::{CharDisplay, DisplayError, DisplayExt, DISPLAY_COLS, DISPLAY_ROWS};
pub use fan::FanOutput;
pub use input::{ButtonEvent, ButtonSource};
pub use sensor::SensorError;
