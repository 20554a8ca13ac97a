//! Temperature sensor support

pub mod ds18b20;
