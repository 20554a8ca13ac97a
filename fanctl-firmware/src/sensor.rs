//! DS18B20 over the PIO 1-Wire program
//!
//! Single sensor on the bus, addressed with Skip ROM. Conversions run in
//! the background: each read returns the result of the conversion started
//! one sample earlier, then a new one is kicked off.

use embassy_rp::pio;
use embassy_rp::pio_programs::onewire::PioOneWire;
use fanctl_core::traits::SensorError;
use fanctl_drivers::sensor::ds18b20::{
    configure_command, decode_scratchpad, CONVERT_T, READ_SCRATCHPAD, SCRATCHPAD_LEN, SKIP_ROM,
};

/// DS18B20 temperature sensor
pub struct Ds18b20<'d, PIO: pio::Instance, const SM: usize> {
    wire: PioOneWire<'d, PIO, SM>,
}

impl<'d, PIO: pio::Instance, const SM: usize> Ds18b20<'d, PIO, SM> {
    pub fn new(wire: PioOneWire<'d, PIO, SM>) -> Self {
        Self { wire }
    }

    /// Reset the bus; no presence pulse means no sensor
    async fn select(&mut self) -> Result<(), SensorError> {
        if self.wire.reset().await {
            Ok(())
        } else {
            Err(SensorError::Disconnected)
        }
    }

    /// Write the resolution into the configuration register
    pub async fn configure(&mut self, resolution: u8) -> Result<(), SensorError> {
        self.select().await?;
        self.wire.write_bytes(&configure_command(resolution)).await;
        Ok(())
    }

    /// Start a temperature conversion
    pub async fn start_conversion(&mut self) -> Result<(), SensorError> {
        self.select().await?;
        self.wire.write_bytes(&[SKIP_ROM, CONVERT_T]).await;
        Ok(())
    }

    /// Read the last converted temperature (°C)
    pub async fn read_temperature(&mut self) -> Result<f32, SensorError> {
        self.select().await?;
        self.wire.write_bytes(&[SKIP_ROM, READ_SCRATCHPAD]).await;
        let mut data = [0u8; SCRATCHPAD_LEN];
        self.wire.read_bytes(&mut data).await;
        decode_scratchpad(&data)
    }
}
