//! fanctl - Enclosure Fan Controller Firmware
//!
//! Main firmware binary for RP2040-based fan controllers. Reads a DS18B20
//! probe once per second, drives a 4-pin fan at 25 kHz and shows status
//! and a settings menu on a 20x4 I2C character LCD.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_rp::pio_programs::onewire::{PioOneWire, PioOneWireProgram};
use embassy_time::{Delay, Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

use fanctl_core::config::{Configuration, SettingsStore};
use fanctl_core::controller::FanController;
use fanctl_core::traits::ButtonSource;
use fanctl_drivers::button::Button;
use fanctl_drivers::display::{Hd44780, PCF8574_DEFAULT_ADDR};
use fanctl_drivers::fan::PwmFan;
use fanctl_drivers::sensor::ds18b20::RESOLUTION_12_BIT;
use fanctl_hal_rp2040::flash::Rp2040NvStorage;
use fanctl_hal_rp2040::pwm::fan_output;

use crate::sensor::Ds18b20;

mod board;
mod sensor;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

/// Milliseconds since boot
fn uptime_ms() -> u64 {
    Instant::now().as_millis()
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("fanctl firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Settings from flash, or defaults
    let mut store = SettingsStore::new(Rp2040NvStorage::new(p.FLASH, p.DMA_CH0));
    let config = match store.try_load().await {
        Ok(config) => {
            info!("Loaded settings from flash");
            config
        }
        Err(e) => {
            warn!("No valid settings in flash ({}), using defaults", e);
            Configuration::default()
        }
    };

    // Fan output first so it runs at full speed while the rest comes up
    let pwm = unwrap!(fan_output(p.PWM_SLICE1, p.PIN_2));
    let mut fan = PwmFan::new(pwm);
    info!("Fan PWM initialized");

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = board::I2C_FREQUENCY_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let mut lcd = Hd44780::new(i2c, Delay, PCF8574_DEFAULT_ADDR);
    if let Err(e) = lcd.init() {
        error!("LCD init failed: {}", e);
    }

    let mut button = Button::new_active_low(Input::new(p.PIN_15, Pull::Up));

    let mut pio = Pio::new(p.PIO0, Irqs);
    let program = PioOneWireProgram::new(&mut pio.common);
    let wire = PioOneWire::new(&mut pio.common, pio.sm0, p.PIN_16, &program);
    let mut probe = Ds18b20::new(wire);
    if let Err(e) = probe.configure(RESOLUTION_12_BIT).await {
        warn!("DS18B20 configure failed: {}", e);
    }
    if let Err(e) = probe.start_conversion().await {
        warn!("DS18B20 conversion start failed: {}", e);
    }
    info!("Sensor initialized");

    let mut controller = FanController::new(config);
    if let Err(e) = controller.init_display(&mut lcd) {
        warn!("Display init failed: {}", e);
    }

    info!("Control loop running");

    loop {
        let uptime = uptime_ms();
        // Wrapping tick for the button and the sample gate
        let now = uptime as u32;

        if let Some(event) = button.poll(now) {
            debug!("Button: {}", event);
            if let Err(e) = controller.on_button(event, &mut lcd) {
                warn!("Display update failed: {}", e);
            }
            if controller.take_commit() {
                match store.save(controller.config()).await {
                    Ok(()) => info!("Settings saved"),
                    Err(e) => error!("Settings save failed: {}", e),
                }
            }
        }

        if controller.sample_due(now) {
            let reading = probe.read_temperature().await;
            if let Err(e) = probe.start_conversion().await {
                trace!("Conversion start failed: {}", e);
            }

            match controller.on_sample(uptime, reading, &mut fan, &mut lcd) {
                Ok(decision) => {
                    if decision.is_failsafe() {
                        debug!("Fail-safe: {}", decision.status);
                    } else {
                        trace!("Duty {}% ({})", decision.duty, decision.status);
                    }
                }
                Err(e) => warn!("Display update failed: {}", e),
            }
        }

        Timer::after_millis(board::BUTTON_POLL_MS).await;
    }
}
