//! Main controller coordinating control law, menu and display
//!
//! The controller owns the configuration and all runtime state. The firmware
//! loop feeds it button events and sensor samples and performs the I/O it
//! asks for (fan duty, display writes, settings commits).

use crate::config::Configuration;
use crate::control::{ControlStatus, DutyController, DutyDecision};
use crate::menu::Menu;
use crate::render::{
    compose_error, compose_init, compose_main, compose_menu, Frame, MainView, Renderer, Trend,
    GLYPHS,
};
use crate::state::{ScreenEvent, ScreenMode};
use crate::traits::{ButtonEvent, CharDisplay, DisplayError, DisplayExt, FanOutput, SensorError};

/// Interval between control samples (ms)
pub const SAMPLE_INTERVAL_MS: u32 = 1000;

/// Fixed-interval gate on a wrapping millisecond clock
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleGate {
    interval_ms: u32,
    last_ms: u32,
}

impl SampleGate {
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_ms: 0,
        }
    }

    /// Check whether a full interval has elapsed, and if so start the next one
    pub fn due(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_ms) >= self.interval_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }
}

/// Controller state for coordinating subsystems
pub struct FanController {
    /// Live configuration, edited in place by the menu
    config: Configuration,
    /// Control strategies and their state
    duty: DutyController,
    menu: Menu,
    screen: ScreenMode,
    renderer: Renderer,
    /// Scratch frame composed on every redraw
    frame: Frame,
    gate: SampleGate,
    /// Status of the most recent sample
    last_status: Option<ControlStatus>,
    /// Most recent valid temperature (°C)
    last_temperature: Option<f32>,
    trend: Trend,
    /// Duty currently applied to the fan (%)
    applied_duty: u8,
    backlight: bool,
    /// Menu was closed and the configuration awaits persisting
    commit_pending: bool,
}

impl FanController {
    /// Create a controller around a loaded configuration
    pub fn new(config: Configuration) -> Self {
        Self {
            duty: DutyController::new(&config),
            config,
            menu: Menu::new(),
            screen: ScreenMode::Init,
            renderer: Renderer::new(),
            frame: Frame::blank(),
            gate: SampleGate::new(SAMPLE_INTERVAL_MS),
            last_status: None,
            last_temperature: None,
            trend: Trend::Steady,
            applied_duty: 0,
            backlight: true,
            commit_pending: false,
        }
    }

    /// Upload glyphs, switch on the backlight and show the init screen
    pub fn init_display<D: CharDisplay>(&mut self, display: &mut D) -> Result<(), DisplayError> {
        display.load_glyphs(&GLYPHS)?;
        display.set_backlight(self.backlight)?;
        self.redraw(display, true)
    }

    /// Check the sampling gate
    pub fn sample_due(&mut self, now_ms: u32) -> bool {
        self.gate.due(now_ms)
    }

    /// Process one sensor sample
    ///
    /// The fan is driven before the display is touched, so a display fault
    /// never holds back the actuator.
    pub fn on_sample<F: FanOutput, D: CharDisplay>(
        &mut self,
        uptime_ms: u64,
        reading: Result<f32, SensorError>,
        fan: &mut F,
        display: &mut D,
    ) -> Result<DutyDecision, DisplayError> {
        let decision = self.duty.update(reading, uptime_ms, &self.config);

        fan.set_duty_cycle(decision.duty);
        self.applied_duty = decision.duty;

        if let ControlStatus::Regulating(temp) = decision.status {
            self.trend = Trend::between(self.last_temperature, temp);
            self.last_temperature = Some(temp);
        }
        self.last_status = Some(decision.status);
        self.screen = self.screen.transition(ScreenEvent::from(&decision.status));

        self.redraw(display, false)?;
        Ok(decision)
    }

    /// Process one button event
    ///
    /// Closing the menu marks the configuration for persisting before the
    /// display is touched; collect it with [`take_commit`](Self::take_commit)
    /// whatever this returns.
    pub fn on_button<D: CharDisplay>(
        &mut self,
        event: ButtonEvent,
        display: &mut D,
    ) -> Result<(), DisplayError> {
        match (self.menu.is_open(), event) {
            (false, ButtonEvent::Double) => {
                self.menu.enter();
                self.screen = self.screen.transition(ScreenEvent::MenuToggle);
                self.redraw(display, true)
            }
            (true, ButtonEvent::Double) => {
                self.menu.exit();
                self.commit_pending = true;
                if self.config.pid_enabled {
                    self.duty.apply_gains(self.config.gains());
                }
                self.screen = self.screen.transition(ScreenEvent::MenuToggle);
                if let Some(status) = self.last_status {
                    self.screen = self.screen.transition(ScreenEvent::from(&status));
                }
                self.redraw(display, true)
            }
            (true, ButtonEvent::Single) => {
                self.menu.advance_selection(&self.config);
                self.redraw(display, true)
            }
            (true, ButtonEvent::Step) => {
                self.menu.step_selected_value(&mut self.config);
                self.redraw(display, true)
            }
            (false, ButtonEvent::Single) => {
                self.backlight = !self.backlight;
                display.set_backlight(self.backlight)
            }
            (false, ButtonEvent::Step) => Ok(()),
        }
    }

    /// Returns `true` once per menu exit; the caller then saves [`config`](Self::config)
    pub fn take_commit(&mut self) -> bool {
        core::mem::take(&mut self.commit_pending)
    }

    fn redraw<D: CharDisplay>(&mut self, display: &mut D, force: bool) -> Result<(), DisplayError> {
        match (self.screen, self.last_temperature) {
            (ScreenMode::Menu, _) => compose_menu(&mut self.frame, &self.menu, &self.config),
            (ScreenMode::Main, Some(temperature)) => compose_main(
                &mut self.frame,
                &MainView {
                    temperature,
                    trend: self.trend,
                    duty: self.applied_duty,
                    config: &self.config,
                },
            ),
            (ScreenMode::Error, _) => compose_error(&mut self.frame),
            (ScreenMode::Init, _) | (ScreenMode::Main, None) => compose_init(&mut self.frame),
        }
        self.renderer
            .render(display, self.screen, &self.frame, force)
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn screen(&self) -> ScreenMode {
        self.screen
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn duty_controller(&self) -> &DutyController {
        &self.duty
    }

    /// Duty currently applied to the fan (%)
    pub fn applied_duty(&self) -> u8 {
        self.applied_duty
    }

    pub fn backlight(&self) -> bool {
        self.backlight
    }

    /// What the display currently shows
    pub fn shown(&self) -> &Frame {
        self.renderer.shadow()
    }
}
