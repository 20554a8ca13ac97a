//! Editable parameters
//!
//! Every parameter is identified by a [`ParamId`]. Its label, value kind,
//! display suffix and step rule live in one static table indexed by the id,
//! so adding a parameter is a single table entry.

use core::fmt;

use crate::config::{
    Configuration, MAX_CTR_TEMP, MAX_GAIN, MAX_HYSTERESIS, MIN_CTR_TEMP, MIN_HYSTERESIS,
};

/// Parameter identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParamId {
    PidEnabled,
    Setpoint,
    Kp,
    Ki,
    Kd,
    StartTemp,
    EndTemp,
    Hysteresis,
}

/// Storage kind of a parameter value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParamKind {
    Boolean,
    SmallInteger,
    Float,
}

/// Parameter value tagged with its kind
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParamValue {
    Bool(bool),
    Small(u8),
    Float(f32),
}

impl ParamValue {
    /// Kind of this value
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Bool(_) => ParamKind::Boolean,
            ParamValue::Small(_) => ParamKind::SmallInteger,
            ParamValue::Float(_) => ParamKind::Float,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(true) => f.write_str("On"),
            ParamValue::Bool(false) => f.write_str("Off"),
            ParamValue::Small(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{:.1}", v),
        }
    }
}

/// Unit shown after a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Suffix {
    None,
    Degree,
    Percent,
}

/// HD44780 ROM code for the degree sign
pub const DEGREE_CHAR: u8 = 0xDF;

impl Suffix {
    /// Character codes to draw after the value
    pub fn codes(self) -> &'static [u8] {
        match self {
            Suffix::None => &[],
            Suffix::Degree => &[DEGREE_CHAR, b'C'],
            Suffix::Percent => b"%",
        }
    }
}

/// Static description of a parameter
pub struct ParamDef {
    pub id: ParamId,
    pub label: &'static str,
    pub kind: ParamKind,
    pub suffix: Suffix,
    get: fn(&Configuration) -> ParamValue,
    step: fn(&mut Configuration),
}

static PARAMS: [ParamDef; 8] = [
    ParamDef {
        id: ParamId::PidEnabled,
        label: "PID mode",
        kind: ParamKind::Boolean,
        suffix: Suffix::None,
        get: |c| ParamValue::Bool(c.pid_enabled),
        step: |c| c.pid_enabled = !c.pid_enabled,
    },
    ParamDef {
        id: ParamId::Setpoint,
        label: "Target",
        kind: ParamKind::SmallInteger,
        suffix: Suffix::Degree,
        get: |c| ParamValue::Small(c.setpoint),
        step: |c| c.setpoint = step_setpoint(c.setpoint),
    },
    ParamDef {
        id: ParamId::Kp,
        label: "Kp",
        kind: ParamKind::Float,
        suffix: Suffix::None,
        get: |c| ParamValue::Float(c.kp),
        step: |c| c.kp = step_gain(c.kp),
    },
    ParamDef {
        id: ParamId::Ki,
        label: "Ki",
        kind: ParamKind::Float,
        suffix: Suffix::None,
        get: |c| ParamValue::Float(c.ki),
        step: |c| c.ki = step_gain(c.ki),
    },
    ParamDef {
        id: ParamId::Kd,
        label: "Kd",
        kind: ParamKind::Float,
        suffix: Suffix::None,
        get: |c| ParamValue::Float(c.kd),
        step: |c| c.kd = step_gain(c.kd),
    },
    ParamDef {
        id: ParamId::StartTemp,
        label: "Start temp",
        kind: ParamKind::SmallInteger,
        suffix: Suffix::Degree,
        get: |c| ParamValue::Small(c.start_temp),
        step: |c| c.start_temp = step_start_temp(c.start_temp, c.end_temp),
    },
    ParamDef {
        id: ParamId::EndTemp,
        label: "End temp",
        kind: ParamKind::SmallInteger,
        suffix: Suffix::Degree,
        get: |c| ParamValue::Small(c.end_temp),
        step: |c| c.end_temp = step_end_temp(c.start_temp, c.end_temp),
    },
    ParamDef {
        id: ParamId::Hysteresis,
        label: "Hysteresis",
        kind: ParamKind::SmallInteger,
        suffix: Suffix::Percent,
        get: |c| ParamValue::Small(c.hysteresis),
        step: |c| c.hysteresis = step_hysteresis(c.hysteresis),
    },
];

impl ParamId {
    /// Table entry for this parameter
    pub fn def(self) -> &'static ParamDef {
        &PARAMS[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.def().label
    }

    pub fn suffix(self) -> Suffix {
        self.def().suffix
    }

    /// Read the current value out of a configuration
    pub fn value(self, config: &Configuration) -> ParamValue {
        (self.def().get)(config)
    }

    /// Advance the value by one step, wrapping within its bounds
    pub fn step(self, config: &mut Configuration) {
        (self.def().step)(config)
    }
}

/// Start temperature: +1, wraps to the floor before reaching the end temperature
pub fn step_start_temp(start: u8, end: u8) -> u8 {
    let next = start.saturating_add(1);
    if next >= end {
        MIN_CTR_TEMP
    } else {
        next
    }
}

/// End temperature: +1, wraps to just above the start temperature past the ceiling
pub fn step_end_temp(start: u8, end: u8) -> u8 {
    let next = end.saturating_add(1);
    if next > MAX_CTR_TEMP {
        start.saturating_add(1)
    } else {
        next
    }
}

pub fn step_hysteresis(band: u8) -> u8 {
    if band >= MAX_HYSTERESIS {
        MIN_HYSTERESIS
    } else {
        band + 1
    }
}

pub fn step_setpoint(setpoint: u8) -> u8 {
    if setpoint >= MAX_CTR_TEMP {
        MIN_CTR_TEMP
    } else {
        setpoint + 1
    }
}

/// Gains move in tenths so repeated stepping does not accumulate drift
pub fn step_gain(gain: f32) -> f32 {
    let max_tenths = (MAX_GAIN * 10.0) as u16;
    let tenths = (gain * 10.0 + 0.5) as u16 + 1;
    if tenths > max_tenths {
        0.1
    } else {
        tenths as f32 / 10.0
    }
}
