use core::fmt;

/// Full scale of both analog outputs
pub const V_MAX: f32 = 3.3;
/// The motor controller stops at this voltage, in both directions
pub const V_STOP: f32 = 1.774;

pub const LUX_MIN: f32 = 50.0;
pub const LUX_MAX: f32 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoltageRange {
    pub min: f32,
    pub max: f32,
}

pub const FULL_SCALE: VoltageRange = VoltageRange {
    min: 0.0,
    max: V_MAX,
};

/// Throttle range when the reverse flag is off: darker is slower, 1000 lux is stop
pub const LOWER_RANGE: VoltageRange = VoltageRange {
    min: 0.0,
    max: V_STOP,
};

/// Throttle range when the reverse flag is on: 50 lux is full scale, 1000 lux is stop
pub const UPPER_RANGE: VoltageRange = VoltageRange {
    min: V_STOP,
    max: V_MAX,
};

impl VoltageRange {
    pub fn contains(&self, volts: f32) -> bool {
        volts >= self.min && volts <= self.max
    }
}

/// Output voltage. Always within [FULL_SCALE], so it can be converted to a DAC code without checks.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Voltage(f32);

impl Voltage {
    pub const STOP: Voltage = Voltage(V_STOP);
    pub const MAX: Voltage = Voltage(V_MAX);

    /// Clamps into `range`, which itself must lie within [FULL_SCALE]. NaN becomes the stop voltage.
    pub fn clamped(volts: f32, range: VoltageRange) -> Voltage {
        debug_assert!(FULL_SCALE.contains(range.min) && FULL_SCALE.contains(range.max));
        let volts = if volts.is_nan() { V_STOP } else { volts };
        Voltage(volts.max(range.min).min(range.max))
    }

    pub fn volts(self) -> f32 {
        self.0
    }
}

impl fmt::Display for Voltage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} V", self.0)
    }
}

/// Maps ambient light to the throttle voltage.
///
/// Both branches are linear over `LUX_MIN..=LUX_MAX` and meet at [V_STOP] for bright light.
/// With `reversed` off the output rises from 0 V towards the stop voltage, with `reversed`
/// on it falls from full scale towards it.
pub fn calc_voltage(lux: f32, reversed: bool) -> Voltage {
    let fraction = (lux - LUX_MIN) / (LUX_MAX - LUX_MIN);
    if !reversed {
        Voltage::clamped(fraction * V_STOP, LOWER_RANGE)
    } else {
        Voltage::clamped(V_MAX - fraction * (V_MAX - V_STOP), UPPER_RANGE)
    }
}
