use log::debug;

use crate::voltage::{Voltage, FULL_SCALE};

/// Lateral acceleration (m/s^2) beyond which the vehicle steers
pub const TURN_THRESHOLD: f32 = 3.0;

/// Output for a left turn. The steering input misbehaves at a literal 0 V.
pub const V_NEAR_ZERO: f32 = 0.00001;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Right,
    Left,
    Straight,
}

impl Direction {
    /// No hysteresis, readings around the threshold switch direction on every tick
    pub fn from_x_accel(x_accel: f32) -> Direction {
        if x_accel < -TURN_THRESHOLD {
            Direction::Right
        } else if x_accel > TURN_THRESHOLD {
            Direction::Left
        } else {
            Direction::Straight
        }
    }

    pub fn voltage(self) -> Voltage {
        match self {
            Direction::Right => Voltage::MAX,
            Direction::Left => Voltage::clamped(V_NEAR_ZERO, FULL_SCALE),
            Direction::Straight => Voltage::STOP,
        }
    }
}

pub fn control_vehicle_direction(x_accel: f32) -> Voltage {
    let direction = Direction::from_x_accel(x_accel);
    match direction {
        Direction::Right => debug!("x: {:.2}, turning right...", x_accel),
        Direction::Left => debug!("x: {:.2}, turning left...", x_accel),
        Direction::Straight => debug!("x: {:.2}, neutral...", x_accel),
    }
    direction.voltage()
}
