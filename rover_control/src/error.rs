use thiserror::Error;

/// Failure of a single sensor transfer. The control loop treats these as transient.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum SensorError {
    #[error("{sensor}: bus transfer failed")]
    Bus { sensor: &'static str },
}

/// Raised once during board bring up. There is no recovery, the board halts.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum HardwareInitError {
    #[error("{0} did not answer on the bus")]
    MissingSensor(&'static str),
    #[error("{sensor} reported id {found:#04x}, expected {expected:#04x}")]
    UnexpectedDevice {
        sensor: &'static str,
        expected: u8,
        found: u8,
    },
    #[error("{0} is not available")]
    MissingPeripheral(&'static str),
}
