use core::fmt;
use embedded_time::{clock, ConversionError};

/// Errors raised by the camera stabilization module.
#[derive(Debug)]
pub enum Error {
    /// The scheduler clock could not be read.
    Clock(clock::Error),
    /// A clock reading could not be converted to milliseconds.
    Time(ConversionError),
    /// The module is not enabled and was not activated.
    Disabled,
    /// Raw axis index outside of roll, pitch and yaw.
    InvalidAxis(u8),
    /// Raw stabilization mode outside of attitude and axis lock.
    InvalidMode(u8),
    /// Raw input source that names no accessory channel.
    InvalidInput(u8),
    /// Raw gimbal type outside of the known geometries.
    InvalidGimbalType(u8),
    /// Pitch was routed through the elevon mixer before roll.
    MixingOrder,
}

impl From<clock::Error> for Error {
    fn from(clock_error: clock::Error) -> Self {
        Error::Clock(clock_error)
    }
}

impl From<ConversionError> for Error {
    fn from(time_error: ConversionError) -> Self {
        Error::Time(time_error)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Clock(e) => write!(f, "clock error: {:?}", e),
            Error::Time(e) => write!(f, "time conversion error: {:?}", e),
            Error::Disabled => f.write_str("camera stabilization is disabled"),
            Error::InvalidAxis(raw) => write!(f, "invalid axis {}", raw),
            Error::InvalidMode(raw) => write!(f, "invalid stabilization mode {}", raw),
            Error::InvalidInput(raw) => write!(f, "invalid input source {}", raw),
            Error::InvalidGimbalType(raw) => write!(f, "invalid gimbal type {}", raw),
            Error::MixingOrder => f.write_str("pitch mixed before roll"),
        }
    }
}
