use std::io;

/// Errors raised by the sensor and button adapters. The navigation core
/// itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("I2C error: {0}")]
    I2c(#[from] rppal::i2c::Error),

    #[error("GPIO error: {0}")]
    Gpio(#[from] rppal::gpio::Error),

    #[error("Wrong device ID: 0x{found:02X}, expected 0x{expected:02X}")]
    WrongDeviceId { found: u8, expected: u8 },

    #[error("Magnetometer hardware not responding (no data ready)")]
    MagnetometerNotResponding,

    #[error("Magnetometer data not ready")]
    MagnetometerNotReady,

    #[error("NMEA parse error: {0}")]
    Nmea(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the OS refused access to the device node.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Error::Io(e) => e.kind() == io::ErrorKind::PermissionDenied,
            Error::I2c(rppal::i2c::Error::Io(e)) => e.kind() == io::ErrorKind::PermissionDenied,
            Error::Gpio(rppal::gpio::Error::Io(e)) => e.kind() == io::ErrorKind::PermissionDenied,
            Error::Gpio(rppal::gpio::Error::PermissionDenied(_)) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_detection() {
        let denied = Error::from(io::Error::new(io::ErrorKind::PermissionDenied, "nope"));
        assert!(denied.is_permission_denied());

        let missing = Error::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(!missing.is_permission_denied());

        let i2c = Error::from(rppal::i2c::Error::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "nope",
        )));
        assert!(i2c.is_permission_denied());

        assert!(!Error::MagnetometerNotReady.is_permission_denied());
    }

    #[test]
    fn test_display() {
        let err = Error::WrongDeviceId {
            found: 0x12,
            expected: 0x3D,
        };
        assert_eq!(err.to_string(), "Wrong device ID: 0x12, expected 0x3D");
    }
}
