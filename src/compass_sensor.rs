//! Heading producer: LIS3MDL magnetometer on the Pi's I2C bus.

use std::thread;
use std::time::Duration;

use tracing::{info, trace, warn};

// Use rppal in production
#[cfg(not(test))]
use rppal::i2c::I2c;

#[cfg(test)]
// This is only used in testing, not compiled in release.
use crate::mocks::mock_i2c::I2c;

use crate::config::MagnetometerCalibration;
use crate::error::{Error, Result};
use crate::sensor_feed::SensorSender;

/// Shown to the user when the I2C bus cannot be opened for lack of rights.
pub const HEADING_PERMISSION_DENIED: &str = "Permission to access the compass was denied";

const LIS3MDL_ADDR: u16 = 0x1C;
const LIS3MDL_ID: u8 = 0x3D;

// LIS3MDL Register addresses
const WHO_AM_I: u8 = 0x0F;
const CTRL_REG1: u8 = 0x20;
const CTRL_REG2: u8 = 0x21;
const CTRL_REG3: u8 = 0x22;
const CTRL_REG4: u8 = 0x23;
const CTRL_REG5: u8 = 0x24;
const STATUS_REG: u8 = 0x27;
const OUT_X_L: u8 = 0x28;

/// STATUS_REG: new X, Y and Z data available.
const ZYXDA: u8 = 0x08;

pub struct CompassSensor {
    i2c: I2c,
    calibration: MagnetometerCalibration,
}

impl CompassSensor {
    pub fn new() -> Result<Self> {
        Self::with_calibration(MagnetometerCalibration::default())
    }

    pub fn with_calibration(calibration: MagnetometerCalibration) -> Result<Self> {
        let mut i2c = I2c::new()?;
        i2c.set_slave_address(LIS3MDL_ADDR)?;

        let who_am_i = i2c.smbus_read_byte(WHO_AM_I)?;
        if who_am_i != LIS3MDL_ID {
            return Err(Error::WrongDeviceId {
                found: who_am_i,
                expected: LIS3MDL_ID,
            });
        }

        // CTRL_REG1: Temperature enabled, Ultra-high performance mode (X,Y), ODR = 80 Hz
        i2c.smbus_write_byte(CTRL_REG1, 0xFC)?;

        // CTRL_REG2: Full scale ±4 gauss
        i2c.smbus_write_byte(CTRL_REG2, 0x00)?;

        // CTRL_REG3: Continuous conversion mode
        i2c.smbus_write_byte(CTRL_REG3, 0x00)?;

        // CTRL_REG4: Ultra-high performance mode (Z-axis), little endian
        i2c.smbus_write_byte(CTRL_REG4, 0x0C)?;

        // CTRL_REG5: Block data update enabled
        i2c.smbus_write_byte(CTRL_REG5, 0x40)?;

        thread::sleep(Duration::from_millis(100));

        let status = i2c.smbus_read_byte(STATUS_REG)?;
        if status == 0 {
            return Err(Error::MagnetometerNotResponding);
        }

        info!("compass (LIS3MDL) initialized");
        Ok(Self { i2c, calibration })
    }

    /// Calibrated heading in degrees, `[0, 360)`.
    pub fn read_heading(&mut self) -> Result<f64> {
        let (x, y) = self.read_raw_magnetometer()?;
        Ok(heading_from_raw(x, y, &self.calibration))
    }

    /// Raw magnetometer X and Y counts.
    pub fn read_raw_magnetometer(&mut self) -> Result<(f64, f64)> {
        let status = self.i2c.smbus_read_byte(STATUS_REG)?;
        if status & ZYXDA == 0 {
            return Err(Error::MagnetometerNotReady);
        }

        // X and Y output registers, little endian
        let mut data = [0u8; 4];
        for (i, item) in data.iter_mut().enumerate() {
            *item = self.i2c.smbus_read_byte(OUT_X_L + i as u8)?;
        }

        let x = i16::from_le_bytes([data[0], data[1]]) as f64;
        let y = i16::from_le_bytes([data[2], data[3]]) as f64;

        Ok((x, y))
    }
}

/// Heading from raw X/Y counts: hard-iron offsets removed, then the site
/// correction applied.
pub fn heading_from_raw(x_raw: f64, y_raw: f64, calibration: &MagnetometerCalibration) -> f64 {
    let x = x_raw - calibration.x_offset;
    let y = y_raw - calibration.y_offset;

    let calibrated = y.atan2(x).to_degrees() + calibration.heading_offset;

    let normalized = calibrated.rem_euclid(360.0);
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Run length of consecutive failed reads, so a stuck sensor warns once
/// instead of on every poll.
#[derive(Debug, Default)]
struct ReadFailures {
    count: u32,
}

impl ReadFailures {
    /// Counts a failure. True when it starts a new run.
    fn failed(&mut self) -> bool {
        self.count = self.count.saturating_add(1);
        self.count == 1
    }

    /// Ends the current run, returning how many reads it spanned.
    fn recovered(&mut self) -> u32 {
        std::mem::take(&mut self.count)
    }
}

/// Opens the magnetometer and forwards a heading every `interval` until the
/// feed closes. Permission failures on open are reported through the feed.
pub fn run(
    calibration: MagnetometerCalibration,
    interval: Duration,
    sender: &SensorSender,
) -> Result<()> {
    let mut compass = match CompassSensor::with_calibration(calibration) {
        Ok(compass) => compass,
        Err(e) if e.is_permission_denied() => {
            warn!(error = %e, "compass access denied");
            sender.report_permission_denied(HEADING_PERMISSION_DENIED);
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let mut failures = ReadFailures::default();
    loop {
        match compass.read_heading() {
            Ok(heading) => {
                let failed_reads = failures.recovered();
                if failed_reads > 0 {
                    info!(failed_reads, "compass reads recovered");
                }
                if !sender.send_heading(heading) {
                    info!("sensor feed closed, stopping compass");
                    return Ok(());
                }
            }
            Err(Error::MagnetometerNotReady) => {}
            Err(e) => {
                if failures.failed() {
                    warn!(error = %e, "compass read failed");
                } else {
                    trace!(error = %e, "compass read still failing");
                }
            }
        }
        thread::sleep(interval);
    }
}
