//! Position producer: NMEA 0183 sentences from the GPS receiver.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use nmea::{Nmea, SentenceType};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::position::Coordinate;
use crate::sensor_feed::{SensorEvent, SensorSender};

/// Shown to the user when the serial port cannot be opened for lack of rights.
pub const LOCATION_PERMISSION_DENIED: &str = "Permission to access location was denied";

/// Accumulates NMEA sentences and turns fixes into sensor events.
pub struct NmeaSource {
    nmea: Nmea,
    course_as_heading: bool,
}

impl Default for NmeaSource {
    fn default() -> Self {
        Self::new()
    }
}

impl NmeaSource {
    pub fn new() -> Self {
        Self {
            nmea: Nmea::default(),
            course_as_heading: false,
        }
    }

    /// Also report course over ground as the heading. Useful without a
    /// magnetometer, but only meaningful while moving.
    pub fn with_course_as_heading(mut self, enabled: bool) -> Self {
        self.course_as_heading = enabled;
        self
    }

    /// Parse one sentence. Only fix-bearing sentences produce events; blank
    /// lines produce none.
    pub fn ingest(&mut self, sentence: &str) -> Result<Vec<SensorEvent>> {
        let trimmed = sentence.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        let kind = self
            .nmea
            .parse(trimmed)
            .map_err(|e| Error::Nmea(e.to_string()))?;

        let mut events = Vec::new();

        if matches!(kind, SentenceType::GGA | SentenceType::RMC)
            && let (Some(lat), Some(lon)) = (self.nmea.latitude, self.nmea.longitude)
        {
            events.push(SensorEvent::Position(Coordinate {
                latitude: lat,
                longitude: lon,
                altitude: self.nmea.altitude.map(f64::from),
            }));
        }

        if self.course_as_heading
            && matches!(kind, SentenceType::RMC | SentenceType::VTG)
            && let Some(course) = self.nmea.true_course
        {
            events.push(SensorEvent::Heading(f64::from(course)));
        }

        Ok(events)
    }

    /// Feed every line of `reader` through [`ingest`](Self::ingest) and forward
    /// the events. Unparseable lines, including line noise that is not valid
    /// UTF-8, are skipped. Stops early once the consumer hangs up. Returns the
    /// number of events sent.
    pub fn stream<R: BufRead>(&mut self, reader: R, sender: &SensorSender) -> Result<usize> {
        let mut sent = 0;
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    debug!(error = %e, "skipping undecodable NMEA line");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let events = match self.ingest(&line) {
                Ok(events) => events,
                Err(e) => {
                    debug!(sentence = line.trim(), error = %e, "skipping NMEA sentence");
                    continue;
                }
            };

            for event in events {
                if !sender.send(event) {
                    info!("sensor feed closed, stopping NMEA reader");
                    return Ok(sent);
                }
                sent += 1;
            }
        }
        Ok(sent)
    }
}

pub fn open_serial(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}

/// Reads the GPS receiver until the stream ends. A permission failure on open
/// is reported through the feed instead of being returned.
pub fn run(path: &Path, course_as_heading: bool, sender: &SensorSender) -> Result<()> {
    info!(port = %path.display(), "opening GPS serial port");
    let reader = match open_serial(path) {
        Ok(reader) => reader,
        Err(e) if e.is_permission_denied() => {
            warn!(port = %path.display(), error = %e, "GPS access denied");
            sender.report_permission_denied(LOCATION_PERMISSION_DENIED);
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let mut source = NmeaSource::new().with_course_as_heading(course_as_heading);
    let sent = source.stream(reader, sender)?;
    info!(events = sent, "GPS stream ended");
    Ok(())
}
