/// Translates numeric headings to 16-point compass directions. (North, NNE, NE, etc.)
/// Represents a 16-point compass rose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    N,   // north
    NNE, // north-northeast
    NE,  // northeast
    ENE, // east-northeast
    E,   // east
    ESE, // east-southeast
    SE,  // southeast
    SSE, // south-southeast
    S,   // south
    SSW, // south-southwest
    SW,  // southwest
    WSW, // west-southwest
    W,   // west
    WNW, // west-northwest
    NW,  // northwest
    NNW, // north-northwest
}

/// Width of one compass point in degrees (360 / 16).
const POINT_WIDTH_DEGREES: f64 = 22.5;

/// Rose order, clockwise from North.
const ROSE: [Direction; 16] = [
    Direction::N,
    Direction::NNE,
    Direction::NE,
    Direction::ENE,
    Direction::E,
    Direction::ESE,
    Direction::SE,
    Direction::SSE,
    Direction::S,
    Direction::SSW,
    Direction::SW,
    Direction::WSW,
    Direction::W,
    Direction::WNW,
    Direction::NW,
    Direction::NNW,
];

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Direction {
    /// Nearest compass point to a heading. The 16th division (348.75..360)
    /// wraps back to North.
    pub fn from_heading(heading: f64) -> Self {
        let index = (heading / POINT_WIDTH_DEGREES).round() as i64;
        ROSE[index.rem_euclid(ROSE.len() as i64) as usize]
    }

    /// Label shown next to the heading: cardinal points are spelled out,
    /// everything in between is abbreviated.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::N => "North",
            Direction::E => "East",
            Direction::S => "South",
            Direction::W => "West",
            _ => self.abbreviation(),
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::NNE => "NNE",
            Direction::NE => "NE",
            Direction::ENE => "ENE",
            Direction::E => "E",
            Direction::ESE => "ESE",
            Direction::SE => "SE",
            Direction::SSE => "SSE",
            Direction::S => "S",
            Direction::SSW => "SSW",
            Direction::SW => "SW",
            Direction::WSW => "WSW",
            Direction::W => "W",
            Direction::WNW => "WNW",
            Direction::NW => "NW",
            Direction::NNW => "NNW",
        }
    }
}

/// Compass-point label for a heading in degrees, e.g. `"North"`, `"NNE"`, `"East"`.
pub fn direction_label(heading: f64) -> &'static str {
    Direction::from_heading(heading).label()
}
