/// A volume value expressed as a base-2 exponent of the amplitude.
///
/// `0.0` plays the source unchanged, `-1.0` halves the amplitude and `1.0` doubles it.
#[derive(Debug, Copy, Clone, Default)]
pub struct Volume(pub f32);

impl Volume {
    /// The same gain in decibels, which is what the mixer expects.
    pub fn to_decibels(self) -> f32 {
        // 20 * log10(2^v)
        self.0 * 20.0 * std::f32::consts::LOG10_2
    }

    pub fn amplitude(self) -> f32 {
        self.0.exp2()
    }
}

impl PartialEq for Volume {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == std::cmp::Ordering::Equal
    }
}

impl Eq for Volume {}

impl From<f32> for Volume {
    fn from(value: f32) -> Self {
        Self(value)
    }
}

/// A point in world or screen space.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle, `min` inclusive and `max` exclusive.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub min: Position,
    pub max: Position,
}

impl Rect {
    pub fn new(min: Position, max: Position) -> Self {
        Self { min, max }
    }

    /// A rectangle of the given size centered on `center`.
    pub fn centered(center: Position, width: f64, height: f64) -> Self {
        Self {
            min: Position::new(center.x - width / 2.0, center.y - height / 2.0),
            max: Position::new(center.x + width / 2.0, center.y + height / 2.0),
        }
    }

    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }
}
