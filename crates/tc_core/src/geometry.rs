//! Surface coordinates
//!
//! All positions use the same real-valued units as the pitch dimensions
//! (meters for a regular 105x68 pitch). No normalization is applied on the
//! wire.
//!
//! - x: 0 = team A goal line, `length` = team B goal line
//! - y: 0 = touchline, `width` = touchline

use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A point on the playing surface, serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(&self, by: Position) -> Position {
        Position::new(self.x + by.x, self.y + by.y)
    }

    /// Linear interpolation; `t = 0` returns `self` exactly.
    pub fn lerp(&self, to: &Position, t: f64) -> Position {
        Position::new(self.x + (to.x - self.x) * t, self.y + (to.y - self.y) * t)
    }
}

impl From<[f64; 2]> for Position {
    fn from([x, y]: [f64; 2]) -> Self {
        Position { x, y }
    }
}

impl From<Position> for [f64; 2] {
    fn from(pos: Position) -> Self {
        [pos.x, pos.y]
    }
}

impl JsonSchema for Position {
    fn schema_name() -> String {
        "Position".to_owned()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        <[f64; 2]>::json_schema(gen)
    }
}

/// Playing surface bounds `[0, length] x [0, width]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Pitch {
    pub length: f64,
    pub width: f64,
}

impl Default for Pitch {
    fn default() -> Self {
        Self { length: 105.0, width: 68.0 }
    }
}

impl Pitch {
    pub fn new(length: f64, width: f64) -> Self {
        Self { length, width }
    }

    pub fn center(&self) -> Position {
        Position::new(self.length * 0.5, self.width * 0.5)
    }

    pub fn clamp(&self, pos: Position) -> Position {
        Position::new(pos.x.clamp(0.0, self.length), pos.y.clamp(0.0, self.width))
    }

    pub fn contains(&self, pos: &Position) -> bool {
        (0.0..=self.length).contains(&pos.x) && (0.0..=self.width).contains(&pos.y)
    }

    pub fn is_valid(&self) -> bool {
        self.length.is_finite() && self.width.is_finite() && self.length > 0.0 && self.width > 0.0
    }
}
