use serde::{Deserialize, Serialize};

// Provenance names for the segments that do not come from a landscape shape
pub const HEADER: &str = "header";
pub const FOOTER: &str = "footer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    Flat,
    Slope,
    Wall,
}

impl TileType {
    // Types allowed to follow `self` inside a directional segment series
    pub fn successors(self) -> [TileType; 2] {
        match self {
            TileType::Flat => [TileType::Slope, TileType::Wall],
            TileType::Slope => [TileType::Flat, TileType::Slope],
            TileType::Wall => [TileType::Flat, TileType::Slope],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YDirection {
    Up,
    Down,
    None,
}

impl YDirection {
    // Screen space: y grows downward, so moving up subtracts
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            YDirection::Up => -1.0,
            YDirection::Down => 1.0,
            YDirection::None => 0.0,
        }
    }
}

// Cursor position in screen space (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    // Where the cursor lands after laying one segment from here.
    // Flat moves along x, wall along y, slope along both by the same length.
    pub fn advanced(self, tile_type: TileType, length: f64, direction: YDirection) -> Point {
        match tile_type {
            TileType::Flat => Point::new(self.x + length, self.y),
            TileType::Slope => Point::new(self.x + length, self.y + direction.sign() * length),
            TileType::Wall => Point::new(self.x, self.y + direction.sign() * length),
        }
    }
}

// Room left between the cursor and the right, top and bottom edges of the box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AvailableSpace {
    pub ahead: f64,
    pub up: f64,
    pub down: f64,
}

/// One stretch of terrain profile.
///
/// `end`, `space` and `to_baseline` are annotations computed when the
/// segment is appended; the segment starts where the previous one ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub tile_type: TileType,
    pub length: f64,
    pub y_direction: YDirection,
    pub linked_landscape: String,
    pub end: Point,
    pub space: AvailableSpace,
    // baseline_y - end.y; positive when the baseline lies below the cursor
    pub to_baseline: f64,
}

impl Segment {
    // Cursor position this segment starts from
    pub fn start(&self) -> Point {
        let dy = self.y_direction.sign() * self.length;
        match self.tile_type {
            TileType::Flat => Point::new(self.end.x - self.length, self.end.y),
            TileType::Slope => Point::new(self.end.x - self.length, self.end.y - dy),
            TileType::Wall => Point::new(self.end.x, self.end.y - dy),
        }
    }

    // Horizontal distance covered by this segment
    pub fn advance_x(&self) -> f64 {
        match self.tile_type {
            TileType::Wall => 0.0,
            _ => self.length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slope_moves_both_axes() {
        let p = Point::new(10.0, 100.0).advanced(TileType::Slope, 25.0, YDirection::Up);
        assert_eq!(p, Point::new(35.0, 75.0));
    }

    #[test]
    fn wall_is_purely_vertical() {
        let p = Point::new(10.0, 100.0).advanced(TileType::Wall, 40.0, YDirection::Down);
        assert_eq!(p, Point::new(10.0, 140.0));
    }

    #[test]
    fn flat_ignores_direction() {
        let p = Point::new(0.0, 50.0).advanced(TileType::Flat, 30.0, YDirection::None);
        assert_eq!(p, Point::new(30.0, 50.0));
    }

    #[test]
    fn start_reverses_advance() {
        let start = Point::new(20.0, 200.0);
        for (t, d) in [
            (TileType::Flat, YDirection::None),
            (TileType::Slope, YDirection::Down),
            (TileType::Wall, YDirection::Up),
        ] {
            let seg = Segment {
                tile_type: t,
                length: 50.0,
                y_direction: d,
                linked_landscape: "hill".into(),
                end: start.advanced(t, 50.0, d),
                space: AvailableSpace::default(),
                to_baseline: 0.0,
            };
            assert_eq!(seg.start(), start);
        }
    }

    #[test]
    fn enums_serialize_lowercase() {
        let json = serde_json::to_string(&(TileType::Slope, YDirection::Up)).unwrap();
        assert_eq!(json, r#"["slope","up"]"#);
    }
}
