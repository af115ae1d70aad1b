use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};
use crate::segment::{TileType, YDirection};

// Most anchors a shape may declare
pub const MAX_ANCHORS: usize = 3;

// Inclusive bounds for the length of one segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthRange {
    pub min: f64,
    pub max: f64,
}

impl LengthRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..=self.max)
    }

    // Why this range can never produce a usable segment, if it can't
    fn defect(&self, tile_size: f64) -> Option<String> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min <= 0.0 {
            Some(format!("range {}..{} must be positive and finite", self.min, self.max))
        } else if self.min > self.max {
            Some(format!("range min {} exceeds max {}", self.min, self.max))
        } else if self.max < tile_size {
            Some(format!("range max {} is below one tile ({})", self.max, tile_size))
        } else {
            None
        }
    }
}

/// Target the cursor walks toward, as fractions of the shape footprint.
///
/// `x` is measured rightward and `rise` upward from the point where the
/// shape started. Without a forced `direction` the anchor is horizontal and
/// only flat segments are laid toward it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub x: f64,
    pub rise: f64,
    #[serde(default)]
    pub direction: Option<YDirection>,
    pub flat: LengthRange,
    #[serde(default)]
    pub slope: Option<LengthRange>,
    #[serde(default)]
    pub wall: Option<LengthRange>,
}

impl AnchorPoint {
    pub fn horizontal(x: f64, rise: f64, flat: LengthRange) -> Self {
        Self {
            x,
            rise,
            direction: None,
            flat,
            slope: None,
            wall: None,
        }
    }

    pub fn directed(
        x: f64,
        rise: f64,
        direction: YDirection,
        flat: LengthRange,
        slope: LengthRange,
        wall: LengthRange,
    ) -> Self {
        Self {
            x,
            rise,
            direction: Some(direction),
            flat,
            slope: Some(slope),
            wall: Some(wall),
        }
    }

    pub fn range(&self, tile_type: TileType) -> Option<LengthRange> {
        match tile_type {
            TileType::Flat => Some(self.flat),
            TileType::Slope => self.slope,
            TileType::Wall => self.wall,
        }
    }
}

/// Named terrain silhouette built from up to three anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandscapeShape {
    pub name: String,
    // nominal footprint; biases selection and scales anchor fractions
    pub width: f64,
    pub height: f64,
    pub chance_to_occur: f64,
    pub anchors: Vec<AnchorPoint>,
}

impl LandscapeShape {
    pub fn new(
        name: &str,
        width: f64,
        height: f64,
        chance_to_occur: f64,
        anchors: Vec<AnchorPoint>,
    ) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            chance_to_occur,
            anchors,
        }
    }

    // Check the shape can be walked with segments at least one tile long
    pub fn validate(&self, tile_size: f64) -> Result<()> {
        if self.name.is_empty() {
            return Err(GenerationError::InvalidConfig(
                "landscape name must not be empty".into(),
            ));
        }
        if !(self.width > 0.0 && self.width.is_finite())
            || !(self.height >= 0.0 && self.height.is_finite())
        {
            return Err(GenerationError::InvalidConfig(format!(
                "landscape '{}' has footprint {}x{}",
                self.name, self.width, self.height
            )));
        }
        if !(self.chance_to_occur >= 0.0 && self.chance_to_occur.is_finite()) {
            return Err(GenerationError::InvalidConfig(format!(
                "landscape '{}' has chance {}",
                self.name, self.chance_to_occur
            )));
        }
        if self.anchors.is_empty() || self.anchors.len() > MAX_ANCHORS {
            return Err(GenerationError::InvalidConfig(format!(
                "landscape '{}' has {} anchors, expected 1..={}",
                self.name,
                self.anchors.len(),
                MAX_ANCHORS
            )));
        }

        let unreachable = |anchor: usize, reason: String| GenerationError::UnreachableAnchor {
            landscape: self.name.clone(),
            anchor,
            reason,
        };

        let (mut prev_x, mut prev_rise) = (0.0, 0.0);
        for (i, anchor) in self.anchors.iter().enumerate() {
            if !anchor.x.is_finite() || !anchor.rise.is_finite() {
                return Err(unreachable(i, "target is not finite".into()));
            }
            if let Some(reason) = anchor.flat.defect(tile_size) {
                return Err(unreachable(i, format!("flat {reason}")));
            }
            match anchor.direction {
                None => {}
                Some(YDirection::None) => {
                    return Err(unreachable(i, "forced direction must be up or down".into()));
                }
                Some(direction) => {
                    for (label, range) in [("slope", anchor.slope), ("wall", anchor.wall)] {
                        let Some(range) = range else {
                            return Err(unreachable(i, format!("missing {label} range")));
                        };
                        if let Some(reason) = range.defect(tile_size) {
                            return Err(unreachable(i, format!("{label} {reason}")));
                        }
                    }
                    if anchor.x <= prev_x {
                        return Err(unreachable(i, "does not advance horizontally".into()));
                    }
                    let climbs = anchor.rise > prev_rise;
                    let sinks = anchor.rise < prev_rise;
                    if (direction == YDirection::Up && !climbs)
                        || (direction == YDirection::Down && !sinks)
                    {
                        return Err(unreachable(
                            i,
                            format!("rise does not move {direction:?} from the previous anchor"),
                        ));
                    }
                }
            }
            prev_x = anchor.x;
            prev_rise = anchor.rise;
        }
        Ok(())
    }
}

const fn r(min: f64, max: f64) -> LengthRange {
    LengthRange::new(min, max)
}

// The stock landscape table: plain, hill, pit, mountain, valley, plateau, quarry
pub fn default_landscapes() -> Vec<LandscapeShape> {
    use YDirection::{Down, Up};

    vec![
        LandscapeShape::new(
            "plain",
            400.0,
            0.0,
            3.0,
            vec![AnchorPoint::horizontal(1.0, 0.0, r(50.0, 200.0))],
        ),
        LandscapeShape::new(
            "hill",
            500.0,
            150.0,
            2.0,
            vec![
                AnchorPoint::directed(0.4, 1.0, Up, r(25.0, 75.0), r(25.0, 100.0), r(25.0, 50.0)),
                AnchorPoint::horizontal(0.6, 1.0, r(50.0, 150.0)),
                AnchorPoint::directed(1.0, 0.0, Down, r(25.0, 75.0), r(25.0, 100.0), r(25.0, 50.0)),
            ],
        ),
        LandscapeShape::new(
            "pit",
            300.0,
            150.0,
            1.0,
            vec![
                AnchorPoint::directed(0.15, -1.0, Down, r(25.0, 50.0), r(25.0, 50.0), r(50.0, 150.0)),
                AnchorPoint::horizontal(0.85, -1.0, r(50.0, 150.0)),
                AnchorPoint::directed(1.0, 0.0, Up, r(25.0, 50.0), r(25.0, 75.0), r(50.0, 125.0)),
            ],
        ),
        LandscapeShape::new(
            "mountain",
            700.0,
            350.0,
            1.0,
            vec![
                AnchorPoint::directed(0.5, 1.0, Up, r(25.0, 75.0), r(50.0, 150.0), r(25.0, 100.0)),
                AnchorPoint::directed(1.0, 0.0, Down, r(25.0, 75.0), r(50.0, 150.0), r(25.0, 100.0)),
            ],
        ),
        LandscapeShape::new(
            "valley",
            600.0,
            200.0,
            1.5,
            vec![
                AnchorPoint::directed(0.35, -1.0, Down, r(25.0, 75.0), r(50.0, 125.0), r(25.0, 50.0)),
                AnchorPoint::horizontal(0.65, -1.0, r(50.0, 150.0)),
                AnchorPoint::directed(1.0, 0.0, Up, r(25.0, 75.0), r(50.0, 125.0), r(25.0, 50.0)),
            ],
        ),
        LandscapeShape::new(
            "plateau",
            600.0,
            200.0,
            1.0,
            vec![
                AnchorPoint::directed(0.2, 1.0, Up, r(25.0, 50.0), r(25.0, 75.0), r(50.0, 125.0)),
                AnchorPoint::horizontal(0.8, 1.0, r(100.0, 250.0)),
                AnchorPoint::directed(1.0, 0.0, Down, r(25.0, 50.0), r(25.0, 75.0), r(50.0, 150.0)),
            ],
        ),
        LandscapeShape::new(
            "quarry",
            500.0,
            250.0,
            0.5,
            vec![
                AnchorPoint::directed(0.1, -1.0, Down, r(25.0, 50.0), r(25.0, 50.0), r(100.0, 200.0)),
                AnchorPoint::horizontal(0.9, -1.0, r(50.0, 200.0)),
                AnchorPoint::directed(1.0, 0.0, Up, r(25.0, 50.0), r(25.0, 75.0), r(50.0, 125.0)),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_valid() {
        let shapes = default_landscapes();
        assert_eq!(shapes.len(), 7);
        for shape in &shapes {
            shape.validate(25.0).unwrap();
        }
    }

    #[test]
    fn inverted_range_is_unreachable() {
        let mut shape = default_landscapes().remove(1);
        shape.anchors[0].slope = Some(LengthRange::new(100.0, 50.0));
        match shape.validate(25.0) {
            Err(GenerationError::UnreachableAnchor { landscape, anchor, .. }) => {
                assert_eq!(landscape, "hill");
                assert_eq!(anchor, 0);
            }
            other => panic!("expected UnreachableAnchor, got {other:?}"),
        }
    }

    #[test]
    fn range_below_one_tile_is_unreachable() {
        let shape = LandscapeShape::new(
            "tiny",
            100.0,
            0.0,
            1.0,
            vec![AnchorPoint::horizontal(1.0, 0.0, LengthRange::new(5.0, 10.0))],
        );
        assert!(matches!(
            shape.validate(25.0),
            Err(GenerationError::UnreachableAnchor { .. })
        ));
    }

    #[test]
    fn directed_anchor_must_move_horizontally() {
        let shape = LandscapeShape::new(
            "cliff",
            100.0,
            100.0,
            1.0,
            vec![AnchorPoint::directed(
                0.0,
                1.0,
                YDirection::Up,
                LengthRange::new(25.0, 50.0),
                LengthRange::new(25.0, 50.0),
                LengthRange::new(25.0, 50.0),
            )],
        );
        assert!(matches!(
            shape.validate(25.0),
            Err(GenerationError::UnreachableAnchor { .. })
        ));
    }

    #[test]
    fn direction_must_match_rise() {
        let mut shape = default_landscapes().remove(1);
        shape.anchors[0].direction = Some(YDirection::Down);
        assert!(shape.validate(25.0).is_err());
    }

    #[test]
    fn anchor_count_is_bounded() {
        let mut shape = default_landscapes().remove(0);
        shape.anchors.clear();
        assert!(matches!(
            shape.validate(25.0),
            Err(GenerationError::InvalidConfig(_))
        ));
    }
}
