use log::{debug, trace};
use rand::Rng;

use crate::config::GeneratorConfig;
use crate::error::{GenerationError, Result};
use crate::landscape::LandscapeShape;
use crate::segment::{AvailableSpace, FOOTER, HEADER, Point, Segment, TileType, YDirection};
use crate::selection::pick_landscape;

// Extra body segments allowed on top of the width-derived cap
const SEGMENT_CAP_SLACK: usize = 16;

/// Box the profile is generated in.
///
/// Screen space: `x` runs right from 0 to `max_width`, `y` runs down from 0
/// to `max_height`, which is also the lower bound the footer drops to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub max_width: f64,
    pub max_height: f64,
    pub start: Point,
}

impl Bounds {
    pub fn new(max_width: f64, max_height: f64) -> Self {
        Self {
            max_width,
            max_height,
            start: Point::ORIGIN,
        }
    }

    pub fn with_start(mut self, start: Point) -> Self {
        self.start = start;
        self
    }

    fn validate(&self) -> Result<()> {
        let positive = |v: f64| v > 0.0 && v.is_finite();
        let inside = (0.0..self.max_width).contains(&self.start.x)
            && (0.0..=self.max_height).contains(&self.start.y);
        if positive(self.max_width) && positive(self.max_height) && inside {
            Ok(())
        } else {
            Err(GenerationError::InvalidBounds {
                max_width: self.max_width,
                max_height: self.max_height,
            })
        }
    }
}

/// Stitches landscape shapes into a left-to-right terrain profile.
///
/// The generator only holds immutable configuration; every call to
/// [`LandscapeGenerator::generate`] works on its own state, so one generator
/// can serve many threads as long as each brings its own RNG.
#[derive(Debug, Clone, Default)]
pub struct LandscapeGenerator {
    config: GeneratorConfig,
}

impl LandscapeGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the segment sequence for `bounds`.
    ///
    /// Output always opens with a wall onto the baseline and a short landing
    /// flat, and closes with a flat to the right edge and a wall down to the
    /// lower bound. On error nothing is returned.
    pub fn generate<R: Rng + ?Sized>(&self, bounds: Bounds, rng: &mut R) -> Result<Vec<Segment>> {
        bounds.validate()?;

        let mut state = GeneratorState::new(&self.config, &bounds);
        state.header();

        for round in 0..self.config.body_landscape_count {
            let space = state.available();
            if space.ahead <= self.config.tile_size {
                debug!(
                    "horizontal budget exhausted after {} of {} landscapes",
                    round, self.config.body_landscape_count
                );
                break;
            }
            let shape = pick_landscape(
                &self.config.landscapes,
                state.previous_landscape,
                &space,
                &self.config.penalties,
                rng,
            )?;
            debug!(
                "landscape {}: '{}' at ({:.1}, {:.1})",
                round, shape.name, state.cursor.x, state.cursor.y
            );
            state.landscape(shape, rng)?;
        }

        state.footer();
        debug!(
            "generated {} segments for {}x{}",
            state.segments.len(),
            bounds.max_width,
            bounds.max_height
        );
        Ok(state.segments)
    }
}

// Everything one generation run mutates
struct GeneratorState<'a> {
    config: &'a GeneratorConfig,
    max_width: f64,
    max_height: f64,
    baseline_y: f64,
    cursor: Point,
    previous_tile: TileType,
    previous_landscape: Option<&'a str>,
    segments: Vec<Segment>,
    body_segments: usize,
    segment_cap: usize,
}

impl<'a> GeneratorState<'a> {
    fn new(config: &'a GeneratorConfig, bounds: &Bounds) -> Self {
        // float-to-int casts saturate, so a huge width just yields a huge cap
        let tiles_across = (bounds.max_width / config.tile_size).ceil() as usize;
        Self {
            config,
            max_width: bounds.max_width,
            max_height: bounds.max_height,
            baseline_y: bounds.max_height * config.baseline_fraction,
            cursor: bounds.start,
            previous_tile: TileType::Flat,
            previous_landscape: None,
            segments: Vec::new(),
            body_segments: 0,
            segment_cap: tiles_across
                .saturating_mul(2)
                .saturating_add(SEGMENT_CAP_SLACK),
        }
    }

    fn available(&self) -> AvailableSpace {
        AvailableSpace {
            ahead: self.max_width - self.cursor.x,
            up: self.cursor.y,
            down: self.max_height - self.cursor.y,
        }
    }

    fn push(&mut self, tile_type: TileType, length: f64, y_direction: YDirection, landscape: &str) {
        self.cursor = self.cursor.advanced(tile_type, length, y_direction);
        self.previous_tile = tile_type;
        let segment = Segment {
            tile_type,
            length,
            y_direction,
            linked_landscape: landscape.to_string(),
            end: self.cursor,
            space: self.available(),
            to_baseline: self.baseline_y - self.cursor.y,
        };
        trace!("{segment:?}");
        self.segments.push(segment);
    }

    // Wall onto the baseline, then a landing flat
    fn header(&mut self) {
        let gap = self.baseline_y - self.cursor.y;
        let direction = if gap < 0.0 { YDirection::Up } else { YDirection::Down };
        self.push(TileType::Wall, gap.abs(), direction, HEADER);

        let landing = self.available().ahead * self.config.landing_fraction;
        self.push(TileType::Flat, landing, YDirection::None, HEADER);
    }

    // Flat to the right edge, then a wall down to the lower bound
    fn footer(&mut self) {
        let ahead = self.available().ahead;
        self.push(TileType::Flat, ahead, YDirection::None, FOOTER);
        let down = self.available().down;
        self.push(TileType::Wall, down, YDirection::Down, FOOTER);
    }

    fn landscape<R: Rng + ?Sized>(&mut self, shape: &'a LandscapeShape, rng: &mut R) -> Result<()> {
        let origin = self.cursor;
        for index in 0..shape.anchors.len() {
            self.segment_series(shape, index, origin, rng)?;
        }
        self.previous_landscape = Some(shape.name.as_str());
        Ok(())
    }

    // Walk the cursor toward one anchor until either axis is within a tile
    fn segment_series<R: Rng + ?Sized>(
        &mut self,
        shape: &LandscapeShape,
        index: usize,
        origin: Point,
        rng: &mut R,
    ) -> Result<()> {
        let anchor = &shape.anchors[index];
        let tile = self.config.tile_size;
        // one tile stays in reserve on the right and at the bottom for the footer
        let target = Point::new(
            (origin.x + anchor.x * shape.width).min(self.max_width - tile),
            (origin.y - anchor.rise * shape.height)
                .min(self.max_height - tile)
                .max(0.0),
        );

        loop {
            let remaining_x = target.x - self.cursor.x;
            // distance still to cover in the forced direction; negative once passed
            let remaining_y = match anchor.direction {
                Some(YDirection::Up) => self.cursor.y - target.y,
                Some(YDirection::Down) => target.y - self.cursor.y,
                _ => f64::INFINITY,
            };
            if remaining_x <= tile || remaining_y <= tile {
                return Ok(());
            }

            self.body_segments += 1;
            if self.body_segments > self.segment_cap {
                return Err(GenerationError::UnreachableAnchor {
                    landscape: shape.name.clone(),
                    anchor: index,
                    reason: format!("no convergence within {} segments", self.segment_cap),
                });
            }

            let (tile_type, direction) = match anchor.direction {
                Some(direction) => {
                    let options = self.previous_tile.successors();
                    let tile_type = options[rng.gen_range(0..options.len())];
                    let direction = if tile_type == TileType::Flat {
                        YDirection::None
                    } else {
                        direction
                    };
                    (tile_type, direction)
                }
                None => (TileType::Flat, YDirection::None),
            };

            let range = anchor
                .range(tile_type)
                .ok_or_else(|| GenerationError::UnreachableAnchor {
                    landscape: shape.name.clone(),
                    anchor: index,
                    reason: format!("no {tile_type:?} range"),
                })?;
            let governing = match tile_type {
                TileType::Flat => remaining_x,
                TileType::Wall => remaining_y,
                TileType::Slope => remaining_x.min(remaining_y),
            };
            let mut length = range.sample(rng).min(governing).max(tile);
            if tile_type == TileType::Wall && direction == YDirection::Up {
                length = length.min(self.config.max_wall_climb);
            }

            // far from the origin a tile can fall below float resolution
            if self.cursor.advanced(tile_type, length, direction) == self.cursor {
                debug!("'{}' anchor {} stalled at x {}", shape.name, index, self.cursor.x);
                return Ok(());
            }
            self.push(tile_type, length, direction, &shape.name);
        }
    }
}
