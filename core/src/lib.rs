// core holds the landscape segment generator and profile rasterisation
pub mod config;
pub mod error;
pub mod generator;
pub mod landscape;
pub mod profile;
pub mod segment;
pub mod selection;

pub use config::{GeneratorConfig, SelectionPenalties};
pub use error::{GenerationError, Result};
pub use generator::{Bounds, LandscapeGenerator};
pub use landscape::{AnchorPoint, LandscapeShape, LengthRange, default_landscapes};
pub use profile::{outline, save_profile_png, surface_columns, to_profile_image};
pub use segment::{AvailableSpace, Point, Segment, TileType, YDirection};
