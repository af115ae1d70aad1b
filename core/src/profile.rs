// Rasterising a segment sequence into per-column surface heights and RGB images
use std::path::Path;

use palette::{Gradient, LinSrgb};

use crate::segment::{Point, Segment};


// Polyline of the profile: the start point followed by every segment end
pub fn outline(start: Point, segments: &[Segment]) -> Vec<Point> {
    std::iter::once(start)
        .chain(segments.iter().map(|s| s.end))
        .collect()
}

/// Surface `y` under the centre of each of `width` pixel columns.
///
/// Walls have no horizontal extent, so a column sees the surface on the
/// flat or slope that covers it.
pub fn surface_columns(start: Point, segments: &[Segment], width: usize) -> Vec<f32> {
    let points = outline(start, segments);
    let mut columns = Vec::with_capacity(width);
    let mut edge = 0;

    for c in 0..width {
        let x = c as f64 + 0.5;
        // skip edges (including walls) that end left of this column
        while edge + 1 < points.len() && points[edge + 1].x < x {
            edge += 1;
        }
        let y = match points.get(edge + 1) {
            Some(b) => {
                let a = points[edge];
                if b.x > a.x {
                    let t = ((x - a.x) / (b.x - a.x)).clamp(0.0, 1.0);
                    a.y + (b.y - a.y) * t
                } else {
                    b.y
                }
            }
            None => points[edge].y,
        };
        columns.push(y as f32);
    }
    columns
}

// Top of the image to the bottom
fn sky() -> Gradient<LinSrgb> {
    Gradient::new(vec![
        LinSrgb::new(0.43, 0.63, 0.90),
        LinSrgb::new(0.78, 0.88, 0.98),
    ])
}

fn to_rgb8(col: LinSrgb) -> [u8; 3] {
    let c = col.into_format::<u8>();
    [c.red, c.green, c.blue]
}

/// Row-major RGB buffer of `columns.len()` × `height` pixels.
///
/// Sky above the surface, ground below it shaded by depth: grass at the
/// surface, then dirt, rock and bedrock toward the bottom.
pub fn to_profile_image(columns: &[f32], height: usize) -> Vec<u8> {
    let ground = Gradient::with_domain(vec![
        (0.00, LinSrgb::new(0.10, 0.55, 0.15)), // grass
        (0.03, LinSrgb::new(0.35, 0.22, 0.10)), // dirt
        (0.40, LinSrgb::new(0.40, 0.38, 0.36)), // rock
        (1.00, LinSrgb::new(0.12, 0.11, 0.10)), // bedrock
    ]);
    let sky = sky();
    let depth_scale = height.max(1) as f32;

    let mut buf = Vec::with_capacity(columns.len() * height * 3);
    for y in 0..height {
        let fy = y as f32 + 0.5;
        for &surface in columns {
            let rgb = if fy < surface {
                to_rgb8(sky.get(fy / depth_scale))
            } else {
                let depth = ((fy - surface) / depth_scale).clamp(0.0, 1.0);
                to_rgb8(ground.get(depth))
            };
            buf.extend_from_slice(&rgb);
        }
    }
    buf
}

// Render the profile and write it out as a PNG
pub fn save_profile_png(
    path: impl AsRef<Path>,
    start: Point,
    segments: &[Segment],
    width: usize,
    height: usize,
) -> image::ImageResult<()> {
    let columns = surface_columns(start, segments, width);
    let buf = to_profile_image(&columns, height);
    image::save_buffer(
        path,
        &buf,
        width as u32,
        height as u32,
        image::ColorType::Rgb8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{AvailableSpace, TileType, YDirection};

    fn seg(from: Point, tile_type: TileType, length: f64, dir: YDirection) -> Segment {
        Segment {
            tile_type,
            length,
            y_direction: dir,
            linked_landscape: "test".into(),
            end: from.advanced(tile_type, length, dir),
            space: AvailableSpace::default(),
            to_baseline: 0.0,
        }
    }

    // wall down to 8, flat to x=4, slope up to (8, 4), flat to x=10
    fn sample() -> Vec<Segment> {
        let mut out = Vec::new();
        let mut at = Point::ORIGIN;
        for (t, len, dir) in [
            (TileType::Wall, 8.0, YDirection::Down),
            (TileType::Flat, 4.0, YDirection::None),
            (TileType::Slope, 4.0, YDirection::Up),
            (TileType::Flat, 2.0, YDirection::None),
        ] {
            let s = seg(at, t, len, dir);
            at = s.end;
            out.push(s);
        }
        out
    }

    #[test]
    fn outline_starts_at_start() {
        let pts = outline(Point::ORIGIN, &sample());
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[0], Point::ORIGIN);
        assert_eq!(pts[4], Point::new(10.0, 4.0));
    }

    #[test]
    fn columns_follow_flats_and_slopes() {
        let cols = surface_columns(Point::ORIGIN, &sample(), 10);
        assert_eq!(cols.len(), 10);
        // flat at y=8 under the first four columns
        assert!(cols[..4].iter().all(|&y| (y - 8.0).abs() < 1e-6));
        // slope rises one unit per column
        assert!((cols[4] - 7.5).abs() < 1e-6);
        assert!((cols[7] - 4.5).abs() < 1e-6);
        assert!((cols[9] - 4.0).abs() < 1e-6);
    }

    #[test]
    fn image_has_sky_over_ground() {
        let cols = surface_columns(Point::ORIGIN, &sample(), 10);
        let img = to_profile_image(&cols, 12);
        assert_eq!(img.len(), 10 * 12 * 3);
        let px = |x: usize, y: usize| &img[(y * 10 + x) * 3..(y * 10 + x) * 3 + 3];
        // top-left is sky, bottom-left is ground
        assert_eq!(px(0, 0), &to_rgb8(sky().get(0.5 / 12.0)));
        assert_ne!(px(0, 11), px(0, 0));
        // the sky lightens toward the horizon
        let (top, lower) = (px(9, 0), px(9, 3));
        assert!(lower[0] > top[0] && lower[2] >= top[2], "{top:?} vs {lower:?}");
    }
}
