use landscape_core::{Bounds, LandscapeGenerator};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() {
    // Generate a 2000×600 profile with seed 2025
    let generator = LandscapeGenerator::default();
    let mut rng = ChaCha8Rng::seed_from_u64(2025);
    let segments = match generator.generate(Bounds::new(2000.0, 600.0), &mut rng) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("generation failed: {e}");
            return;
        }
    };

    // Print one line per segment
    for s in &segments {
        println!(
            "{:<9} {:<6?} {:>7.1} {:<5?} -> ({:>7.1}, {:>6.1})",
            s.linked_landscape, s.tile_type, s.length, s.y_direction, s.end.x, s.end.y
        );
    }
}
