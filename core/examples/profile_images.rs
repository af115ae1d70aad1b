// Generates and saves one PNG per seed for a 1600×600 profile

use landscape_core::{Bounds, LandscapeGenerator, Point, save_profile_png};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() {
    let (width, height) = (1600usize, 600usize);
    let generator = LandscapeGenerator::default();

    for seed in [1u64, 42, 2025] {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let bounds = Bounds::new(width as f64, height as f64);
        let segments = match generator.generate(bounds, &mut rng) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("seed {seed}: {e}");
                continue;
            }
        };
        let filename = format!("landscape_{seed}.png");
        match save_profile_png(&filename, Point::ORIGIN, &segments, width, height) {
            Ok(()) => println!("Saved {filename}"),
            Err(e) => eprintln!("could not save {filename}: {e}"),
        }
    }
}
