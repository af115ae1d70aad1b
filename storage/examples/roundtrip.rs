use landscape_core::{Bounds, LandscapeGenerator};
use landscape_storage::LayoutStorage;
use landscape_storage::models::{LayoutDoc, LayoutParams};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[tokio::main]
async fn main() -> mongodb::error::Result<()> {
    // Generate a 2000×600 layout
    let seed = 2025;
    let generator = LandscapeGenerator::default();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let segments = match generator.generate(Bounds::new(2000.0, 600.0), &mut rng) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("generation failed: {e}");
            return Ok(());
        }
    };

    // Build the document
    let layout = LayoutDoc {
        id: None,
        name: format!("demo-{seed}"),
        seed: seed as i64,
        params: LayoutParams {
            max_width: 2000.0,
            max_height: 600.0,
            start_x: 0.0,
            start_y: 0.0,
            tile_size: generator.config().tile_size,
            body_landscape_count: generator.config().body_landscape_count,
        },
        segments,
    };

    // Init storage
    let storage = LayoutStorage::init("mongodb://localhost:27017", "landscape_db", "layouts").await?;

    // Insert & read back
    storage.create(layout).await?;
    if let Some(found) = storage.read_by_seed(seed as i64).await? {
        println!("Round-trip success: {} segments", found.segments.len());
    } else {
        println!("Document not found!");
    }

    // Clean up
    storage.delete_by_seed(seed as i64).await?;

    Ok(())
}
