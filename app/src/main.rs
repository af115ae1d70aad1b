use std::time::Instant;

use eframe::{App, Frame, NativeOptions, egui, run_native};
use egui::{ColorImage, TextureHandle};
use landscape_core::{
    Bounds, GeneratorConfig, LandscapeGenerator, Point, Segment, surface_columns,
    to_profile_image,
};
use landscape_storage::models::{LayoutDoc, LayoutParams};
use landscape_storage::{LayoutStorage, StorageError};
use log::{error, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const MONGO_URI: &str = "mongodb://localhost:27017";
const DB_NAME: &str = "landscape_db";
const COLLECTION: &str = "layouts";

struct LandscapeApp {
    // parameters
    seed: u64,
    width: u32,
    height: u32,
    // start height as a fraction of the box, 0 = top
    start_fraction: f64,
    body_count: u32,
    config: GeneratorConfig,
    config_source: String,
    layout_name: String,

    // last generated layout
    segments: Vec<Segment>,
    bounds: Option<Bounds>,
    last_rgb: Option<Vec<u8>>,
    texture: Option<TextureHandle>,

    // timing & status
    last_duration: Option<f32>,
    status_message: String,
}

impl Default for LandscapeApp {
    fn default() -> Self {
        let config = GeneratorConfig::default();
        Self {
            seed: 2025,
            width: 2000,
            height: 600,
            start_fraction: 0.0,
            body_count: config.body_landscape_count,
            config,
            config_source: "built-in".into(),
            layout_name: "level-1".into(),
            segments: Vec::new(),
            bounds: None,
            last_rgb: None,
            texture: None,
            last_duration: None,
            status_message: String::new(),
        }
    }
}

fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

impl LandscapeApp {
    fn generate(&mut self, ctx: &egui::Context) {
        let start = Instant::now();
        let config = GeneratorConfig {
            body_landscape_count: self.body_count,
            ..self.config.clone()
        };
        let generator = match LandscapeGenerator::new(config) {
            Ok(g) => g,
            Err(e) => {
                self.status_message = format!("Config error: {e}");
                return;
            }
        };

        let (w, h) = (self.width as f64, self.height as f64);
        let bounds = Bounds::new(w, h).with_start(Point::new(0.0, h * self.start_fraction));
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        match generator.generate(bounds, &mut rng) {
            Ok(segments) => {
                self.show_layout(ctx, segments, bounds);
                self.last_duration = Some(start.elapsed().as_secs_f32() * 1000.0);
                self.status_message = format!(
                    "Generated {} segments in {:.2} ms (seed {})",
                    self.segments.len(),
                    self.last_duration.unwrap_or_default(),
                    self.seed
                );
                info!("{}", self.status_message);
            }
            Err(e) => {
                error!("generation failed: {e}");
                self.status_message = format!("Generation failed: {e}");
            }
        }
    }

    // Rasterise the layout and upload it as a texture
    fn show_layout(&mut self, ctx: &egui::Context, segments: Vec<Segment>, bounds: Bounds) {
        let (w, h) = (bounds.max_width as usize, bounds.max_height as usize);
        let columns = surface_columns(bounds.start, &segments, w);
        let rgb = to_profile_image(&columns, h);
        let color_image = ColorImage::from_rgb([w, h], &rgb);
        self.texture =
            Some(ctx.load_texture("landscape", color_image, egui::TextureOptions::NEAREST));
        self.last_rgb = Some(rgb);
        self.segments = segments;
        self.bounds = Some(bounds);
        ctx.request_repaint();
    }

    fn save_png(&mut self) {
        let (Some(rgb), Some(bounds)) = (&self.last_rgb, self.bounds) else {
            self.status_message = "Nothing to save yet".into();
            return;
        };
        let filename = format!("landscape_{}.png", self.seed);
        self.status_message = match image::save_buffer(
            &filename,
            rgb,
            bounds.max_width as u32,
            bounds.max_height as u32,
            image::ColorType::Rgb8,
        ) {
            Ok(()) => format!("Saved {filename}"),
            Err(e) => format!("PNG error: {e}"),
        };
    }

    fn current_layout(&self) -> Option<LayoutDoc> {
        let bounds = self.bounds?;
        Some(LayoutDoc {
            id: None,
            name: self.layout_name.clone(),
            seed: self.seed as i64,
            params: LayoutParams {
                max_width: bounds.max_width,
                max_height: bounds.max_height,
                start_x: bounds.start.x,
                start_y: bounds.start.y,
                tile_size: self.config.tile_size,
                body_landscape_count: self.body_count,
            },
            segments: self.segments.clone(),
        })
    }

    fn save_to_db(&mut self) {
        let Some(layout) = self.current_layout() else {
            self.status_message = "Generate a layout first".into();
            return;
        };
        let rt = match runtime() {
            Ok(rt) => rt,
            Err(e) => {
                self.status_message = format!("Runtime error: {e}");
                return;
            }
        };
        let result = rt.block_on(async {
            let storage = LayoutStorage::init(MONGO_URI, DB_NAME, COLLECTION).await?;
            storage.create(layout).await?;
            Ok::<_, StorageError>(())
        });
        self.status_message = match result {
            Ok(()) => format!("Saved '{}' to MongoDB", self.layout_name),
            Err(e) => {
                error!("save failed: {e}");
                format!("DB error: {e}")
            }
        };
    }

    fn load_from_db(&mut self, ctx: &egui::Context) {
        let rt = match runtime() {
            Ok(rt) => rt,
            Err(e) => {
                self.status_message = format!("Runtime error: {e}");
                return;
            }
        };
        let name = self.layout_name.clone();
        let result = rt.block_on(async {
            let storage = LayoutStorage::init(MONGO_URI, DB_NAME, COLLECTION).await?;
            let found = storage.read_by_name(&name).await?;
            Ok::<_, StorageError>(found)
        });
        match result {
            Ok(Some(layout)) => {
                let p = &layout.params;
                let bounds = Bounds::new(p.max_width, p.max_height)
                    .with_start(Point::new(p.start_x, p.start_y));
                self.seed = layout.seed as u64;
                self.width = p.max_width as u32;
                self.height = p.max_height as u32;
                self.body_count = p.body_landscape_count;
                self.show_layout(ctx, layout.segments, bounds);
                self.status_message = format!("Loaded '{name}' from MongoDB");
            }
            Ok(None) => self.status_message = format!("No layout named '{name}'"),
            Err(e) => {
                error!("load failed: {e}");
                self.status_message = format!("DB error: {e}");
            }
        }
    }

    fn load_config(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        else {
            return;
        };
        match GeneratorConfig::from_path(&path) {
            Ok(config) => {
                self.body_count = config.body_landscape_count;
                self.config = config;
                self.config_source = path.display().to_string();
                self.status_message = format!("Loaded config {}", self.config_source);
            }
            Err(e) => self.status_message = format!("Config error: {e}"),
        }
    }
}

impl App for LandscapeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.heading("Landscape Generator");
            ui.separator();

            ui.label("Seed");
            ui.add(egui::DragValue::new(&mut self.seed).speed(1.0));

            ui.label("Width");
            ui.add(egui::Slider::new(&mut self.width, 500..=6000).step_by(100.0));
            ui.label("Height");
            ui.add(egui::Slider::new(&mut self.height, 200..=1500).step_by(50.0));
            ui.label("Start height (fraction from top)");
            ui.add(egui::Slider::new(&mut self.start_fraction, 0.0..=1.0));
            ui.label("Landscapes");
            ui.add(egui::Slider::new(&mut self.body_count, 0..=20));

            ui.separator();
            ui.label(format!("Config: {}", self.config_source));
            if ui.button("Load config…").clicked() {
                self.load_config();
            }
            if ui.button("Reset config").clicked() {
                self.config = GeneratorConfig::default();
                self.config_source = "built-in".into();
                self.body_count = self.config.body_landscape_count;
            }

            ui.separator();

            if ui.button("Generate Landscape").clicked() {
                self.generate(ctx);
            }

            if ui.button("Save PNG…").clicked() {
                self.save_png();
            }

            ui.separator();
            ui.label("Layout name");
            ui.text_edit_singleline(&mut self.layout_name);
            if ui.button("Save to DB…").clicked() {
                self.save_to_db();
            }
            if ui.button("Load from DB…").clicked() {
                self.load_from_db(ctx);
            }

            ui.separator();
            ui.label(&self.status_message);
        });

        // central display
        egui::CentralPanel::default().show(ctx, |ui| {
            let (Some(tex), Some(bounds)) = (&self.texture, self.bounds) else {
                ui.centered_and_justified(|ui| {
                    ui.label("Click “Generate” to start");
                });
                return;
            };
            let avail = ui.available_width();
            let aspect = (bounds.max_height / bounds.max_width) as f32;
            ui.image((tex.id(), egui::vec2(avail, avail * aspect)));
            ui.separator();

            ui.label(format!("{} segments", self.segments.len()));
            egui::ScrollArea::vertical().show(ui, |ui| {
                for s in &self.segments {
                    ui.monospace(format!(
                        "{:<9} {:<6?} {:>7.1} {:<5?} -> ({:>7.1}, {:>6.1})",
                        s.linked_landscape, s.tile_type, s.length, s.y_direction, s.end.x, s.end.y
                    ));
                }
            });
        });
    }
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let opts = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 700.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    run_native(
        "Landscape Generator",
        opts,
        Box::new(|_cc| Ok(Box::new(LandscapeApp::default()))),
    )
}
