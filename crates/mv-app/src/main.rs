//! Demo application exercising the full map visualization pipeline

use std::sync::Arc;

use anyhow::Result;
use eframe::egui::{self, Color32, Context, RichText};
use parking_lot::RwLock;
use serde_json::json;
use tracing::info;

use mv_core::{BaseType, ColumnMeta, MapSettings, MapType, ResultSet, SemanticType};
use mv_render::RenderStyle;
use mv_views::{MapCallbacks, MapView};

/// State written by the view callbacks and read by the chrome panels.
#[derive(Default)]
struct ChromeState {
    hover_text: Option<String>,
    warnings: Vec<String>,
}

struct MapDemoApp {
    view: MapView,
    data: Arc<ResultSet>,
    settings: MapSettings,
    chrome: Arc<RwLock<ChromeState>>,
}

impl MapDemoApp {
    fn new() -> Self {
        let chrome: Arc<RwLock<ChromeState>> = Arc::default();

        let hover_chrome = Arc::clone(&chrome);
        let warning_chrome = Arc::clone(&chrome);
        let callbacks = MapCallbacks {
            on_hover: Box::new(move |payload| {
                hover_chrome.write().hover_text = payload.map(|p| {
                    p.dimensions
                        .iter()
                        .map(|d| format!("{}: {}", d.column.display_name, d.value))
                        .collect::<Vec<_>>()
                        .join("  |  ")
                });
            }),
            on_click: Box::new(|payload| {
                info!(pk = ?payload.primary_key_value, "map shape clicked");
            }),
            on_update_warnings: Box::new(move |warnings| {
                warning_chrome.write().warnings = warnings;
            }),
        };

        Self {
            view: MapView::new(RenderStyle::default(), callbacks),
            data: Arc::new(sample_result_set()),
            settings: MapSettings {
                polygon_column: Some("geometry".into()),
                latitude_column: Some("latitude".into()),
                longitude_column: Some("longitude".into()),
                metric_column: None,
                map_type: MapType::Pin,
            },
            chrome,
        }
    }
}

impl eframe::App for MapDemoApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Map Visualization Demo");
                ui.separator();

                let mut show_polygons = self.settings.polygon_column.is_some();
                if ui.checkbox(&mut show_polygons, "Polygons").changed() {
                    self.settings.polygon_column =
                        show_polygons.then(|| "geometry".to_string());
                }

                let mut show_pins = self.settings.latitude_column.is_some();
                if ui.checkbox(&mut show_pins, "Pins").changed() {
                    self.settings.latitude_column = show_pins.then(|| "latitude".to_string());
                    self.settings.longitude_column =
                        show_pins.then(|| "longitude".to_string());
                }
            });

            let warnings = self.chrome.read().warnings.clone();
            for warning in warnings {
                ui.label(RichText::new(warning).color(Color32::from_rgb(200, 140, 0)));
            }
        });

        egui::TopBottomPanel::bottom("hover").show(ctx, |ui| {
            match self.chrome.read().hover_text.clone() {
                Some(text) => ui.label(text),
                None => ui.label(RichText::new("Hover a shape for details").weak()),
            };
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.view.ui(ui, &self.data, &self.settings);
        });
    }
}

/// In-memory sample covering both polygon encodings, a malformed cell,
/// and a null coordinate that triggers the filter warning.
fn sample_result_set() -> ResultSet {
    ResultSet::new(
        vec![
            ColumnMeta::new("id", BaseType::Integer).with_semantic_type(SemanticType::PrimaryKey),
            ColumnMeta::new("name", BaseType::Text).with_display_name("Name"),
            ColumnMeta::new("geometry", BaseType::Text).with_display_name("Geometry"),
            ColumnMeta::new("latitude", BaseType::Float)
                .with_semantic_type(SemanticType::Latitude),
            ColumnMeta::new("longitude", BaseType::Float)
                .with_semantic_type(SemanticType::Longitude),
        ],
        vec![
            vec![
                json!(1),
                json!("Block A"),
                json!("[[[-122.51,37.70],[-122.35,37.70],[-122.35,37.83],[-122.51,37.83]]]"),
                json!(37.76),
                json!(-122.45),
            ],
            vec![
                json!(2),
                json!("Block B"),
                json!("POLYGON ((-122.30 37.80, -122.18 37.80, -122.18 37.90, -122.30 37.90))"),
                json!(37.85),
                json!(-122.24),
            ],
            vec![
                json!(3),
                json!("Bad geometry"),
                json!("not a polygon"),
                json!(37.60),
                json!(-122.40),
            ],
            vec![
                json!(4),
                json!("Missing latitude"),
                json!(null),
                json!(null),
                json!(-122.10),
            ],
            vec![
                json!(5),
                json!("Lone pin"),
                json!(null),
                json!(37.95),
                json!(-122.55),
            ],
        ],
    )
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting map visualization demo");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Map Visualization Demo",
        options,
        Box::new(|_cc| Box::new(MapDemoApp::new())),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
