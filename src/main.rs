//! SL Minimap Viewer.
//!
//! Eigenständiger Host für den Minimap-Compositor: lädt eine
//! Welt-Momentaufnahme (JSON) oder eine Demo-Welt und zeigt die
//! komponierte Minimap in einem egui-Fenster.

use std::path::PathBuf;
use std::time::Instant;

use eframe::egui;
use sl_minimap::{
    ui, FrameStats, MinimapCompositor, MinimapConfiguration, MinimapIntent, WorldSnapshot,
};

fn main() -> Result<(), eframe::Error> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> Result<(), eframe::Error> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("SL Minimap Viewer v{} startet...", env!("CARGO_PKG_VERSION"));

        let world = load_world(std::env::args_os().nth(1).map(PathBuf::from));

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([960.0, 720.0])
                .with_title("SL Minimap Viewer"),
            ..Default::default()
        };

        eframe::run_native(
            "SL Minimap Viewer",
            options,
            Box::new(|_cc| Ok(Box::new(ViewerApp::new(world)))),
        )
    }
}

/// Lädt die Welt aus dem übergebenen Pfad, sonst die Demo-Welt.
fn load_world(path: Option<PathBuf>) -> WorldSnapshot {
    let Some(path) = path else {
        log::info!("Kein Welt-Snapshot angegeben, verwende Demo-Welt");
        return WorldSnapshot::demo();
    };
    match WorldSnapshot::load_from_file(&path) {
        Ok(world) => world,
        Err(e) => {
            log::error!("{:#}; verwende Demo-Welt", e);
            WorldSnapshot::demo()
        }
    }
}

/// Haupt-Anwendungsstruktur
struct ViewerApp {
    world: WorldSnapshot,
    compositor: MinimapCompositor,
    input: ui::InputState,
    texture: Option<egui::TextureHandle>,
    last_stats: FrameStats,
}

impl ViewerApp {
    fn new(world: WorldSnapshot) -> Self {
        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = MinimapConfiguration::config_path();
        let config = MinimapConfiguration::load_from_file(&config_path);

        let mut compositor = MinimapCompositor::new(config, glam::Vec2::new(640.0, 640.0));
        compositor.set_camera(world.camera);

        Self {
            world,
            compositor,
            input: ui::InputState::new(),
            texture: None,
            last_stats: FrameStats::default(),
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events = Vec::new();
        events.extend(ui::collect_keyboard_intents(
            ctx,
            self.compositor.camera(),
            self.compositor.scale(),
        ));
        events.extend(ui::show_options_panel(ctx, self.compositor.configuration()));

        // Status-Bar vor dem CentralPanel, damit egui den Platz reserviert
        let hover = ctx
            .pointer_hover_pos()
            .zip(self.input_rect(ctx))
            .map(|(pos, rect)| ui::input::egui_to_minimap(pos, rect))
            .and_then(|pos| self.compositor.hit_test(&self.world, pos));
        ui::render_status_bar(ctx, &self.compositor, &self.last_stats, hover.as_ref());

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
                ctx.data_mut(|d| d.insert_temp(egui::Id::new("minimap_rect"), rect));

                events.extend(self.input.collect_viewport_events(ui, &response));
                let has_meaningful_events = events.iter().any(MinimapIntent::is_meaningful);
                self.process_events(std::mem::take(&mut events));

                self.last_stats = self.compositor.update(&self.world, Instant::now());
                self.upload_frame(ctx);

                if let Some(texture) = &self.texture {
                    ui.painter().image(
                        texture.id(),
                        rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }

                self.maybe_request_repaint(ctx, has_meaningful_events);
            });
    }
}

impl ViewerApp {
    /// Viewport-Rechteck des letzten Frames (für Hover-Abfragen).
    fn input_rect(&self, ctx: &egui::Context) -> Option<egui::Rect> {
        ctx.data(|d| d.get_temp(egui::Id::new("minimap_rect")))
    }

    fn process_events(&mut self, events: Vec<MinimapIntent>) {
        for event in events {
            self.compositor.handle_intent(event);
        }
    }

    /// Komponiert den Frame und lädt ihn als Textur hoch.
    fn upload_frame(&mut self, ctx: &egui::Context) {
        let frame = self.compositor.compose(&self.world);
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return;
        }
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [width as usize, height as usize],
            frame.as_raw(),
        );
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.texture =
                    Some(ctx.load_texture("minimap_frame", image, egui::TextureOptions::NEAREST));
            }
        }
    }

    fn maybe_request_repaint(&self, ctx: &egui::Context, has_meaningful_events: bool) {
        // Pan-Rückführung und Objekt-Takt brauchen laufende Frames
        let easing = self.compositor.view().is_easing();
        if has_meaningful_events || easing || ctx.input(|i| i.pointer.is_moving()) {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
