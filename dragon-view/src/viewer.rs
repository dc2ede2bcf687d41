//! Interactive dragon fractal viewer built with eframe/egui.
//!
//! [`Viewer`] owns the [`Scene`] and implements [`eframe::App`]: it turns
//! pointer clicks into zoom events, lets the scene decide when a render pass
//! is due, and replays the scene's display list with egui every frame.

use dragon_core::{
    config::Config,
    display_list::DrawCommand,
    scene::Scene,
    surface::Sprite,
    view::InputEvent,
};
use eframe::App;
use glam::Vec2;
use rand::rng;
use std::time::Duration;

use crate::sprites::SpriteLoader;

const BACKGROUND: egui::Color32 = egui::Color32::WHITE;
const LINK_STROKE: egui::Stroke = egui::Stroke {
    width: 1.0,
    color: egui::Color32::DARK_GRAY,
};

/// Main application state for the viewer.
///
/// ### Fields
/// - `scene` - The generated fractal, zoom state and redraw scheduling.
/// - `rng` - Random source used when the fractal is regenerated.
/// - `sprites` - Background sprite loader and uploaded textures.
/// - `shapes` - egui shapes of the last render pass.
pub struct Viewer {
    scene: Scene,
    rng: rand::rngs::ThreadRng,
    sprites: SpriteLoader,
    shapes: ShapeCache,
}

/// What the cached shapes were built from.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ShapeKey {
    pass: u64,
    rect: egui::Rect,
    textures: usize,
}

/// Shapes of one render pass, rebuilt only when the pass, the canvas rect or
/// the set of uploaded textures changes. Repaints in between (pointer moves,
/// loader wake-ups) reuse them.
#[derive(Default)]
struct ShapeCache {
    key: Option<ShapeKey>,
    shapes: Vec<egui::Shape>,
    builds: u64,
}

impl ShapeCache {
    fn get_or_build(
        &mut self,
        key: ShapeKey,
        build: impl FnOnce() -> Vec<egui::Shape>,
    ) -> &[egui::Shape] {
        if self.key != Some(key) {
            self.shapes = build();
            self.key = Some(key);
            self.builds += 1;
        }
        &self.shapes
    }
}

/// Uniform fit of the logical canvas inside a screen rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasMapping {
    origin: egui::Pos2,
    scale: f32,
}

impl CanvasMapping {
    /// Largest centered placement of `canvas` that fits in `rect`.
    pub fn fit(rect: egui::Rect, canvas: Vec2) -> Self {
        let scale = (rect.width() / canvas.x).min(rect.height() / canvas.y).max(0.0);
        let used = egui::vec2(canvas.x, canvas.y) * scale;
        Self {
            origin: rect.center() - used * 0.5,
            scale,
        }
    }

    #[inline]
    pub fn to_screen(&self, p: Vec2) -> egui::Pos2 {
        self.origin + egui::vec2(p.x, p.y) * self.scale
    }

    pub fn rect(&self, min: Vec2, size: Vec2) -> egui::Rect {
        egui::Rect::from_min_max(self.to_screen(min), self.to_screen(min + size))
    }
}

/// Builds a textured quad for a recorded sprite blit.
fn sprite_mesh(texture: egui::TextureId, quad: &[Vec2; 4], map: &CanvasMapping) -> egui::Mesh {
    const UVS: [egui::Pos2; 4] = [
        egui::pos2(0.0, 0.0),
        egui::pos2(1.0, 0.0),
        egui::pos2(1.0, 1.0),
        egui::pos2(0.0, 1.0),
    ];

    let mut mesh = egui::Mesh::with_texture(texture);
    for (corner, uv) in quad.iter().zip(UVS) {
        mesh.vertices.push(egui::epaint::Vertex {
            pos: map.to_screen(*corner),
            uv,
            color: egui::Color32::WHITE,
        });
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    mesh
}

/// Converts recorded commands into egui shapes.
///
/// Image commands whose sprite has no texture yet produce nothing.
fn shapes_for(
    commands: &[DrawCommand],
    map: &CanvasMapping,
    texture: impl Fn(Sprite) -> Option<egui::TextureId>,
) -> Vec<egui::Shape> {
    commands
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::Clear { min, size } => Some(egui::Shape::rect_filled(
                map.rect(*min, *size),
                0.0,
                BACKGROUND,
            )),
            DrawCommand::Stroke { points } => Some(egui::Shape::line(
                points.iter().map(|&p| map.to_screen(p)).collect(),
                LINK_STROKE,
            )),
            DrawCommand::Image { sprite, quad } => {
                texture(*sprite).map(|t| egui::Shape::mesh(sprite_mesh(t, quad, map)))
            }
        })
        .collect()
}

impl Viewer {
    /// Generates the fractal from `config` and starts loading sprites.
    pub fn new(ctx: &egui::Context, config: Config) -> Self {
        let mut rng = rng();
        let sprites = SpriteLoader::spawn(ctx, &config.sprites);
        let scene = Scene::new(config, &mut rng);
        tracing::info!(
            dragons = scene.levels().len(),
            depth = scene.levels().depth(),
            "dragon fractal ready"
        );

        Self {
            scene,
            rng,
            sprites,
            shapes: ShapeCache::default(),
        }
    }

    fn handle(&mut self, event: InputEvent) {
        self.scene.handle_input(event, &mut self.rng);
    }

    /// Builds the top panel (zoom and regenerate controls).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Zoom in").clicked() {
                    self.handle(InputEvent::Primary);
                }
                if ui.button("Zoom out").clicked() {
                    self.handle(InputEvent::Secondary);
                }
                if ui.button("Regenerate").clicked() {
                    self.handle(InputEvent::Reset);
                }
                ui.separator();
                ui.label("left click: zoom in · right click: zoom out · R: regenerate");
            });
        });
    }

    /// Builds the bottom status bar.
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("passes = {}", self.scene.passes()));
                ui.label(format!("dragons = {}", self.scene.levels().len()));
                ui.label(format!("zoom = {}", self.scene.view().zoom));
                if self.sprites.failed() > 0 {
                    ui.separator();
                    ui.label(format!("missing sprites = {}", self.sprites.failed()));
                }
            });
        });
    }

    /// Builds the central panel where the fractal is drawn and clicked.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // No context menu is attached, so right clicks only zoom out.
            if response.clicked() {
                self.handle(InputEvent::Primary);
            }
            if response.secondary_clicked() {
                self.handle(InputEvent::Secondary);
            }
            if ctx.input(|i| i.key_pressed(egui::Key::R)) {
                self.handle(InputEvent::Reset);
            }

            let now = ctx.input(|i| i.time);
            self.scene.frame(now);

            let map = CanvasMapping::fit(rect, self.scene.config().canvas_size);
            let key = ShapeKey {
                pass: self.scene.passes(),
                rect,
                textures: self.sprites.loaded(),
            };
            let (scene, sprites) = (&self.scene, &self.sprites);
            let shapes = self.shapes.get_or_build(key, || {
                shapes_for(scene.display_list().commands(), &map, |s| sprites.texture(s))
            });
            painter.extend(shapes.iter().cloned());

            if self.sprites.is_loading() {
                painter.text(
                    map.to_screen(Vec2::new(0.0, 100.0)),
                    egui::Align2::LEFT_BOTTOM,
                    "loading..",
                    egui::FontId::proportional(50.0 * map.scale),
                    egui::Color32::BLACK,
                );
            }

            let wait = self.scene.time_until_next(now);
            ctx.request_repaint_after(Duration::from_secs_f64(wait));
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sprites.poll(ctx);
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);
    }
}
