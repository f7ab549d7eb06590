//! Renderer and scene lifecycle
//!
//! ```text
//! Renderer ──begin_scene(surface)──> Scene ──submit*──> Scene::end ──> SceneStats
//!     ^                                                                   │
//!     └──────────────────────── probe(x, y) ──────────────────────────────┘
//! ```
//!
//! Every submission runs the whole per-element pipeline immediately:
//!
//! 1. ambient lights (object space)
//! 2. world transform
//! 3. directional lights (world space)
//! 4. view transform
//! 5. back-face cull, culled copies are dropped on the spot
//! 6. eye lights (view space)
//! 7. projection
//! 8. device transform
//! 9. append to the submission buffer
//!
//! [`Scene::end`] sorts the buffer back to front and draws it.

use mini3d_core::{Color, DrawSurface, Size};

use crate::element::{Element, LightingContext};
use crate::error::RenderError;
use crate::lights::{Light, LightKind, LightRig};
use crate::math::{Mat4, Vec3, RIGHT_HANDED};
use crate::settings::RendererSettings;

/// Submission records reserved up front
const INITIAL_SUBMISSION_CAPACITY: usize = 64;

/// Per-scene counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Element copies that entered the pipeline
    pub submitted: usize,
    /// Copies dropped by back-face culling
    pub culled: usize,
    /// Copies drawn by [`Scene::end`]
    pub drawn: usize,
}

/// A renderer-owned element copy and its sort depth
#[derive(Debug)]
pub struct Submission {
    element: Box<dyn Element>,
    depth: f32,
}

impl Submission {
    pub fn element(&self) -> &dyn Element {
        self.element.as_ref()
    }

    /// Mean device-space Z, valid once the scene has ended
    pub fn depth(&self) -> f32 {
        self.depth
    }
}

/// Immediate-mode software renderer
#[derive(Debug)]
pub struct Renderer {
    world: Mat4,
    view: Mat4,
    projection: Mat4,
    device: Mat4,
    view_reference: Vec3,
    cull_vector: Vec3,
    lights: LightRig,
    background: Color,
    specular: bool,
    backface_culling: bool,
    width: u32,
    height: u32,
    submissions: Vec<Submission>,
    scene_complete: bool,
    stats: SceneStats,
}

impl Renderer {
    /// Renderer for a `width` x `height` viewport with identity world, view
    /// and projection matrices and every light off
    pub fn new(width: u32, height: u32) -> Self {
        let mut renderer = Self {
            world: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            device: Mat4::IDENTITY,
            view_reference: Vec3::ZERO,
            cull_vector: default_cull_vector(),
            lights: LightRig::new(),
            background: Color::BLACK,
            specular: false,
            backface_culling: true,
            width: 0,
            height: 0,
            submissions: Vec::with_capacity(INITIAL_SUBMISSION_CAPACITY),
            scene_complete: false,
            stats: SceneStats::default(),
        };
        renderer.resize(width, height);
        renderer
    }

    /// Renderer configured from settings
    ///
    /// Light entries with an out-of-range slot are logged and skipped.
    pub fn from_settings(settings: &RendererSettings) -> Self {
        let mut renderer = Self::new(settings.width, settings.height);
        renderer.set_background(Color::from_array(settings.background));
        renderer.set_specular(settings.specular);
        renderer.set_backface_culling(settings.backface_culling);

        let camera = &settings.camera;
        renderer.set_view(
            Vec3::from_array(camera.eye),
            Vec3::from_array(camera.target),
            Vec3::from_array(camera.up),
        );
        renderer.set_perspective(camera.near, camera.far, camera.fov_degrees.to_radians());

        for light in &settings.lights {
            renderer.set_light(
                light.slot,
                light.kind,
                Vec3::from_array(light.direction),
                Color::from_array(light.color),
            );
        }
        renderer
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lights
    // ─────────────────────────────────────────────────────────────────────────

    /// Configure light slot `n` (1 through 8)
    ///
    /// An invalid slot is logged and leaves the rig unchanged.
    pub fn set_light(&mut self, n: usize, kind: LightKind, direction: Vec3, color: Color) {
        if let Err(err) = self.try_set_light(n, kind, direction, color) {
            tracing::warn!(slot = n, "ignoring light: {}", err);
        }
    }

    /// Configure light slot `n` (1 through 8)
    pub fn try_set_light(
        &mut self,
        n: usize,
        kind: LightKind,
        direction: Vec3,
        color: Color,
    ) -> Result<(), RenderError> {
        self.lights.set(n, Light::new(kind, direction, color))
    }

    pub fn light(&self, n: usize) -> Option<&Light> {
        self.lights.get(n)
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Camera & viewport
    // ─────────────────────────────────────────────────────────────────────────

    /// Resize the viewport and rebuild the device matrix
    ///
    /// The device transform scales by `(s, -s, s)` with `s` half the shorter
    /// side, then translates to `(width / 2, height / 2)`. The scale is
    /// uniform in magnitude only: Y is negated so device Y grows downward
    /// like the drawing surfaces, which also mirrors screen winding.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;

        let (w, h) = (width as f32, height as f32);
        let s = w.min(h) / 2.0;
        self.device = Mat4::from_rows([
            [s, 0.0, 0.0, w / 2.0],
            [0.0, -s, 0.0, h / 2.0],
            [0.0, 0.0, s, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    pub fn set_world(&mut self, world: Mat4) {
        self.world = world;
    }

    pub fn world(&self) -> &Mat4 {
        &self.world
    }

    /// Apply `rotation` after the current world transform
    pub fn rotate_world(&mut self, rotation: &Mat4) {
        self.world = rotation.mul(&self.world);
    }

    /// Place the camera at `eye` looking toward `target`
    pub fn set_view(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.view = Mat4::view(eye, target, up);
        self.view_reference = eye;
        self.cull_vector = self.view.transform_vector(eye - target).normalize();
    }

    /// Set the view matrix directly
    ///
    /// The eye position is recovered from the inverse; the cull vector goes
    /// back to the camera's own viewing axis.
    pub fn set_view_matrix(&mut self, view: Mat4) {
        self.view = view;
        self.view_reference = view.inverse().translation_part();
        self.cull_vector = default_cull_vector();
    }

    /// Perspective projection; `fov_y` in radians
    pub fn set_perspective(&mut self, near: f32, far: f32, fov_y: f32) {
        self.projection = Mat4::perspective(near, far, fov_y);
    }

    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    pub fn device(&self) -> &Mat4 {
        &self.device
    }

    /// World-space eye position
    pub fn view_reference(&self) -> Vec3 {
        self.view_reference
    }

    /// View-space direction toward the viewer used for back-face culling
    pub fn cull_vector(&self) -> Vec3 {
        self.cull_vector
    }

    /// Rotate the world by dragging a virtual trackball between two
    /// device-space pixel positions
    pub fn trackball_drag(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        let to_ndc = self.device.inverse();
        let p0 = to_ndc.transform_vertex(Vec3::new(x0, y0, 0.0));
        let p1 = to_ndc.transform_vertex(Vec3::new(x1, y1, 0.0));
        let rotation = Mat4::trackball(p0.x, p0.y, p1.x, p1.y);
        self.rotate_world(&rotation);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Flags
    // ─────────────────────────────────────────────────────────────────────────

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn specular(&self) -> bool {
        self.specular
    }

    pub fn set_specular(&mut self, enabled: bool) {
        self.specular = enabled;
    }

    pub fn backface_culling(&self) -> bool {
        self.backface_culling
    }

    pub fn set_backface_culling(&mut self, enabled: bool) {
        self.backface_culling = enabled;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scene
    // ─────────────────────────────────────────────────────────────────────────

    /// Start a scene drawing onto `surface`
    ///
    /// Drops every copy held from the previous scene.
    pub fn begin_scene<'r>(&'r mut self, surface: &'r mut dyn DrawSurface) -> Scene<'r> {
        self.submissions.clear();
        self.scene_complete = false;
        self.stats = SceneStats::default();
        Scene {
            renderer: self,
            surface,
        }
    }

    /// Pick id of the topmost drawn element under device-space `(x, y)`
    ///
    /// `None` when nothing was hit or no scene has completed since the last
    /// `begin_scene`.
    pub fn probe(&self, x: f32, y: f32) -> Option<u8> {
        if !self.scene_complete {
            return None;
        }
        self.submissions
            .iter()
            .rev()
            .map(|s| s.element.as_ref())
            .find(|e| e.tag().was_drawn() && e.hit_test(x, y))
            .map(|e| e.tag().id())
    }

    /// Submission records of the current or last scene, in draw order once
    /// the scene has ended
    pub fn submitted(&self) -> impl Iterator<Item = &Submission> {
        self.submissions.iter()
    }

    /// Counters of the current or last scene
    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    /// Whether the last scene was ended
    pub fn scene_complete(&self) -> bool {
        self.scene_complete
    }

    fn run_pipeline(&mut self, mut element: Box<dyn Element>) {
        self.stats.submitted += 1;

        for light in self.lights.of_kind(LightKind::Ambient) {
            element.light_ambient(light);
        }

        element.transform(&self.world);

        let world_ctx = LightingContext {
            eye: self.view_reference,
            specular: self.specular,
        };
        for light in self.lights.of_kind(LightKind::Directional) {
            element.light_directional(light, &world_ctx);
        }

        element.transform(&self.view);

        if self.backface_culling && !element.is_front_facing(self.cull_vector) {
            tracing::trace!(id = element.tag().id(), "culled back-facing element");
            self.stats.culled += 1;
            return;
        }

        let eye_ctx = LightingContext {
            eye: Vec3::ZERO,
            specular: self.specular,
        };
        for light in self.lights.of_kind(LightKind::Eye) {
            element.light_eye(light, &eye_ctx);
        }

        element.transform(&self.projection);
        element.transform(&self.device);

        self.submissions.push(Submission {
            element,
            depth: 0.0,
        });
    }

    fn finish(&mut self, surface: &mut dyn DrawSurface) -> SceneStats {
        for submission in &mut self.submissions {
            submission.depth = submission.element.sort_depth();
        }

        // Farthest first; the sort is stable so equal depths keep submit order
        if RIGHT_HANDED {
            self.submissions.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        } else {
            self.submissions.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        }

        for submission in &mut self.submissions {
            submission.element.draw(surface);
        }

        self.stats.drawn = self.submissions.len();
        self.scene_complete = true;

        tracing::debug!(
            submitted = self.stats.submitted,
            culled = self.stats.culled,
            drawn = self.stats.drawn,
            "scene complete"
        );
        self.stats
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

fn default_cull_vector() -> Vec3 {
    if RIGHT_HANDED {
        Vec3::Z
    } else {
        -Vec3::Z
    }
}

/// An open scene on a [`Renderer`]
///
/// Obtained from [`Renderer::begin_scene`]. Elements can only be submitted
/// while a scene is open, and [`Scene::end`] consumes it. Dropping a scene
/// without ending it draws nothing and leaves the renderer with no pickable
/// result.
pub struct Scene<'r> {
    renderer: &'r mut Renderer,
    surface: &'r mut dyn DrawSurface,
}

impl std::fmt::Debug for Scene<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("stats", &self.renderer.stats)
            .finish_non_exhaustive()
    }
}

impl<'r> Scene<'r> {
    /// Submit an element under its own pick id and color
    pub fn submit(&mut self, element: &dyn Element) {
        let id = element.tag().id();
        element.submit(self, None, id);
    }

    /// Submit an element with an optional color override and pick id
    pub fn submit_with(&mut self, element: &dyn Element, color: Option<Color>, id: u8) {
        element.submit(self, color, id);
    }

    /// Run a renderer-owned copy through the pipeline
    ///
    /// This is the entry point [`Element::submit`] implementations use.
    pub fn submit_owned(&mut self, element: Box<dyn Element>) {
        self.renderer.run_pipeline(element);
    }

    /// Renderer this scene belongs to
    pub fn renderer(&self) -> &Renderer {
        self.renderer
    }

    /// Sort, draw and close the scene
    pub fn end(self) -> SceneStats {
        let Scene { renderer, surface } = self;
        renderer.finish(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{FlatTriangle, Line, LitTriangle};
    use mini3d_core::RecordingSurface;

    fn triangle_at(z: f32, color: Color, id: u8) -> FlatTriangle {
        FlatTriangle::new(
            Vec3::new(-0.5, -0.5, z),
            Vec3::new(0.5, -0.5, z),
            Vec3::new(0.0, 0.5, z),
            color,
        )
        .with_id(id)
    }

    #[test]
    fn test_defaults() {
        let renderer = Renderer::new(400, 300);
        assert_eq!(renderer.world(), &Mat4::IDENTITY);
        assert_eq!(renderer.view(), &Mat4::IDENTITY);
        assert_eq!(renderer.projection(), &Mat4::IDENTITY);
        assert!(!renderer.specular());
        assert!(renderer.backface_culling());
        assert!(renderer.lights().iter().all(|l| l.kind() == LightKind::Off));
        assert_eq!(renderer.size(), Size::new(400.0, 300.0));
    }

    #[test]
    fn test_resize_centers_origin() {
        let mut renderer = Renderer::new(10, 10);
        renderer.resize(400, 300);
        let center = renderer.device().transform_vertex(Vec3::ZERO);
        assert_eq!(center, Vec3::new(200.0, 150.0, 0.0));

        // Shorter side spans [-1, 1]; Y grows downward
        let top = renderer.device().transform_vertex(Vec3::Y);
        assert_eq!(top, Vec3::new(200.0, 0.0, 0.0));
    }

    #[test]
    fn test_device_scale_negates_y_only() {
        let mut renderer = Renderer::new(10, 10);
        renderer.resize(640, 480);
        let rows = renderer.device().rows;
        assert_eq!(rows[0][0], 240.0);
        assert_eq!(rows[1][1], -240.0);
        assert_eq!(rows[2][2], 240.0);

        let p = renderer.device().transform_vertex(Vec3::new(0.5, 0.5, 0.5));
        assert_eq!(p, Vec3::new(440.0, 120.0, 120.0));
    }

    #[test]
    fn test_invalid_light_slot_is_ignored() {
        let mut renderer = Renderer::new(100, 100);
        let before = renderer.lights().clone();
        renderer.set_light(0, LightKind::Ambient, Vec3::ZERO, Color::WHITE);
        renderer.set_light(9, LightKind::Ambient, Vec3::ZERO, Color::WHITE);
        assert_eq!(renderer.lights(), &before);
        assert_eq!(
            renderer.try_set_light(12, LightKind::Eye, Vec3::Z, Color::WHITE),
            Err(RenderError::InvalidLightIndex(12))
        );
    }

    #[test]
    fn test_set_view_recomputes_cull_vector() {
        let mut renderer = Renderer::new(100, 100);
        renderer.set_view(Vec3::new(3.0, 0.0, 0.0), Vec3::ZERO, Vec3::Y);
        let cull = renderer.cull_vector();
        assert!((cull - default_cull_vector()).length() < 1e-5);
        assert_eq!(renderer.view_reference(), Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_set_view_matrix_recovers_eye() {
        let mut renderer = Renderer::new(100, 100);
        let eye = Vec3::new(1.0, 2.0, 5.0);
        renderer.set_view_matrix(Mat4::view(eye, Vec3::ZERO, Vec3::Y));
        assert!((renderer.view_reference() - eye).length() < 1e-4);
    }

    #[test]
    fn test_probe_before_any_scene() {
        let renderer = Renderer::new(100, 100);
        assert_eq!(renderer.probe(50.0, 50.0), None);
    }

    #[test]
    fn test_dropped_scene_is_not_pickable() {
        let mut renderer = Renderer::new(100, 100);
        let mut surface = RecordingSurface::default();
        {
            let mut scene = renderer.begin_scene(&mut surface);
            scene.submit(&triangle_at(0.0, Color::RED, 5));
        }
        assert!(!renderer.scene_complete());
        assert_eq!(renderer.probe(50.0, 50.0), None);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_scene_draws_far_to_near() {
        let mut renderer = Renderer::new(100, 100);
        let mut surface = RecordingSurface::default();
        let mut scene = renderer.begin_scene(&mut surface);
        scene.submit(&triangle_at(-0.5, Color::RED, 1));
        scene.submit(&triangle_at(0.5, Color::GREEN, 2));
        scene.submit(&triangle_at(0.0, Color::BLUE, 3));
        let stats = scene.end();
        assert_eq!(stats.drawn, 3);

        let depths: Vec<f32> = renderer.submitted().map(Submission::depth).collect();
        // The triangle drawn last is on top
        if RIGHT_HANDED {
            assert!(depths.windows(2).all(|w| w[0] >= w[1]));
            assert_eq!(renderer.probe(50.0, 50.0), Some(1));
        } else {
            assert!(depths.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(renderer.probe(50.0, 50.0), Some(2));
        }
    }

    #[test]
    fn test_backface_culling_drops_copies() {
        let mut renderer = Renderer::new(100, 100);
        let cull = default_cull_vector();
        let front = LitTriangle::new(Vec3::ZERO, Vec3::X, Vec3::Y, cull, Color::RED);
        let back = LitTriangle::new(Vec3::ZERO, Vec3::X, Vec3::Y, -cull, Color::RED);

        let mut surface = RecordingSurface::default();
        let mut scene = renderer.begin_scene(&mut surface);
        scene.submit(&front);
        scene.submit(&back);
        let stats = scene.end();
        assert_eq!(
            stats,
            SceneStats {
                submitted: 2,
                culled: 1,
                drawn: 1
            }
        );
        assert_eq!(surface.polygons().len(), 1);

        renderer.set_backface_culling(false);
        let mut surface = RecordingSurface::default();
        let mut scene = renderer.begin_scene(&mut surface);
        scene.submit(&front);
        scene.submit(&back);
        assert_eq!(scene.end().culled, 0);
    }

    #[test]
    fn test_submit_with_overrides_color_and_id() {
        let mut renderer = Renderer::new(100, 100);
        let mut surface = RecordingSurface::default();
        let line = Line::new(Vec3::ZERO, Vec3::X, Color::RED).with_segments(4);
        let mut scene = renderer.begin_scene(&mut surface);
        scene.submit_with(&line, Some(Color::YELLOW), 9);
        scene.end();

        assert_eq!(renderer.stats().drawn, 4);
        assert!(renderer
            .submitted()
            .all(|s| s.element().color() == Color::YELLOW && s.element().tag().id() == 9));
        assert_eq!(line.color(), Color::RED);
    }

    #[test]
    fn test_begin_scene_clears_previous_submissions() {
        let mut renderer = Renderer::new(100, 100);
        let mut surface = RecordingSurface::default();
        let mut scene = renderer.begin_scene(&mut surface);
        scene.submit(&triangle_at(0.0, Color::RED, 1));
        scene.end();
        assert_eq!(renderer.submitted().count(), 1);

        let scene = renderer.begin_scene(&mut surface);
        drop(scene);
        assert_eq!(renderer.submitted().count(), 0);
        assert_eq!(renderer.stats(), SceneStats::default());
    }

    #[test]
    fn test_trackball_drag_rotates_world() {
        let mut renderer = Renderer::new(200, 200);
        renderer.trackball_drag(100.0, 100.0, 100.0, 100.0);
        assert_eq!(renderer.world(), &Mat4::IDENTITY);

        // Drag to the right: the axis facing the viewer swings right
        renderer.trackball_drag(100.0, 100.0, 130.0, 100.0);
        let z = renderer.world().transform_vector(Vec3::Z);
        if RIGHT_HANDED {
            assert!(z.x > 0.0);
        } else {
            assert!(z.x < 0.0);
        }
        assert!(z.y.abs() < 1e-5);
        assert!((z.length() - 1.0).abs() < 1e-4);
    }
}
