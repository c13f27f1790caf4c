//! Draggable, texture-backed scene objects.

use crate::config::ShapeConfig;
use crate::events::{EventHub, PointerKind, Subscription};
use crate::geometry::{anchor_offset, HitArea};
use crate::host::{NodeId, SceneHost};
use crate::settings::CanvasSettings;
use crate::shapes::{Rgba, Shape, ShapeId};
use crate::surface::{RenderingSurface, TextStyle, TextureHandle};
use crate::viewport::Viewport;
use kurbo::{Affine, Point, Size, Vec2};

/// Collaborators a scene object needs while handling an event.
///
/// Built by the owner of the collaborators for the duration of one call.
pub struct SceneContext<'a> {
    pub surface: &'a mut dyn RenderingSurface,
    pub viewport: &'a mut dyn Viewport,
    pub host: &'a mut dyn SceneHost,
    pub events: &'a mut EventHub,
    pub settings: &'a CanvasSettings,
}

/// Text drawn over a visual.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Top-left corner in the visual's local frame.
    pub position: Point,
    pub size: Size,
    pub style: TextStyle,
}

/// Displayed state of a scene object.
#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    node: NodeId,
    position: Point,
    anchor: Vec2,
    alpha: f64,
    texture: Option<TextureHandle>,
    hit_area: HitArea,
    label: Option<Label>,
}

impl Visual {
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// World position of the anchor.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }

    pub fn hit_area(&self) -> &HitArea {
        &self.hit_area
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    /// Local-to-world transform of the texture, hit area and label.
    pub fn transform(&self) -> Affine {
        let bounds = self.texture.map(|t| t.bounds).unwrap_or_default();
        Affine::translate(self.position.to_vec2() - anchor_offset(bounds, self.anchor))
    }

    /// Map a world point into the local frame.
    pub fn world_to_local(&self, world_point: Point) -> Point {
        self.transform().inverse() * world_point
    }
}

/// Drag lifecycle of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// `offset` is the object position minus the pointer position at grab time.
    Dragging { offset: Vec2 },
}

/// A shape placed in the scene: configuration, visual and drag state.
#[derive(Debug)]
pub struct SceneObject {
    config: ShapeConfig,
    visual: Visual,
    drag: DragState,
    subscriptions: Vec<Subscription>,
}

impl SceneObject {
    /// Create the object, attach its node to the host, subscribe it to pointer
    /// events (when interactive) and render it once.
    pub fn new(config: ShapeConfig, ctx: &mut SceneContext) -> Self {
        let appearance = config.appearance(1.0);
        let visual = Visual {
            node: NodeId::new(),
            position: config.shape.placement(&appearance),
            anchor: config.shape.anchor(),
            alpha: 1.0,
            texture: None,
            hit_area: HitArea::Empty,
            label: None,
        };
        let subscriptions = if config.interactive {
            PointerKind::ALL
                .iter()
                .map(|&kind| ctx.events.subscribe(config.id, kind))
                .collect()
        } else {
            Vec::new()
        };
        ctx.host.add_child(visual.node);

        let mut object = Self {
            config,
            visual,
            drag: DragState::Idle,
            subscriptions,
        };
        object.update_visual(ctx);
        log::debug!("Created {} object {}", object.config.shape.kind(), object.id());
        object
    }

    pub fn id(&self) -> ShapeId {
        self.config.id
    }

    pub fn config(&self) -> &ShapeConfig {
        &self.config
    }

    /// Mutable access to the variant geometry. Call [`SceneObject::update_visual`]
    /// afterwards to make the change visible.
    pub fn shape_mut(&mut self) -> &mut Shape {
        &mut self.config.shape
    }

    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    pub fn position(&self) -> Point {
        self.visual.position
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn is_interactive(&self) -> bool {
        self.config.interactive
    }

    /// Number of live pointer subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Regenerate texture, hit area and label from the current config.
    ///
    /// Everything is computed before the visual is touched, so texture and
    /// hit area are always replaced together.
    pub fn update_visual(&mut self, ctx: &mut SceneContext) {
        let appearance = self.config.appearance(self.visual.alpha);
        let shape = &self.config.shape;

        let path = shape.texture_path(&appearance);
        let hit_area = shape.hit_area(&appearance);
        let position = shape.placement(&appearance);
        let texture = ctx.surface.generate_texture(&path);
        let label = shape.label().map(|text| {
            let style = TextStyle {
                font_size: ctx.settings.label_font_size,
                color: Rgba::from_hex(self.config.line_style.color),
            };
            let size = ctx.surface.measure_text(&text, &style);
            let center = texture.bounds.center();
            Label {
                text,
                position: Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
                size,
                style,
            }
        });

        let previous = self.visual.texture.replace(texture);
        self.visual.hit_area = hit_area;
        self.visual.position = position;
        self.visual.label = label;

        if let Some(previous) = previous {
            ctx.surface.release_texture(previous);
        }
    }

    /// Check whether a world point targets this object.
    pub fn hit_test(&self, world_point: Point) -> bool {
        self.config.interactive
            && self.visual.hit_area.contains(self.visual.world_to_local(world_point))
    }

    /// Grab the object at `world_point`. Ignored unless idle and interactive.
    pub fn pointer_down(&mut self, ctx: &mut SceneContext, world_point: Point) -> bool {
        if !self.config.interactive || self.is_dragging() {
            return false;
        }

        ctx.viewport.pause_drag();
        self.drag = DragState::Dragging {
            offset: self.visual.position - world_point,
        };
        self.visual.alpha = ctx.settings.drag_alpha;
        self.update_visual(ctx);
        log::debug!("Drag started on {}", self.id());
        true
    }

    /// Follow the pointer while dragging. Ignored when idle.
    pub fn pointer_move(&mut self, world_point: Point) -> bool {
        let DragState::Dragging { offset } = self.drag else {
            return false;
        };

        let target = world_point + offset;
        let delta = target - self.visual.position;
        self.visual.position = target;
        self.config.origin += delta;
        self.config.shape.translate(delta);
        true
    }

    /// Release the object. Ignored when idle.
    pub fn pointer_up(&mut self, ctx: &mut SceneContext) -> bool {
        if !self.is_dragging() {
            return false;
        }

        ctx.viewport.resume_drag();
        self.drag = DragState::Idle;
        self.visual.alpha = 1.0;
        self.update_visual(ctx);
        log::debug!("Drag ended on {} at {:?}", self.id(), self.visual.position);
        true
    }

    /// Release after the pointer left the object; same as [`SceneObject::pointer_up`].
    pub fn pointer_up_outside(&mut self, ctx: &mut SceneContext) -> bool {
        self.pointer_up(ctx)
    }

    /// Remove the object from the host, drop its subscriptions and release its
    /// texture.
    pub fn destroy(mut self, ctx: &mut SceneContext) {
        if self.is_dragging() {
            ctx.viewport.resume_drag();
        }
        for subscription in self.subscriptions.drain(..) {
            ctx.events.unsubscribe(subscription);
        }
        ctx.host.remove_child(self.visual.node);
        ctx.host.destroy(self.visual.node);
        if let Some(texture) = self.visual.texture.take() {
            ctx.surface.release_texture(texture);
        }
        self.visual.hit_area = HitArea::Empty;
        log::debug!("Destroyed object {}", self.config.id);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::host::SceneGraph;
    use crate::shapes::Line;
    use crate::surface::MemorySurface;
    use crate::viewport::CameraViewport;
    use kurbo::Rect;

    /// Viewport that counts pan gate transitions.
    #[derive(Default)]
    pub(crate) struct SpyViewport {
        pub inner: CameraViewport,
        pub pauses: usize,
        pub resumes: usize,
    }

    impl Viewport for SpyViewport {
        fn to_world(&self, p: Point) -> Point {
            self.inner.to_world(p)
        }
        fn to_screen(&self, p: Point) -> Point {
            self.inner.to_screen(p)
        }
        fn transform(&self) -> Affine {
            self.inner.transform()
        }
        fn pause_drag(&mut self) {
            self.pauses += 1;
            self.inner.pause_drag();
        }
        fn resume_drag(&mut self) {
            self.resumes += 1;
            self.inner.resume_drag();
        }
        fn is_drag_enabled(&self) -> bool {
            self.inner.is_drag_enabled()
        }
        fn pan(&mut self, delta: Vec2) -> bool {
            self.inner.pan(delta)
        }
        fn zoom_at(&mut self, p: Point, factor: f64) -> bool {
            self.inner.zoom_at(p, factor)
        }
        fn width(&self) -> f64 {
            self.inner.width()
        }
        fn height(&self) -> f64 {
            self.inner.height()
        }
        fn zoom_scale(&self) -> f64 {
            self.inner.zoom_scale()
        }
    }

    #[derive(Default)]
    pub(crate) struct Fixture {
        pub surface: MemorySurface,
        pub viewport: SpyViewport,
        pub host: SceneGraph,
        pub events: EventHub,
        pub settings: CanvasSettings,
    }

    impl Fixture {
        pub fn ctx(&mut self) -> SceneContext<'_> {
            SceneContext {
                surface: &mut self.surface,
                viewport: &mut self.viewport,
                host: &mut self.host,
                events: &mut self.events,
                settings: &self.settings,
            }
        }
    }

    fn square_config() -> ShapeConfig {
        ShapeConfig::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ])
        .origin(Point::new(10.0, 20.0))
        .resolve()
    }

    #[test]
    fn test_construct_renders_and_subscribes() {
        let mut fx = Fixture::default();
        let object = SceneObject::new(square_config(), &mut fx.ctx());

        assert!(object.visual().texture().is_some());
        assert_eq!(object.position(), Point::new(10.0, 20.0));
        assert_eq!(object.subscription_count(), 4);
        assert_eq!(fx.events.count_for(object.id()), 4);
        assert!(fx.host.contains(object.visual().node()));
        assert_eq!(fx.surface.live_textures(), 1);
    }

    #[test]
    fn test_hit_test_in_world_space() {
        let mut fx = Fixture::default();
        let object = SceneObject::new(square_config(), &mut fx.ctx());
        assert!(object.hit_test(Point::new(60.0, 70.0)));
        assert!(!object.hit_test(Point::new(5.0, 70.0)));
        assert!(!object.hit_test(Point::new(115.0, 70.0)));
    }

    #[test]
    fn test_update_visual_is_idempotent() {
        let mut fx = Fixture::default();
        let mut object = SceneObject::new(square_config(), &mut fx.ctx());

        object.update_visual(&mut fx.ctx());
        let first = object.visual().clone();
        let first_path = fx.surface.texture(first.texture().unwrap()).cloned();

        object.update_visual(&mut fx.ctx());
        let second = object.visual().clone();
        let second_path = fx.surface.texture(second.texture().unwrap()).cloned();

        assert_eq!(first_path, second_path);
        assert_eq!(first.texture().unwrap().bounds, second.texture().unwrap().bounds);
        assert_eq!(first.hit_area(), second.hit_area());
        assert_eq!(first.position(), second.position());
        // The replaced texture was released.
        assert_eq!(fx.surface.live_textures(), 1);
    }

    #[test]
    fn test_drag_follows_pointer_with_offset() {
        let mut fx = Fixture::default();
        let mut object = SceneObject::new(square_config(), &mut fx.ctx());
        let initial = object.position();
        let p0 = Point::new(50.0, 60.0);
        let p1 = Point::new(200.0, 150.0);

        assert!(object.pointer_down(&mut fx.ctx(), p0));
        assert!(!fx.viewport.is_drag_enabled());
        assert!(object.pointer_move(p1));
        assert!(!fx.viewport.is_drag_enabled());

        let expected = p1 + (initial - p0);
        assert_eq!(object.position(), expected);
        assert_eq!(object.config().origin, expected);

        assert!(object.pointer_up(&mut fx.ctx()));
        assert!(fx.viewport.is_drag_enabled());
        assert_eq!(fx.viewport.pauses, 1);
        assert_eq!(fx.viewport.resumes, 1);
        assert_eq!(object.position(), expected);
    }

    #[test]
    fn test_hit_area_follows_dragged_object() {
        let mut fx = Fixture::default();
        let mut object = SceneObject::new(square_config(), &mut fx.ctx());

        object.pointer_down(&mut fx.ctx(), Point::new(50.0, 50.0));
        object.pointer_move(Point::new(550.0, 50.0));
        object.pointer_up(&mut fx.ctx());

        assert!(object.hit_test(Point::new(560.0, 70.0)));
        assert!(!object.hit_test(Point::new(60.0, 70.0)));
    }

    #[test]
    fn test_drag_indicator() {
        let mut fx = Fixture::default();
        let mut object = SceneObject::new(square_config(), &mut fx.ctx());

        object.pointer_down(&mut fx.ctx(), Point::new(50.0, 50.0));
        let texture = object.visual().texture().unwrap();
        assert!((object.visual().alpha() - 0.5).abs() < f64::EPSILON);
        assert!((fx.surface.texture(texture).unwrap().alpha - 0.5).abs() < f64::EPSILON);

        object.pointer_up(&mut fx.ctx());
        let texture = object.visual().texture().unwrap();
        assert!((fx.surface.texture(texture).unwrap().alpha - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_move_and_up_ignored_when_idle() {
        let mut fx = Fixture::default();
        let mut object = SceneObject::new(square_config(), &mut fx.ctx());

        assert!(!object.pointer_move(Point::new(500.0, 500.0)));
        assert_eq!(object.position(), Point::new(10.0, 20.0));
        assert!(!object.pointer_up(&mut fx.ctx()));
        assert!(!object.pointer_up_outside(&mut fx.ctx()));
        assert_eq!(fx.viewport.resumes, 0);
    }

    #[test]
    fn test_second_pointer_down_ignored_while_dragging() {
        let mut fx = Fixture::default();
        let mut object = SceneObject::new(square_config(), &mut fx.ctx());

        assert!(object.pointer_down(&mut fx.ctx(), Point::new(50.0, 50.0)));
        assert!(!object.pointer_down(&mut fx.ctx(), Point::new(80.0, 80.0)));
        assert_eq!(object.drag_state(), DragState::Dragging { offset: Vec2::new(-40.0, -30.0) });
        assert_eq!(fx.viewport.pauses, 1);
    }

    #[test]
    fn test_up_outside_ends_drag() {
        let mut fx = Fixture::default();
        let mut object = SceneObject::new(square_config(), &mut fx.ctx());

        object.pointer_down(&mut fx.ctx(), Point::new(50.0, 50.0));
        assert!(object.pointer_up_outside(&mut fx.ctx()));
        assert!(!object.is_dragging());
        assert!(fx.viewport.is_drag_enabled());
    }

    #[test]
    fn test_destroy_releases_everything() {
        let mut fx = Fixture::default();
        let object = SceneObject::new(square_config(), &mut fx.ctx());
        let node = object.visual().node();

        object.destroy(&mut fx.ctx());
        assert!(fx.events.is_empty());
        assert!(!fx.host.contains(node));
        assert!(fx.host.is_destroyed(node));
        assert_eq!(fx.surface.live_textures(), 0);
    }

    #[test]
    fn test_destroy_mid_drag_restores_panning() {
        let mut fx = Fixture::default();
        let mut object = SceneObject::new(square_config(), &mut fx.ctx());
        object.pointer_down(&mut fx.ctx(), Point::new(50.0, 50.0));
        object.destroy(&mut fx.ctx());
        assert!(fx.viewport.is_drag_enabled());
    }

    #[test]
    fn test_empty_polygon_is_degenerate_not_fatal() {
        let mut fx = Fixture::default();
        let object = SceneObject::new(ShapeConfig::polygon(Vec::new()).resolve(), &mut fx.ctx());
        assert_eq!(object.visual().texture().unwrap().bounds, Rect::ZERO);
        assert!(object.visual().hit_area().is_empty());
        assert!(!object.hit_test(Point::ZERO));
    }

    #[test]
    fn test_circle_hit_area_at_origin() {
        let mut fx = Fixture::default();
        let config = ShapeConfig::circle(5.0).origin(Point::new(40.0, 40.0)).resolve();
        let object = SceneObject::new(config, &mut fx.ctx());
        assert!(object.hit_test(Point::new(40.0, 40.0)));
        assert!(object.hit_test(Point::new(43.0, 43.0)));
        assert!(!object.hit_test(Point::new(46.0, 40.0)));
    }

    #[test]
    fn test_line_is_not_draggable() {
        let mut fx = Fixture::default();
        let config = ShapeConfig::line(Point::new(0.0, 0.0), Point::new(100.0, 0.0)).resolve();
        let mut object = SceneObject::new(config, &mut fx.ctx());

        assert_eq!(object.subscription_count(), 0);
        assert!(!object.hit_test(Point::new(50.0, 0.0)));
        assert!(!object.pointer_down(&mut fx.ctx(), Point::new(50.0, 0.0)));
        assert!(fx.viewport.is_drag_enabled());
    }

    #[test]
    fn test_line_label_centered() {
        let mut fx = Fixture::default();
        let config = ShapeConfig::builder(Shape::Line(Line::labeled(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        )))
        .resolve();
        let object = SceneObject::new(config, &mut fx.ctx());

        let label = object.visual().label().unwrap();
        assert_eq!(label.text, "100.00");
        let center = Point::new(
            label.position.x + label.size.width / 2.0,
            label.position.y + label.size.height / 2.0,
        );
        let world_center = object.visual().transform() * center;
        assert!((world_center.x - 50.0).abs() < 1e-9);
        assert!(world_center.y.abs() < 1e-9);
    }

    #[test]
    fn test_line_endpoint_update_moves_visual() {
        let mut fx = Fixture::default();
        let config = ShapeConfig::line(Point::new(10.0, 10.0), Point::new(10.0, 10.0)).resolve();
        let mut object = SceneObject::new(config, &mut fx.ctx());

        if let Shape::Line(line) = object.shape_mut() {
            line.to = Point::new(0.0, 5.0);
        }
        object.update_visual(&mut fx.ctx());
        assert_eq!(object.position(), Point::new(0.0, 5.0));
    }
}
