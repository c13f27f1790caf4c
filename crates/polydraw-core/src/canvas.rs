//! Canvas state and input routing.

use crate::config::ShapeConfigBuilder;
use crate::error::{InteractionError, InteractionResult, SettingsResult};
use crate::events::{EventHub, PointerKind};
use crate::host::SceneHost;
use crate::input::{KeyEvent, PointerEvent};
use crate::object::{SceneContext, SceneObject};
use crate::settings::CanvasSettings;
use crate::shapes::ShapeId;
use crate::surface::RenderingSurface;
use crate::tools::PolygonCaptureTool;
use crate::viewport::Viewport;
use kurbo::{Point, Vec2};

/// Owns the collaborators, the scene objects and the capture tool, and
/// routes pointer and keyboard input between them.
pub struct Canvas<S, V, H> {
    surface: S,
    viewport: V,
    host: H,
    events: EventHub,
    settings: CanvasSettings,
    /// Scene objects, back to front.
    objects: Vec<SceneObject>,
    tool: PolygonCaptureTool,
    /// Last screen position of an active viewport pan.
    pan_anchor: Option<Point>,
}

impl<S, V, H> Canvas<S, V, H>
where
    S: RenderingSurface,
    V: Viewport,
    H: SceneHost,
{
    /// Create a canvas after validating the settings.
    pub fn new(surface: S, viewport: V, host: H, settings: CanvasSettings) -> SettingsResult<Self> {
        settings.validate()?;
        Ok(Self {
            surface,
            viewport,
            host,
            events: EventHub::new(),
            settings,
            objects: Vec::new(),
            tool: PolygonCaptureTool::new(),
            pan_anchor: None,
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn events(&self) -> &EventHub {
        &self.events
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn tool(&self) -> &PolygonCaptureTool {
        &self.tool
    }

    /// Scene objects, back to front.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, id: ShapeId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn is_capturing(&self) -> bool {
        self.tool.is_capturing()
    }

    /// Object currently being dragged, if any.
    pub fn dragging(&self) -> Option<ShapeId> {
        self.objects.iter().find(|o| o.is_dragging()).map(SceneObject::id)
    }

    /// Surface, viewport and every displayed object (back to front, capture
    /// visuals last) for composing a frame.
    pub fn frame(&mut self) -> (&mut S, &V, Vec<&SceneObject>) {
        let mut displayed: Vec<&SceneObject> = self.objects.iter().collect();
        if let Some(session) = self.tool.session() {
            displayed.extend(session.preview_lines());
            displayed.extend(session.markers());
        }
        (&mut self.surface, &self.viewport, displayed)
    }

    fn parts(&mut self) -> (SceneContext<'_>, &mut Vec<SceneObject>, &mut PolygonCaptureTool) {
        let ctx = SceneContext {
            surface: &mut self.surface,
            viewport: &mut self.viewport,
            host: &mut self.host,
            events: &mut self.events,
            settings: &self.settings,
        };
        (ctx, &mut self.objects, &mut self.tool)
    }

    /// Resolve a config against the canvas defaults and place it on top.
    pub fn add_object(&mut self, config: ShapeConfigBuilder) -> ShapeId {
        let config = config.resolve_with(self.settings.default_background);
        let (mut ctx, objects, _) = self.parts();
        let object = SceneObject::new(config, &mut ctx);
        let id = object.id();
        objects.push(object);
        id
    }

    /// Remove an object and release everything it holds.
    pub fn remove_object(&mut self, id: ShapeId) -> InteractionResult<()> {
        let (mut ctx, objects, _) = self.parts();
        let index = objects
            .iter()
            .position(|o| o.id() == id)
            .ok_or(InteractionError::UnknownObject(id))?;
        objects.remove(index).destroy(&mut ctx);
        Ok(())
    }

    /// Open a polygon capture session.
    ///
    /// Rejected while an object is being dragged.
    pub fn begin_draw(&mut self) -> InteractionResult<()> {
        if let Some(id) = self.dragging() {
            log::warn!("Cannot start capture while {} is dragged", id);
            return Err(InteractionError::DragInProgress(id));
        }
        self.pan_anchor = None;
        let (mut ctx, _, tool) = self.parts();
        tool.begin_draw(&mut ctx);
        Ok(())
    }

    /// Close the capture session, adding the polygon if one was produced.
    pub fn end_draw(&mut self) -> Option<ShapeId> {
        let (mut ctx, objects, tool) = self.parts();
        let polygon = tool.end_draw(&mut ctx)?;
        let id = polygon.id();
        objects.push(polygon);
        Some(id)
    }

    /// Abort the capture session. Returns false when none was open.
    pub fn cancel_draw(&mut self) -> bool {
        let (mut ctx, _, tool) = self.parts();
        tool.cancel(&mut ctx)
    }

    /// Start dragging an object from a screen position.
    pub fn grab(&mut self, id: ShapeId, screen_point: Point) -> InteractionResult<()> {
        if self.tool.is_capturing() {
            return Err(InteractionError::CaptureInProgress);
        }
        if let Some(other) = self.dragging() {
            return Err(InteractionError::DragInProgress(other));
        }

        let world = self.viewport.to_world(screen_point);
        let (mut ctx, objects, _) = self.parts();
        let object = objects
            .iter_mut()
            .find(|o| o.id() == id)
            .ok_or(InteractionError::UnknownObject(id))?;
        object.pointer_down(&mut ctx, world);
        Ok(())
    }

    /// Route a pointer event.
    ///
    /// Returns the id of a polygon completed by this event.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Option<ShapeId> {
        let Some(kind) = event.kind() else {
            if let PointerEvent::Scroll { position, delta } = event {
                self.zoom(*position, *delta);
            }
            return None;
        };

        if self.tool.is_capturing() {
            return self.route_to_tool(event);
        }

        let screen = event.position();
        let world = self.viewport.to_world(screen);
        match kind {
            PointerKind::Down => self.pointer_down(screen, world),
            PointerKind::Move => self.pointer_move(screen, world),
            PointerKind::Up => self.pointer_up(world),
            PointerKind::UpOutside => self.pointer_up_outside(),
        }
        None
    }

    /// Route a keyboard event. Returns true when it was consumed.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        let (mut ctx, _, tool) = self.parts();
        tool.key_event(&mut ctx, event)
    }

    fn route_to_tool(&mut self, event: &PointerEvent) -> Option<ShapeId> {
        let (mut ctx, objects, tool) = self.parts();
        match event {
            PointerEvent::Move { position } => {
                tool.pointer_move(&mut ctx, *position);
                None
            }
            PointerEvent::Down { .. } => {
                let polygon = tool.pointer_down(&mut ctx)?;
                let id = polygon.id();
                objects.push(polygon);
                Some(id)
            }
            _ => None,
        }
    }

    fn pointer_down(&mut self, screen: Point, world: Point) {
        let target = self
            .objects
            .iter()
            .rev()
            .find(|o| self.events.is_subscribed(o.id(), PointerKind::Down) && o.hit_test(world))
            .map(SceneObject::id);

        match target {
            Some(id) => {
                if let Err(err) = self.grab(id, screen) {
                    log::warn!("Ignoring pointer down: {}", err);
                }
            }
            None if self.viewport.is_drag_enabled() => self.pan_anchor = Some(screen),
            None => {}
        }
    }

    fn pointer_move(&mut self, screen: Point, world: Point) {
        let targets = self.events.targets(PointerKind::Move);
        for object in self.objects.iter_mut().filter(|o| targets.contains(&o.id())) {
            object.pointer_move(world);
        }

        if let Some(anchor) = self.pan_anchor {
            let delta: Vec2 = screen - anchor;
            if self.viewport.pan(delta) {
                self.pan_anchor = Some(screen);
            }
        }
    }

    fn pointer_up(&mut self, world: Point) {
        self.pan_anchor = None;
        let up = self.events.targets(PointerKind::Up);
        let up_outside = self.events.targets(PointerKind::UpOutside);

        let (mut ctx, objects, _) = self.parts();
        for object in objects.iter_mut().filter(|o| o.is_dragging()) {
            if object.hit_test(world) {
                if up.contains(&object.id()) {
                    object.pointer_up(&mut ctx);
                }
            } else if up_outside.contains(&object.id()) {
                object.pointer_up_outside(&mut ctx);
            }
        }
    }

    fn pointer_up_outside(&mut self) {
        self.pan_anchor = None;
        let targets = self.events.targets(PointerKind::UpOutside);

        let (mut ctx, objects, _) = self.parts();
        for object in objects.iter_mut().filter(|o| targets.contains(&o.id())) {
            object.pointer_up_outside(&mut ctx);
        }
    }

    fn zoom(&mut self, screen: Point, delta: Vec2) {
        let factor = if delta.y < 0.0 {
            self.settings.zoom_step
        } else if delta.y > 0.0 {
            1.0 / self.settings.zoom_step
        } else {
            return;
        };

        if self.viewport.zoom_at(screen, factor) {
            log::debug!("Zoom changed to {:.2}", self.viewport.zoom_scale());
            self.refresh_visuals();
        }
    }

    /// Regenerate every visual, including the working capture visuals.
    pub fn refresh_visuals(&mut self) {
        let (mut ctx, objects, tool) = self.parts();
        for object in objects.iter_mut() {
            object.update_visual(&mut ctx);
        }
        tool.refresh_visuals(&mut ctx);
    }
}
