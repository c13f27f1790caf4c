//! Point-by-point polygon capture.

use crate::config::ShapeConfig;
use crate::geometry::min_corner;
use crate::input::KeyEvent;
use crate::object::{SceneContext, SceneObject};
use crate::shapes::Shape;
use crate::snap::snap_capture_cursor;
use kurbo::Point;

/// Working state of an open capture.
///
/// Holds one preview segment per committed point; the last one trails from
/// the newest point to the cursor.
#[derive(Debug, Default)]
pub struct CaptureSession {
    points: Vec<Point>,
    markers: Vec<SceneObject>,
    lines: Vec<SceneObject>,
    cursor: Option<Point>,
}

impl CaptureSession {
    /// Committed points in world coordinates.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Effective (snapped) cursor, if the pointer has moved yet.
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn markers(&self) -> &[SceneObject] {
        &self.markers
    }

    pub fn preview_lines(&self) -> &[SceneObject] {
        &self.lines
    }

    fn discard(self, ctx: &mut SceneContext) {
        for object in self.markers.into_iter().chain(self.lines) {
            object.destroy(ctx);
        }
    }
}

/// Tool collecting polygon corners from pointer clicks.
#[derive(Debug, Default)]
pub struct PolygonCaptureTool {
    session: Option<CaptureSession>,
    modifier_active: bool,
}

impl PolygonCaptureTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_capturing(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&CaptureSession> {
        self.session.as_ref()
    }

    /// Whether the axis-constraint modifier is held.
    pub fn modifier_active(&self) -> bool {
        self.modifier_active
    }

    /// Open a new capture session, discarding any session already open.
    pub fn begin_draw(&mut self, ctx: &mut SceneContext) {
        if let Some(previous) = self.session.take() {
            log::debug!("Restarting capture with {} points", previous.points.len());
            previous.discard(ctx);
        }
        ctx.viewport.pause_drag();
        self.session = Some(CaptureSession::default());
        log::debug!("Polygon capture started");
    }

    /// Track the pointer and stretch the trailing segment to the snapped cursor.
    pub fn pointer_move(&mut self, ctx: &mut SceneContext, screen_point: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let raw = ctx.viewport.to_world(screen_point);
        let cursor = snap_capture_cursor(
            raw,
            &session.points,
            ctx.settings.closing_snap_radius,
            self.modifier_active,
        )
        .point;
        session.cursor = Some(cursor);

        if let Some(trailing) = session.lines.last_mut() {
            set_segment_end(trailing, cursor, false, ctx);
        }
    }

    /// Commit the cursor as a corner.
    ///
    /// Returns the finished polygon when the click closes the outline.
    pub fn pointer_down(&mut self, ctx: &mut SceneContext) -> Option<SceneObject> {
        let session = self.session.as_mut()?;
        let Some(cursor) = session.cursor else {
            log::debug!("Ignoring click before the pointer moved");
            return None;
        };

        let marker = ShapeConfig::circle(ctx.settings.marker_radius)
            .origin(cursor)
            .interactive(false)
            .resolve_with(ctx.settings.default_background);
        session.markers.push(SceneObject::new(marker, ctx));
        session.points.push(cursor);

        if let Some(trailing) = session.lines.last_mut() {
            set_segment_end(trailing, cursor, true, ctx);
        }
        let segment = ShapeConfig::line(cursor, cursor).resolve_with(ctx.settings.default_background);
        session.lines.push(SceneObject::new(segment, ctx));
        log::debug!("Committed point {} at {:?}", session.points.len(), cursor);

        let closed = session.points.len() > 2 && session.points.first() == session.points.last();
        if closed {
            let session = self.session.take()?;
            return Some(Self::finish(session, ctx));
        }
        None
    }

    /// Close the capture explicitly.
    ///
    /// With fewer than three committed points the session is cancelled and no
    /// polygon is produced.
    pub fn end_draw(&mut self, ctx: &mut SceneContext) -> Option<SceneObject> {
        let Some(session) = self.session.take() else {
            log::warn!("end_draw called without an open capture");
            return None;
        };

        if session.points.len() < 3 {
            log::debug!("Too few points ({}), cancelling capture", session.points.len());
            session.discard(ctx);
            ctx.viewport.resume_drag();
            return None;
        }
        Some(Self::finish(session, ctx))
    }

    /// Abort the open session. Returns false when nothing was open.
    pub fn cancel(&mut self, ctx: &mut SceneContext) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        session.discard(ctx);
        ctx.viewport.resume_drag();
        log::debug!("Polygon capture cancelled");
        true
    }

    /// Track the constraint modifier and cancel on the cancel key.
    ///
    /// Returns true when the event was consumed.
    pub fn key_event(&mut self, ctx: &mut SceneContext, event: &KeyEvent) -> bool {
        if event.key() == ctx.settings.constraint_key {
            self.modifier_active = matches!(event, KeyEvent::Pressed(_));
            return self.is_capturing();
        }
        if event.key() == ctx.settings.cancel_key && matches!(event, KeyEvent::Pressed(_)) {
            return self.cancel(ctx);
        }
        false
    }

    /// Regenerate the visuals of the working markers and segments.
    pub fn refresh_visuals(&mut self, ctx: &mut SceneContext) {
        if let Some(session) = self.session.as_mut() {
            for object in session.markers.iter_mut().chain(session.lines.iter_mut()) {
                object.update_visual(ctx);
            }
        }
    }

    fn finish(session: CaptureSession, ctx: &mut SceneContext) -> SceneObject {
        let mut points = session.points.clone();
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }

        let offset = min_corner(&points).unwrap_or(Point::ZERO);
        let local = points.iter().map(|p| (*p - offset).to_point()).collect();
        let config = ShapeConfig::polygon(local)
            .origin(offset)
            .resolve_with(ctx.settings.default_background);
        let polygon = SceneObject::new(config, ctx);

        ctx.viewport.resume_drag();
        session.discard(ctx);
        log::info!("Captured polygon {} with {} corners", polygon.id(), points.len());
        polygon
    }
}

fn set_segment_end(segment: &mut SceneObject, to: Point, labeled: bool, ctx: &mut SceneContext) {
    if let Shape::Line(line) = segment.shape_mut() {
        line.to = to;
        line.label = labeled;
    }
    segment.update_visual(ctx);
}
