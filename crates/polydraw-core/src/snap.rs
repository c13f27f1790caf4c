//! Cursor snapping for polygon capture.

use kurbo::Point;

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Axis a constrained segment is locked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisLock {
    /// Segment runs along X; the cursor keeps the anchor's y.
    Horizontal,
    /// Segment runs along Y; the cursor keeps the anchor's x.
    Vertical,
}

/// Snap `cursor` onto `target` when it lies within `radius` (inclusive).
pub fn snap_to_origin(cursor: Point, target: Point, radius: f64) -> SnapResult {
    let dx = cursor.x - target.x;
    let dy = cursor.y - target.y;
    if dx * dx + dy * dy <= radius * radius {
        SnapResult {
            point: target,
            snapped_x: true,
            snapped_y: true,
        }
    } else {
        SnapResult::none(cursor)
    }
}

/// Pick the axis closest to the direction from `anchor` to `cursor`.
///
/// The direction angle is bucketed into quarter turns with a 45 degree
/// window on either side; buckets 0 and 2 lie along X, buckets 1 and 3
/// along Y.
pub fn axis_for(anchor: Point, cursor: Point) -> AxisLock {
    let angle = (cursor.y - anchor.y).atan2(cursor.x - anchor.x).to_degrees();
    let angle = angle.rem_euclid(360.0);
    let bucket = ((angle + 45.0) / 90.0).floor() as u32 % 4;
    if bucket % 2 == 0 {
        AxisLock::Horizontal
    } else {
        AxisLock::Vertical
    }
}

/// Constrain `cursor` to the horizontal or vertical line through `anchor`.
pub fn snap_to_axis(anchor: Point, cursor: Point) -> SnapResult {
    match axis_for(anchor, cursor) {
        AxisLock::Horizontal => SnapResult {
            point: Point::new(cursor.x, anchor.y),
            snapped_x: false,
            snapped_y: true,
        },
        AxisLock::Vertical => SnapResult {
            point: Point::new(anchor.x, cursor.y),
            snapped_x: true,
            snapped_y: false,
        },
    }
}

/// Resolve the effective capture cursor from the raw world cursor.
///
/// Closing onto the first committed point wins over the axis constraint;
/// neither applies before a point is committed.
pub fn snap_capture_cursor(
    raw: Point,
    committed: &[Point],
    closing_radius: f64,
    constrain: bool,
) -> SnapResult {
    let (Some(&first), Some(&last)) = (committed.first(), committed.last()) else {
        return SnapResult::none(raw);
    };

    let closing = snap_to_origin(raw, first, closing_radius);
    if closing.is_snapped() {
        return closing;
    }
    if constrain {
        return snap_to_axis(last, raw);
    }
    SnapResult::none(raw)
}
