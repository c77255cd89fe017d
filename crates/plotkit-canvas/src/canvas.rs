//! The path construction engine.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use tracing::trace;

use plotkit_geometry::{flatten_cubic, flatten_quadratic, GeometryError, Point, TransformStack};

use crate::error::Result;
use crate::sink::DrawSink;

/// Default flattening density for quadratic/cubic curves.
pub const DEFAULT_CURVE_RESOLUTION: f64 = 2.0;

/// Default angular stepping density for arcs and ellipses.
pub const DEFAULT_ARC_RESOLUTION: f64 = 2.0;

/// Coincidence / collinearity threshold, matching the tangent-arc
/// construction.
const EPSILON: f64 = 1e-6;

/// A canvas-style path engine feeding one or more line-only drawing
/// sinks.
///
/// Every incoming coordinate is mapped through the composed transform
/// before it reaches a sink; curves and arcs are flattened into straight
/// segments first. A `Canvas` is a single mutable session object and is
/// not meant to be shared between callers.
pub struct Canvas {
    sinks: Vec<Box<dyn DrawSink>>,
    transforms: TransformStack,
    /// Start of the current subpath, device space.
    subpath_start: Option<Point>,
    /// Current point, device space.
    current: Option<Point>,
    /// Flattening density for Bezier curves. Higher means more segments.
    /// Changing it only affects subsequently issued curves.
    pub curve_resolution: f64,
    /// Stepping density for arcs and ellipses. Higher means finer steps.
    /// Changing it only affects subsequently issued arcs.
    pub arc_resolution: f64,
}

impl Canvas {
    /// Creates a canvas with a single attached sink.
    pub fn new(sink: Box<dyn DrawSink>) -> Self {
        Self::with_sinks(vec![sink])
    }

    /// Creates a canvas with a set of sinks, invoked in the given order.
    pub fn with_sinks(sinks: Vec<Box<dyn DrawSink>>) -> Self {
        Self {
            sinks,
            transforms: TransformStack::new(),
            subpath_start: None,
            current: None,
            curve_resolution: DEFAULT_CURVE_RESOLUTION,
            arc_resolution: DEFAULT_ARC_RESOLUTION,
        }
    }

    /// Attaches another sink after the existing ones.
    pub fn add_sink(&mut self, sink: Box<dyn DrawSink>) {
        self.sinks.push(sink);
    }

    /// Appends a rotation about `(cx, cy)` to the transform stack.
    /// Angle is in radians.
    pub fn rotate(&mut self, angle: f64, cx: f64, cy: f64) {
        self.transforms.rotate(angle, cx, cy);
    }

    /// Appends a scale operation to the transform stack.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.transforms.scale(sx, sy);
    }

    /// Appends a translation to the transform stack.
    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.transforms.translate(tx, ty);
    }

    /// Appends a raw matrix to the transform stack.
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.transforms.transform(a, b, c, d, e, f);
    }

    /// Resets the transform stack to the identity.
    pub fn reset_transform(&mut self) {
        self.transforms.reset();
    }

    /// Snapshots the current composed transform.
    pub fn save(&mut self) {
        self.transforms.save();
    }

    /// Restores the most recently saved transform snapshot.
    pub fn restore(&mut self) {
        self.transforms.restore();
    }

    /// Starts a new subpath at `(x, y)`.
    pub fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        let p = self.transforms.map_point(Point::new(x, y));
        self.subpath_start = Some(p);
        self.current = Some(p);
        self.forward_move(p)
    }

    /// Draws a straight segment to `(x, y)`.
    pub fn line_to(&mut self, x: f64, y: f64) -> Result<()> {
        let p = self.transforms.map_point(Point::new(x, y));
        self.current = Some(p);
        self.forward_line(p)
    }

    /// Closes the current subpath with a straight segment back to its
    /// start.
    ///
    /// A no-op when there is no current point, and when the pen is still
    /// at the subpath start (no zero-length close is emitted). The stored
    /// start is already in device space, so it is forwarded without
    /// re-mapping.
    pub fn close_path(&mut self) -> Result<()> {
        if let (Some(start), Some(current)) = (self.subpath_start, self.current) {
            if current == start {
                return Ok(());
            }
            self.current = Some(start);
            self.forward_line(start)?;
        }
        Ok(())
    }

    /// Draws a quadratic Bezier curve to `(x, y)` with control point
    /// `(cx, cy)`, flattened into straight segments.
    ///
    /// The start point is recovered by inverse-mapping the current point,
    /// so the control and target points must be expressed in the same
    /// pre-transform space as the rest of the path coordinates. Fails
    /// with a singular-transform error when the composed matrix cannot
    /// be inverted.
    pub fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) -> Result<()> {
        let start_device = self.current.unwrap_or(Point::ZERO);
        let start = self.transforms.unmap_point(start_device)?;
        let points = flatten_quadratic(
            start,
            Point::new(cx, cy),
            Point::new(x, y),
            self.curve_resolution,
        );
        for p in points {
            self.line_to(p.x, p.y)?;
        }
        Ok(())
    }

    /// Draws a cubic Bezier curve to `(x, y)` with control points
    /// `(c1x, c1y)` and `(c2x, c2y)`, flattened into straight segments.
    ///
    /// The curve starts at the tracked current point; the control and
    /// target points are taken in whatever space that point is already
    /// in. With no current point the device-space origin is used.
    pub fn bezier_curve_to(
        &mut self,
        c1x: f64,
        c1y: f64,
        c2x: f64,
        c2y: f64,
        x: f64,
        y: f64,
    ) -> Result<()> {
        let start = self.current.unwrap_or(Point::ZERO);
        let points = flatten_cubic(
            start,
            Point::new(c1x, c1y),
            Point::new(c2x, c2y),
            Point::new(x, y),
            self.curve_resolution,
        );
        for p in points {
            self.line_to(p.x, p.y)?;
        }
        Ok(())
    }

    /// Draws a circular arc centered at `(x, y)` with radius `r` from
    /// `start_angle` to `end_angle` (radians).
    pub fn arc(
        &mut self,
        x: f64,
        y: f64,
        r: f64,
        start_angle: f64,
        end_angle: f64,
        counterclockwise: bool,
    ) -> Result<()> {
        self.ellipse(x, y, r, r, 0.0, start_angle, end_angle, counterclockwise)
    }

    /// Draws an arc of radius `r` tangent to the segments from the
    /// current point to `(x1, y1)` and from `(x1, y1)` to `(x2, y2)`.
    ///
    /// Degenerate cases, in priority order: a negative radius is an
    /// error; with no current point this behaves as `move_to(x1, y1)`;
    /// when `(x1, y1)` coincides with the current point nothing is drawn;
    /// when the three points are collinear (or `r` is zero) this behaves
    /// as `line_to(x1, y1)`.
    pub fn arc_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, r: f64) -> Result<()> {
        if r < 0.0 {
            return Err(GeometryError::NegativeRadius { radius: r }.into());
        }

        let p0 = match self.current {
            Some(p) => p,
            None => return self.move_to(x1, y1),
        };

        let x21 = x2 - x1;
        let y21 = y2 - y1;
        let x01 = p0.x - x1;
        let y01 = p0.y - y1;
        let l01_sq = x01 * x01 + y01 * y01;

        // (x1, y1) coincident with the current point: nothing to draw.
        if l01_sq <= EPSILON {
            return Ok(());
        }

        // Collinear points, coincident (x1,y1)/(x2,y2), or zero radius:
        // degenerate to a straight segment.
        if (y01 * x21 - y21 * x01).abs() <= EPSILON || r == 0.0 {
            return self.line_to(x1, y1);
        }

        let x20 = x2 - p0.x;
        let y20 = y2 - p0.y;
        let l21_sq = x21 * x21 + y21 * y21;
        let l20_sq = x20 * x20 + y20 * y20;
        let l21 = l21_sq.sqrt();
        let l01 = l01_sq.sqrt();

        // Half-angle between the two segments via the law of cosines,
        // then the tangent length along each of them.
        let half = (PI - ((l21_sq + l01_sq - l20_sq) / (2.0 * l21 * l01)).acos()) / 2.0;
        let tangent = r * half.tan();
        let t01 = tangent / l01;
        let t21 = tangent / l21;

        // Connect to the first tangent point unless the pen is on it.
        if (t01 - 1.0).abs() > EPSILON {
            self.line_to(x1 + t01 * x01, y1 + t01 * y01)?;
        }
        let start = self.current.unwrap_or(p0);

        let x3 = x1 + t21 * x21;
        let y3 = y1 + t21 * y21;

        // Circle center: perpendicular offset from the chord midpoint.
        let chord = (x3 - start.x).hypot(y3 - start.y);
        let sweep = 2.0 * (chord / (2.0 * r)).min(1.0).asin();
        let mid_x = (start.x + x3) / 2.0;
        let mid_y = (start.y + y3) / 2.0;
        let offset = (r * r - (chord / 2.0) * (chord / 2.0)).max(0.0).sqrt();
        let base_x = offset * (y3 - start.y) / chord;
        let base_y = offset * (start.x - x3) / chord;

        let start_angle = (start.y - mid_y + base_y).atan2(start.x - mid_x + base_x);
        self.arc(
            mid_x - base_x,
            mid_y - base_y,
            r,
            start_angle,
            start_angle + sweep,
            false,
        )
    }

    /// Draws an elliptical arc centered at `(x, y)` with radii `rx`/`ry`,
    /// rotated by `rotation` radians, from `start_angle` to `end_angle`.
    ///
    /// The ellipse is sampled with an angular increment that keeps the
    /// chord deviation within `1.0 / arc_resolution` drawing units of the
    /// true curve, and the final sample is forced onto the exact end
    /// angle. The first sample starts a new subpath when no current point
    /// exists, and connects with a straight segment otherwise.
    #[allow(clippy::too_many_arguments)]
    pub fn ellipse(
        &mut self,
        x: f64,
        y: f64,
        rx: f64,
        ry: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        counterclockwise: bool,
    ) -> Result<()> {
        if rx < 0.0 {
            return Err(GeometryError::NegativeRadius { radius: rx }.into());
        }
        if ry < 0.0 {
            return Err(GeometryError::NegativeRadius { radius: ry }.into());
        }

        let a0 = start_angle.rem_euclid(TAU);
        let a1 = end_angle.rem_euclid(TAU);
        let sweep = if counterclockwise { a0 - a1 } else { a1 - a0 }.rem_euclid(TAU);
        let direction = if counterclockwise { -1.0 } else { 1.0 };

        let max_r = rx.max(ry);
        let tolerance = 1.0 / self.arc_resolution.max(f64::MIN_POSITIVE);
        // Angular step keeping the chord sagitta within tolerance.
        let increment = if max_r > tolerance {
            2.0 * (1.0 - tolerance / max_r).acos()
        } else {
            FRAC_PI_2
        };
        let steps = (sweep / increment).ceil() as usize;
        trace!("ellipse sweep {:.4} rad in {} steps", sweep, steps);

        let (sin_rot, cos_rot) = rotation.sin_cos();
        for step in 0..=steps {
            let angle = if step == steps {
                a1
            } else {
                a0 + step as f64 * increment * direction
            };
            let (sin_a, cos_a) = angle.sin_cos();
            let px = x + rx * cos_a * cos_rot - ry * sin_a * sin_rot;
            let py = y + rx * cos_a * sin_rot + ry * sin_a * cos_rot;

            if step == 0 && self.current.is_none() {
                self.move_to(px, py)?;
            } else {
                self.line_to(px, py)?;
            }
        }
        Ok(())
    }

    /// Draws an axis-aligned rectangle as one `move_to` and four
    /// `line_to` calls, closing with an explicit final edge.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        self.move_to(x, y)?;
        self.line_to(x + w, y)?;
        self.line_to(x + w, y + h)?;
        self.line_to(x, y + h)?;
        self.line_to(x, y)
    }

    fn forward_move(&mut self, p: Point) -> Result<()> {
        for sink in &mut self.sinks {
            sink.move_to(p.x, p.y)?;
        }
        Ok(())
    }

    fn forward_line(&mut self, p: Point) -> Result<()> {
        for sink in &mut self.sinks {
            sink.line_to(p.x, p.y)?;
        }
        Ok(())
    }
}
