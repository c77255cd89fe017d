//! Adaptive Bezier flattening.
//!
//! Converts quadratic and cubic Bezier curves into polylines by recursive
//! midpoint subdivision. A segment is accepted once its control points
//! deviate from the chord by less than a distance tolerance derived from
//! the caller's resolution parameter: `tolerance = DISTANCE_EPSILON /
//! resolution`, so a higher resolution yields more points and a tighter fit.

use tracing::trace;

use crate::point::Point;

/// Base chord-deviation tolerance at resolution 1.0, in drawing units.
const DISTANCE_EPSILON: f64 = 1.0;

/// Hard cap on subdivision depth. Bounds the output even for
/// pathological control polygons.
const RECURSION_LIMIT: u32 = 24;

/// Flattens a cubic Bezier curve into a sequence of sample points.
///
/// The returned points do not include the start point `p0`; the sequence
/// always ends exactly at `p3`. Degenerate curves (all control points
/// coincident) yield a single point, the endpoint.
pub fn flatten_cubic(p0: Point, p1: Point, p2: Point, p3: Point, resolution: f64) -> Vec<Point> {
    let tolerance = DISTANCE_EPSILON / resolution.max(f64::MIN_POSITIVE);
    let mut points = Vec::new();
    subdivide(p0, p1, p2, p3, tolerance * tolerance, 0, &mut points);
    trace!("flattened cubic into {} segments", points.len());
    points
}

/// Flattens a quadratic Bezier curve into a sequence of sample points.
///
/// The quadratic is handled as the cubic `{p0, p1, p1, p2}` with a doubled
/// control point, matching the path-engine contract.
pub fn flatten_quadratic(p0: Point, p1: Point, p2: Point, resolution: f64) -> Vec<Point> {
    flatten_cubic(p0, p1, p1, p2, resolution)
}

fn subdivide(
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    tolerance_sq: f64,
    depth: u32,
    out: &mut Vec<Point>,
) {
    if depth >= RECURSION_LIMIT || is_flat(p0, p1, p2, p3, tolerance_sq) {
        out.push(p3);
        return;
    }

    // de Casteljau split at t = 0.5
    let p01 = midpoint(p0, p1);
    let p12 = midpoint(p1, p2);
    let p23 = midpoint(p2, p3);
    let p012 = midpoint(p01, p12);
    let p123 = midpoint(p12, p23);
    let mid = midpoint(p012, p123);

    subdivide(p0, p01, p012, mid, tolerance_sq, depth + 1, out);
    subdivide(mid, p123, p23, p3, tolerance_sq, depth + 1, out);
}

fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5)
}

/// Flatness test: both control points must lie within the tolerance
/// distance of the chord `p0 -> p3`.
fn is_flat(p0: Point, p1: Point, p2: Point, p3: Point, tolerance_sq: f64) -> bool {
    let dx = p3.x - p0.x;
    let dy = p3.y - p0.y;
    let chord_sq = dx * dx + dy * dy;

    if chord_sq <= f64::EPSILON {
        // Collapsed chord: measure the control offsets directly so a
        // closed loop still subdivides.
        let d1 = dist_sq(p1, p0);
        let d2 = dist_sq(p2, p3);
        return d1.max(d2) <= tolerance_sq;
    }

    let d1 = (p1.x - p3.x) * dy - (p1.y - p3.y) * dx;
    let d2 = (p2.x - p3.x) * dy - (p2.y - p3.y) * dx;
    let deviation = d1.abs() + d2.abs();
    deviation * deviation <= tolerance_sq * chord_sq
}

fn dist_sq(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Evaluates the cubic analytically at parameter t.
    fn cubic_at(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
        let u = 1.0 - t;
        Point::new(
            u * u * u * p0.x + 3.0 * u * u * t * p1.x + 3.0 * u * t * t * p2.x + t * t * t * p3.x,
            u * u * u * p0.y + 3.0 * u * u * t * p1.y + 3.0 * u * t * t * p2.y + t * t * t * p3.y,
        )
    }

    /// Maximum distance from dense analytic curve samples to the polyline.
    fn max_deviation(p0: Point, p1: Point, p2: Point, p3: Point, polyline: &[Point]) -> f64 {
        let mut vertices = vec![p0];
        vertices.extend_from_slice(polyline);
        let mut worst = 0.0f64;
        for i in 0..=1000 {
            let t = i as f64 / 1000.0;
            let on_curve = cubic_at(p0, p1, p2, p3, t);
            let nearest = vertices
                .windows(2)
                .map(|seg| point_segment_distance(on_curve, seg[0], seg[1]))
                .fold(f64::INFINITY, f64::min);
            worst = worst.max(nearest);
        }
        worst
    }

    fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
        let len_sq = dist_sq(a, b);
        if len_sq == 0.0 {
            return p.distance_to(&a);
        }
        let t = (((p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y)) / len_sq).clamp(0.0, 1.0);
        p.distance_to(&Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y)))
    }

    #[test]
    fn test_cubic_ends_exactly_at_target() {
        let p3 = Point::new(200.0, 100.0);
        let points = flatten_cubic(
            Point::ZERO,
            Point::new(100.0, 50.0),
            Point::new(0.0, 24.0),
            p3,
            2.0,
        );
        assert_eq!(*points.last().unwrap(), p3);
    }

    #[test]
    fn test_quadratic_ends_exactly_at_target() {
        let p2 = Point::new(200.0, 100.0);
        let points = flatten_quadratic(Point::ZERO, Point::new(100.0, 50.0), p2, 2.0);
        assert_eq!(*points.last().unwrap(), p2);
    }

    #[test]
    fn test_degenerate_curve_yields_endpoint() {
        let p = Point::new(5.0, 5.0);
        let points = flatten_cubic(p, p, p, p, 2.0);
        assert_eq!(points, vec![p]);
    }

    #[test]
    fn test_straight_line_needs_no_subdivision() {
        let points = flatten_cubic(
            Point::ZERO,
            Point::new(10.0, 10.0),
            Point::new(20.0, 20.0),
            Point::new(30.0, 30.0),
            2.0,
        );
        assert_eq!(points, vec![Point::new(30.0, 30.0)]);
    }

    #[test]
    fn test_closed_loop_still_subdivides() {
        // Chord collapses to a point but the curve sweeps outward.
        let p0 = Point::ZERO;
        let points = flatten_cubic(p0, Point::new(100.0, 0.0), Point::new(100.0, 100.0), p0, 2.0);
        assert!(points.len() > 1, "loop must be sampled, got {:?}", points);
        assert_eq!(*points.last().unwrap(), p0);
    }

    #[test]
    fn test_higher_resolution_increases_point_count() {
        let p0 = Point::ZERO;
        let p1 = Point::new(100.0, 50.0);
        let p2 = Point::new(0.0, 24.0);
        let p3 = Point::new(200.0, 100.0);
        let coarse = flatten_cubic(p0, p1, p2, p3, 1.0);
        let medium = flatten_cubic(p0, p1, p2, p3, 4.0);
        let fine = flatten_cubic(p0, p1, p2, p3, 16.0);
        assert!(coarse.len() <= medium.len());
        assert!(medium.len() <= fine.len());
        assert!(coarse.len() < fine.len());
    }

    #[test]
    fn test_higher_resolution_decreases_deviation() {
        let p0 = Point::ZERO;
        let p1 = Point::new(100.0, 50.0);
        let p2 = Point::new(0.0, 24.0);
        let p3 = Point::new(200.0, 100.0);
        let coarse = max_deviation(p0, p1, p2, p3, &flatten_cubic(p0, p1, p2, p3, 1.0));
        let fine = max_deviation(p0, p1, p2, p3, &flatten_cubic(p0, p1, p2, p3, 16.0));
        assert!(
            fine <= coarse,
            "expected deviation to shrink: coarse {} fine {}",
            coarse,
            fine
        );
        // The tolerance at resolution 16 is 1/16 drawing units.
        assert!(fine <= 1.0 / 16.0 + 1e-6);
    }
}
