//! Geometry primitives used by the edge subsystem: coordinates, bounding
//! boxes, azimuths, point/curve distance, simplicity and intersection
//! tests, and splitting a curve at an interior point.
//!
//! The segment-intersection classification is a port of JTS's
//! `RobustLineIntersector` approach, using the `robust` crate's
//! `orient2d` since naive float cross products misclassify near-collinear
//! segments.

use robust::{orient2d, Coord as RobustCoord};
use std::f64::consts::PI;

/// A point on the Cartesian plane.
///
/// Deliberately not generic over a float type -- this crate only ever
/// deals in `f64` coordinates, and there's no present need to carry a
/// numeric type parameter through every function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub fn new(x: f64, y: f64) -> Self {
        Coord { x, y }
    }
}

impl From<(f64, f64)> for Coord {
    fn from(c: (f64, f64)) -> Self {
        Coord::new(c.0, c.1)
    }
}

/// An axis-aligned bounding box, modeled on `geo_types::Rect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn of(coords: &[Coord]) -> Self {
        assert!(!coords.is_empty());
        let mut b = Bounds { min_x: coords[0].x, min_y: coords[0].y, max_x: coords[0].x, max_y: coords[0].y };
        for c in &coords[1..] {
            b.min_x = b.min_x.min(c.x);
            b.min_y = b.min_y.min(c.y);
            b.max_x = b.max_x.max(c.x);
            b.max_y = b.max_y.max(c.y);
        }
        b
    }

    pub fn expanded(&self, tol: f64) -> Bounds {
        Bounds {
            min_x: self.min_x - tol,
            min_y: self.min_y - tol,
            max_x: self.max_x + tol,
            max_y: self.max_y + tol,
        }
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

pub fn coords_equal(a: &Coord, b: &Coord) -> bool {
    a.x == b.x && a.y == b.y
}

pub fn distance_point_to_coords(p: Coord, coords: &[Coord]) -> f64 {
    coords
        .windows(2)
        .map(|seg| point_segment_distance(p, seg[0], seg[1]))
        .fold(f64::INFINITY, f64::min)
}

fn point_segment_distance(p: Coord, a: Coord, b: Coord) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return ((p.x - a.x).powi(2) + (p.y - a.y).powi(2)).sqrt();
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
    let proj_x = a.x + t * dx;
    let proj_y = a.y + t * dy;
    ((p.x - proj_x).powi(2) + (p.y - proj_y).powi(2)).sqrt()
}

/// Azimuth (bearing) of the ray `a -> b`, in `[0, 2*PI)`, measured
/// counter-clockwise from the positive x-axis.
pub fn azimuth(a: Coord, b: Coord) -> f64 {
    let angle = (b.y - a.y).atan2(b.x - a.x);
    if angle < 0.0 {
        angle + 2.0 * PI
    } else {
        angle
    }
}

/// Normalizes `theta` into `[0, 2*PI)`.
pub fn normalize_angle(theta: f64) -> f64 {
    let two_pi = 2.0 * PI;
    let mut a = theta % two_pi;
    if a < 0.0 {
        a += two_pi;
    }
    a
}

/// `true` if `coords` has no self-intersection: no two non-adjacent
/// segments meet, and no two adjacent segments overlap beyond their
/// shared endpoint.
pub fn is_simple(coords: &[Coord]) -> bool {
    if coords.len() < 2 {
        return false;
    }
    let n = coords.len() - 1; // number of segments
    for i in 0..n {
        for j in (i + 1)..n {
            let adjacent = j == i + 1;
            let closing_pair = i == 0 && j == n - 1 && coords[0] == coords[coords.len() - 1];
            match segment_intersection(coords[i], coords[i + 1], coords[j], coords[j + 1]) {
                SegmentIntersection::None => {}
                SegmentIntersection::Point { at, .. } => {
                    if adjacent {
                        // adjacent segments are allowed to meet only at their shared vertex
                        if !coords_equal(&at, &coords[i + 1]) {
                            return false;
                        }
                    } else if closing_pair {
                        // the curve's own closing point is allowed to repeat
                        if !coords_equal(&at, &coords[0]) {
                            return false;
                        }
                    } else {
                        return false;
                    }
                }
                SegmentIntersection::Collinear { .. } => return false,
            }
        }
    }
    true
}

/// `true` if the polylines `a` and `b` share any point.
pub fn intersects(a: &[Coord], b: &[Coord]) -> bool {
    for sa in a.windows(2) {
        for sb in b.windows(2) {
            if !matches!(
                segment_intersection(sa[0], sa[1], sb[0], sb[1]),
                SegmentIntersection::None
            ) {
                return true;
            }
        }
    }
    false
}

/// Splits `coords` at `at`, which must lie exactly on the polyline.
/// Returns `(head, tail)` where `head` ends at `at` and `tail` starts at
/// `at`; `head`'s last point equals `tail`'s first point.
pub fn split(coords: &[Coord], at: Coord) -> Option<(Vec<Coord>, Vec<Coord>)> {
    for (i, seg) in coords.windows(2).enumerate() {
        let (a, b) = (seg[0], seg[1]);
        if coords_equal(&a, &at) || coords_equal(&b, &at) {
            continue;
        }
        if point_segment_distance(at, a, b) < 1e-9 {
            let mut head: Vec<Coord> = coords[..=i].to_vec();
            head.push(at);
            let mut tail: Vec<Coord> = vec![at];
            tail.extend_from_slice(&coords[i + 1..]);
            return Some((head, tail));
        }
    }
    // `at` coincides with an interior vertex exactly.
    for (i, c) in coords.iter().enumerate() {
        if coords_equal(c, &at) && i != 0 && i != coords.len() - 1 {
            return Some((coords[..=i].to_vec(), coords[i..].to_vec()));
        }
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    None,
    /// A single intersection point; `proper` is true when the point lies
    /// strictly in the interior of both segments.
    Point { at: Coord, proper: bool },
    /// The segments overlap collinearly along a sub-segment.
    Collinear { from: Coord, to: Coord },
}

fn orient(a: Coord, b: Coord, c: Coord) -> std::cmp::Ordering {
    let det = orient2d(
        RobustCoord { x: a.x, y: a.y },
        RobustCoord { x: b.x, y: b.y },
        RobustCoord { x: c.x, y: c.y },
    );
    det.partial_cmp(&0.0).unwrap_or(std::cmp::Ordering::Equal)
}

fn bounds_contains(min: Coord, max: Coord, p: Coord) -> bool {
    p.x >= min.x.min(max.x) && p.x <= min.x.max(max.x) && p.y >= min.y.min(max.y) && p.y <= min.y.max(max.y)
}

/// Classifies the intersection of segments `p0->p1` and `q0->q1`.
///
/// Orientation tests first rule out disjoint bounding ranges and
/// non-collinear disjoint segments, then collinear overlaps are handled by
/// projecting onto whichever axis is less degenerate.
pub fn segment_intersection(p0: Coord, p1: Coord, q0: Coord, q1: Coord) -> SegmentIntersection {
    use std::cmp::Ordering::*;

    let p_min = Coord::new(p0.x.min(p1.x), p0.y.min(p1.y));
    let p_max = Coord::new(p0.x.max(p1.x), p0.y.max(p1.y));
    let q_min = Coord::new(q0.x.min(q1.x), q0.y.min(q1.y));
    let q_max = Coord::new(q0.x.max(q1.x), q0.y.max(q1.y));
    if p_max.x < q_min.x || q_max.x < p_min.x || p_max.y < q_min.y || q_max.y < p_min.y {
        return SegmentIntersection::None;
    }

    let p_q0 = orient(p0, p1, q0);
    let p_q1 = orient(p0, p1, q1);
    if matches!((p_q0, p_q1), (Greater, Greater) | (Less, Less)) {
        return SegmentIntersection::None;
    }

    let q_p0 = orient(q0, q1, p0);
    let q_p1 = orient(q0, q1, p1);
    if matches!((q_p0, q_p1), (Greater, Greater) | (Less, Less)) {
        return SegmentIntersection::None;
    }

    if matches!((p_q0, p_q1, q_p0, q_p1), (Equal, Equal, Equal, Equal)) {
        return collinear_overlap(p0, p1, q0, q1, p_min, p_max, q_min, q_max);
    }

    if p_q0 == Equal || p_q1 == Equal || q_p0 == Equal || q_p1 == Equal {
        let at = if p0 == q0 || p0 == q1 {
            p0
        } else if p1 == q0 || p1 == q1 {
            p1
        } else if p_q0 == Equal {
            q0
        } else if p_q1 == Equal {
            q1
        } else if q_p0 == Equal {
            p0
        } else {
            p1
        };
        return SegmentIntersection::Point { at, proper: false };
    }

    // Proper crossing: solve the parametric intersection directly.
    let d1x = p1.x - p0.x;
    let d1y = p1.y - p0.y;
    let d2x = q1.x - q0.x;
    let d2y = q1.y - q0.y;
    let denom = d1x * d2y - d1y * d2x;
    let t = ((q0.x - p0.x) * d2y - (q0.y - p0.y) * d2x) / denom;
    let at = Coord::new(p0.x + t * d1x, p0.y + t * d1y);
    SegmentIntersection::Point { at, proper: true }
}

fn collinear_overlap(
    p0: Coord,
    p1: Coord,
    q0: Coord,
    q1: Coord,
    p_min: Coord,
    p_max: Coord,
    q_min: Coord,
    q_max: Coord,
) -> SegmentIntersection {
    let q0_in_p = bounds_contains(p_min, p_max, q0);
    let q1_in_p = bounds_contains(p_min, p_max, q1);
    let p0_in_q = bounds_contains(q_min, q_max, p0);
    let p1_in_q = bounds_contains(q_min, q_max, p1);

    match (q0_in_p, q1_in_p, p0_in_q, p1_in_q) {
        (true, true, _, _) => {
            if q0 == q1 {
                SegmentIntersection::Point { at: q0, proper: false }
            } else {
                SegmentIntersection::Collinear { from: q0, to: q1 }
            }
        }
        (_, _, true, true) => {
            if p0 == p1 {
                SegmentIntersection::Point { at: p0, proper: false }
            } else {
                SegmentIntersection::Collinear { from: p0, to: p1 }
            }
        }
        (true, false, true, false) if q0 == p0 => SegmentIntersection::Point { at: q0, proper: false },
        (true, _, true, _) => SegmentIntersection::Collinear { from: q0, to: p0 },
        (true, false, false, true) if q0 == p1 => SegmentIntersection::Point { at: q0, proper: false },
        (true, _, _, true) => SegmentIntersection::Collinear { from: q0, to: p1 },
        (false, true, true, false) if q1 == p0 => SegmentIntersection::Point { at: q1, proper: false },
        (_, true, true, _) => SegmentIntersection::Collinear { from: q1, to: p0 },
        (false, true, false, true) if q1 == p1 => SegmentIntersection::Point { at: q1, proper: false },
        (_, true, _, true) => SegmentIntersection::Collinear { from: q1, to: p1 },
        _ => SegmentIntersection::None,
    }
}

pub mod relate;
pub use relate::IntersectionMatrix;
