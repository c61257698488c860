use kurbo::Point;

/// Extents below this are considered degenerate and carry no box.
pub const DEGENERATE_EPS: f64 = 1e-5;

/// Areas below this are treated as zero in ratio computations.
pub const AREA_EPS: f64 = 1e-6;

/// Default slop when testing box edges against the frame bounds.
/// Absorbs floating-point noise and stroke widths.
pub const EDGE_TOLERANCE: f64 = 0.05;

/// Visible stage bounds, expressed as half-extents around the origin.
///
/// Coordinates are y-up with the origin at frame center, so the visible
/// region is `[-half_width, half_width] x [-half_height, half_height]`.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    pub half_width: f64,
    pub half_height: f64,
}

impl Frame {
    pub fn new(half_width: f64, half_height: f64) -> Self {
        Self {
            half_width,
            half_height,
        }
    }
}

impl Default for Frame {
    /// A 16:9 stage 8 units tall (half-extents ~7.11 x 4.0).
    fn default() -> Self {
        Self {
            half_width: 64.0 / 9.0,
            half_height: 4.0,
        }
    }
}

/// Axis-aligned bounding box in frame units, y-up.
///
/// Invariant: `left < right` and `bottom < top` by at least
/// [`DEGENERATE_EPS`]; construction through [`BBox::from_extents`] or
/// [`BBox::from_corners`] returns `None` otherwise.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BBox {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl BBox {
    pub fn from_extents(left: f64, right: f64, bottom: f64, top: f64) -> Option<Self> {
        if right - left < DEGENERATE_EPS || top - bottom < DEGENERATE_EPS {
            return None;
        }
        Some(Self {
            left,
            right,
            bottom,
            top,
        })
    }

    /// Builds a box from an element's two opposite corners
    /// (upper-left and lower-right, the extents a scene graph exposes).
    pub fn from_corners(upper_left: Point, lower_right: Point) -> Option<Self> {
        Self::from_extents(upper_left.x, lower_right.x, lower_right.y, upper_left.y)
    }

    pub fn area(&self) -> f64 {
        (self.right - self.left).max(0.0) * (self.top - self.bottom).max(0.0)
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.bottom + self.top) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            left: self.left.min(other.left),
            right: self.right.max(other.right),
            bottom: self.bottom.min(other.bottom),
            top: self.top.max(other.top),
        }
    }

    /// Rectangle intersection. Boxes that only touch at an edge do not
    /// intersect (strict inequality on both axes).
    pub fn intersect(&self, other: &BBox) -> Option<BBox> {
        let left = self.left.max(other.left);
        let right = self.right.min(other.right);
        let bottom = self.bottom.max(other.bottom);
        let top = self.top.min(other.top);
        if left < right && bottom < top {
            Some(BBox {
                left,
                right,
                bottom,
                top,
            })
        } else {
            None
        }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> BBox {
        BBox {
            left: self.left + dx,
            right: self.right + dx,
            bottom: self.bottom + dy,
            top: self.top + dy,
        }
    }
}

/// Intersection area over the *smaller* box's area, in `[0, 1]`.
///
/// Keying on the smaller box means a small label fully inside a much
/// larger panel registers as 100% overlapping: the check cares about an
/// element being visually swallowed, not symmetric area overlap.
pub fn overlap_ratio(a: &BBox, b: &BBox) -> f64 {
    let Some(inter) = a.intersect(b) else {
        return 0.0;
    };
    let min_area = a.area().min(b.area());
    if min_area < AREA_EPS {
        return 0.0;
    }
    inter.area() / min_area
}

/// A frame edge a box can escape through.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Edge {
    Left,
    Right,
    Bottom,
    Top,
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Edge::Left => "LEFT",
            Edge::Right => "RIGHT",
            Edge::Bottom => "BOTTOM",
            Edge::Top => "TOP",
        };
        f.write_str(s)
    }
}

/// One violated frame edge with the offending coordinate and the bound it
/// crossed, for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EdgeViolation {
    pub edge: Edge,
    pub coord: f64,
    pub limit: f64,
}

impl std::fmt::Display for EdgeViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.edge {
            Edge::Left | Edge::Bottom => {
                write!(f, "{} ({:.2} < {:.2})", self.edge, self.coord, self.limit)
            }
            Edge::Right | Edge::Top => {
                write!(f, "{} ({:.2} > {:.2})", self.edge, self.coord, self.limit)
            }
        }
    }
}

/// Tests each box edge against the frame bounds plus `tolerance`.
/// Returns zero or more violations in Left/Right/Bottom/Top order.
pub fn out_of_frame(bbox: &BBox, frame: &Frame, tolerance: f64) -> Vec<EdgeViolation> {
    let mut violations = Vec::new();
    if bbox.left < -frame.half_width - tolerance {
        violations.push(EdgeViolation {
            edge: Edge::Left,
            coord: bbox.left,
            limit: -frame.half_width,
        });
    }
    if bbox.right > frame.half_width + tolerance {
        violations.push(EdgeViolation {
            edge: Edge::Right,
            coord: bbox.right,
            limit: frame.half_width,
        });
    }
    if bbox.bottom < -frame.half_height - tolerance {
        violations.push(EdgeViolation {
            edge: Edge::Bottom,
            coord: bbox.bottom,
            limit: -frame.half_height,
        });
    }
    if bbox.top > frame.half_height + tolerance {
        violations.push(EdgeViolation {
            edge: Edge::Top,
            coord: bbox.top,
            limit: frame.half_height,
        });
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(l: f64, r: f64, b: f64, t: f64) -> BBox {
        BBox::from_extents(l, r, b, t).unwrap()
    }

    #[test]
    fn degenerate_extents_have_no_box() {
        assert!(BBox::from_extents(0.0, 0.0, 0.0, 1.0).is_none());
        assert!(BBox::from_extents(0.0, 1.0, 0.5, 0.5 + 1e-6).is_none());
        assert!(BBox::from_extents(0.0, 1.0, 0.0, 1.0).is_some());
    }

    #[test]
    fn corners_map_to_extents() {
        let b = BBox::from_corners(Point::new(-1.0, 2.0), Point::new(3.0, -0.5)).unwrap();
        assert_eq!(b, bbox(-1.0, 3.0, -0.5, 2.0));
    }

    #[test]
    fn area_of_box() {
        assert_eq!(bbox(0.0, 2.0, 0.0, 3.0).area(), 6.0);
    }

    #[test]
    fn edge_touching_boxes_do_not_intersect() {
        let a = bbox(0.0, 1.0, 0.0, 1.0);
        let b = bbox(1.0, 2.0, 0.0, 1.0);
        assert!(a.intersect(&b).is_none());
        assert_eq!(overlap_ratio(&a, &b), 0.0);
    }

    #[test]
    fn intersection_clips_both_axes() {
        let a = bbox(0.0, 2.0, 0.0, 2.0);
        let b = bbox(1.0, 3.0, 1.0, 3.0);
        assert_eq!(a.intersect(&b), Some(bbox(1.0, 2.0, 1.0, 2.0)));
    }

    #[test]
    fn overlap_ratio_is_symmetric() {
        let a = bbox(0.0, 4.0, 0.0, 4.0);
        let b = bbox(3.0, 6.0, 3.0, 6.0);
        assert_eq!(overlap_ratio(&a, &b), overlap_ratio(&b, &a));
    }

    #[test]
    fn contained_box_overlaps_fully() {
        let panel = bbox(-3.0, 3.0, -2.0, 2.0);
        let label = bbox(0.0, 1.0, 0.0, 1.0);
        assert!((overlap_ratio(&panel, &label) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn oob_left_scenario() {
        // Half-extents (7.11, 4.0): a left edge at -8.0 is past -7.11 - 0.05.
        let frame = Frame::new(7.11, 4.0);
        let b = bbox(-8.0, -6.0, -1.0, 1.0);
        let v = out_of_frame(&b, &frame, EDGE_TOLERANCE);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].edge, Edge::Left);
        assert_eq!(v[0].coord, -8.0);
    }

    #[test]
    fn box_within_tolerance_is_in_frame() {
        let frame = Frame::new(7.11, 4.0);
        let b = bbox(-7.15, 0.0, -4.04, 4.04);
        assert!(out_of_frame(&b, &frame, EDGE_TOLERANCE).is_empty());
    }

    #[test]
    fn oob_reports_multiple_edges_in_order() {
        let frame = Frame::default();
        let b = bbox(-20.0, 20.0, -10.0, 10.0);
        let edges: Vec<Edge> = out_of_frame(&b, &frame, EDGE_TOLERANCE)
            .iter()
            .map(|v| v.edge)
            .collect();
        assert_eq!(edges, vec![Edge::Left, Edge::Right, Edge::Bottom, Edge::Top]);
    }
}
