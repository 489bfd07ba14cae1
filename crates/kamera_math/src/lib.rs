pub use glam::{DAffine2, DMat2, DVec2, dvec2};

/// Linearly interpolates from `start` to `end` by `t`
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + t * (end - start)
}

/// Returns `value` clamped to `[low, high]`
///
/// Unlike [`f64::clamp`] this never panics when `low > high`, `low` wins
pub fn clamp(value: f64, low: f64, high: f64) -> f64 {
    if value < low {
        low
    } else if value > high {
        high
    } else {
        value
    }
}

/// Axis-aligned bounding box in world space (left, bottom, right, top)
///
/// `bottom` is the smaller y, `top` the larger
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl Bounds {
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Create a box centered on `center` with the given half sizes
    pub fn from_extents(center: DVec2, half_extents: DVec2) -> Self {
        Self {
            left: center.x - half_extents.x,
            bottom: center.y - half_extents.y,
            right: center.x + half_extents.x,
            top: center.y + half_extents.y,
        }
    }

    /// Returns the min corner (left, bottom)
    pub fn min(&self) -> DVec2 {
        dvec2(self.left, self.bottom)
    }

    /// Returns the max corner (right, top)
    pub fn max(&self) -> DVec2 {
        dvec2(self.right, self.top)
    }

    pub fn center(&self) -> DVec2 {
        (self.min() + self.max()) * 0.5
    }

    pub fn size(&self) -> DVec2 {
        self.max() - self.min()
    }

    /// Returns true if the point is inside of the box, edges included
    pub fn contains_point(&self, point: DVec2) -> bool {
        point.cmpge(self.min()).all() && point.cmple(self.max()).all()
    }

    /// Returns true if `other` lies completely within this box
    pub fn contains(&self, other: &Bounds) -> bool {
        self.left <= other.left
            && self.right >= other.right
            && self.bottom <= other.bottom
            && self.top >= other.top
    }

    /// Returns true if the boxes overlap, touching edges count
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.bottom <= other.top
            && other.bottom <= self.top
    }

    /// Move the box by the given delta vector
    pub fn translate(&mut self, delta: DVec2) {
        self.left += delta.x;
        self.right += delta.x;
        self.bottom += delta.y;
        self.top += delta.y;
    }

    /// Returns the four corners in this order: min, (max.x, min.y), max, (min.x, max.y)
    pub fn corners(&self) -> [DVec2; 4] {
        [
            self.min(),
            dvec2(self.right, self.bottom),
            self.max(),
            dvec2(self.left, self.top),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_and_midpoint() {
        assert_eq!(lerp(2.0, 10.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(2.0, 10.0, 0.5), 6.0);
        // t outside [0, 1] extrapolates
        assert_eq!(lerp(0.0, 10.0, 1.5), 15.0);
    }

    #[test]
    fn clamp_prefers_low_on_inverted_range() {
        assert_eq!(clamp(-0.5, 0.0, 1.0), 0.0);
        assert_eq!(clamp(1.5, 0.0, 1.0), 1.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
        assert_eq!(clamp(5.0, 3.0, 1.0), 3.0);
    }

    #[test]
    fn extents_box_is_centered() {
        let bb = Bounds::from_extents(dvec2(0.0, 0.0), dvec2(3.5, 1.0));
        assert_eq!(bb, Bounds::new(-3.5, -1.0, 3.5, 1.0));
        assert_eq!(bb.center(), DVec2::ZERO);
        assert_eq!(bb.size(), dvec2(7.0, 2.0));
    }

    #[test]
    fn containment_and_intersection() {
        let outer = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let inner = Bounds::new(2.0, 2.0, 4.0, 4.0);
        let straddling = Bounds::new(8.0, 8.0, 12.0, 12.0);
        let far = Bounds::new(20.0, 20.0, 30.0, 30.0);

        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(!outer.contains(&straddling));
        assert!(outer.intersects(&straddling));
        assert!(!outer.intersects(&far));

        // shared edge counts as touching
        let neighbour = Bounds::new(10.0, 0.0, 20.0, 10.0);
        assert!(outer.intersects(&neighbour));

        assert!(outer.contains_point(dvec2(10.0, 0.0)));
        assert!(!outer.contains_point(dvec2(10.1, 5.0)));
    }

    #[test]
    fn translate_moves_every_edge() {
        let mut bb = Bounds::new(0.0, 0.0, 2.0, 2.0);
        bb.translate(dvec2(1.0, -1.0));
        assert_eq!(bb, Bounds::new(1.0, -1.0, 3.0, 1.0));
        assert_eq!(bb.corners()[2], dvec2(3.0, 1.0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn bounds_serde_field_names() {
        let bb: Bounds =
            serde_json::from_str(r#"{"left":-1.0,"bottom":-2.0,"right":1.0,"top":2.0}"#).unwrap();
        assert_eq!(bb, Bounds::new(-1.0, -2.0, 1.0, 2.0));
    }
}
