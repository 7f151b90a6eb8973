use crate::{DVec3, Interval};

/// Axis-Aligned Bounding Box used to clip implicit surfaces.
///
/// An AABB is defined by three intervals (one per axis). An axis whose
/// interval is [`Interval::UNIVERSE`] places no constraint on points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create an AABB from a reference corner and per-axis extents
    /// (length along x, width along y, height along z).
    ///
    /// A zero or negative extent leaves that axis unbounded.
    pub fn from_corner(corner: DVec3, extent: DVec3) -> Self {
        Self {
            x: Interval::from_extent(corner.x, extent.x),
            y: Interval::from_extent(corner.y, extent.y),
            z: Interval::from_extent(corner.z, extent.z),
        }
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Returns true if the point lies inside the box (boundaries included).
    pub fn contains(&self, p: DVec3) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }

    /// Returns true if no axis is constrained.
    pub fn is_unbounded(&self) -> bool {
        (0..3).all(|axis| self.axis_interval(axis) == Interval::UNIVERSE)
    }

    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };
}

impl Default for Aabb {
    fn default() -> Self {
        Self::UNIVERSE
    }
}
