use std::fmt;

/// Absolute block position on the unit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPos {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl BlockPos {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// The neighbor across `face`.
    pub const fn adjacent(&self, face: Face) -> BlockPos {
        let (dx, dy, dz) = face.offset();
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Euclidean distance from this block's grid point to a free-floating position.
    pub fn distance_to(&self, other: PlayerPos) -> f64 {
        let dx = self.x as f64 - other.x;
        let dy = self.y as f64 - other.y;
        let dz = self.z as f64 - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// One of the six outward face normals of a unit cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Up,
    Down,
    North,
    South,
    East,
    West,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Up,
        Face::Down,
        Face::North,
        Face::South,
        Face::East,
        Face::West,
    ];

    /// Grid offset of this face. North is -Z, East is +X.
    pub const fn offset(self) -> (i64, i64, i64) {
        match self {
            Face::Up => (0, 1, 0),
            Face::Down => (0, -1, 0),
            Face::North => (0, 0, -1),
            Face::South => (0, 0, 1),
            Face::East => (1, 0, 0),
            Face::West => (-1, 0, 0),
        }
    }

    /// Snap a host-supplied normal vector to the face of its dominant axis.
    ///
    /// Returns `None` for a zero or non-finite vector.
    pub fn from_normal(normal: [f64; 3]) -> Option<Face> {
        let [x, y, z] = normal;
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return None;
        }
        let (ax, ay, az) = (x.abs(), y.abs(), z.abs());
        if ax == 0.0 && ay == 0.0 && az == 0.0 {
            return None;
        }
        let face = if ay >= ax && ay >= az {
            if y > 0.0 { Face::Up } else { Face::Down }
        } else if ax >= az {
            if x > 0.0 { Face::East } else { Face::West }
        } else if z > 0.0 {
            Face::South
        } else {
            Face::North
        };
        Some(face)
    }
}

/// Free-floating player position as reported by the host each frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerPos {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PlayerPos {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_follows_face_offset() {
        let pos = BlockPos::new(3, 0, 3);
        assert_eq!(pos.adjacent(Face::Up), BlockPos::new(3, 1, 3));
        assert_eq!(pos.adjacent(Face::West), BlockPos::new(2, 0, 3));
        assert_eq!(pos.adjacent(Face::North), BlockPos::new(3, 0, 2));
    }

    #[test]
    fn from_normal_picks_dominant_axis() {
        assert_eq!(Face::from_normal([0.0, 1.0, 0.0]), Some(Face::Up));
        assert_eq!(Face::from_normal([0.0, -1.0, 0.0]), Some(Face::Down));
        assert_eq!(Face::from_normal([0.9, 0.1, -0.2]), Some(Face::East));
        assert_eq!(Face::from_normal([0.0, 0.0, -1.0]), Some(Face::North));
        assert_eq!(Face::from_normal([0.0, 0.0, 0.0]), None);
        assert_eq!(Face::from_normal([f64::NAN, 1.0, 0.0]), None);
    }

    #[test]
    fn every_face_roundtrips_through_its_normal() {
        for face in Face::ALL {
            let (dx, dy, dz) = face.offset();
            let normal = [dx as f64, dy as f64, dz as f64];
            assert_eq!(Face::from_normal(normal), Some(face));
        }
    }

    #[test]
    fn distance_is_euclidean() {
        let pos = BlockPos::new(0, 0, 0);
        assert!((pos.distance_to(PlayerPos::new(3.0, 4.0, 0.0)) - 5.0).abs() < 1e-9);
    }
}
