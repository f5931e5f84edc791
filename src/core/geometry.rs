//=========================================================================
// Geometry Value Types
//=========================================================================
//
// Minimal value types carried by events and property accessors. Only the
// arithmetic the platform layer itself needs is provided.
//
//=========================================================================

use std::ops::{Add, Sub};

//=== Vec2i ===============================================================

/// Integer 2D vector (pixels, screen or client space).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Vec2i {
    pub x: i32,
    pub y: i32,
}

impl Vec2i {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2i {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2i {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Vec2i {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

//=== Vec2 ================================================================

/// Floating point 2D vector (sub-pixel positions, scroll amounts).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Vec2i> for Vec2 {
    fn from(v: Vec2i) -> Self {
        Self::new(v.x as f32, v.y as f32)
    }
}

//=== Box2i ===============================================================

/// Integer rectangle given by its min (top-left) and max (bottom-right)
/// corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Box2i {
    pub min: Vec2i,
    pub max: Vec2i,
}

impl Box2i {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            min: Vec2i::new(left, top),
            max: Vec2i::new(right, bottom),
        }
    }

    /// Builds a box from an origin and a size.
    pub const fn from_origin_size(origin: Vec2i, size: Vec2i) -> Self {
        Self::new(origin.x, origin.y, origin.x + size.x, origin.y + size.y)
    }

    pub fn size(&self) -> Vec2i {
        self.max - self.min
    }

    pub fn contains(&self, point: Vec2i) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_from_origin_and_size() {
        let area = Box2i::from_origin_size(Vec2i::new(-1920, 0), Vec2i::new(1920, 1040));
        assert_eq!(area, Box2i::new(-1920, 0, 0, 1040));
        assert_eq!(area.size(), Vec2i::new(1920, 1040));
    }

    #[test]
    fn box_contains_is_half_open() {
        let area = Box2i::new(0, 0, 10, 10);
        assert!(area.contains(Vec2i::new(0, 0)));
        assert!(area.contains(Vec2i::new(9, 9)));
        assert!(!area.contains(Vec2i::new(10, 5)));
    }
}
