//! Axis-aligned boxes in arena space (origin top-left, y grows downward).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hitbox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Hitbox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap: boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes_collide() {
        let a = Hitbox::new(0.0, 0.0, 10.0, 10.0);
        let b = Hitbox::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Hitbox::new(0.0, 0.0, 10.0, 10.0);
        let right_neighbor = Hitbox::new(10.0, 0.0, 10.0, 10.0);
        let below = Hitbox::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right_neighbor));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_contained_box_collides() {
        let outer = Hitbox::new(0.0, 0.0, 100.0, 100.0);
        let inner = Hitbox::new(40.0, 40.0, 5.0, 5.0);
        assert!(outer.overlaps(&inner));
    }
}
