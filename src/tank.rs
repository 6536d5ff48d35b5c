use macroquad::prelude::*;
use ::rand::Rng;

use crate::config;

/// Interior bounds of the aquarium. Fish positions are always clamped into
/// the water volume: inside the glass walls, below the surface band.
pub struct Tank {
    pub width: f32,
    pub height: f32,
}

impl Tank {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.width * 0.5, self.height * 0.5)
    }

    /// Horizontal range a fish of the given size may occupy.
    pub fn x_bounds(&self, size: f32) -> (f32, f32) {
        let inset = config::WALL_WIDTH + size * 0.7;
        let lo = inset;
        let hi = (self.width - inset).max(lo);
        (lo, hi)
    }

    /// Vertical range a fish of the given size may occupy.
    pub fn y_bounds(&self, size: f32) -> (f32, f32) {
        let lo = config::WALL_WIDTH + config::SURFACE_BAND + size * 0.5;
        let hi = (self.height - config::WALL_WIDTH - size * 0.5).max(lo);
        (lo, hi)
    }

    /// Resting y for something sitting on the sand bed.
    pub fn floor_y(&self, radius: f32) -> f32 {
        self.height - config::WALL_WIDTH - radius
    }

    /// Uniform random point inside the water volume, inset by `margin`.
    pub fn random_point(&self, margin: f32, rng: &mut impl Rng) -> Vec2 {
        let x_lo = config::WALL_WIDTH + margin;
        let x_hi = (self.width - config::WALL_WIDTH - margin).max(x_lo + 1.0);
        let y_lo = config::WALL_WIDTH + config::SURFACE_BAND + margin;
        let y_hi = (self.height - config::WALL_WIDTH - margin).max(y_lo + 1.0);
        vec2(rng.gen_range(x_lo..x_hi), rng.gen_range(y_lo..y_hi))
    }

    /// Clamp a point into the water volume for a fish of the given size.
    pub fn clamp_fish(&self, pos: Vec2, size: f32) -> Vec2 {
        let (x_lo, x_hi) = self.x_bounds(size);
        let (y_lo, y_hi) = self.y_bounds(size);
        vec2(pos.x.clamp(x_lo, x_hi), pos.y.clamp(y_lo, y_hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fish_bounds_inset_by_wall_and_size() {
        let tank = Tank::new(800.0, 600.0);
        let (x_lo, x_hi) = tank.x_bounds(20.0);
        assert_eq!(x_lo, config::WALL_WIDTH + 14.0);
        assert_eq!(x_hi, 800.0 - config::WALL_WIDTH - 14.0);

        let (y_lo, y_hi) = tank.y_bounds(20.0);
        assert_eq!(y_lo, config::WALL_WIDTH + config::SURFACE_BAND + 10.0);
        assert_eq!(y_hi, 600.0 - config::WALL_WIDTH - 10.0);
    }

    #[test]
    fn degenerate_tank_keeps_bounds_ordered() {
        let tank = Tank::new(20.0, 20.0);
        let (x_lo, x_hi) = tank.x_bounds(40.0);
        assert!(x_lo <= x_hi);
        let (y_lo, y_hi) = tank.y_bounds(40.0);
        assert!(y_lo <= y_hi);
    }
}
