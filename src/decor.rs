use macroquad::prelude::*;
use ::rand::Rng;
use noise::{Fbm, NoiseFn, Perlin};

use crate::config;
use crate::tank::Tank;

pub const SAND_COLUMN_W: f32 = 16.0;

#[derive(Clone, Debug)]
pub struct Plant {
    pub base: Vec2,
    pub height: f32,
    pub sway_phase: f32,
    pub color: Color,
    pub blades: usize,
}

#[derive(Clone, Debug)]
pub struct Rock {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

#[derive(Clone, Debug)]
pub struct Bubble {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub wobble: f32,
}

/// Static scenery, generated once per tank size and cached. A resize drops
/// the cache; the next frame regenerates it.
pub struct Decor {
    /// Sand-bed surface height per column of SAND_COLUMN_W pixels.
    pub sand: Vec<f32>,
    pub plants: Vec<Plant>,
    pub rocks: Vec<Rock>,
    pub bubbles: Vec<Bubble>,
    pub caustic_seed: u32,
}

impl Decor {
    pub fn generate(tank: &Tank, seed: u32, rng: &mut impl Rng) -> Self {
        let fbm: Fbm<Perlin> = Fbm::new(seed);
        let floor = tank.height - config::WALL_WIDTH;

        let cols = (tank.width / SAND_COLUMN_W).ceil() as usize + 1;
        let mut sand = Vec::with_capacity(cols);
        for col in 0..cols {
            let n = fbm.get([col as f64 * 0.18, 0.0]) as f32;
            sand.push(floor - 14.0 - n * 9.0);
        }

        let mut plants = Vec::with_capacity(config::PLANT_COUNT);
        for i in 0..config::PLANT_COUNT {
            let lane = (i as f32 + 0.5) / config::PLANT_COUNT as f32;
            let x = lane * tank.width + rng.gen_range(-30.0..30.0);
            let n = fbm.get([x as f64 * 0.02, 3.0]) as f32;
            let green = 0.45 + n.abs() * 0.3;
            plants.push(Plant {
                base: vec2(x.clamp(config::WALL_WIDTH, tank.width - config::WALL_WIDTH), floor),
                height: rng.gen_range(60.0..150.0),
                sway_phase: rng.gen_range(0.0..std::f32::consts::TAU),
                color: Color::new(0.10, green, 0.25, 1.0),
                blades: rng.gen_range(3..6),
            });
        }

        let mut rocks = Vec::with_capacity(config::ROCK_COUNT);
        for _ in 0..config::ROCK_COUNT {
            let radius = rng.gen_range(14.0..36.0);
            let shade = rng.gen_range(0.30..0.48);
            rocks.push(Rock {
                pos: vec2(
                    rng.gen_range(config::WALL_WIDTH + radius..(tank.width - config::WALL_WIDTH - radius).max(config::WALL_WIDTH + radius + 1.0)),
                    floor - radius * 0.5,
                ),
                radius,
                color: Color::new(shade, shade * 1.02, shade * 1.1, 1.0),
            });
        }

        let mut bubbles = Vec::new();
        for column in 0..config::BUBBLE_COLUMN_COUNT {
            let lane = (column as f32 + 0.5) / config::BUBBLE_COLUMN_COUNT as f32;
            let x = lane * tank.width + rng.gen_range(-40.0..40.0);
            for _ in 0..config::BUBBLES_PER_COLUMN {
                bubbles.push(Bubble {
                    pos: vec2(x, rng.gen_range(config::PELLET_REST_DEPTH..floor)),
                    radius: rng.gen_range(1.5..4.0),
                    speed: rng.gen_range(0.4..1.1),
                    wobble: rng.gen_range(0.0..std::f32::consts::TAU),
                });
            }
        }

        Self {
            sand,
            plants,
            rocks,
            bubbles,
            caustic_seed: seed,
        }
    }

    /// Bubbles rise, wobble, and recycle near the floor once they break the
    /// surface band.
    pub fn update_bubbles(&mut self, tank: &Tank, rng: &mut impl Rng) {
        let floor = tank.height - config::WALL_WIDTH;
        for bubble in &mut self.bubbles {
            bubble.wobble += 0.08;
            bubble.pos.y -= bubble.speed;
            bubble.pos.x += bubble.wobble.sin() * 0.3;
            if bubble.pos.y < config::WALL_WIDTH + config::SURFACE_BAND * 0.5 {
                bubble.pos.y = rng.gen_range(floor - 30.0..floor);
                bubble.pos.x += rng.gen_range(-6.0..6.0);
            }
        }
    }

    /// Sand-bed height under an x coordinate.
    pub fn sand_height_at(&self, x: f32) -> f32 {
        let col = ((x / SAND_COLUMN_W) as usize).min(self.sand.len().saturating_sub(1));
        self.sand[col]
    }
}
