use macroquad::prelude::*;
use ::rand::Rng;

use crate::config;
use crate::fish::{Fish, FishArena};
use crate::species::SpeciesId;
use crate::tank::Tank;

/// A fish egg drifting toward the sand bed. `hatch_timer` only ever counts
/// down; at zero the egg is replaced by exactly one fish of its species.
#[derive(Clone, Debug)]
pub struct Egg {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub hatch_timer: f32,
    pub species: SpeciesId,
}

impl Egg {
    pub fn spawn(species: SpeciesId, pos: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            pos,
            vel: vec2(rng.gen_range(-0.6..0.6), rng.gen_range(-0.4..0.2)),
            radius: rng.gen_range(config::EGG_RADIUS_MIN..config::EGG_RADIUS_MAX),
            hatch_timer: rng.gen_range(config::EGG_HATCH_MIN..config::EGG_HATCH_MAX),
            species,
        }
    }
}

/// Sink, bounce off the floor, count down, hatch.
pub fn update_eggs(eggs: &mut Vec<Egg>, arena: &mut FishArena, tank: &Tank, rng: &mut impl Rng) {
    for egg in eggs.iter_mut() {
        egg.vel *= config::EGG_DRAG;
        egg.vel.y += config::EGG_SINK_PULL;
        egg.pos += egg.vel;

        let floor = tank.floor_y(egg.radius);
        if egg.pos.y > floor {
            egg.pos.y = floor;
            egg.vel.y *= config::EGG_RESTITUTION;
        }
        let x_lo = config::WALL_WIDTH + egg.radius;
        let x_hi = (tank.width - config::WALL_WIDTH - egg.radius).max(x_lo);
        egg.pos.x = egg.pos.x.clamp(x_lo, x_hi);

        egg.hatch_timer -= 1.0;
    }

    let mut hatched = Vec::new();
    eggs.retain(|egg| {
        if egg.hatch_timer <= 0.0 {
            hatched.push((egg.species, egg.pos));
            false
        } else {
            true
        }
    });

    for (species, pos) in hatched {
        if arena.count < config::MAX_FISH {
            let mut fish = Fish::hatchling(species, pos, rng);
            fish.pos = tank.clamp_fish(fish.pos, fish.size);
            arena.add(fish);
        }
    }
}
