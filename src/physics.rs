use macroquad::prelude::*;
use ::rand::Rng;

use crate::behavior::Behavior;
use crate::config;
use crate::fish::{FishArena, Target};
use crate::pellets::Pellets;
use crate::tank::Tank;

/// Per-behavior velocity, integration, and boundary bounce for every fish.
/// Reaching a pellet's eat radius marks it eaten here; scooped fish are
/// skipped (they ride the net).
pub fn step_fish(arena: &mut FishArena, pellets: &mut Pellets, tank: &Tank, rng: &mut impl Rng) {
    for idx in 0..arena.capacity() {
        // Resolve the prey position before taking the mutable borrow.
        let prey_pos = match arena
            .get_by_index(idx)
            .filter(|f| f.alive && !f.scooped)
            .map(|f| f.target)
        {
            Some(Target::Prey(id)) => arena.live_prey(id).map(|p| p.pos),
            Some(_) => None,
            None => continue,
        };

        let fish = arena.get_mut_by_index(idx).unwrap();
        fish.phase += 0.15;

        match fish.behavior {
            Behavior::Sleep => {
                fish.vel = Vec2::ZERO;
            }
            Behavior::Float => {
                fish.vel.x += rng.gen_range(-config::FLOAT_JITTER..config::FLOAT_JITTER);
                fish.vel.y += rng.gen_range(-config::FLOAT_JITTER..config::FLOAT_JITTER);
            }
            Behavior::Swim => {
                let speed = (fish.vel.x.abs() + config::SWIM_ACCEL).min(config::SWIM_MAX_SPEED);
                fish.vel.x = speed * fish.facing_dir();
                fish.vel.y = config::SWIM_BOB_AMPLITUDE * fish.phase.sin();
            }
            Behavior::Explore => {
                if let Target::Point(point) = fish.target {
                    let delta = point - fish.pos;
                    if delta.length() < config::STEER_DEADZONE {
                        fish.vel = Vec2::ZERO;
                    } else {
                        let dir = delta.normalize();
                        fish.vel.x = dir.x * config::EXPLORE_GAIN_X;
                        fish.vel.y = dir.y * config::EXPLORE_GAIN_Y;
                    }
                } else {
                    fish.vel = Vec2::ZERO;
                }
            }
            Behavior::LookForFood => match fish.target {
                Target::Pellet(id) => {
                    if let Some(pellet) = pellets.live(id) {
                        let pellet_pos = pellet.pos;
                        let pellet_radius = pellet.radius;
                        let delta = pellet_pos - fish.pos;
                        let dist = delta.length();
                        if dist < fish.eat_radius(pellet_radius) {
                            pellets.get_mut(id).unwrap().eaten = true;
                            fish.vel = Vec2::ZERO;
                        } else if dist < config::STEER_DEADZONE {
                            fish.vel = Vec2::ZERO;
                        } else {
                            let dir = delta / dist;
                            fish.vel.x = dir.x * config::FOOD_GAIN_X
                                + rng.gen_range(-config::FLOAT_JITTER..config::FLOAT_JITTER);
                            fish.vel.y = dir.y * config::FOOD_GAIN_Y
                                + rng.gen_range(-config::FLOAT_JITTER..config::FLOAT_JITTER);
                        }
                    } else {
                        drift(fish, rng);
                    }
                }
                Target::Prey(_) => {
                    if let Some(point) = prey_pos {
                        let delta = point - fish.pos;
                        let dist = delta.length();
                        if dist < config::STEER_DEADZONE {
                            fish.vel = Vec2::ZERO;
                        } else {
                            let dir = delta / dist;
                            fish.vel.x = dir.x * config::FOOD_GAIN_X
                                + rng.gen_range(-config::FLOAT_JITTER..config::FLOAT_JITTER);
                            fish.vel.y = dir.y * config::FOOD_GAIN_Y
                                + rng.gen_range(-config::FLOAT_JITTER..config::FLOAT_JITTER);
                        }
                    } else {
                        drift(fish, rng);
                    }
                }
                _ => drift(fish, rng),
            },
        }

        // Swimming against the facing direction is slow.
        if fish.behavior != Behavior::Sleep
            && fish.vel.x != 0.0
            && fish.vel.x.signum() != fish.facing_dir()
        {
            fish.vel.x *= config::BACKWARD_SWIM_DAMP;
        }

        fish.pos += fish.vel;
        if fish.behavior != Behavior::Sleep {
            fish.pos.y += config::AMBIENT_BOB_AMPLITUDE * (fish.phase * 0.5).sin();
        }

        let (x_lo, x_hi) = tank.x_bounds(fish.size);
        if fish.pos.x < x_lo {
            fish.pos.x = x_lo;
            fish.vel.x = fish.vel.x.abs();
            fish.flip = false;
        } else if fish.pos.x > x_hi {
            fish.pos.x = x_hi;
            fish.vel.x = -fish.vel.x.abs();
            fish.flip = true;
        }

        let (y_lo, y_hi) = tank.y_bounds(fish.size);
        if fish.pos.y < y_lo {
            fish.pos.y = y_lo;
            fish.vel.y = fish.vel.y.abs();
        } else if fish.pos.y > y_hi {
            fish.pos.y = y_hi;
            fish.vel.y = -fish.vel.y.abs();
        }
    }
}

fn drift(fish: &mut crate::fish::Fish, rng: &mut impl Rng) {
    fish.vel.x += rng.gen_range(-config::FLOAT_JITTER..config::FLOAT_JITTER);
    fish.vel.y += rng.gen_range(-config::FLOAT_JITTER..config::FLOAT_JITTER);
}
