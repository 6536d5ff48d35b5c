use macroquad::prelude::*;
use ::rand::Rng;

use crate::behavior::Behavior;
use crate::config;
use crate::fish::{FishArena, Target};

/// Monotonic pellet handle. Eaten or swept pellets never resolve again.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PelletId(pub u64);

#[derive(Clone, Debug)]
pub struct FoodPellet {
    pub id: PelletId,
    pub pos: Vec2,
    pub radius: f32,
    pub vy: f32,
    pub eaten: bool,
}

/// The tank's food pellets. Eaten pellets go inert immediately and are
/// filtered out at the end of the frame, before the next render pass.
pub struct Pellets {
    items: Vec<FoodPellet>,
    next_id: u64,
}

impl Pellets {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
        }
    }

    /// Drop a pellet at a point; it will rise toward the surface rest depth.
    pub fn drop_at(&mut self, pos: Vec2, rng: &mut impl Rng) -> PelletId {
        let id = PelletId(self.next_id);
        self.next_id += 1;
        self.items.push(FoodPellet {
            id,
            pos,
            radius: rng.gen_range(config::PELLET_RADIUS_MIN..config::PELLET_RADIUS_MAX),
            vy: -config::PELLET_RISE_SPEED * rng.gen_range(0.8..1.2),
            eaten: false,
        });
        id
    }

    /// Resolve a pellet handle, but only while it is still uneaten.
    pub fn live(&self, id: PelletId) -> Option<&FoodPellet> {
        self.items.iter().find(|p| p.id == id && !p.eaten)
    }

    pub fn get_mut(&mut self, id: PelletId) -> Option<&mut FoodPellet> {
        self.items.iter_mut().find(|p| p.id == id)
    }

    pub fn any_uneaten(&self) -> bool {
        self.items.iter().any(|p| !p.eaten)
    }

    pub fn nearest_uneaten(&self, from: Vec2) -> Option<PelletId> {
        self.items
            .iter()
            .filter(|p| !p.eaten)
            .min_by(|a, b| {
                let da = (a.pos - from).length_squared();
                let db = (b.pos - from).length_squared();
                da.total_cmp(&db)
            })
            .map(|p| p.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FoodPellet> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rise toward the surface and stop at the rest depth.
    pub fn update(&mut self) {
        for pellet in &mut self.items {
            if pellet.eaten || pellet.vy == 0.0 {
                continue;
            }
            pellet.pos.y += pellet.vy;
            pellet.vy *= 0.995;
            if pellet.pos.y <= config::PELLET_REST_DEPTH {
                pellet.pos.y = config::PELLET_REST_DEPTH;
                pellet.vy = 0.0;
            }
        }
    }

    /// Drop eaten pellets from the collection.
    pub fn sweep_eaten(&mut self) {
        self.items.retain(|p| !p.eaten);
    }
}

/// A newly dropped pellet gives each active fish a one-time 25% chance to
/// break off and go after food.
pub fn notify_fish(arena: &mut FishArena, pellets: &Pellets, rng: &mut impl Rng) {
    for idx in 0..arena.capacity() {
        let Some(pos) = arena
            .get_by_index(idx)
            .filter(|f| f.alive && !f.scooped && f.behavior != Behavior::Sleep)
            .map(|f| f.pos)
        else {
            continue;
        };
        if !rng.gen_bool(config::PELLET_NOTICE_CHANCE) {
            continue;
        }
        let Some(target) = pellets.nearest_uneaten(pos) else {
            return;
        };
        let fish = arena.get_mut_by_index(idx).unwrap();
        fish.behavior = Behavior::LookForFood;
        fish.behavior_timer = config::LOOK_TIMER_HOLD;
        fish.target = Target::Pellet(target);
    }
}
