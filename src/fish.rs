use macroquad::prelude::*;
use ::rand::Rng;

use crate::behavior::Behavior;
use crate::config;
use crate::pellets::PelletId;
use crate::species::{Species, SpeciesId};

/// Stable handle to a fish. The generation field invalidates stale references,
/// so a `Target::Prey` pointing at an eaten-and-replaced fish resolves to None.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FishId {
    pub index: u32,
    pub generation: u32,
}

/// What a fish is steering toward. Liveness is checked before every
/// dereference: a pellet target must still be uneaten, a prey target must
/// still resolve to a living fish.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Target {
    None,
    Point(Vec2),
    Pellet(PelletId),
    Prey(FishId),
}

#[derive(Clone, Debug)]
pub struct Fish {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Color,
    /// true = facing left.
    pub flip: bool,
    pub behavior: Behavior,
    /// Frames remaining in the current behavior.
    pub behavior_timer: f32,
    pub target: Target,
    pub species: SpeciesId,
    pub sleeper: bool,
    /// Swim oscillation phase, advanced once per frame.
    pub phase: f32,
    pub scooped: bool,
    pub scooped_at_ms: f64,
    pub alive: bool,
}

impl Fish {
    /// Adult fish with randomized per-instance state.
    pub fn spawn(species_id: SpeciesId, pos: Vec2, rng: &mut impl Rng) -> Self {
        let species = Species::get(species_id);
        Self::with_size(species_id, pos, species.random_size(rng), rng)
    }

    /// Freshly hatched juvenile of the parent's species.
    pub fn hatchling(species_id: SpeciesId, pos: Vec2, rng: &mut impl Rng) -> Self {
        let species = Species::get(species_id);
        Self::with_size(species_id, pos, species.hatchling_size(rng), rng)
    }

    fn with_size(species_id: SpeciesId, pos: Vec2, size: f32, rng: &mut impl Rng) -> Self {
        let species = Species::get(species_id);
        let flip = rng.gen_bool(0.5);
        Self {
            pos,
            vel: vec2(rng.gen_range(-0.4..0.4), rng.gen_range(-0.2..0.2)),
            size,
            color: species.color(rng),
            flip,
            behavior: Behavior::Float,
            behavior_timer: Behavior::Float.roll_timer(rng),
            target: Target::None,
            species: species_id,
            sleeper: species.roll_sleeper(rng),
            phase: rng.gen_range(0.0..std::f32::consts::TAU),
            scooped: false,
            scooped_at_ms: 0.0,
            alive: true,
        }
    }

    pub fn species(&self) -> &'static Species {
        Species::get(self.species)
    }

    pub fn is_predator(&self) -> bool {
        self.species().predator
    }

    /// +1 facing right, -1 facing left.
    pub fn facing_dir(&self) -> f32 {
        if self.flip {
            -1.0
        } else {
            1.0
        }
    }

    /// Distance under which this fish consumes a pellet of the given radius.
    pub fn eat_radius(&self, pellet_radius: f32) -> f32 {
        self.size * config::EAT_RADIUS_FACTOR + pellet_radius + config::EAT_SLACK
    }

    /// Reach of a predator's bite.
    pub fn predation_reach(&self) -> f32 {
        (self.size * config::EAT_RADIUS_FACTOR).max(config::PREDATION_MIN_REACH)
    }
}

/// Generational storage for the tank's fish. Handles stay valid across
/// unrelated removals; removal itself is deferred (mark `alive = false`,
/// then `sweep` after the frame's full pass).
pub struct FishArena {
    slots: Vec<Option<Fish>>,
    generations: Vec<u32>,
    free: Vec<u32>,
    pub count: usize,
}

impl FishArena {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            generations: vec![0; capacity],
            free: (0..capacity as u32).rev().collect(),
            count: 0,
        }
    }

    pub fn add(&mut self, fish: Fish) -> FishId {
        if let Some(index) = self.free.pop() {
            let idx = index as usize;
            self.slots[idx] = Some(fish);
            self.count += 1;
            FishId {
                index,
                generation: self.generations[idx],
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Some(fish));
            self.generations.push(0);
            self.count += 1;
            FishId {
                index,
                generation: 0,
            }
        }
    }

    pub fn get(&self, id: FishId) -> Option<&Fish> {
        let idx = id.index as usize;
        if idx < self.slots.len() && self.generations[idx] == id.generation {
            self.slots[idx].as_ref()
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, id: FishId) -> Option<&mut Fish> {
        let idx = id.index as usize;
        if idx < self.slots.len() && self.generations[idx] == id.generation {
            self.slots[idx].as_mut()
        } else {
            None
        }
    }

    /// Resolve a prey handle: Some only while the fish is still alive and
    /// not already riding the net.
    pub fn live_prey(&self, id: FishId) -> Option<&Fish> {
        self.get(id).filter(|f| f.alive && !f.scooped)
    }

    pub fn get_by_index(&self, index: usize) -> Option<&Fish> {
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    pub fn get_mut_by_index(&mut self, index: usize) -> Option<&mut Fish> {
        self.slots.get_mut(index).and_then(|s| s.as_mut())
    }

    pub fn id_at(&self, index: usize) -> FishId {
        FishId {
            index: index as u32,
            generation: self.generations[index],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Iterate over (index, &Fish) for all living fish.
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, &Fish)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.as_ref()
                .and_then(|f| if f.alive { Some((i, f)) } else { None })
        })
    }

    /// Nearest living fish matching the predicate, by squared distance.
    pub fn nearest_where(
        &self,
        from: Vec2,
        exclude: usize,
        mut pred: impl FnMut(&Fish) -> bool,
    ) -> Option<FishId> {
        let mut best: Option<(f32, FishId)> = None;
        for (idx, fish) in self.iter_alive() {
            if idx == exclude || !pred(fish) {
                continue;
            }
            let dist_sq = (fish.pos - from).length_squared();
            if best.map_or(true, |(d, _)| dist_sq < d) {
                best = Some((dist_sq, self.id_at(idx)));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Remove fish marked dead and reclaim their slots.
    pub fn sweep(&mut self) -> Vec<Vec2> {
        let mut removed = Vec::new();
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if let Some(fish) = slot {
                if !fish.alive {
                    removed.push(fish.pos);
                    *slot = None;
                    self.generations[idx] += 1;
                    self.free.push(idx as u32);
                    self.count -= 1;
                }
            }
        }
        removed
    }
}
