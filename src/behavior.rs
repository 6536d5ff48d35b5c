use macroquad::prelude::*;
use ::rand::Rng;

use crate::config;
use crate::daynight::DayNightFlip;
use crate::eggs::Egg;
use crate::fish::{FishArena, Target};
use crate::pellets::Pellets;
use crate::species::Species;
use crate::tank::Tank;

/// Closed set of fish behaviors. Transitions happen on timer expiry or on
/// an external override (night sleep, pellet drop, predation completion).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behavior {
    Sleep,
    Float,
    Swim,
    Explore,
    LookForFood,
}

impl Behavior {
    /// Behaviors a fish can wake into or re-select.
    pub const ACTIVE: [Behavior; 4] = [
        Behavior::Float,
        Behavior::Swim,
        Behavior::Explore,
        Behavior::LookForFood,
    ];

    pub fn roll_timer(self, rng: &mut impl Rng) -> f32 {
        match self {
            Behavior::Float => rng.gen_range(config::FLOAT_TIMER_MIN..config::FLOAT_TIMER_MAX),
            _ => rng.gen_range(config::ACTIVE_TIMER_MIN..config::ACTIVE_TIMER_MAX),
        }
    }
}

/// Pick a steering target for a freshly selected behavior.
fn pick_target(
    next: Behavior,
    arena: &FishArena,
    idx: usize,
    pos: Vec2,
    size: f32,
    predator: bool,
    pellets: &Pellets,
    tank: &Tank,
    rng: &mut impl Rng,
) -> Target {
    match next {
        Behavior::LookForFood => acquire_look_target(arena, idx, pos, predator, pellets),
        Behavior::Explore => Target::Point(tank.random_point(size, rng)),
        _ => Target::None,
    }
}

/// Nearest uneaten pellet, else nearest non-predator fish for a predator.
fn acquire_look_target(
    arena: &FishArena,
    idx: usize,
    pos: Vec2,
    predator: bool,
    pellets: &Pellets,
) -> Target {
    if let Some(pellet_id) = pellets.nearest_uneaten(pos) {
        return Target::Pellet(pellet_id);
    }
    if predator {
        if let Some(prey) = arena.nearest_where(pos, idx, |f| !f.is_predator() && !f.scooped) {
            return Target::Prey(prey);
        }
    }
    Target::None
}

fn target_is_live(target: Target, arena: &FishArena, pellets: &Pellets) -> bool {
    match target {
        Target::Pellet(id) => pellets.live(id).is_some(),
        Target::Prey(id) => arena
            .live_prey(id)
            .map(|prey| !prey.is_predator())
            .unwrap_or(false),
        _ => false,
    }
}

/// One behavior pass over every fish: sleep override, predation, target
/// upkeep, timer expiry with egg laying and re-selection. Eaten fish are
/// only marked here; the arena sweep runs after the frame's full pass.
/// Returns eggs laid this frame.
pub fn run_pass(
    arena: &mut FishArena,
    pellets: &Pellets,
    tank: &Tank,
    flip: Option<DayNightFlip>,
    is_night: bool,
    rng: &mut impl Rng,
) -> Vec<Egg> {
    let mut eggs_laid = Vec::new();

    if flip == Some(DayNightFlip::ToDay) {
        wake_sleepers(arena, pellets, tank, rng);
    }

    for idx in 0..arena.capacity() {
        let Some((pos, size, predator, sleeper, behavior, target, species_id)) = arena
            .get_by_index(idx)
            .filter(|f| f.alive && !f.scooped)
            .map(|f| {
                (
                    f.pos,
                    f.size,
                    f.is_predator(),
                    f.sleeper,
                    f.behavior,
                    f.target,
                    f.species,
                )
            })
        else {
            continue;
        };

        if is_night && sleeper {
            let fish = arena.get_mut_by_index(idx).unwrap();
            fish.behavior = Behavior::Sleep;
            fish.behavior_timer = f32::INFINITY;
            fish.target = Target::None;
            continue;
        }

        // Self-heal: a daytime sleeper that somehow missed the wake flip
        // falls through to normal re-selection.
        if !is_night && behavior == Behavior::Sleep {
            arena.get_mut_by_index(idx).unwrap().behavior_timer = 0.0;
        }

        if predator && behavior == Behavior::LookForFood {
            let reach = arena.get_by_index(idx).unwrap().predation_reach();
            let max_prey_size = size / config::PREDATION_SIZE_RATIO;
            let kills: Vec<usize> = arena
                .iter_alive()
                .filter(|(other_idx, prey)| {
                    *other_idx != idx
                        && !prey.is_predator()
                        && !prey.scooped
                        && prey.size < max_prey_size
                        && (prey.pos - pos).length() < reach
                })
                .map(|(other_idx, _)| other_idx)
                .collect();

            if !kills.is_empty() {
                for kill_idx in kills {
                    if let Some(prey) = arena.get_mut_by_index(kill_idx) {
                        prey.alive = false;
                    }
                }
                let fish = arena.get_mut_by_index(idx).unwrap();
                fish.behavior = Behavior::Float;
                fish.behavior_timer = Behavior::Float.roll_timer(rng);
                fish.target = Target::None;
                continue;
            }
        }

        if behavior == Behavior::LookForFood {
            let current = if target_is_live(target, arena, pellets) {
                target
            } else {
                acquire_look_target(arena, idx, pos, predator, pellets)
            };
            let fish = arena.get_mut_by_index(idx).unwrap();
            fish.target = current;
            if current != Target::None {
                fish.behavior_timer = config::LOOK_TIMER_HOLD;
            }
        }

        let expired = {
            let fish = arena.get_mut_by_index(idx).unwrap();
            fish.behavior_timer -= 1.0;
            fish.behavior_timer <= 0.0
        };
        if !expired {
            continue;
        }

        if rng.gen::<f32>() < config::EGG_LAYING_PROBABILITY && arena.count < config::MAX_FISH {
            let species = Species::get(species_id);
            let clutch = species.clutch_size(rng);
            for _ in 0..clutch {
                eggs_laid.push(Egg::spawn(species_id, pos, rng));
            }
        }

        let food_available = pellets.any_uneaten();
        let prey_available = predator
            && arena
                .iter_alive()
                .any(|(other_idx, f)| other_idx != idx && !f.is_predator() && !f.scooped);

        let mut choices = [Behavior::Float, Behavior::Swim, Behavior::Explore].to_vec();
        if food_available || prey_available {
            choices.push(Behavior::LookForFood);
        }
        let next = choices[rng.gen_range(0..choices.len())];
        let next_target = pick_target(next, arena, idx, pos, size, predator, pellets, tank, rng);

        let fish = arena.get_mut_by_index(idx).unwrap();
        fish.behavior = next;
        fish.behavior_timer = next.roll_timer(rng);
        fish.target = next_target;
    }

    eggs_laid
}

/// On the night-to-day flip, every sleeping fish picks a fresh behavior.
fn wake_sleepers(arena: &mut FishArena, pellets: &Pellets, tank: &Tank, rng: &mut impl Rng) {
    for idx in 0..arena.capacity() {
        let Some((pos, size, predator)) = arena
            .get_by_index(idx)
            .filter(|f| f.alive && !f.scooped && f.behavior == Behavior::Sleep)
            .map(|f| (f.pos, f.size, f.is_predator()))
        else {
            continue;
        };

        let next = Behavior::ACTIVE[rng.gen_range(0..Behavior::ACTIVE.len())];
        let next_target = pick_target(next, arena, idx, pos, size, predator, pellets, tank, rng);

        let fish = arena.get_mut_by_index(idx).unwrap();
        fish.behavior = next;
        fish.behavior_timer = rng.gen_range(config::ACTIVE_TIMER_MIN..config::ACTIVE_TIMER_MAX);
        fish.target = next_target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fish::Fish;
    use crate::species::SpeciesId;
    use ::rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const STURGEON: SpeciesId = SpeciesId(7);
    const GOLDFISH: SpeciesId = SpeciesId(0);

    fn fixture() -> (Tank, Pellets, ChaCha8Rng) {
        (Tank::new(800.0, 600.0), Pellets::new(), ChaCha8Rng::seed_from_u64(3))
    }

    fn spawn_sized(
        arena: &mut FishArena,
        species: SpeciesId,
        pos: Vec2,
        size: f32,
        rng: &mut ChaCha8Rng,
    ) -> crate::fish::FishId {
        let mut fish = Fish::spawn(species, pos, rng);
        fish.size = size;
        arena.add(fish)
    }

    #[test]
    fn sturgeon_eats_smaller_prey_and_resets_to_float() {
        let (tank, pellets, mut rng) = fixture();
        let mut arena = FishArena::new(8);
        let pred = spawn_sized(&mut arena, STURGEON, vec2(200.0, 200.0), 50.0, &mut rng);
        let prey = spawn_sized(&mut arena, GOLDFISH, vec2(210.0, 200.0), 20.0, &mut rng);

        {
            let f = arena.get_mut(pred).unwrap();
            f.behavior = Behavior::LookForFood;
            f.behavior_timer = 100.0;
            f.target = Target::Prey(prey);
        }

        run_pass(&mut arena, &pellets, &tank, None, false, &mut rng);

        assert!(!arena.get(prey).unwrap().alive);
        assert_eq!(arena.get(pred).unwrap().behavior, Behavior::Float);
    }

    #[test]
    fn sturgeon_never_eats_another_sturgeon() {
        let (tank, pellets, mut rng) = fixture();
        let mut arena = FishArena::new(8);
        let pred = spawn_sized(&mut arena, STURGEON, vec2(200.0, 200.0), 60.0, &mut rng);
        let other = spawn_sized(&mut arena, STURGEON, vec2(205.0, 200.0), 30.0, &mut rng);

        {
            let f = arena.get_mut(pred).unwrap();
            f.behavior = Behavior::LookForFood;
            f.behavior_timer = 100.0;
        }

        run_pass(&mut arena, &pellets, &tank, None, false, &mut rng);
        assert!(arena.get(other).unwrap().alive);
    }

    #[test]
    fn prey_close_in_size_is_spared() {
        let (tank, pellets, mut rng) = fixture();
        let mut arena = FishArena::new(8);
        let pred = spawn_sized(&mut arena, STURGEON, vec2(200.0, 200.0), 30.0, &mut rng);
        // 30 / 0.7 ≈ 42.9, so a fish of size 43 is too big to swallow.
        let big = spawn_sized(&mut arena, GOLDFISH, vec2(205.0, 200.0), 43.0, &mut rng);

        {
            let f = arena.get_mut(pred).unwrap();
            f.behavior = Behavior::LookForFood;
            f.behavior_timer = 100.0;
        }

        run_pass(&mut arena, &pellets, &tank, None, false, &mut rng);
        assert!(arena.get(big).unwrap().alive);
        assert_eq!(arena.get(pred).unwrap().behavior, Behavior::LookForFood);
    }

    #[test]
    fn night_forces_sleepers_down_and_day_flip_wakes_them() {
        let (tank, pellets, mut rng) = fixture();
        let mut arena = FishArena::new(4);
        let id = spawn_sized(&mut arena, GOLDFISH, vec2(300.0, 300.0), 20.0, &mut rng);
        arena.get_mut(id).unwrap().sleeper = true;

        run_pass(&mut arena, &pellets, &tank, None, true, &mut rng);
        let fish = arena.get(id).unwrap();
        assert_eq!(fish.behavior, Behavior::Sleep);
        assert!(fish.behavior_timer.is_infinite());

        run_pass(
            &mut arena,
            &pellets,
            &tank,
            Some(DayNightFlip::ToDay),
            false,
            &mut rng,
        );
        let fish = arena.get(id).unwrap();
        assert_ne!(fish.behavior, Behavior::Sleep);
        assert!(fish.behavior_timer.is_finite());
    }

    #[test]
    fn look_for_food_unavailable_without_pellets_or_prey() {
        let (tank, pellets, mut rng) = fixture();
        let mut arena = FishArena::new(4);
        let id = spawn_sized(&mut arena, GOLDFISH, vec2(300.0, 300.0), 20.0, &mut rng);

        for _ in 0..200 {
            arena.get_mut(id).unwrap().behavior_timer = 0.5;
            run_pass(&mut arena, &pellets, &tank, None, false, &mut rng);
            assert_ne!(arena.get(id).unwrap().behavior, Behavior::LookForFood);
        }
    }

    #[test]
    fn look_timer_held_while_target_is_live() {
        let (tank, mut pellets, mut rng) = fixture();
        let pellet = pellets.drop_at(vec2(400.0, 300.0), &mut rng);
        let mut arena = FishArena::new(4);
        let id = spawn_sized(&mut arena, GOLDFISH, vec2(300.0, 300.0), 20.0, &mut rng);
        {
            let f = arena.get_mut(id).unwrap();
            f.behavior = Behavior::LookForFood;
            f.behavior_timer = 500.0;
            f.target = Target::Pellet(pellet);
        }

        run_pass(&mut arena, &pellets, &tank, None, false, &mut rng);
        let fish = arena.get(id).unwrap();
        assert_eq!(fish.behavior, Behavior::LookForFood);
        assert_eq!(fish.behavior_timer, config::LOOK_TIMER_HOLD - 1.0);
    }

    #[test]
    fn stale_pellet_target_is_reacquired() {
        let (tank, mut pellets, mut rng) = fixture();
        let stale = pellets.drop_at(vec2(400.0, 300.0), &mut rng);
        let fresh = pellets.drop_at(vec2(320.0, 300.0), &mut rng);
        pellets.get_mut(stale).unwrap().eaten = true;

        let mut arena = FishArena::new(4);
        let id = spawn_sized(&mut arena, GOLDFISH, vec2(300.0, 300.0), 20.0, &mut rng);
        {
            let f = arena.get_mut(id).unwrap();
            f.behavior = Behavior::LookForFood;
            f.behavior_timer = 500.0;
            f.target = Target::Pellet(stale);
        }

        run_pass(&mut arena, &pellets, &tank, None, false, &mut rng);
        assert_eq!(arena.get(id).unwrap().target, Target::Pellet(fresh));
    }

    #[test]
    fn egg_laying_eventually_fires_with_species_clutch() {
        let (tank, pellets, mut rng) = fixture();
        let mut arena = FishArena::new(4);
        let id = spawn_sized(&mut arena, SpeciesId(6), vec2(300.0, 300.0), 15.0, &mut rng);

        let mut all_eggs = Vec::new();
        for _ in 0..100_000 {
            arena.get_mut(id).unwrap().behavior_timer = 0.5;
            all_eggs.extend(run_pass(&mut arena, &pellets, &tank, None, false, &mut rng));
            if !all_eggs.is_empty() {
                break;
            }
        }

        // Eyeball Fish clutches are 18-27 eggs.
        assert!((18..=27).contains(&all_eggs.len()));
        assert!(all_eggs.iter().all(|egg| egg.species == SpeciesId(6)));
    }
}
