use macroquad::prelude::*;
use ::rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::behavior;
use crate::config;
use crate::daynight::TankClock;
use crate::decor::Decor;
use crate::eggs::{self, Egg};
use crate::fish::{Fish, FishArena};
use crate::lilypads::{self, LilyPad};
use crate::net::{self, NetEvent};
use crate::pellets::{self, Pellets};
use crate::physics;
use crate::species::Species;
use crate::tank::Tank;

/// What a pointer click means, decided by the caller from held modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickAction {
    DropPellet,
    SpawnFish,
    SwingNet,
}

/// The whole aquarium: every collection, the clock, the active net event,
/// and the RNG. All mutation goes through `step`, `handle_click`, and
/// `resize` — there are no ambient globals.
pub struct TankState {
    pub tank: Tank,
    pub fish: FishArena,
    pub eggs: Vec<Egg>,
    pub pellets: Pellets,
    pub pads: Vec<LilyPad>,
    pub net: Option<NetEvent>,
    pub clock: TankClock,
    pub decor: Option<Decor>,
    pub rng: ChaCha8Rng,
    pub frame: u64,
    pub paused: bool,
    /// Simulation steps per rendered frame.
    pub speed: u32,
    decor_seed: u32,
}

impl TankState {
    pub fn new(width: f32, height: f32, seed: u64, now_ms: f64) -> Self {
        let mut state = Self {
            tank: Tank::new(width, height),
            fish: FishArena::new(256),
            eggs: Vec::new(),
            pellets: Pellets::new(),
            pads: Vec::new(),
            net: None,
            clock: TankClock::new(now_ms),
            decor: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            frame: 0,
            paused: false,
            speed: 1,
            decor_seed: seed as u32,
        };
        state.populate();
        state
    }

    /// Seed the tank with a fresh school of random fish.
    fn populate(&mut self) {
        for _ in 0..config::INITIAL_FISH_COUNT {
            let species = Species::random_id(&mut self.rng);
            let pos = self.tank.random_point(30.0, &mut self.rng);
            let mut fish = Fish::spawn(species, pos, &mut self.rng);
            fish.pos = self.tank.clamp_fish(fish.pos, fish.size);
            self.fish.add(fish);
        }
    }

    /// One simulation frame. Physics advances one fixed unit per call;
    /// `now_ms` drives only the clock, pad drop-ins, and scoop removal.
    pub fn step(&mut self, now_ms: f64) {
        // An empty tank heals itself.
        if self.fish.count == 0 {
            self.populate();
        }

        let flip = self.clock.update(now_ms);

        lilypads::maybe_spawn(&mut self.pads, &self.tank, now_ms, &mut self.rng);
        lilypads::update_pads(&mut self.pads, now_ms);

        let laid = behavior::run_pass(
            &mut self.fish,
            &self.pellets,
            &self.tank,
            flip,
            self.clock.is_night,
            &mut self.rng,
        );
        self.eggs.extend(laid);

        physics::step_fish(&mut self.fish, &mut self.pellets, &self.tank, &mut self.rng);

        eggs::update_eggs(&mut self.eggs, &mut self.fish, &self.tank, &mut self.rng);
        self.pellets.update();
        net::update(&mut self.net, &mut self.fish, &self.tank, now_ms, &mut self.rng);

        // Deferred removals, after the whole pass.
        self.fish.sweep();
        self.pellets.sweep_eaten();

        match &mut self.decor {
            Some(decor) => decor.update_bubbles(&self.tank, &mut self.rng),
            None => {
                self.decor = Some(Decor::generate(&self.tank, self.decor_seed, &mut self.rng));
            }
        }

        self.frame += 1;
    }

    /// Pointer input, already mapped into tank space by the caller.
    pub fn handle_click(&mut self, point: Vec2, action: ClickAction) {
        match action {
            ClickAction::SwingNet => {
                net::try_start(&mut self.net, &self.tank, &mut self.rng);
            }
            ClickAction::SpawnFish => {
                if self.fish.count < config::MAX_FISH {
                    let species = Species::random_id(&mut self.rng);
                    let mut fish = Fish::spawn(species, point, &mut self.rng);
                    fish.pos = self.tank.clamp_fish(fish.pos, fish.size);
                    self.fish.add(fish);
                }
            }
            ClickAction::DropPellet => {
                self.pellets.drop_at(point, &mut self.rng);
                pellets::notify_fish(&mut self.fish, &self.pellets, &mut self.rng);
            }
        }
    }

    /// Viewport resize: new bounds, dropped decor cache, fish re-clamped.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.tank = Tank::new(width, height);
        self.decor = None;
        for idx in 0..self.fish.capacity() {
            if let Some(fish) = self.fish.get_mut_by_index(idx) {
                fish.pos = self.tank.clamp_fish(fish.pos, fish.size);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Behavior;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn run_frames(state: &mut TankState, frames: u64) {
        for f in 0..frames {
            state.step((state.frame + f) as f64 * FRAME_MS);
        }
    }

    #[test]
    fn long_run_keeps_every_fish_inside_the_glass() {
        let mut state = TankState::new(1280.0, 800.0, 42, 0.0);
        for frame in 0..3000u64 {
            state.step(frame as f64 * FRAME_MS);
            for (_, fish) in state.fish.iter_alive() {
                let (x_lo, x_hi) = state.tank.x_bounds(fish.size);
                let (y_lo, y_hi) = state.tank.y_bounds(fish.size);
                assert!(fish.pos.x >= x_lo && fish.pos.x <= x_hi);
                assert!(fish.pos.y >= y_lo && fish.pos.y <= y_hi);
            }
            assert!(state.pads.len() <= config::MAX_LILY_PADS);
        }
    }

    #[test]
    fn empty_tank_repopulates_itself() {
        let mut state = TankState::new(800.0, 600.0, 7, 0.0);
        for idx in 0..state.fish.capacity() {
            if let Some(fish) = state.fish.get_mut_by_index(idx) {
                fish.alive = false;
            }
        }
        state.fish.sweep();
        assert_eq!(state.fish.count, 0);

        state.step(0.0);
        assert_eq!(state.fish.count, config::INITIAL_FISH_COUNT);
    }

    #[test]
    fn click_drops_pellet_and_some_fish_notice() {
        let mut state = TankState::new(800.0, 600.0, 11, 0.0);
        state.handle_click(vec2(400.0, 400.0), ClickAction::DropPellet);
        assert_eq!(state.pellets.len(), 1);

        // The pellet is rising; fish that noticed hold LookForFood.
        let seekers = state
            .fish
            .iter_alive()
            .filter(|(_, f)| f.behavior == Behavior::LookForFood)
            .count();
        assert!(seekers <= state.fish.count);
    }

    #[test]
    fn net_click_is_rate_limited_to_one_event() {
        let mut state = TankState::new(800.0, 600.0, 13, 0.0);
        state.handle_click(vec2(0.0, 0.0), ClickAction::SwingNet);
        assert!(state.net.is_some());
        let first_pivot = state.net.as_ref().unwrap().pivot;

        state.handle_click(vec2(0.0, 0.0), ClickAction::SwingNet);
        assert_eq!(state.net.as_ref().unwrap().pivot, first_pivot);
    }

    #[test]
    fn spawn_click_lands_inside_bounds() {
        let mut state = TankState::new(800.0, 600.0, 17, 0.0);
        let before = state.fish.count;
        state.handle_click(vec2(-500.0, -500.0), ClickAction::SpawnFish);
        assert_eq!(state.fish.count, before + 1);

        for (_, fish) in state.fish.iter_alive() {
            let (x_lo, x_hi) = state.tank.x_bounds(fish.size);
            assert!(fish.pos.x >= x_lo && fish.pos.x <= x_hi);
        }
    }

    #[test]
    fn resize_reclamps_and_regenerates_decor() {
        let mut state = TankState::new(1280.0, 800.0, 19, 0.0);
        state.step(0.0);
        assert!(state.decor.is_some());

        state.resize(400.0, 300.0);
        assert!(state.decor.is_none());
        for (_, fish) in state.fish.iter_alive() {
            let (x_lo, x_hi) = state.tank.x_bounds(fish.size);
            let (y_lo, y_hi) = state.tank.y_bounds(fish.size);
            assert!(fish.pos.x >= x_lo && fish.pos.x <= x_hi);
            assert!(fish.pos.y >= y_lo && fish.pos.y <= y_hi);
        }

        state.step(FRAME_MS);
        assert!(state.decor.is_some());
    }

    #[test]
    fn night_fall_puts_sleepers_down_and_day_wakes_them() {
        let mut state = TankState::new(800.0, 600.0, 23, 0.0);
        let sleeper_count = state
            .fish
            .iter_alive()
            .filter(|(_, f)| f.sleeper)
            .count();
        assert!(sleeper_count > 0, "seed should produce at least one sleeper");

        // Run through dusk: day length plus the crossfade.
        let mut now = 0.0;
        while !state.clock.is_night {
            state.step(now);
            now += FRAME_MS;
        }
        state.step(now);
        for (_, fish) in state.fish.iter_alive() {
            if fish.sleeper {
                assert_eq!(fish.behavior, Behavior::Sleep);
            }
        }

        // And through dawn.
        while state.clock.is_night {
            state.step(now);
            now += FRAME_MS;
        }
        state.step(now);
        for (_, fish) in state.fish.iter_alive() {
            assert_ne!(fish.behavior, Behavior::Sleep);
        }
    }

    #[test]
    fn eaten_pellets_are_gone_before_the_next_frame() {
        let mut state = TankState::new(800.0, 600.0, 29, 0.0);
        state.handle_click(vec2(400.0, 400.0), ClickAction::DropPellet);

        run_frames(&mut state, 4000);
        // Either a fish ate it (swept) or it is still resting uneaten.
        for pellet in state.pellets.iter() {
            assert!(!pellet.eaten);
        }
    }
}
