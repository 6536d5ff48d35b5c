use macroquad::prelude::*;
use ::rand::Rng;

use crate::config;
use crate::tank::Tank;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BugKind {
    Beetle,
    Dragonfly,
    Ladybug,
}

/// Pads carry at most one decoration; the bug roll wins over the flower roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decoration {
    Bug(BugKind),
    Flower,
}

#[derive(Clone, Debug)]
pub struct LilyPad {
    pub pos: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub skew: f32,
    pub color: Color,
    pub vein_angle: f32,
    pub decoration: Option<Decoration>,
    pub spawned_at_ms: f64,
    pub animating: bool,
    pub start_y: f32,
    pub rest_y: f32,
}

impl LilyPad {
    pub fn spawn(tank: &Tank, now_ms: f64, rng: &mut impl Rng) -> Self {
        let size = rng.gen_range(26.0..52.0);
        let margin = config::WALL_WIDTH + size;
        let x = rng.gen_range(margin..(tank.width - margin).max(margin + 1.0));
        let rest_y = config::WALL_WIDTH + config::SURFACE_BAND * 0.45;
        let green = rng.gen_range(0.45..0.70);

        let decoration = if rng.gen_bool(config::PAD_BUG_CHANCE) {
            let bug = match rng.gen_range(0..3) {
                0 => BugKind::Beetle,
                1 => BugKind::Dragonfly,
                _ => BugKind::Ladybug,
            };
            Some(Decoration::Bug(bug))
        } else if rng.gen_bool(config::PAD_FLOWER_CHANCE) {
            Some(Decoration::Flower)
        } else {
            None
        };

        Self {
            pos: vec2(x, -size * 2.0),
            size,
            rotation: rng.gen_range(0.0..std::f32::consts::TAU),
            skew: rng.gen_range(0.55..0.8),
            color: Color::new(green * 0.35, green, green * 0.45, 1.0),
            vein_angle: rng.gen_range(0.0..std::f32::consts::TAU),
            decoration,
            spawned_at_ms: now_ms,
            animating: true,
            start_y: -size * 2.0,
            rest_y,
        }
    }

    /// Cubic ease-out with a decaying bounce, used for the 700 ms drop-in.
    fn drop_ease(u: f32) -> f32 {
        let settle = 1.0 - (1.0 - u).powi(3);
        let bounce = (u * std::f32::consts::PI * 3.0).sin() * (1.0 - u).powi(2) * 0.18;
        settle + bounce
    }

    pub fn update(&mut self, now_ms: f64) {
        if !self.animating {
            return;
        }
        let u = ((now_ms - self.spawned_at_ms) / config::PAD_DROP_MS).clamp(0.0, 1.0) as f32;
        self.pos.y = self.start_y + (self.rest_y - self.start_y) * Self::drop_ease(u);
        if u >= 1.0 {
            self.pos.y = self.rest_y;
            self.animating = false;
        }
    }
}

/// Low per-frame spawn chance, hard-capped at MAX_LILY_PADS.
pub fn maybe_spawn(pads: &mut Vec<LilyPad>, tank: &Tank, now_ms: f64, rng: &mut impl Rng) {
    if pads.len() < config::MAX_LILY_PADS && rng.gen_bool(config::LILY_PAD_SPAWN_CHANCE) {
        pads.push(LilyPad::spawn(tank, now_ms, rng));
    }
}

pub fn update_pads(pads: &mut [LilyPad], now_ms: f64) {
    for pad in pads {
        pad.update(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn pad_count_never_exceeds_cap() {
        let tank = Tank::new(800.0, 600.0);
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut pads = Vec::new();
        for frame in 0..2_000_000u64 {
            maybe_spawn(&mut pads, &tank, frame as f64 * 16.0, &mut rng);
            assert!(pads.len() <= config::MAX_LILY_PADS);
        }
        assert_eq!(pads.len(), config::MAX_LILY_PADS);
    }

    #[test]
    fn drop_in_starts_offscreen_and_settles_at_rest() {
        let tank = Tank::new(800.0, 600.0);
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut pad = LilyPad::spawn(&tank, 1_000.0, &mut rng);
        assert!(pad.animating);
        assert!(pad.pos.y < 0.0);

        pad.update(1_000.0);
        assert_eq!(pad.pos.y, pad.start_y);

        pad.update(1_000.0 + config::PAD_DROP_MS);
        assert_eq!(pad.pos.y, pad.rest_y);
        assert!(!pad.animating);

        // Settled pads stay put.
        pad.update(1_000.0 + config::PAD_DROP_MS * 4.0);
        assert_eq!(pad.pos.y, pad.rest_y);
    }

    #[test]
    fn ease_endpoints_are_exact() {
        assert_eq!(LilyPad::drop_ease(0.0), 0.0);
        assert!((LilyPad::drop_ease(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn decorations_are_mutually_exclusive_and_roughly_distributed() {
        let tank = Tank::new(800.0, 600.0);
        let mut rng = ChaCha8Rng::seed_from_u64(33);
        let mut bugs = 0usize;
        let mut flowers = 0usize;
        let total = 5_000;
        for _ in 0..total {
            match LilyPad::spawn(&tank, 0.0, &mut rng).decoration {
                Some(Decoration::Bug(_)) => bugs += 1,
                Some(Decoration::Flower) => flowers += 1,
                None => {}
            }
        }
        let bug_rate = bugs as f64 / total as f64;
        // 10% flower chance applies only to the 80% of pads with no bug.
        let flower_rate = flowers as f64 / total as f64;
        assert!((0.17..0.23).contains(&bug_rate), "bug rate {bug_rate}");
        assert!((0.05..0.11).contains(&flower_rate), "flower rate {flower_rate}");
    }
}
