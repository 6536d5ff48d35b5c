use macroquad::prelude::*;

use crate::config;

/// Reported once, at the completion of a crossfade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayNightFlip {
    ToDay,
    ToNight,
}

#[derive(Clone, Copy, Debug)]
struct Transition {
    start_ms: f64,
    from_night: bool,
}

/// Background gradient endpoints (top, bottom).
pub const DAY_GRADIENT: (Color, Color) = (
    Color::new(0.35, 0.71, 0.87, 1.0),
    Color::new(0.05, 0.23, 0.42, 1.0),
);
pub const NIGHT_GRADIENT: (Color, Color) = (
    Color::new(0.05, 0.09, 0.22, 1.0),
    Color::new(0.01, 0.03, 0.09, 1.0),
);

/// Two-state day/night machine with a linear crossfade substate. The flag
/// flips exactly once per transition, at its completion.
pub struct TankClock {
    pub is_night: bool,
    last_switch_ms: f64,
    transition: Option<Transition>,
}

impl TankClock {
    pub fn new(now_ms: f64) -> Self {
        Self {
            is_night: false,
            last_switch_ms: now_ms,
            transition: None,
        }
    }

    pub fn update(&mut self, now_ms: f64) -> Option<DayNightFlip> {
        if let Some(tr) = self.transition {
            if now_ms - tr.start_ms >= config::TRANSITION_MS {
                self.is_night = !tr.from_night;
                self.last_switch_ms = now_ms;
                self.transition = None;
                return Some(if self.is_night {
                    DayNightFlip::ToNight
                } else {
                    DayNightFlip::ToDay
                });
            }
        } else if now_ms - self.last_switch_ms >= config::DAY_LENGTH_MS {
            self.transition = Some(Transition {
                start_ms: now_ms,
                from_night: self.is_night,
            });
        }
        None
    }

    /// Crossfade progress in [0, 1] while transitioning.
    pub fn transition_t(&self, now_ms: f64) -> Option<f32> {
        self.transition
            .map(|tr| (((now_ms - tr.start_ms) / config::TRANSITION_MS).clamp(0.0, 1.0)) as f32)
    }

    /// Current background gradient, crossfaded during a transition.
    pub fn gradient(&self, now_ms: f64) -> (Color, Color) {
        match self.transition {
            Some(tr) => {
                let t = self.transition_t(now_ms).unwrap_or(0.0);
                let (from, to) = if tr.from_night {
                    (NIGHT_GRADIENT, DAY_GRADIENT)
                } else {
                    (DAY_GRADIENT, NIGHT_GRADIENT)
                };
                (
                    lerp_color(from.0, to.0, t),
                    lerp_color(from.1, to.1, t),
                )
            }
            None => {
                if self.is_night {
                    NIGHT_GRADIENT
                } else {
                    DAY_GRADIENT
                }
            }
        }
    }

    /// How dark the scene overlay should be right now, 0 = day, 1 = night.
    pub fn darkness(&self, now_ms: f64) -> f32 {
        match (self.transition, self.is_night) {
            (Some(tr), _) => {
                let t = self.transition_t(now_ms).unwrap_or(0.0);
                if tr.from_night {
                    1.0 - t
                } else {
                    t
                }
            }
            (None, true) => 1.0,
            (None, false) => 0.0,
        }
    }
}

fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let inv = 1.0 - t;
    Color::new(
        a.r * inv + b.r * t,
        a.g * inv + b.g * t,
        a.b * inv + b.b * t,
        a.a * inv + b.a * t,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_exactly_once_per_transition() {
        let mut clock = TankClock::new(0.0);
        assert!(!clock.is_night);

        // Day runs its course, then the crossfade starts.
        assert_eq!(clock.update(config::DAY_LENGTH_MS), None);
        assert!(clock.transition_t(config::DAY_LENGTH_MS).is_some());
        assert!(!clock.is_night, "flag must not flip until completion");

        // Mid-transition: still no flip.
        let mid = config::DAY_LENGTH_MS + config::TRANSITION_MS * 0.5;
        assert_eq!(clock.update(mid), None);

        let end = config::DAY_LENGTH_MS + config::TRANSITION_MS;
        assert_eq!(clock.update(end), Some(DayNightFlip::ToNight));
        assert!(clock.is_night);
        assert_eq!(clock.update(end + 1.0), None);
    }

    #[test]
    fn crossfade_endpoints_match_from_and_to_gradients() {
        let mut clock = TankClock::new(0.0);
        clock.update(config::DAY_LENGTH_MS);

        let start = config::DAY_LENGTH_MS;
        assert_eq!(clock.gradient(start), DAY_GRADIENT);

        let end = config::DAY_LENGTH_MS + config::TRANSITION_MS;
        assert_eq!(clock.gradient(end), NIGHT_GRADIENT);

        clock.update(end);
        assert_eq!(clock.gradient(end), NIGHT_GRADIENT);
    }

    #[test]
    fn full_cycle_returns_to_day() {
        let mut clock = TankClock::new(0.0);
        let mut now = 0.0;
        let mut flips = Vec::new();
        while now < config::DAY_LENGTH_MS * 2.0 + config::TRANSITION_MS * 2.0 + 100.0 {
            if let Some(flip) = clock.update(now) {
                flips.push(flip);
            }
            now += 16.0;
        }
        assert_eq!(flips, vec![DayNightFlip::ToNight, DayNightFlip::ToDay]);
        assert!(!clock.is_night);
    }

    #[test]
    fn darkness_tracks_the_crossfade() {
        let mut clock = TankClock::new(0.0);
        assert_eq!(clock.darkness(0.0), 0.0);

        clock.update(config::DAY_LENGTH_MS);
        let mid = config::DAY_LENGTH_MS + config::TRANSITION_MS * 0.5;
        assert!((clock.darkness(mid) - 0.5).abs() < 1e-6);

        clock.update(config::DAY_LENGTH_MS + config::TRANSITION_MS);
        assert_eq!(clock.darkness(config::DAY_LENGTH_MS + config::TRANSITION_MS), 1.0);
    }
}
