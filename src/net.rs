use macroquad::prelude::*;
use ::rand::Rng;

use crate::config;
use crate::fish::FishArena;
use crate::tank::Tank;

/// The occasional scooping net. At most one exists at a time; it lives in
/// an `Option` on the tank state and self-terminates when its swing runs out.
#[derive(Clone, Debug)]
pub struct NetEvent {
    pub pivot: Vec2,
    pub pole_len: f32,
    pub net_radius: f32,
    /// Swing progress counter, 0..=NET_LIFETIME_STEPS.
    pub t: u32,
    /// Swing direction: +1 sweeps left-to-right, -1 the reverse.
    pub dir: f32,
    /// Whether this swing has caught anything yet.
    pub scooped: bool,
    start_angle: f32,
    end_angle: f32,
}

impl NetEvent {
    pub fn start(tank: &Tank, rng: &mut impl Rng) -> Self {
        let dir = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let pivot = vec2(tank.width * rng.gen_range(0.35..0.65), -20.0);
        // Sweep through the bottom half of an arc centered straight down.
        let (start_angle, end_angle) = if dir > 0.0 {
            (std::f32::consts::PI * 0.25, std::f32::consts::PI * 0.75)
        } else {
            (std::f32::consts::PI * 0.75, std::f32::consts::PI * 0.25)
        };
        Self {
            pivot,
            pole_len: tank.height * config::NET_POLE_FACTOR,
            net_radius: config::NET_RADIUS,
            t: 0,
            dir,
            scooped: false,
            start_angle,
            end_angle,
        }
    }

    /// Normalized swing progress in [0, 1].
    pub fn progress(&self) -> f32 {
        (self.t as f32 * config::NET_SWING_RATE).min(1.0)
    }

    pub fn angle(&self) -> f32 {
        self.start_angle + (self.end_angle - self.start_angle) * self.progress()
    }

    /// Center of the net head: pivot plus pole length along the swing angle.
    pub fn head_pos(&self) -> Vec2 {
        let (sin, cos) = self.angle().sin_cos();
        self.pivot + vec2(cos, sin) * self.pole_len
    }

    /// Point-in-net test in the net's locally rotated ellipse frame.
    pub fn contains(&self, point: Vec2) -> bool {
        let delta = point - self.head_pos();
        let (sin, cos) = self.angle().sin_cos();
        let local_x = delta.x * cos + delta.y * sin;
        let local_y = -delta.x * sin + delta.y * cos;
        let rx = self.net_radius;
        let ry = self.net_radius * 0.6;
        (local_x / rx).powi(2) + (local_y / ry).powi(2) <= 1.0
    }

    pub fn finished(&self) -> bool {
        self.t > config::NET_LIFETIME_STEPS
    }
}

/// Advance the active net (if any), scoop fish under it, remove fish whose
/// scoop timestamp has aged out, and maybe spawn a fresh event.
pub fn update(
    net: &mut Option<NetEvent>,
    arena: &mut FishArena,
    tank: &Tank,
    now_ms: f64,
    rng: &mut impl Rng,
) {
    if let Some(event) = net {
        event.t += 1;
        let head = event.head_pos();

        for idx in 0..arena.capacity() {
            let Some(fish) = arena.get_mut_by_index(idx) else {
                continue;
            };
            if !fish.alive {
                continue;
            }
            if fish.scooped {
                // Caught fish ride the net head until removal.
                fish.pos = head;
                continue;
            }
            if event.contains(fish.pos) {
                fish.scooped = true;
                fish.scooped_at_ms = now_ms;
                fish.pos = head;
                fish.vel = Vec2::ZERO;
                event.scooped = true;
            }
        }

        if event.finished() {
            *net = None;
        }
    } else if rng.gen_bool(config::NET_SPAWN_PROBABILITY) {
        *net = Some(NetEvent::start(tank, rng));
    }

    // Scooped fish age out on their own clock, swing or no swing.
    for idx in 0..arena.capacity() {
        if let Some(fish) = arena.get_mut_by_index(idx) {
            if fish.alive && fish.scooped && now_ms - fish.scooped_at_ms >= config::SCOOP_REMOVAL_MS
            {
                fish.alive = false;
            }
        }
    }
}

/// User-requested swing; rate-limited to one concurrent event.
pub fn try_start(net: &mut Option<NetEvent>, tank: &Tank, rng: &mut impl Rng) -> bool {
    if net.is_some() {
        return false;
    }
    *net = Some(NetEvent::start(tank, rng));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fish::Fish;
    use crate::species::SpeciesId;
    use ::rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fixture() -> (Tank, ChaCha8Rng) {
        (Tank::new(800.0, 600.0), ChaCha8Rng::seed_from_u64(12))
    }

    #[test]
    fn only_one_event_at_a_time() {
        let (tank, mut rng) = fixture();
        let mut net = None;
        assert!(try_start(&mut net, &tank, &mut rng));
        assert!(!try_start(&mut net, &tank, &mut rng));
    }

    #[test]
    fn event_expires_after_its_swing() {
        let (tank, mut rng) = fixture();
        let mut arena = FishArena::new(2);
        let mut net = Some(NetEvent::start(&tank, &mut rng));

        for frame in 0..=config::NET_LIFETIME_STEPS {
            update(&mut net, &mut arena, &tank, frame as f64 * 16.0, &mut rng);
            if net.is_none() {
                break;
            }
        }
        assert!(net.is_none());
    }

    #[test]
    fn fish_under_the_net_is_scooped_and_removed_after_delay() {
        let (tank, mut rng) = fixture();
        let mut arena = FishArena::new(4);
        let mut net = Some(NetEvent::start(&tank, &mut rng));

        // Park a fish exactly on the net head so the first update scoops it.
        let head = net.as_ref().unwrap().head_pos();
        let id = arena.add(Fish::spawn(SpeciesId(0), head, &mut rng));

        update(&mut net, &mut arena, &tank, 10_000.0, &mut rng);
        let fish = arena.get(id).unwrap();
        assert!(fish.scooped);
        assert_eq!(fish.scooped_at_ms, 10_000.0);
        assert!(fish.alive);

        // Just shy of a second: still riding the net.
        update(&mut net, &mut arena, &tank, 10_900.0, &mut rng);
        assert!(arena.get(id).unwrap().alive);

        // One full second after the scoop: gone.
        update(&mut net, &mut arena, &tank, 11_000.0, &mut rng);
        assert!(!arena.get(id).unwrap().alive);
    }

    #[test]
    fn progress_saturates_and_head_tracks_the_pole() {
        let (tank, mut rng) = fixture();
        let mut event = NetEvent::start(&tank, &mut rng);
        event.t = config::NET_LIFETIME_STEPS;
        assert_eq!(event.progress(), 1.0);
        assert!((event.angle() - event.end_angle).abs() < 1e-5);

        let head = event.head_pos();
        assert!(((head - event.pivot).length() - event.pole_len).abs() < 1e-3);
    }

    #[test]
    fn contains_respects_the_rotated_ellipse() {
        let (tank, mut rng) = fixture();
        let event = NetEvent::start(&tank, &mut rng);
        let head = event.head_pos();
        assert!(event.contains(head));

        let (sin, cos) = event.angle().sin_cos();
        let along = vec2(cos, sin);
        // Just inside the long axis, well outside the short one.
        assert!(event.contains(head + along * (event.net_radius * 0.9)));
        let across = vec2(-sin, cos);
        assert!(!event.contains(head + across * (event.net_radius * 0.9)));
    }
}
