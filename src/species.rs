use macroquad::prelude::*;
use ::rand::Rng;

/// Index into the static species catalog.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SpeciesId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TailStyle {
    Forked,
    Fan,
    Pointed,
    Veil,
}

#[derive(Clone, Copy, Debug)]
pub struct TailShape {
    pub style: TailStyle,
    /// Tail length as a fraction of body size.
    pub length: f32,
    /// Tail height as a fraction of body size.
    pub height: f32,
}

/// Immutable fish archetype. Shared by reference; per-instance variation
/// (size, color) is drawn at spawn time from the ranges and palette here.
pub struct Species {
    pub name: &'static str,
    /// Body ellipse radii as fractions of the fish size.
    pub body_rx: f32,
    pub body_ry: f32,
    pub tail: TailShape,
    pub stripe: bool,
    pub whiskers: bool,
    pub big_eye: bool,
    pub banded: bool,
    pub eye_color: Color,
    pub size_range: (f32, f32),
    pub egg_range: (u32, u32),
    pub predator: bool,
    pub sleeper_chance: f64,
    palette: &'static [Color],
}

static CATALOG: &[Species] = &[
    Species {
        name: "Goldfish",
        body_rx: 0.62,
        body_ry: 0.38,
        tail: TailShape { style: TailStyle::Fan, length: 0.45, height: 0.55 },
        stripe: false,
        whiskers: false,
        big_eye: false,
        banded: false,
        eye_color: Color::new(0.08, 0.05, 0.02, 1.0),
        size_range: (16.0, 30.0),
        egg_range: (2, 5),
        predator: false,
        sleeper_chance: 0.5,
        palette: &[
            Color::new(0.96, 0.55, 0.12, 1.0),
            Color::new(0.93, 0.42, 0.10, 1.0),
            Color::new(0.98, 0.68, 0.22, 1.0),
        ],
    },
    Species {
        name: "Guppy",
        body_rx: 0.55,
        body_ry: 0.32,
        tail: TailShape { style: TailStyle::Veil, length: 0.65, height: 0.75 },
        stripe: false,
        whiskers: false,
        big_eye: false,
        banded: false,
        eye_color: Color::new(0.05, 0.05, 0.10, 1.0),
        size_range: (10.0, 18.0),
        egg_range: (2, 5),
        predator: false,
        sleeper_chance: 0.35,
        palette: &[
            Color::new(0.35, 0.78, 0.95, 1.0),
            Color::new(0.90, 0.45, 0.80, 1.0),
            Color::new(0.55, 0.90, 0.55, 1.0),
            Color::new(0.98, 0.85, 0.35, 1.0),
        ],
    },
    Species {
        name: "Neon Tetra",
        body_rx: 0.68,
        body_ry: 0.24,
        tail: TailShape { style: TailStyle::Forked, length: 0.35, height: 0.42 },
        stripe: true,
        whiskers: false,
        big_eye: false,
        banded: false,
        eye_color: Color::new(0.75, 0.15, 0.15, 1.0),
        size_range: (8.0, 14.0),
        egg_range: (2, 5),
        predator: false,
        sleeper_chance: 0.7,
        palette: &[
            Color::new(0.25, 0.60, 0.95, 1.0),
            Color::new(0.30, 0.70, 0.90, 1.0),
        ],
    },
    Species {
        name: "Angelfish",
        body_rx: 0.45,
        body_ry: 0.62,
        tail: TailShape { style: TailStyle::Pointed, length: 0.50, height: 0.35 },
        stripe: false,
        whiskers: false,
        big_eye: false,
        banded: true,
        eye_color: Color::new(0.55, 0.30, 0.05, 1.0),
        size_range: (18.0, 34.0),
        egg_range: (2, 5),
        predator: false,
        sleeper_chance: 0.4,
        palette: &[
            Color::new(0.85, 0.83, 0.70, 1.0),
            Color::new(0.70, 0.68, 0.55, 1.0),
        ],
    },
    Species {
        name: "Clownfish",
        body_rx: 0.58,
        body_ry: 0.36,
        tail: TailShape { style: TailStyle::Fan, length: 0.40, height: 0.48 },
        stripe: false,
        whiskers: false,
        big_eye: false,
        banded: true,
        eye_color: Color::new(0.10, 0.06, 0.02, 1.0),
        size_range: (14.0, 24.0),
        egg_range: (2, 5),
        predator: false,
        sleeper_chance: 0.45,
        palette: &[
            Color::new(0.95, 0.45, 0.15, 1.0),
            Color::new(0.92, 0.38, 0.12, 1.0),
        ],
    },
    Species {
        name: "Betta",
        body_rx: 0.55,
        body_ry: 0.35,
        tail: TailShape { style: TailStyle::Veil, length: 0.80, height: 0.90 },
        stripe: false,
        whiskers: false,
        big_eye: false,
        banded: false,
        eye_color: Color::new(0.05, 0.05, 0.08, 1.0),
        size_range: (14.0, 26.0),
        egg_range: (2, 5),
        predator: false,
        sleeper_chance: 0.3,
        palette: &[
            Color::new(0.65, 0.20, 0.75, 1.0),
            Color::new(0.85, 0.25, 0.35, 1.0),
            Color::new(0.25, 0.35, 0.85, 1.0),
        ],
    },
    Species {
        name: "Eyeball Fish",
        body_rx: 0.50,
        body_ry: 0.50,
        tail: TailShape { style: TailStyle::Pointed, length: 0.30, height: 0.30 },
        stripe: false,
        whiskers: false,
        big_eye: true,
        banded: false,
        eye_color: Color::new(0.15, 0.55, 0.35, 1.0),
        size_range: (12.0, 22.0),
        egg_range: (18, 27),
        predator: false,
        sleeper_chance: 0.2,
        palette: &[
            Color::new(0.88, 0.88, 0.92, 1.0),
            Color::new(0.80, 0.85, 0.80, 1.0),
        ],
    },
    Species {
        name: "Sturgeon",
        body_rx: 0.80,
        body_ry: 0.26,
        tail: TailShape { style: TailStyle::Forked, length: 0.40, height: 0.40 },
        stripe: false,
        whiskers: true,
        big_eye: false,
        banded: false,
        eye_color: Color::new(0.06, 0.06, 0.06, 1.0),
        size_range: (30.0, 60.0),
        egg_range: (1, 2),
        predator: true,
        sleeper_chance: 0.25,
        palette: &[
            Color::new(0.42, 0.45, 0.48, 1.0),
            Color::new(0.35, 0.38, 0.42, 1.0),
        ],
    },
];

impl Species {
    pub fn get(id: SpeciesId) -> &'static Species {
        &CATALOG[id.0 % CATALOG.len()]
    }

    pub fn random_id(rng: &mut impl Rng) -> SpeciesId {
        SpeciesId(rng.gen_range(0..CATALOG.len()))
    }

    /// Draw a body color for one fish: a palette pick with slight value
    /// jitter. Pure function of the RNG draw, nothing stored on the species.
    pub fn color(&self, rng: &mut impl Rng) -> Color {
        let base = self.palette[rng.gen_range(0..self.palette.len())];
        let jitter = rng.gen_range(-0.06..0.06);
        Color::new(
            (base.r + jitter).clamp(0.0, 1.0),
            (base.g + jitter).clamp(0.0, 1.0),
            (base.b + jitter).clamp(0.0, 1.0),
            1.0,
        )
    }

    pub fn random_size(&self, rng: &mut impl Rng) -> f32 {
        rng.gen_range(self.size_range.0..self.size_range.1)
    }

    /// Juvenile size for a freshly hatched fish.
    pub fn hatchling_size(&self, rng: &mut impl Rng) -> f32 {
        rng.gen_range(self.size_range.0 * 0.5..self.size_range.0)
    }

    pub fn clutch_size(&self, rng: &mut impl Rng) -> u32 {
        rng.gen_range(self.egg_range.0..=self.egg_range.1)
    }

    pub fn roll_sleeper(&self, rng: &mut impl Rng) -> bool {
        rng.gen_bool(self.sleeper_chance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn exactly_one_predator_species() {
        let predators: Vec<&str> = CATALOG
            .iter()
            .filter(|s| s.predator)
            .map(|s| s.name)
            .collect();
        assert_eq!(predators, vec!["Sturgeon"]);
    }

    #[test]
    fn clutch_sizes_respect_species_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for (idx, species) in CATALOG.iter().enumerate() {
            for _ in 0..50 {
                let clutch = species.clutch_size(&mut rng);
                assert!(
                    clutch >= species.egg_range.0 && clutch <= species.egg_range.1,
                    "species {idx} clutch {clutch} outside range"
                );
            }
        }
    }

    #[test]
    fn instance_color_stays_in_gamut() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for species in CATALOG {
            for _ in 0..20 {
                let c = species.color(&mut rng);
                for channel in [c.r, c.g, c.b] {
                    assert!((0.0..=1.0).contains(&channel));
                }
                assert_eq!(c.a, 1.0);
            }
        }
    }
}
