use macroquad::prelude::*;
use serde::Serialize;
use std::path::Path;

use crate::behavior::Behavior;
use crate::config;
use crate::fish::{Fish, Target};
use crate::simulation::{ClickAction, TankState};
use crate::species::SpeciesId;

const FRAME_MS: f64 = 1000.0 / 60.0;

/// Headless invariant sweeps, runnable via `--qa <scenario>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum QaScenario {
    Baseline,
    Predation,
}

impl QaScenario {
    pub fn parse_cli(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "baseline" => Some(Self::Baseline),
            "predation" | "sturgeon" => Some(Self::Predation),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Predation => "predation",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QaCheck {
    pub name: String,
    pub passed: bool,
    pub details: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QaReport {
    pub scenario: String,
    pub seed: u64,
    pub frames: u64,
    pub passed: bool,
    pub checks: Vec<QaCheck>,
}

fn check(checks: &mut Vec<QaCheck>, name: &str, passed: bool, details: String) {
    checks.push(QaCheck {
        name: name.to_string(),
        passed,
        details,
    });
}

/// Step the tank for `frames` frames while watching the core invariants.
pub fn run(scenario: QaScenario, seed: u64, frames: u64) -> QaReport {
    let mut state = TankState::new(1280.0, 800.0, seed, 0.0);
    let mut checks = Vec::new();

    let prey_id = match scenario {
        QaScenario::Predation => {
            let mut sturgeon = Fish::spawn(SpeciesId(7), vec2(400.0, 400.0), &mut state.rng);
            sturgeon.size = 55.0;
            sturgeon.behavior = Behavior::LookForFood;
            sturgeon.behavior_timer = 100.0;
            let mut goldfish = Fish::spawn(SpeciesId(0), vec2(408.0, 400.0), &mut state.rng);
            goldfish.size = 18.0;
            let pred = state.fish.add(sturgeon);
            let prey = state.fish.add(goldfish);
            let target = Target::Prey(prey);
            state.fish.get_mut(pred).unwrap().target = target;
            Some(prey)
        }
        QaScenario::Baseline => None,
    };

    let mut bounds_violations = 0u64;
    let mut pad_cap_violations = 0u64;
    let mut eaten_carryovers = 0u64;

    for frame in 0..frames {
        let now_ms = frame as f64 * FRAME_MS;

        // Pellets eaten last frame must have been swept before this one.
        eaten_carryovers += state.pellets.iter().filter(|p| p.eaten).count() as u64;

        if frame % 240 == 120 {
            state.handle_click(vec2(300.0 + (frame % 600) as f32, 500.0), ClickAction::DropPellet);
        }
        if frame == 90 {
            state.handle_click(Vec2::ZERO, ClickAction::SwingNet);
        }

        state.step(now_ms);

        for (_, fish) in state.fish.iter_alive() {
            if fish.scooped {
                continue;
            }
            let (x_lo, x_hi) = state.tank.x_bounds(fish.size);
            let (y_lo, y_hi) = state.tank.y_bounds(fish.size);
            if fish.pos.x < x_lo || fish.pos.x > x_hi || fish.pos.y < y_lo || fish.pos.y > y_hi {
                bounds_violations += 1;
            }
        }
        if state.pads.len() > config::MAX_LILY_PADS {
            pad_cap_violations += 1;
        }
    }

    check(
        &mut checks,
        "fish_stay_in_bounds",
        bounds_violations == 0,
        format!("{bounds_violations} out-of-bounds observations"),
    );
    check(
        &mut checks,
        "lily_pad_cap",
        pad_cap_violations == 0,
        format!("{pad_cap_violations} frames over the cap"),
    );
    check(
        &mut checks,
        "eaten_pellets_swept",
        eaten_carryovers == 0,
        format!("{eaten_carryovers} eaten pellets seen at frame start"),
    );
    check(
        &mut checks,
        "population_alive",
        state.fish.count > 0,
        format!("{} fish after {frames} frames", state.fish.count),
    );

    if let Some(prey) = prey_id {
        check(
            &mut checks,
            "sturgeon_ate_the_goldfish",
            state.fish.get(prey).is_none(),
            "prey handle should no longer resolve".to_string(),
        );
    }

    let passed = checks.iter().all(|c| c.passed);
    QaReport {
        scenario: scenario.label().to_string(),
        seed,
        frames,
        passed,
        checks,
    }
}

pub fn write_report(report: &QaReport, path: &Path) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    std::fs::write(path, json)
}
