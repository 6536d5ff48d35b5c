use macroquad::prelude::*;

mod behavior;
mod camera;
mod config;
mod daynight;
mod decor;
mod eggs;
mod fish;
mod lilypads;
mod net;
mod pellets;
mod physics;
mod qa;
mod renderer;
mod simulation;
mod species;
mod tank;
mod ui;

use camera::CameraController;
use simulation::{ClickAction, TankState};
use ui::UiState;

fn window_conf() -> Conf {
    Conf {
        window_title: "LAGOON — Interactive Aquarium".to_string(),
        window_width: 1280,
        window_height: 800,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn parse_u64_arg(args: &[String], flag: &str, default: u64) -> u64 {
    args.iter()
        .position(|a| a == flag)
        .and_then(|pos| args.get(pos + 1))
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[macroquad::main(window_conf)]
async fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Headless QA: run the scenario, write the report, and exit before the
    // frame loop starts.
    if let Some(pos) = args.iter().position(|a| a == "--qa") {
        let scenario = args
            .get(pos + 1)
            .and_then(|v| qa::QaScenario::parse_cli(v))
            .unwrap_or(qa::QaScenario::Baseline);
        let seed = parse_u64_arg(&args, "--seed", 42);
        let frames = parse_u64_arg(&args, "--frames", 3600);

        let report = qa::run(scenario, seed, frames);
        let path = format!("lagoon_qa_{}.json", scenario.label());
        match qa::write_report(&report, std::path::Path::new(&path)) {
            Ok(()) => eprintln!(
                "[LAGOON] QA {} {} ({} checks) -> {path}",
                report.scenario,
                if report.passed { "passed" } else { "FAILED" },
                report.checks.len()
            ),
            Err(e) => eprintln!("[LAGOON] QA report write failed: {e}"),
        }
        std::process::exit(if report.passed { 0 } else { 1 });
    }

    let seed = parse_u64_arg(&args, "--seed", 42);
    let now_ms = get_time() * 1000.0;
    let mut state = TankState::new(screen_width(), screen_height(), seed, now_ms);
    let mut cam = CameraController::new(state.tank.center());
    let mut ui_state = UiState::default();
    let mut last_size = (screen_width(), screen_height());

    loop {
        let now_ms = get_time() * 1000.0;

        // A resized viewport becomes the new tank bounds.
        let size = (screen_width(), screen_height());
        if size != last_size {
            last_size = size;
            state.resize(size.0, size.1);
        }

        cam.update(&state.tank, get_frame_time());

        // Pointer input, unless egui wants it.
        let mut egui_wants_pointer = false;
        egui_macroquad::cfg(|ctx| {
            egui_wants_pointer = ctx.wants_pointer_input();
        });
        if !egui_wants_pointer && is_mouse_button_pressed(MouseButton::Left) {
            let point = cam.screen_to_world(Vec2::from(mouse_position()));
            let action = if is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift) {
                ClickAction::SwingNet
            } else if is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl) {
                ClickAction::SpawnFish
            } else {
                ClickAction::DropPellet
            };
            state.handle_click(point, action);
        }

        if is_key_pressed(KeyCode::Space) {
            state.paused = !state.paused;
        }

        if !state.paused {
            for _ in 0..state.speed {
                state.step(now_ms);
            }
        }

        renderer::draw(&state, &cam, now_ms);
        ui::draw_ui(&mut state, &mut ui_state);

        next_frame().await;
    }
}
