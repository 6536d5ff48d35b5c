use macroquad::prelude::*;

use crate::camera::CameraController;
use crate::config;
use crate::decor::Decor;
use crate::fish::Fish;
use crate::lilypads::{BugKind, Decoration, LilyPad};
use crate::net::NetEvent;
use crate::simulation::TankState;
use crate::species::TailStyle;

const GRADIENT_BANDS: usize = 48;
const GLASS_COLOR: Color = Color::new(0.55, 0.65, 0.70, 0.9);
const SAND_COLOR: Color = Color::new(0.76, 0.70, 0.52, 1.0);

/// Draw the whole scene from the current model state. The simulation core
/// never calls into here; this module only consumes entity state.
pub fn draw(state: &TankState, camera: &CameraController, now_ms: f64) {
    clear_background(Color::new(0.01, 0.02, 0.04, 1.0));
    set_camera(&camera.to_macroquad_camera());

    draw_background(state, now_ms);

    if let Some(decor) = &state.decor {
        draw_decor(state, decor, now_ms);
    }

    for egg in &state.eggs {
        draw_circle(egg.pos.x, egg.pos.y, egg.radius, Color::new(0.95, 0.92, 0.80, 0.9));
        draw_circle(egg.pos.x, egg.pos.y, egg.radius * 0.45, Color::new(0.98, 0.85, 0.55, 1.0));
    }

    for pellet in state.pellets.iter() {
        draw_circle(pellet.pos.x, pellet.pos.y, pellet.radius, Color::new(0.55, 0.38, 0.18, 1.0));
    }

    for (_, fish) in state.fish.iter_alive() {
        draw_fish(fish);
    }

    if let Some(net) = &state.net {
        draw_net(net);
    }

    for pad in &state.pads {
        draw_lily_pad(pad, now_ms);
    }

    draw_night_overlay(state, now_ms);
    draw_walls(state);

    set_default_camera();
}

/// Vertical gradient in horizontal bands; endpoints come from the clock so
/// the crossfade matches the day/night palette exactly.
fn draw_background(state: &TankState, now_ms: f64) {
    let (top, bottom) = state.clock.gradient(now_ms);
    let band_h = state.tank.height / GRADIENT_BANDS as f32;
    for band in 0..GRADIENT_BANDS {
        let t = band as f32 / (GRADIENT_BANDS - 1) as f32;
        let color = Color::new(
            top.r + (bottom.r - top.r) * t,
            top.g + (bottom.g - top.g) * t,
            top.b + (bottom.b - top.b) * t,
            1.0,
        );
        draw_rectangle(0.0, band as f32 * band_h, state.tank.width, band_h + 1.0, color);
    }

    // Water surface line.
    let surface_y = config::WALL_WIDTH + config::SURFACE_BAND * 0.5;
    draw_line(
        0.0,
        surface_y,
        state.tank.width,
        surface_y,
        2.0,
        Color::new(0.85, 0.95, 1.0, 0.35),
    );
}

fn draw_decor(state: &TankState, decor: &Decor, now_ms: f64) {
    let t = (now_ms / 1000.0) as f32;

    // Caustic shimmer under the surface.
    for i in 0..12 {
        let phase = decor.caustic_seed as f32 * 0.37 + i as f32 * 1.7;
        let x = ((t * 0.35 + phase).sin() * 0.5 + 0.5) * state.tank.width;
        let y = config::WALL_WIDTH + config::SURFACE_BAND + 20.0 + (phase * 3.1).fract() * 60.0;
        let r = 18.0 + ((t * 0.8 + phase).cos() * 0.5 + 0.5) * 26.0;
        draw_circle_lines(x, y, r, 1.5, Color::new(0.9, 0.97, 1.0, 0.06));
    }

    // Sand bed.
    for (col, &height) in decor.sand.iter().enumerate() {
        let x = col as f32 * crate::decor::SAND_COLUMN_W;
        draw_rectangle(
            x,
            height,
            crate::decor::SAND_COLUMN_W + 1.0,
            state.tank.height - height,
            SAND_COLOR,
        );
    }

    for rock in &decor.rocks {
        draw_circle(rock.pos.x, rock.pos.y, rock.radius, rock.color);
        draw_circle(
            rock.pos.x - rock.radius * 0.3,
            rock.pos.y - rock.radius * 0.3,
            rock.radius * 0.35,
            Color::new(rock.color.r + 0.08, rock.color.g + 0.08, rock.color.b + 0.08, 1.0),
        );
    }

    for plant in &decor.plants {
        let sway = (t * 0.9 + plant.sway_phase).sin();
        for blade in 0..plant.blades {
            let spread = (blade as f32 - plant.blades as f32 * 0.5) * 6.0;
            let height = plant.height * (0.75 + 0.25 * ((blade * 7) % 3) as f32 / 2.0);
            let segments = 8;
            let mut last = plant.base + vec2(spread * 0.3, 0.0);
            for seg in 1..=segments {
                let u = seg as f32 / segments as f32;
                let bend = sway * u * u * 14.0 + spread * u;
                let p = vec2(plant.base.x + bend, plant.base.y - height * u);
                draw_line(last.x, last.y, p.x, p.y, 3.0 * (1.0 - u * 0.5), plant.color);
                last = p;
            }
        }
    }

    for bubble in &decor.bubbles {
        draw_circle_lines(bubble.pos.x, bubble.pos.y, bubble.radius, 1.0, Color::new(0.85, 0.95, 1.0, 0.5));
    }
}

fn draw_fish(fish: &Fish) {
    let species = fish.species();
    let dir = fish.facing_dir();
    let size = fish.size;
    let body_rx = size * species.body_rx;
    let body_ry = size * species.body_ry;
    let alpha = if fish.behavior == crate::behavior::Behavior::Sleep { 0.7 } else { 1.0 };
    let body = Color::new(fish.color.r, fish.color.g, fish.color.b, alpha);
    let darker = Color::new(body.r * 0.6, body.g * 0.6, body.b * 0.6, alpha);

    // Tail sits behind the body.
    let tail_root = fish.pos - vec2(dir * body_rx * 0.9, 0.0);
    let tail_len = size * species.tail.length;
    let tail_half = size * species.tail.height * 0.5;
    let tip_x = tail_root.x - dir * tail_len;
    match species.tail.style {
        TailStyle::Forked => {
            draw_triangle(tail_root, vec2(tip_x, tail_root.y - tail_half), vec2(tip_x, tail_root.y - tail_half * 0.2), darker);
            draw_triangle(tail_root, vec2(tip_x, tail_root.y + tail_half), vec2(tip_x, tail_root.y + tail_half * 0.2), darker);
        }
        TailStyle::Fan => {
            draw_triangle(tail_root, vec2(tip_x, tail_root.y - tail_half), vec2(tip_x, tail_root.y + tail_half), darker);
        }
        TailStyle::Pointed => {
            draw_triangle(
                tail_root + vec2(0.0, -tail_half * 0.4),
                tail_root + vec2(0.0, tail_half * 0.4),
                vec2(tip_x, tail_root.y),
                darker,
            );
        }
        TailStyle::Veil => {
            let veil = Color::new(body.r, body.g, body.b, alpha * 0.55);
            draw_triangle(tail_root, vec2(tip_x, tail_root.y - tail_half * 1.2), vec2(tip_x, tail_root.y + tail_half * 1.2), veil);
            draw_triangle(tail_root, vec2(tip_x + dir * tail_len * 0.3, tail_root.y - tail_half * 0.6), vec2(tip_x + dir * tail_len * 0.3, tail_root.y + tail_half * 0.6), darker);
        }
    }

    draw_ellipse(fish.pos.x, fish.pos.y, body_rx, body_ry, 0.0, body);

    if species.stripe {
        draw_line(
            fish.pos.x - body_rx * 0.8,
            fish.pos.y,
            fish.pos.x + body_rx * 0.8,
            fish.pos.y,
            body_ry * 0.35,
            Color::new(0.9, 0.25, 0.25, alpha),
        );
    }
    if species.banded {
        for band in 0..3 {
            let offset = (band as f32 - 1.0) * body_rx * 0.55;
            draw_line(
                fish.pos.x + offset,
                fish.pos.y - body_ry * 0.9,
                fish.pos.x + offset,
                fish.pos.y + body_ry * 0.9,
                body_rx * 0.18,
                Color::new(0.95, 0.95, 0.95, alpha * 0.85),
            );
        }
    }
    if species.whiskers {
        let snout = fish.pos + vec2(dir * body_rx * 0.95, body_ry * 0.3);
        for side in [-1.0f32, 1.0] {
            draw_line(
                snout.x,
                snout.y,
                snout.x + dir * size * 0.3,
                snout.y + size * (0.15 + 0.08 * side),
                1.5,
                darker,
            );
        }
    }

    // Eye near the snout.
    let eye_scale = if species.big_eye { 0.30 } else { 0.12 };
    let eye_pos = fish.pos + vec2(dir * body_rx * 0.55, -body_ry * 0.25);
    draw_circle(eye_pos.x, eye_pos.y, size * eye_scale, WHITE);
    draw_circle(
        eye_pos.x + dir * size * eye_scale * 0.3,
        eye_pos.y,
        size * eye_scale * 0.5,
        species.eye_color,
    );
}

fn draw_net(net: &NetEvent) {
    let head = net.head_pos();
    let pole_color = Color::new(0.45, 0.32, 0.18, 1.0);
    draw_line(net.pivot.x, net.pivot.y, head.x, head.y, 4.0, pole_color);

    let rot_deg = net.angle().to_degrees();
    let rim = Color::new(0.85, 0.85, 0.90, 0.9);
    draw_ellipse_lines(head.x, head.y, net.net_radius, net.net_radius * 0.6, rot_deg, 3.0, rim);

    // Mesh hatching.
    let (sin, cos) = net.angle().sin_cos();
    let along = vec2(cos, sin);
    let across = vec2(-sin, cos);
    let mesh = Color::new(0.9, 0.9, 0.95, 0.35);
    for i in -2i32..=2 {
        let offset = along * (i as f32 * net.net_radius * 0.35);
        let half = across * net.net_radius * 0.5;
        let a = head + offset - half;
        let b = head + offset + half;
        draw_line(a.x, a.y, b.x, b.y, 1.0, mesh);
    }

    // Brighter rim on the leading edge of the swing.
    let lead = head + along * (net.net_radius * 0.8 * net.dir);
    draw_circle(lead.x, lead.y, 3.0, rim);
}

fn draw_lily_pad(pad: &LilyPad, now_ms: f64) {
    let rot_deg = pad.rotation.to_degrees();
    draw_ellipse(pad.pos.x, pad.pos.y, pad.size, pad.size * pad.skew, rot_deg, pad.color);

    // Notch cut toward the vein angle.
    let notch_dir = vec2(pad.vein_angle.cos(), pad.vein_angle.sin() * pad.skew);
    let notch_tip = pad.pos + notch_dir * pad.size;
    draw_line(pad.pos.x, pad.pos.y, notch_tip.x, notch_tip.y, 3.0, Color::new(0.05, 0.15, 0.08, 0.8));

    match pad.decoration {
        Some(Decoration::Flower) => {
            let bloom = (((now_ms - pad.spawned_at_ms) / 4000.0).sin().abs() * 0.2 + 0.8) as f32;
            for petal in 0..5 {
                let a = petal as f32 / 5.0 * std::f32::consts::TAU;
                let p = pad.pos + vec2(a.cos(), a.sin() * pad.skew) * pad.size * 0.25 * bloom;
                draw_circle(p.x, p.y, pad.size * 0.16, Color::new(0.98, 0.75, 0.85, 1.0));
            }
            draw_circle(pad.pos.x, pad.pos.y, pad.size * 0.12, Color::new(0.98, 0.85, 0.25, 1.0));
        }
        Some(Decoration::Bug(kind)) => {
            let body = match kind {
                BugKind::Beetle => Color::new(0.12, 0.10, 0.08, 1.0),
                BugKind::Dragonfly => Color::new(0.20, 0.55, 0.70, 1.0),
                BugKind::Ladybug => Color::new(0.85, 0.15, 0.12, 1.0),
            };
            let perch = pad.pos + vec2(pad.size * 0.35, -pad.size * 0.1 * pad.skew);
            draw_circle(perch.x, perch.y, pad.size * 0.09, body);
            if kind == BugKind::Dragonfly {
                draw_line(perch.x - 6.0, perch.y - 3.0, perch.x + 6.0, perch.y - 3.0, 1.0, Color::new(0.8, 0.9, 0.95, 0.6));
            }
        }
        None => {}
    }
}

fn draw_night_overlay(state: &TankState, now_ms: f64) {
    let darkness = state.clock.darkness(now_ms);
    if darkness > 0.0 {
        draw_rectangle(
            0.0,
            0.0,
            state.tank.width,
            state.tank.height,
            Color::new(0.0, 0.01, 0.05, darkness * 0.45),
        );
    }
}

fn draw_walls(state: &TankState) {
    let w = state.tank.width;
    let h = state.tank.height;
    let t = config::WALL_WIDTH;
    draw_rectangle(0.0, 0.0, w, t, GLASS_COLOR);
    draw_rectangle(0.0, h - t, w, t, GLASS_COLOR);
    draw_rectangle(0.0, 0.0, t, h, GLASS_COLOR);
    draw_rectangle(w - t, 0.0, t, h, GLASS_COLOR);
}
