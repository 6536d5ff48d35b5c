use macroquad::prelude::*;

use crate::config;
use crate::tank::Tank;

/// Pan/zoom view over the tank. Clicks travel through `screen_to_world`
/// so input lands in tank space regardless of the current view.
pub struct CameraController {
    pub target: Vec2,
    pub zoom: f32,
    pub smooth_target: Vec2,
    pub smooth_zoom: f32,
    is_dragging: bool,
    drag_start: Vec2,
    drag_cam_start: Vec2,
}

impl CameraController {
    pub fn new(initial_target: Vec2) -> Self {
        Self {
            target: initial_target,
            zoom: 1.0,
            smooth_target: initial_target,
            smooth_zoom: 1.0,
            is_dragging: false,
            drag_start: Vec2::ZERO,
            drag_cam_start: Vec2::ZERO,
        }
    }

    pub fn update(&mut self, tank: &Tank, dt: f32) {
        // Middle mouse drag pans the view.
        if is_mouse_button_pressed(MouseButton::Middle) {
            self.is_dragging = true;
            self.drag_start = Vec2::from(mouse_position());
            self.drag_cam_start = self.target;
        }
        if is_mouse_button_released(MouseButton::Middle) {
            self.is_dragging = false;
        }
        if self.is_dragging {
            let mouse_pos = Vec2::from(mouse_position());
            let delta = (self.drag_start - mouse_pos) / self.smooth_zoom;
            self.target = self.drag_cam_start + delta;
        }

        // Scroll zoom.
        let (_, scroll_y) = mouse_wheel();
        if scroll_y != 0.0 {
            let zoom_factor = 1.0 + scroll_y.signum() * config::CAMERA_ZOOM_SPEED;
            self.zoom =
                (self.zoom * zoom_factor).clamp(config::CAMERA_ZOOM_MIN, config::CAMERA_ZOOM_MAX);
        }

        // Keep the view anchored to the tank.
        self.target.x = self.target.x.clamp(0.0, tank.width);
        self.target.y = self.target.y.clamp(0.0, tank.height);

        let smooth = 1.0 - (-config::CAMERA_SMOOTH_SPEED * dt).exp();
        self.smooth_target = self.smooth_target.lerp(self.target, smooth);
        self.smooth_zoom += (self.zoom - self.smooth_zoom) * smooth;
    }

    pub fn to_macroquad_camera(&self) -> Camera2D {
        Camera2D {
            target: self.smooth_target,
            zoom: vec2(
                self.smooth_zoom / screen_width() * 2.0,
                -self.smooth_zoom / screen_height() * 2.0,
            ),
            ..Default::default()
        }
    }

    /// Convert a screen position to tank space.
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        let cam = self.to_macroquad_camera();
        let ndc_x = (screen_pos.x / screen_width()) * 2.0 - 1.0;
        let ndc_y = -((screen_pos.y / screen_height()) * 2.0 - 1.0);
        vec2(
            self.smooth_target.x + ndc_x / cam.zoom.x,
            self.smooth_target.y + ndc_y / cam.zoom.y,
        )
    }
}
