use crate::simulation::TankState;

/// UI flags that outlive a single frame.
pub struct UiState {
    pub show_help: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self { show_help: false }
    }
}

/// Slim status strip: sim controls on the first row, metric chips below.
pub fn draw_ui(state: &mut TankState, ui_state: &mut UiState) {
    egui_macroquad::ui(|ctx| {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(3.0);
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new("LAGOON").strong());
                ui.separator();

                let pause_label = if state.paused { "Play" } else { "Pause" };
                if ui.button(pause_label).clicked() {
                    state.paused = !state.paused;
                }
                for speed in [1u32, 2, 4] {
                    let selected = state.speed == speed;
                    if ui
                        .selectable_label(selected, format!("{speed}x"))
                        .clicked()
                    {
                        state.speed = speed;
                    }
                }
                ui.separator();
                ui.toggle_value(&mut ui_state.show_help, "Help");
            });

            ui.add_space(4.0);
            ui.horizontal_wrapped(|ui| {
                metric_chip(ui, "Fish", format!("{}", state.fish.count));
                metric_chip(ui, "Eggs", format!("{}", state.eggs.len()));
                metric_chip(ui, "Pellets", format!("{}", state.pellets.len()));
                metric_chip(ui, "Pads", format!("{}", state.pads.len()));
                metric_chip(
                    ui,
                    "Time",
                    if state.clock.is_night { "Night" } else { "Day" }.to_string(),
                );
                if let Some(net) = &state.net {
                    let label = if net.scooped { "NET (caught)" } else { "NET" };
                    status_chip(ui, label, egui::Color32::from_rgb(191, 154, 98));
                }
            });
            ui.add_space(3.0);
        });

        if ui_state.show_help {
            egui::Window::new("Help")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label("Click: drop a food pellet");
                    ui.label("Ctrl+Click: spawn a random fish");
                    ui.label("Shift+Click: swing the net");
                    ui.label("Middle drag: pan, scroll: zoom");
                    ui.label("Space: pause");
                });
        }
    });

    egui_macroquad::draw();
}

fn metric_chip(ui: &mut egui::Ui, label: &str, value: String) {
    ui.label(
        egui::RichText::new(format!("{label}: {value}"))
            .monospace()
            .size(12.0),
    );
    ui.add_space(6.0);
}

fn status_chip(ui: &mut egui::Ui, label: &str, color: egui::Color32) {
    ui.label(egui::RichText::new(label).strong().color(color));
}
