// ui.rs - egui front end: controls, board painting and input forwarding

use eframe::egui;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};

use conway::{Coord, LifeEngine, Phase};

use crate::{GameOfLife, Mode};

pub const VIEW_CELLS: i32 = 51;                       // Solo viewport, cells per side
const BOX_SIZE: f32 = 14.0;
const SPACING: f32 = 0.5;

/// Square window of cells on screen: `first` is the top-left cell.
struct Viewport {
    first: Coord,
    cells: i32,
    origin: Pos2,
}

impl Viewport {
    fn rect_of(&self, (x, y): Coord) -> Option<Rect> {
        let col = x - self.first.0;
        let row = y - self.first.1;
        if col < 0 || row < 0 || col >= self.cells || row >= self.cells {
            return None;
        }
        let pos = self.origin + Vec2::new(col as f32, row as f32) * (BOX_SIZE + SPACING);
        Some(Rect::from_min_size(pos, Vec2::splat(BOX_SIZE)))
    }

    fn cell_at(&self, pos: Pos2) -> Option<Coord> {
        let offset = (pos - self.origin) / (BOX_SIZE + SPACING);
        let (col, row) = (offset.x.floor() as i32, offset.y.floor() as i32);
        if col < 0 || row < 0 || col >= self.cells || row >= self.cells {
            return None;
        }
        Some((self.first.0 + col, self.first.1 + row))
    }
}

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_generation();
        self.handle_keys(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            let mut wanted = self.mode;
            ui.horizontal(|ui| {
                ui.selectable_value(&mut wanted, Mode::Solo, "Solo");
                ui.selectable_value(&mut wanted, Mode::Versus, "Versus");
            });
            self.switch_mode(wanted);

            ui.separator();
            match self.mode {
                Mode::Solo => self.solo_controls(ui),
                Mode::Versus => self.versus_controls(ui),
            }
            ui.separator();

            self.board(ui);

            ui.separator();
            let population = self.engine().grid().len();
            ui.horizontal(|ui| {
                ui.label(format!("Generation: {}", self.engine().generation()));
                ui.label(format!("Live cells: {}", population));
            });
        });

        if let (Mode::Versus, Some(text)) = (self.mode, self.result_text.clone()) {
            egui::Window::new("Result")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.heading(text);
                    if ui.button("Play again").clicked() {
                        self.restart();
                    }
                });
        }

        if self.engine().is_running() {
            ctx.request_repaint();
        }
    }
}

impl GameOfLife {
    fn handle_keys(&mut self, ctx: &egui::Context) {
        let (space, random, left, right, up, down) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Space),
                i.key_pressed(egui::Key::R),
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::ArrowUp),
                i.key_pressed(egui::Key::ArrowDown),
            )
        });
        if space {
            self.toggle_pause();
        }
        if self.mode == Mode::Solo {
            if random && !self.solo.is_running() {
                self.random_pattern();
            }
            let (x, y) = self.view_center;
            let dx = i32::from(right) - i32::from(left);
            let dy = i32::from(down) - i32::from(up);
            self.view_center = (x + dx * 5, y + dy * 5);
        }
    }

    fn solo_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let button_text = if self.solo.is_running() { "⏸ Pause" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                self.toggle_pause();
            }
            ui.label(self.solo.status());

            if ui.button("⏹ Clear").clicked() {
                self.restart();
            }

            if ui.button("🎲 Random").clicked() && !self.solo.is_running() {
                self.random_pattern();
            }

            ui.separator();

            ui.label("Pattern:");
            let selected_name = self
                .patterns
                .get(self.selected_pattern)
                .map_or("-", |p| p.name.as_str());
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(selected_name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in self.patterns.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name.as_str());
                    }
                });

            if ui.button("Apply Pattern").clicked() && !self.solo.is_running() {
                self.apply_selected_pattern();
            }
        });

        ui.horizontal(|ui| {
            ui.label(self.solo.speed_text());
            if ui.button("Faster").clicked() {
                self.faster();
            }
            if ui.button("Slower").clicked() {
                self.slower();
            }
            ui.separator();
            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
        });

        ui.label("Left click: add a cell, right click: remove it (while paused). Arrows pan, R randomizes.");
    }

    fn versus_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let button_text = match self.versus.phase() {
                Phase::Setup => "▶ Start match",
                Phase::Running => "⏸ Pause",
                Phase::Paused => "▶ Resume",
                Phase::GameOver => "Game over",
            };
            let enabled = self.versus.phase() != Phase::GameOver;
            if ui.add_enabled(enabled, egui::Button::new(button_text)).clicked() {
                self.toggle_pause();
            }
            if ui.button("⏹ Restart").clicked() {
                self.restart();
            }
            ui.separator();
            ui.label(self.versus.status());
            ui.separator();
            ui.label(self.versus.scores().to_string());
        });

        ui.horizontal(|ui| {
            ui.label("Pattern:");
            let selected = self.versus.selected_pattern();
            let mut choice = None;
            for (i, pattern) in self.versus.patterns().iter().enumerate() {
                if ui.selectable_label(i == selected, pattern.name.as_str()).clicked() {
                    choice = Some(i);
                }
            }
            if let Some(i) = choice {
                self.versus.select_pattern(i);
            }
        });

        ui.label("Setup: players take turns placing the selected pattern. Paused: click toggles a cell.");
    }

    fn board(&mut self, ui: &mut egui::Ui) {
        let (cells, first) = match self.mode {
            Mode::Solo => {
                let half = VIEW_CELLS / 2;
                (VIEW_CELLS, (self.view_center.0 - half, self.view_center.1 - half))
            }
            Mode::Versus => {
                // Board plus its border ring.
                let edge = self.versus.bounds().half + 1;
                (2 * edge + 1, (-edge, -edge))
            }
        };

        let total_size = Vec2::splat((BOX_SIZE + SPACING) * cells as f32 - SPACING);
        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());
        let view = Viewport { first, cells, origin: response.rect.min };

        painter.rect_filled(response.rect, 0.0, Color32::BLACK);
        for row in 0..cells {
            for col in 0..cells {
                let cell = (first.0 + col, first.1 + row);
                if let Some(rect) = view.rect_of(cell) {
                    painter.rect_filled(rect, 1.0, self.dead_color);
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }
        }

        match self.mode {
            Mode::Solo => {
                for &cell in self.solo.grid() {
                    if let Some(rect) = view.rect_of(cell) {
                        painter.rect_filled(rect, 1.0, self.live_color);
                    }
                }
            }
            Mode::Versus => {
                for cell in self.versus.bounds().border() {
                    if let Some(rect) = view.rect_of(cell) {
                        painter.rect_filled(rect, 0.0, self.border_color);
                    }
                }
                for (&cell, &owner) in self.versus.owners() {
                    if let Some(rect) = view.rect_of(cell) {
                        let color = self.player_colors[usize::from(owner.id() - 1)];
                        painter.rect_filled(rect, 1.0, color);
                    }
                }
            }
        }

        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };
        let Some(cell) = view.cell_at(pos) else {
            return;
        };
        match self.mode {
            Mode::Solo => {
                if response.clicked() {
                    self.solo.toggle_cell_at(cell, true);
                } else if response.secondary_clicked() {
                    self.solo.toggle_cell_at(cell, false);
                }
            }
            Mode::Versus => {
                if response.clicked() {
                    self.versus.place_at(cell);
                }
            }
        }
    }
}
