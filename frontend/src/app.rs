use egui::{Color32, Sense};
use log::{debug, warn};
use maze::{Cell, MazeError, PaintMode, PathFinderState, Point, Session, SessionState};

use crate::layout::CellLayout;

/// User adjustable settings of the editor
#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MazeConfig {
    pub width: usize,
    pub height: usize,
    pub cell_size: f32,
    pub spacing: f32,
    pub draw_grid_lines: bool,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            cell_size: 24.0,
            spacing: 1.0,
            draw_grid_lines: true,
        }
    }
}

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct State {
    config: MazeConfig,
    mode: PaintMode,
    /// The maze as produced by `maze::codec::encode`
    code: String,
}

pub struct App {
    state: State,
    session: Session,
    /// Size for the next "New maze", only applied to `state.config` by `resize`
    new_size: (usize, usize),
    code_input: String,
    output: String,
}

impl App {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Load previous app state (if any).
        // Note that you must enable the `persistence` feature for this to work.
        let state: State = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Default::default()
        };

        Self::from_state(state)
    }

    fn from_state(state: State) -> Self {
        let mut session = Session::new(state.config.width, state.config.height);
        if !state.code.is_empty() {
            match session.load_code(&state.code) {
                Ok(()) => debug!("loaded maze from storage"),
                Err(e) => warn!("discarding stored maze: {}", e),
            }
        }
        session.set_current_mode(state.mode);

        Self {
            new_size: (state.config.width, state.config.height),
            state,
            session,
            code_input: String::new(),
            output: String::new(),
        }
    }

    fn layout(&self) -> CellLayout {
        CellLayout {
            origin: egui::Pos2::ZERO,
            cell_size: self.state.config.cell_size,
            spacing: self.state.config.spacing,
            columns: self.session.grid().width(),
            rows: self.session.grid().height(),
        }
    }

    fn report(&mut self, result: Result<(), MazeError>) {
        if let Err(e) = result {
            warn!("{}", e);
            self.output = e.to_string();
        }
    }

    fn solve(&mut self) {
        self.output = match self.session.solve() {
            Ok(PathFinderState::PathFound(result)) => format!(
                "Path of length {} found\n{} cells visited",
                result.path.len(),
                result.visited
            ),
            Ok(_) => "No path found".to_string(),
            Err(e) => e.to_string(),
        };
    }

    fn resize(&mut self) {
        let (width, height) = self.new_size;
        debug!("new {}x{} maze", width, height);
        self.state.config.width = width;
        self.state.config.height = height;
        let mode = self.session.current_mode();
        self.session = Session::new(width, height);
        self.session.set_current_mode(mode);
        self.output.clear();
    }

    fn paint_at(&mut self, point: Point, erase: bool) {
        // repainting the same cell every frame of a drag is a no-op
        let mode = if erase {
            PaintMode::Empty
        } else {
            self.session.current_mode()
        };
        if self.session.grid().get(point) == Ok(Cell::from(mode)) {
            return;
        }
        let result = self.session.paint_with(point, mode);
        self.report(result);
    }
}

fn cell_color(cell: Cell) -> Color32 {
    match cell {
        Cell::Empty => Color32::WHITE,
        Cell::Wall => Color32::BLACK,
        Cell::Start => Color32::RED,
        Cell::End => Color32::GREEN,
        Cell::Traversed => Color32::BLUE,
    }
}

impl eframe::App for App {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.state.mode = self.session.current_mode();
        self.state.code = self.session.code();
        eframe::set_value(storage, eframe::APP_KEY, &self.state);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                // NOTE: no File->Quit on web pages!
                let is_web = cfg!(target_arch = "wasm32");
                if !is_web {
                    ui.menu_button("File", |ui| {
                        if ui.button("Quit").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                    ui.add_space(16.0);
                }

                egui::widgets::global_dark_light_mode_buttons(ui);
            });
        });

        let editing = self.session.state() == SessionState::Editing;

        egui::SidePanel::left("side_panel").show(ctx, |ui| {
            ui.label("Paint");
            ui.horizontal(|ui| {
                for mode in PaintMode::ALL {
                    let selected = self.session.current_mode() == mode;
                    if ui
                        .add_enabled(editing, egui::SelectableLabel::new(selected, mode.label()))
                        .clicked()
                    {
                        self.session.set_current_mode(mode);
                    }
                }
            });
            ui.label("Right click erases.");

            ui.separator();
            ui.horizontal(|ui| {
                if ui.add_enabled(editing, egui::Button::new("Solve")).clicked() {
                    self.solve();
                }
                if ui
                    .add_enabled(editing, egui::Button::new("Clear path"))
                    .clicked()
                {
                    self.output.clear();
                    let result = self.session.clear_solution();
                    self.report(result);
                }
                if ui.add_enabled(editing, egui::Button::new("Clear")).clicked() {
                    self.output.clear();
                    let result = self.session.clear();
                    self.report(result);
                }
            });

            ui.separator();
            ui.label("Grid code");
            ui.text_edit_singleline(&mut self.code_input);
            ui.horizontal(|ui| {
                if ui.add_enabled(editing, egui::Button::new("Load")).clicked() {
                    let result = self.session.load_code(&self.code_input);
                    self.report(result);
                }
                if ui.button("Copy").clicked() {
                    let code = self.session.code();
                    ui.output_mut(|o| o.copied_text = code.clone());
                    self.code_input = code;
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                ui.label("Size");
                ui.add(egui::DragValue::new(&mut self.new_size.0).clamp_range(2..=100));
                ui.label("x");
                ui.add(egui::DragValue::new(&mut self.new_size.1).clamp_range(2..=100));
            });
            if ui.add_enabled(editing, egui::Button::new("New maze")).clicked() {
                self.resize();
            }
            ui.checkbox(&mut self.state.config.draw_grid_lines, "Draw grid lines");

            ui.separator();
            ui.label(&self.output);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut layout = self.layout();
            let (response, painter) = ui.allocate_painter(layout.size(), Sense::click_and_drag());
            layout.origin = response.rect.min;

            if editing && response.is_pointer_button_down_on() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let erase = ui.input(|i| i.pointer.secondary_down());
                    self.paint_at(layout.to_point(pos), erase);
                }
            }

            let background = if self.state.config.draw_grid_lines {
                Color32::GRAY
            } else {
                Color32::WHITE
            };
            painter.rect_filled(response.rect, 0.0, background);

            for (point, cell) in self.session.grid().iter() {
                painter.rect_filled(layout.cell_rect(point), 0.0, cell_color(cell));
            }
        });
    }
}
