use crate::config::GameConfig;
use crate::models::{GameBox, Line, PlayerId, Point};
use crate::store::{GameStore, StoreEvent};

use eframe::egui;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

const CELL: egui::Vec2 = egui::vec2(60.0, 60.0);
const FALLBACK_COLOR: egui::Color32 = egui::Color32::from_rgb(180, 180, 180);

pub struct GameApp {
    store: GameStore,
    grid_rows: usize,
    grid_cols: usize,
    last_event: Rc<RefCell<Option<StoreEvent>>>,
}

impl Default for GameApp {
    fn default() -> Self {
        GameApp::new(&GameConfig::default())
    }
}

impl GameApp {
    pub fn new(config: &GameConfig) -> Self {
        let mut store = GameStore::new(config);
        let last_event = Rc::new(RefCell::new(None));

        let sink = Rc::clone(&last_event);
        store.subscribe(move |event| {
            *sink.borrow_mut() = Some(event.clone());
        });

        Self {
            store,
            grid_rows: config.grid_rows,
            grid_cols: config.grid_cols,
            last_event,
        }
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }
}

impl eframe::App for GameApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.group(|ui| {
                    self.display_game_status(ui);

                    ui.add_space(10.0);

                    self.render_controls(ui);

                    ui.add_space(10.0);

                    self.render_board(ui);

                    ui.add_space(5.0);

                    if let Some(event) = self.last_event.borrow().as_ref() {
                        ui.label(
                            egui::RichText::new(describe_event(event))
                                .size(14.0)
                                .color(egui::Color32::from_rgb(180, 180, 180)),
                        );
                    }
                });
            });
        });
    }
}

impl GameApp {
    fn display_game_status(&self, ui: &mut egui::Ui) {
        let board = self.store.scoreboard();

        let score_text = format!(
            "{} {} : {} {}",
            board.player_a.name, board.player_a.score, board.player_b.score, board.player_b.name
        );

        ui.label(
            egui::RichText::new(score_text)
                .size(24.0)
                .color(egui::Color32::from_rgb(0, 191, 255)),
        );

        ui.add_space(10.0);

        match self.store.current_player() {
            Some(player) => {
                ui.label(
                    egui::RichText::new(format!("🕐 {}'s turn", player.name))
                        .size(30.0)
                        .color(resolve_color(&player.color)),
                );
            }
            None => {
                ui.label(egui::RichText::new("Pick who starts").size(30.0));
            }
        }
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for id in [PlayerId::A, PlayerId::B] {
                let label = format!("{} starts", self.store.player(id).name);
                if ui.button(label).clicked() {
                    self.store.set_current_player(id);
                }
            }
            if ui.button("End turn").clicked() {
                self.store.change_player();
            }
            let new_game = egui::RichText::new("🔄 New game")
                .color(egui::Color32::from_rgb(240, 148, 0));
            if ui.button(new_game).clicked() {
                self.store.reset();
            }
        });
    }

    fn render_board(&mut self, ui: &mut egui::Ui) {
        let has_turn = self.store.current_player_id().is_some();

        ui.vertical_centered(|ui| {
            for row in 0..self.grid_rows {
                ui.horizontal(|ui| {
                    for col in 0..self.grid_cols {
                        let owner = cell_owner(&self.store, row, col);

                        let text = match owner {
                            Some(id) => egui::RichText::new(id.as_str())
                                .size(30.0)
                                .color(resolve_color(&self.store.player(id).color)),
                            None => egui::RichText::new(" ").size(30.0),
                        };

                        let cell = egui::Button::new(text).min_size(CELL);
                        let button = ui.add_enabled(has_turn && owner.is_none(), cell);

                        if button.clicked() {
                            claim_cell(&mut self.store, row, col);
                        }
                    }
                });
            }
        });
    }
}

/// The box covering grid cell `(row, col)`, anchored at its top-left dot.
/// Grid sizes are capped at `MAX_GRID_SIZE`, so the coordinates fit in `i32`.
pub fn unit_box(row: usize, col: usize) -> GameBox {
    let (x, y) = (col as i32, row as i32);
    let top_left = Point::new(x, y);
    let top_right = Point::new(x + 1, y);
    let bottom_right = Point::new(x + 1, y + 1);
    let bottom_left = Point::new(x, y + 1);

    GameBox::new(
        top_left,
        vec![
            Line::new(top_left, top_right),
            Line::new(top_right, bottom_right),
            Line::new(bottom_right, bottom_left),
            Line::new(bottom_left, top_left),
        ],
    )
}

pub fn cell_owner(store: &GameStore, row: usize, col: usize) -> Option<PlayerId> {
    let anchor = Point::new(col as i32, row as i32);
    [PlayerId::A, PlayerId::B].into_iter().find(|id| {
        store
            .player(*id)
            .boxes
            .iter()
            .any(|game_box| game_box.initial_point == anchor)
    })
}

/// Gives the cell to the current player. Does nothing before a player has been
/// picked or when the cell already has an owner. The turn is kept.
pub fn claim_cell(store: &mut GameStore, row: usize, col: usize) -> bool {
    let Some(current) = store.current_player_id() else {
        debug!("Claim of ({}, {}) ignored: no current player", row, col);
        return false;
    };
    if let Some(owner) = cell_owner(store, row, col) {
        debug!("Claim of ({}, {}) ignored: owned by {}", row, col, owner);
        return false;
    }

    store.add_box(current, unit_box(row, col));
    info!("Player {} claimed cell ({}, {})", current, row, col);
    true
}

/// Maps a theme color token to an egui color. Unknown tokens render gray.
pub fn resolve_color(token: &str) -> egui::Color32 {
    match token.trim() {
        "var(--color-primary)" => egui::Color32::from_rgb(255, 99, 71),
        "var(--color-secondary)" => egui::Color32::from_rgb(34, 139, 34),
        hex => parse_hex_color(hex).unwrap_or(FALLBACK_COLOR),
    }
}

fn parse_hex_color(token: &str) -> Option<egui::Color32> {
    let digits = token.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(egui::Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn describe_event(event: &StoreEvent) -> String {
    match event {
        StoreEvent::CurrentPlayerChanged { to, .. } => format!("Player {} is up", to),
        StoreEvent::BoxesChanged { player, score } => {
            format!("Player {} now has {} boxes", player, score)
        }
        StoreEvent::Reset => "New game started".to_string(),
    }
}
