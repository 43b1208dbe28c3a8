//! Turn and score state for a two-player dots and boxes game, with a small
//! egui front-end that reads it.

pub mod config;
pub mod game_app;
pub mod models;
pub mod store;

pub use config::{GameConfig, PlayerConfig};
pub use game_app::GameApp;
pub use models::{GameBox, Line, Player, PlayerId, Point};
pub use store::{GameStore, PlayerScore, Scoreboard, StoreEvent, SubscriptionId, Turn};
