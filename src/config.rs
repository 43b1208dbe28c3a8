use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_GRID_SIZE: usize = 4;
pub const MAX_GRID_SIZE: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player_a: PlayerConfig,
    pub player_b: PlayerConfig,
    pub grid_rows: usize,
    pub grid_cols: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            player_a: PlayerConfig {
                name: "Player A".to_string(),
                color: "var(--color-primary)".to_string(),
            },
            player_b: PlayerConfig {
                name: "Player B".to_string(),
                color: "var(--color-secondary)".to_string(),
            },
            grid_rows: DEFAULT_GRID_SIZE,
            grid_cols: DEFAULT_GRID_SIZE,
        }
    }
}

impl GameConfig {
    /// Defaults, overridden by any `DOTS_*` variables present in the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig =
            serde_json::from_str(json).context("failed to parse game config JSON")?;
        config.validate()?;
        Ok(config)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = GameConfig::default();

        if let Some(name) = lookup("DOTS_PLAYER_A_NAME") {
            config.player_a.name = name;
        }
        if let Some(color) = lookup("DOTS_PLAYER_A_COLOR") {
            config.player_a.color = color;
        }
        if let Some(name) = lookup("DOTS_PLAYER_B_NAME") {
            config.player_b.name = name;
        }
        if let Some(color) = lookup("DOTS_PLAYER_B_COLOR") {
            config.player_b.color = color;
        }
        if let Some(rows) = lookup("DOTS_GRID_ROWS") {
            config.grid_rows = rows
                .trim()
                .parse()
                .with_context(|| format!("DOTS_GRID_ROWS is not a number: {:?}", rows))?;
        }
        if let Some(cols) = lookup("DOTS_GRID_COLS") {
            config.grid_cols = cols
                .trim()
                .parse()
                .with_context(|| format!("DOTS_GRID_COLS is not a number: {:?}", cols))?;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.grid_rows == 0 || self.grid_cols == 0 {
            bail!(
                "grid must have at least one cell, got {}x{}",
                self.grid_rows,
                self.grid_cols
            );
        }
        if self.grid_rows > MAX_GRID_SIZE || self.grid_cols > MAX_GRID_SIZE {
            bail!(
                "grid is limited to {}x{} cells, got {}x{}",
                MAX_GRID_SIZE,
                MAX_GRID_SIZE,
                self.grid_rows,
                self.grid_cols
            );
        }
        Ok(())
    }
}
