use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayerId {
    A,
    B,
}

impl PlayerId {
    pub fn other(self) -> PlayerId {
        match self {
            PlayerId::A => PlayerId::B,
            PlayerId::B => PlayerId::A,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerId::A => "A",
            PlayerId::B => "B",
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerId {
    type Err = anyhow::Error;

    // Exact tokens only: "a" or " A" are not player ids.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "A" => Ok(PlayerId::A),
            "B" => Ok(PlayerId::B),
            other => bail!("unknown player id {:?}, expected \"A\" or \"B\"", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// A segment between two points. Kept opaque: nothing here interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    pub from: Point,
    pub to: Point,
}

impl Line {
    pub fn new(from: Point, to: Point) -> Self {
        Line { from, to }
    }
}

/// A completed cell: its anchor corner and the lines that close it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameBox {
    pub initial_point: Point,
    pub lines: Vec<Line>,
}

impl GameBox {
    pub fn new(initial_point: Point, lines: Vec<Line>) -> Self {
        GameBox {
            initial_point,
            lines,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    pub boxes: Vec<GameBox>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Player {
            id,
            name: name.into(),
            color: color.into(),
            boxes: Vec::new(),
        }
    }

    pub fn score(&self) -> usize {
        self.boxes.len()
    }
}
