//! Turn and score state for one game session.
//!
//! [`GameStore`] owns the two fixed players and a [`Turn`] tag saying whose
//! turn it is. The current player is never a copy: it is looked up through the
//! tag, so boxes added to a player are immediately visible as the current
//! player's boxes. Scores are derived from the box collections on every read.
//!
//! Mutations notify subscribers synchronously with a [`StoreEvent`].

use crate::config::GameConfig;
use crate::models::{GameBox, Player, PlayerId};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Whose turn it is. `Uninitialized` until a first player is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    #[default]
    Uninitialized,
    TurnA,
    TurnB,
}

impl Turn {
    pub fn of(id: PlayerId) -> Turn {
        match id {
            PlayerId::A => Turn::TurnA,
            PlayerId::B => Turn::TurnB,
        }
    }

    pub fn player_id(self) -> Option<PlayerId> {
        match self {
            Turn::Uninitialized => None,
            Turn::TurnA => Some(PlayerId::A),
            Turn::TurnB => Some(PlayerId::B),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreEvent {
    CurrentPlayerChanged {
        from: Option<PlayerId>,
        to: PlayerId,
    },
    BoxesChanged {
        player: PlayerId,
        score: usize,
    },
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent)>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    pub score: usize,
}

impl From<&Player> for PlayerScore {
    fn from(player: &Player) -> Self {
        PlayerScore {
            id: player.id,
            name: player.name.clone(),
            color: player.color.clone(),
            score: player.score(),
        }
    }
}

/// Read-only view of the store for whatever draws the scoreboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub current: Option<PlayerId>,
    pub player_a: PlayerScore,
    pub player_b: PlayerScore,
}

pub struct GameStore {
    turn: Turn,
    player_a: Player,
    player_b: Player,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for GameStore {
    fn default() -> Self {
        GameStore::new(&GameConfig::default())
    }
}

impl fmt::Debug for GameStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameStore")
            .field("turn", &self.turn)
            .field("player_a", &self.player_a)
            .field("player_b", &self.player_b)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl GameStore {
    pub fn new(config: &GameConfig) -> Self {
        GameStore {
            turn: Turn::Uninitialized,
            player_a: Player::new(PlayerId::A, &config.player_a.name, &config.player_a.color),
            player_b: Player::new(PlayerId::B, &config.player_b.name, &config.player_b.color),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn current_player_id(&self) -> Option<PlayerId> {
        self.turn.player_id()
    }

    /// The player whose turn it is, or `None` before anyone has been picked.
    pub fn current_player(&self) -> Option<&Player> {
        self.current_player_id().map(|id| self.player(id))
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        match id {
            PlayerId::A => &self.player_a,
            PlayerId::B => &self.player_b,
        }
    }

    pub fn player_a(&self) -> &Player {
        &self.player_a
    }

    pub fn player_b(&self) -> &Player {
        &self.player_b
    }

    pub fn score(&self, id: PlayerId) -> usize {
        self.player(id).score()
    }

    pub fn player_a_score(&self) -> usize {
        self.player_a.score()
    }

    pub fn player_b_score(&self) -> usize {
        self.player_b.score()
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            current: self.current_player_id(),
            player_a: PlayerScore::from(&self.player_a),
            player_b: PlayerScore::from(&self.player_b),
        }
    }

    pub fn set_current_player(&mut self, id: PlayerId) {
        let from = self.current_player_id();
        self.turn = Turn::of(id);
        debug!("Current player set: {:?} -> {}", from, id);
        self.notify(StoreEvent::CurrentPlayerChanged { from, to: id });
    }

    /// Same as [`set_current_player`](Self::set_current_player) for an untyped
    /// id token. Anything but `"A"` or `"B"` is rejected and the turn is left
    /// as it was.
    pub fn set_current_player_by_id(&mut self, token: &str) -> Result<()> {
        let id = token.parse::<PlayerId>().map_err(|e| {
            warn!("Rejected current player {:?}: {}", token, e);
            e
        })?;
        self.set_current_player(id);
        Ok(())
    }

    /// Hands the turn to B if A is current, otherwise to A. An uninitialized
    /// store therefore starts with A.
    pub fn change_player(&mut self) {
        let next = match self.turn {
            Turn::TurnA => PlayerId::B,
            Turn::TurnB | Turn::Uninitialized => PlayerId::A,
        };
        self.set_current_player(next);
        info!("Turn switched: now it's {}'s turn", self.player(next).name);
    }

    pub fn add_box(&mut self, id: PlayerId, game_box: GameBox) {
        let player = self.player_mut(id);
        player.boxes.push(game_box);
        let score = player.score();
        debug!("Player {} claimed a box, score now {}", id, score);
        self.notify(StoreEvent::BoxesChanged { player: id, score });
    }

    /// Replaces a player's whole box collection.
    pub fn set_boxes(&mut self, id: PlayerId, boxes: Vec<GameBox>) {
        let player = self.player_mut(id);
        player.boxes = boxes;
        let score = player.score();
        debug!("Player {} boxes replaced, score now {}", id, score);
        self.notify(StoreEvent::BoxesChanged { player: id, score });
    }

    /// Starts a new session: empties both box collections and forgets whose
    /// turn it was. Names and colors stay.
    pub fn reset(&mut self) {
        self.player_a.boxes.clear();
        self.player_b.boxes.clear();
        self.turn = Turn::Uninitialized;
        info!("Game store reset");
        self.notify(StoreEvent::Reset);
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        match id {
            PlayerId::A => &mut self.player_a,
            PlayerId::B => &mut self.player_b,
        }
    }

    fn notify(&mut self, event: StoreEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}
