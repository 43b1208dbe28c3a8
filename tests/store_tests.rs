//! Turn and score behavior of the game store.

use dots_and_boxes::{
    GameBox, GameConfig, GameStore, Line, PlayerConfig, PlayerId, Point, StoreEvent, Turn,
};
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

fn some_box(x: i32, y: i32) -> GameBox {
    let anchor = Point::new(x, y);
    GameBox::new(anchor, vec![Line::new(anchor, Point::new(x + 1, y))])
}

/// A fresh store has no boxes and no current player.
#[test]
fn test_initial_state() {
    let store = GameStore::default();

    assert_eq!(store.player_a_score(), 0);
    assert_eq!(store.player_b_score(), 0);
    assert_eq!(store.turn(), Turn::Uninitialized);
    assert!(store.current_player().is_none());
    assert_eq!(store.player_a().id, PlayerId::A);
    assert_eq!(store.player_b().id, PlayerId::B);
}

/// Setting the current player selects that exact player.
#[test]
fn test_set_current_player() {
    let mut store = GameStore::default();

    store.set_current_player(PlayerId::A);
    assert_eq!(store.current_player().map(|p| p.id), Some(PlayerId::A));

    store.set_current_player(PlayerId::B);
    assert_eq!(store.current_player().map(|p| p.id), Some(PlayerId::B));
    assert_eq!(store.turn(), Turn::TurnB);
}

/// Changing player before anyone was picked lands on A.
#[test]
fn test_change_player_defaults_to_a() {
    let mut store = GameStore::default();

    store.change_player();

    assert_eq!(store.current_player().map(|p| p.id), Some(PlayerId::A));
}

/// From B the toggle goes back to A.
#[test]
fn test_change_player_from_b() {
    let mut store = GameStore::default();
    store.set_current_player(PlayerId::B);

    store.change_player();

    assert_eq!(store.turn(), Turn::TurnA);
}

/// Adding boxes to A only moves A's score.
#[test]
fn test_score_reflects_boxes() {
    let mut store = GameStore::default();

    for x in 0..3 {
        store.add_box(PlayerId::A, some_box(x, 0));
    }

    assert_eq!(store.player_a_score(), 3);
    assert_eq!(store.player_b_score(), 0);
    assert_eq!(store.score(PlayerId::A), 3);
}

/// Boxes added to the current player show up through `current_player`
/// without setting it again.
#[test]
fn test_current_player_is_not_a_copy() {
    let mut store = GameStore::default();
    store.set_current_player(PlayerId::A);

    store.add_box(PlayerId::A, some_box(0, 0));

    assert_eq!(store.current_player().map(|p| p.boxes.len()), Some(1));
}

/// Replacing a collection replaces the score.
#[test]
fn test_set_boxes_replaces_collection() {
    let mut store = GameStore::default();
    store.add_box(PlayerId::B, some_box(0, 0));

    store.set_boxes(
        PlayerId::B,
        vec![some_box(1, 1), some_box(2, 2), some_box(3, 3)],
    );
    assert_eq!(store.player_b_score(), 3);
    assert_eq!(store.player_b().boxes[0].initial_point, Point::new(1, 1));

    store.set_boxes(PlayerId::B, Vec::new());
    assert_eq!(store.player_b_score(), 0);
}

/// B takes two boxes, then the turn passes to A.
#[test]
fn test_end_to_end_turn() {
    let mut store = GameStore::default();

    store.set_current_player(PlayerId::B);
    store.add_box(PlayerId::B, some_box(0, 0));
    store.add_box(PlayerId::B, some_box(1, 0));
    store.change_player();

    assert_eq!(store.current_player().map(|p| p.id), Some(PlayerId::A));
    assert_eq!(store.player_b_score(), 2);
    assert_eq!(store.player_a_score(), 0);
}

/// Reset empties both players and clears the turn, keeping names.
#[test]
fn test_reset() {
    let config = GameConfig {
        player_a: PlayerConfig {
            name: "Ada".to_string(),
            color: "#ff0000".to_string(),
        },
        ..GameConfig::default()
    };
    let mut store = GameStore::new(&config);
    store.set_current_player(PlayerId::A);
    store.add_box(PlayerId::A, some_box(0, 0));
    store.add_box(PlayerId::B, some_box(1, 0));

    store.reset();

    assert_eq!(store.turn(), Turn::Uninitialized);
    assert_eq!(store.player_a_score(), 0);
    assert_eq!(store.player_b_score(), 0);
    assert_eq!(store.player_a().name, "Ada");
    assert_eq!(store.player_a().color, "#ff0000");
}

/// Subscribers see every mutation in order, and stop after unsubscribing.
#[test]
fn test_subscribers_receive_events() {
    let mut store = GameStore::default();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    let sub = store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    store.change_player();
    store.add_box(PlayerId::A, some_box(0, 0));
    store.change_player();
    store.reset();

    assert_eq!(
        *seen.borrow(),
        vec![
            StoreEvent::CurrentPlayerChanged {
                from: None,
                to: PlayerId::A,
            },
            StoreEvent::BoxesChanged {
                player: PlayerId::A,
                score: 1,
            },
            StoreEvent::CurrentPlayerChanged {
                from: Some(PlayerId::A),
                to: PlayerId::B,
            },
            StoreEvent::Reset,
        ]
    );

    assert!(store.unsubscribe(sub));
    assert!(!store.unsubscribe(sub));

    store.change_player();
    assert_eq!(seen.borrow().len(), 4);
}

/// Listeners observe the state after the mutation was applied.
#[test]
fn test_listener_sees_updated_score() {
    let mut store = GameStore::default();
    let scores = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&scores);
    store.subscribe(move |event| {
        if let StoreEvent::BoxesChanged { score, .. } = event {
            sink.borrow_mut().push(*score);
        }
    });

    store.add_box(PlayerId::B, some_box(0, 0));
    store.add_box(PlayerId::B, some_box(0, 1));

    assert_eq!(*scores.borrow(), vec![1, 2]);
}

/// The scoreboard serializes with player id tokens.
#[test]
fn test_scoreboard_json() {
    let mut store = GameStore::default();
    store.set_current_player(PlayerId::B);

    let json = serde_json::to_value(store.scoreboard()).unwrap();

    assert_eq!(json["current"], "B");
    assert_eq!(json["player_a"]["name"], "Player A");
    assert_eq!(json["player_b"]["score"], 0);
}

proptest! {
    /// From A, an even number of toggles returns to A and an odd one lands on B.
    #[test]
    fn prop_toggle_parity(n in 0usize..200) {
        let mut store = GameStore::default();
        store.set_current_player(PlayerId::A);

        for _ in 0..n {
            store.change_player();
        }

        let expected = if n % 2 == 0 { Turn::TurnA } else { Turn::TurnB };
        prop_assert_eq!(store.turn(), expected);
    }

    /// Scores always equal the number of boxes handed to each player.
    #[test]
    fn prop_scores_count_boxes(claims in proptest::collection::vec(any::<bool>(), 0..50)) {
        let mut store = GameStore::default();

        for (i, to_a) in claims.iter().enumerate() {
            let id = if *to_a { PlayerId::A } else { PlayerId::B };
            store.add_box(id, some_box(i as i32, 0));
        }

        let a = claims.iter().filter(|c| **c).count();
        prop_assert_eq!(store.player_a_score(), a);
        prop_assert_eq!(store.player_b_score(), claims.len() - a);
    }
}
