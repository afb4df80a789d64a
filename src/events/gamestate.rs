//! Game state transition event and observer.
//!
//! Narrative logic requests a change to the high-level [`GameStates`] by
//! updating [`NextGameState`] (the game-end timeline event does this), then
//! a [`GameStateChangedEvent`] is triggered. The observer here applies the
//! pending transition to the authoritative [`GameState`] and clears the
//! request, keeping intent and mechanics decoupled.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, NextGameState};

/// Event indicating that a pending game state transition should be applied.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
///
/// Reads the intention from [`NextGameState`]; if pending, copies the new
/// value into [`GameState`] and resets the request. Does nothing when no
/// transition is pending.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut next_game_state: ResMut<NextGameState>,
    mut game_state: ResMut<GameState>,
) {
    let next_state_value = next_game_state.get().clone();
    match next_state_value {
        Pending(new_state) => {
            info!(
                "transitioning from {:?} to {:?}",
                game_state.get(),
                new_state
            );
            game_state.set(new_state);
            next_game_state.reset();
        }
        Unchanged => {
            debug!("no state change pending");
        }
    }
}
