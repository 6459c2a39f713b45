//! Player module: marker, прогресс и movement input

use bevy::prelude::*;

pub mod player;
pub mod systems;

pub use player::{apply_level_up, DashMotion, GridStep, Player, PlayerMotion, PlayerProgress};

use crate::SimulationSet;

/// Player Plugin
///
/// Input: PlayerAction::Move → grid step (до боевого input, т.к. атака читает facing)
/// Motion: dash + grid step
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                systems::handle_move_actions
                    .in_set(SimulationSet::Input)
                    .before(crate::combat::systems::handle_player_actions),
                systems::advance_player_motion
                    .in_set(SimulationSet::Motion)
                    .before(crate::combat::systems::step_knockback),
            ),
        );
    }
}
