//! AI movement: velocity → Transform

use bevy::prelude::*;

use crate::components::{KnockbackState, Velocity};
use crate::player::Player;

/// Система: интегрирует velocity Enemy/Boss
///
/// Пока активен knockback, им управляет `step_knockback`, velocity игнорируется.
pub fn integrate_velocity(
    mut movers: Query<(&mut Transform, &Velocity, Option<&KnockbackState>), Without<Player>>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (mut transform, velocity, knockback) in movers.iter_mut() {
        if velocity.0 == Vec2::ZERO || knockback.is_some_and(KnockbackState::is_active) {
            continue;
        }
        transform.translation += (velocity.0 * delta).extend(0.0);
    }
}
