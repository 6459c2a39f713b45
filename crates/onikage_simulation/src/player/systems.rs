//! Player movement systems: grid steps и dash

use bevy::prelude::*;

use crate::combat::{Dead, PlayerAction};
use crate::components::{planar, Facing, Invulnerability, MoveSpeed, ObstacleMask};
use crate::config::CombatTuning;
use crate::presentation::Presentation;

use super::{Player, PlayerMotion};

/// Input → шаг на соседнюю клетку
///
/// Горизонталь важнее вертикали, facing обновляется даже если клетка занята.
pub fn handle_move_actions(
    mut actions: EventReader<PlayerAction>,
    mut players: Query<(Entity, &Transform, &mut Facing, &mut PlayerMotion, Has<Dead>), With<Player>>,
    mask: Res<ObstacleMask>,
    mut presentation: ResMut<Presentation>,
) {
    for action in actions.read() {
        let PlayerAction::Move(input) = *action else {
            continue;
        };

        let Ok((entity, transform, mut facing, mut motion, is_dead)) = players.single_mut() else {
            crate::logger::log_warning("Move action without a player entity");
            continue;
        };
        if is_dead || motion.is_busy() {
            continue;
        }

        let mut direction = input.signum();
        if direction.x != 0 {
            direction.y = 0;
        }
        if direction == IVec2::ZERO {
            continue;
        }

        let direction = direction.as_vec2();
        facing.look(direction);
        presentation.animation_float(entity, "moveX", direction.x);
        presentation.animation_float(entity, "moveY", direction.y);

        let target = planar(transform) + direction * mask.cell_size;
        if mask.is_walkable(target) {
            motion.step = Some(super::GridStep { target });
            presentation.animation_bool(entity, "isMoving", true);
        }
    }
}

/// Продвижение dash и grid step на один тик
pub fn advance_player_motion(
    mut players: Query<(Entity, &mut Transform, &mut PlayerMotion, &MoveSpeed, &mut Invulnerability), With<Player>>,
    mask: Res<ObstacleMask>,
    tuning: Res<CombatTuning>,
    time: Res<Time>,
    mut presentation: ResMut<Presentation>,
) {
    let delta = time.delta_secs();

    for (entity, mut transform, mut motion, speed, mut invulnerability) in players.iter_mut() {
        if let Some(mut dash) = motion.dash {
            let travel = (dash.speed * delta).min(dash.remaining);
            let target = planar(&transform) + dash.direction * travel;

            let blocked = !mask.is_walkable(target);
            if !blocked {
                transform.translation.x = target.x;
                transform.translation.y = target.y;
                dash.remaining -= travel;
            }

            if blocked || dash.remaining <= f32::EPSILON {
                motion.dash = None;
                invulnerability.start(tuning.player.invulnerability_duration);
            } else {
                motion.dash = Some(dash);
            }
        }

        if let Some(step) = motion.step {
            let position = planar(&transform);
            let next = position.move_towards(step.target, speed.speed * delta);
            transform.translation.x = next.x;
            transform.translation.y = next.y;

            if next.distance_squared(step.target) <= f32::EPSILON {
                motion.step = None;
                presentation.animation_bool(entity, "isMoving", false);
            }
        }
    }
}
