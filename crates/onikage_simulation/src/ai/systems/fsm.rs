//! Enemy FSM system (detection, transitions, атаки по игроку).

use bevy::prelude::*;

use crate::ai::{EnemyBrain, EnemyConfig, EnemyState};
use crate::combat::Dead;
use crate::components::{planar, Facing, HurtCooldown, Velocity};
use crate::level::{LevelDirector, LevelEvent};
use crate::presentation::Presentation;
use crate::DeterministicRng;

use super::strike::PlayerStrikeAccess;

type EnemyQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static Transform,
        &'static EnemyConfig,
        &'static mut EnemyBrain,
        &'static HurtCooldown,
        &'static mut Velocity,
        &'static mut Facing,
    ),
    Without<Dead>,
>;

/// Система: тик FSM каждого врага
///
/// Порядок на враге: detection (индикатор + первый контакт → combat dialogue),
/// переходы FSM, velocity/facing, старт атаки. Атака наносит урон сразу
/// (damage + knockback), если игрок не неуязвим.
#[allow(clippy::too_many_arguments)]
pub fn enemy_ai(
    mut enemies: EnemyQuery,
    mut strikes: PlayerStrikeAccess,
    mut rng: ResMut<DeterministicRng>,
    mut director: ResMut<LevelDirector>,
    mut presentation: ResMut<Presentation>,
    mut level_events: EventWriter<LevelEvent>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();
    let player_position = strikes.player_position();

    for (entity, transform, config, mut brain, hurt, mut velocity, mut facing) in enemies.iter_mut() {
        let position = planar(transform);
        let to_player = player_position.map(|target| target - position);
        let previous_state = brain.state;

        let decision = brain.think(config, to_player, hurt.is_hurting(), delta, &mut rng.rng);

        if let Some(detected) = decision.detection_changed {
            presentation.detection_indicator(entity, detected);
            if detected {
                director.trigger_combat(&mut presentation, &mut level_events);
            }
        }

        velocity.0 = decision.velocity;
        if let Some(direction) = decision.facing {
            facing.look(direction);
        }

        if brain.state != previous_state {
            crate::logger::log(&format!(
                "🧠 Enemy {:?}: {:?} → {:?}",
                entity, previous_state, brain.state
            ));
        }

        let moving = velocity.0 != Vec2::ZERO;
        if brain.moving != moving {
            brain.moving = moving;
            presentation.animation_bool(entity, "isMoving", moving);
        }
        let chasing = brain.state == EnemyState::Chase;
        if brain.chasing != chasing {
            brain.chasing = chasing;
            presentation.animation_bool(entity, "isChasing", chasing);
        }
        if moving {
            presentation.animation_float(entity, "moveX", velocity.0.x);
            presentation.animation_float(entity, "moveY", velocity.0.y);
        }

        if decision.start_attack {
            presentation.animation_trigger(entity, "attack");
            strikes.strike(
                entity,
                position,
                config.damage,
                (config.knockback_distance, config.knockback_speed),
                &mut presentation,
            );
        }
    }
}
