//! Boss AI system

use bevy::prelude::*;

use crate::ai::{BossBrain, BossConfig};
use crate::combat::Dead;
use crate::components::{planar, Facing, Health, HurtCooldown, Velocity};
use crate::player::Player;
use crate::presentation::Presentation;
use crate::DeterministicRng;

use super::strike::PlayerStrikeAccess;

type BossQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static Transform,
        &'static BossConfig,
        &'static mut BossBrain,
        &'static HurtCooldown,
        &'static Health,
        &'static mut Velocity,
        &'static mut Facing,
    ),
    (Without<Dead>, Without<Player>),
>;

/// Система: тик boss AI
///
/// Дистанции считаются от центра босса. Индикатор обнаружения следует за
/// боссом каждый тик. Удар наносится в конце windup активной атаки.
pub fn boss_ai(
    mut bosses: BossQuery,
    mut strikes: PlayerStrikeAccess,
    mut rng: ResMut<DeterministicRng>,
    mut presentation: ResMut<Presentation>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();
    let player_position = strikes.player_position();

    for (entity, transform, config, mut brain, hurt, health, mut velocity, mut facing) in bosses.iter_mut() {
        if !health.is_alive() {
            velocity.0 = Vec2::ZERO;
            continue;
        }

        let center = config.center(planar(transform));
        presentation.move_indicator(entity, config.indicator_position(planar(transform)));

        let to_player = player_position.map(|target| target - center);
        let decision = brain.think(config, to_player, hurt.is_hurting(), delta, &mut rng.rng);

        if let Some(detected) = decision.detection_changed {
            presentation.detection_indicator(entity, detected);
        }

        velocity.0 = decision.velocity;
        if let Some(direction) = decision.facing {
            facing.look(direction);
        }
        if let Some(moving) = decision.moving_changed {
            presentation.animation_bool(entity, "isMoving", moving);
        }

        if let Some(kind) = decision.started {
            presentation.animation_trigger(entity, kind.trigger());
            crate::logger::log(&format!("👹 Boss {:?} starts {:?} attack", entity, kind));
        }

        if let Some(damage) = decision.strike {
            strikes.strike(
                entity,
                center,
                damage,
                (config.knockback_distance, config.knockback_speed),
                &mut presentation,
            );
        }
    }
}
