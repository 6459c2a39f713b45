//! Knockback motion system

use bevy::prelude::*;

use crate::components::{planar, KnockbackState, ObstacleMask};

/// System: один шаг активного knockback каждого актора
///
/// Скорость затухает линейно с пройденной дистанцией; движение заканчивается по
/// дистанции или таймауту. Для акторов с `blocked_by_obstacles` (игрок)
/// knockback обрывается, если следующий шаг упирается в препятствие.
pub fn step_knockback(
    mut actors: Query<(&mut Transform, &mut KnockbackState)>,
    mask: Res<ObstacleMask>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (mut transform, mut knockback) in actors.iter_mut() {
        let blocked_by_obstacles = knockback.blocked_by_obstacles;
        let Some(motion) = knockback.active.as_mut() else {
            continue;
        };

        let Some(step) = motion.next_step(delta) else {
            knockback.cancel();
            continue;
        };

        let target = planar(&transform) + step;
        if blocked_by_obstacles && !mask.is_walkable(target) {
            knockback.cancel();
            continue;
        }

        transform.translation.x = target.x;
        transform.translation.y = target.y;
        motion.advance(step, delta);

        if motion.is_finished() {
            knockback.cancel();
        }
    }
}
