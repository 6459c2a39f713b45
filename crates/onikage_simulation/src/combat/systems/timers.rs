//! Timer systems: attack cooldown, hit window, hurt window, invulnerability, flashes

use bevy::prelude::*;

use crate::combat::PlayerAttack;
use crate::components::{HurtCooldown, HurtFlash, Invulnerability};
use crate::presentation::{Presentation, Tint};

/// System: обновление всех боевых таймеров (уменьшаются до 0)
///
/// Таймеры не отменяются: всегда дотикивают до конца.
pub fn tick_combat_timers(
    mut attacks: Query<&mut PlayerAttack>,
    mut hurts: Query<&mut HurtCooldown>,
    mut invulnerabilities: Query<&mut Invulnerability>,
    mut flashes: Query<(Entity, &mut HurtFlash)>,
    time: Res<Time>,
    mut presentation: ResMut<Presentation>,
) {
    let delta = time.delta_secs();

    for mut attack in attacks.iter_mut() {
        attack.tick(delta);
    }

    for mut hurt in hurts.iter_mut() {
        hurt.tick(delta);
    }

    for mut invulnerability in invulnerabilities.iter_mut() {
        invulnerability.tick(delta);
    }

    for (entity, mut flash) in flashes.iter_mut() {
        if flash.remaining <= 0.0 {
            continue;
        }
        flash.remaining -= delta;
        if flash.remaining <= 0.0 {
            flash.remaining = 0.0;
            presentation.tint(entity, Tint::White);
        }
    }
}
