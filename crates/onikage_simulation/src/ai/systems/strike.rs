//! Удары AI по игроку (общий доступ для Enemy и Boss систем)

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::combat::damage::{knockback_direction, strike_player, DamageOutcome, PlayerTarget};
use crate::combat::{DamageDealt, Dead, EntityDied};
use crate::components::{planar, Health, Invulnerability, KnockbackState};
use crate::config::CombatTuning;
use crate::player::{Player, PlayerProgress};
use crate::presentation::Presentation;

/// Игрок как цель AI + события урона
#[derive(SystemParam)]
pub struct PlayerStrikeAccess<'w, 's> {
    players: Query<
        'w,
        's,
        (
            Entity,
            &'static Transform,
            &'static mut Health,
            &'static mut Invulnerability,
            &'static mut KnockbackState,
            &'static mut PlayerProgress,
            Has<Dead>,
        ),
        With<Player>,
    >,
    tuning: Res<'w, CombatTuning>,
    damage_events: EventWriter<'w, DamageDealt>,
    death_events: EventWriter<'w, EntityDied>,
}

impl PlayerStrikeAccess<'_, '_> {
    /// Позиция живого игрока (None если игрока нет или он мёртв)
    pub fn player_position(&self) -> Option<Vec2> {
        let (_, transform, health, _, _, _, is_dead) = self.players.single().ok()?;
        (health.is_alive() && !is_dead).then(|| planar(transform))
    }

    /// TakeDamage игроку от `attacker` из точки `origin`.
    ///
    /// Knockback `(distance, speed)` только если игрок выжил (или потерял жизнь);
    /// на последней жизни: EntityDied.
    pub fn strike(
        &mut self,
        attacker: Entity,
        origin: Vec2,
        damage: u32,
        knockback: (f32, f32),
        presentation: &mut Presentation,
    ) -> DamageOutcome {
        let invulnerability_duration = self.tuning.player.invulnerability_duration;

        let Ok((
            player,
            transform,
            mut health,
            mut invulnerability,
            mut knockback_state,
            mut progress,
            is_dead,
        )) = self.players.single_mut()
        else {
            return DamageOutcome::Ignored;
        };
        if is_dead {
            return DamageOutcome::Ignored;
        }

        let position = planar(transform);
        let outcome = strike_player(
            PlayerTarget {
                entity: player,
                health: &mut *health,
                invulnerability: &mut *invulnerability,
                progress: &mut *progress,
            },
            damage,
            invulnerability_duration,
            presentation,
        );

        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Wounded => {
                let (distance, speed) = knockback;
                let direction = knockback_direction(origin, position, Vec2::NEG_Y);
                knockback_state.apply(direction, distance, speed);
            }
            DamageOutcome::Killed => {
                self.death_events.write(EntityDied {
                    entity: player,
                    killer: Some(attacker),
                });
            }
        }

        if outcome.landed() {
            self.damage_events.write(DamageDealt {
                attacker,
                target: player,
                damage,
                target_died: outcome == DamageOutcome::Killed,
            });
            crate::logger::log(&format!(
                "🗡️ {:?} hit player for {} (hp {}/{})",
                attacker, damage, health.current, health.max
            ));
        }

        outcome
    }
}
