//! Death handling: награды, отключение коллизий, деспавн, финал уровня

use std::collections::HashSet;

use bevy::prelude::*;

use crate::ai::{BossBrain, BossConfig, EnemyBrain, EnemyConfig};
use crate::combat::{CombatStance, Dead, DespawnAfter, EntityDied};
use crate::components::{Collider, Health, MoveSpeed, Velocity};
use crate::config::CombatTuning;
use crate::level::{LevelDirector, LevelEvent};
use crate::player::{apply_level_up, Player, PlayerProgress};
use crate::presentation::Presentation;
use crate::progress::MoralLedger;

/// Через сколько секунд после смерти entity удаляется
pub const CORPSE_DESPAWN_DELAY: f32 = 2.0;

type RewardedPlayerQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static mut Health,
        &'static mut MoveSpeed,
        &'static mut PlayerProgress,
        &'static CombatStance,
        Has<Dead>,
    ),
    With<Player>,
>;

/// Опыт + убийство игроку (с level-up эффектами)
fn reward_player(
    players: &mut RewardedPlayerQuery,
    experience: u32,
    tuning: &CombatTuning,
    presentation: &mut Presentation,
) {
    let Ok((_, mut health, mut speed, mut progress, stance, is_dead)) = players.single_mut() else {
        crate::logger::log_warning("Kill reward without a player entity");
        return;
    };
    if is_dead {
        return;
    }

    progress.add_kill(1);
    if progress.gain_experience(experience) {
        apply_level_up(
            &mut progress,
            &mut health,
            &mut speed,
            stance.mode,
            &tuning.player,
            presentation,
        );
    }
}

/// System: обработка EntityDied
///
/// Идемпотентно: entity с маркером `Dead` (или уже обработанный в этом батче)
/// не получает награды повторно.
/// - Enemy: luz/sombra, опыт, kill, деспавн через 2s, "Nivel Completado"
///   если живых врагов не осталось
/// - Boss: опыт, kill, отмена атаки; с финальной сценой переход через 6s,
///   иначе деспавн через 2s
/// - Player: Game Over
#[allow(clippy::too_many_arguments)]
pub fn handle_deaths(
    mut deaths: EventReader<EntityDied>,
    mut commands: Commands,
    mut victims: Query<
        (
            &mut Collider,
            &mut Velocity,
            Has<Dead>,
            Option<&EnemyConfig>,
            Option<&mut BossBrain>,
            Option<&BossConfig>,
        ),
        Without<Player>,
    >,
    enemies: Query<(Entity, &Health), (With<EnemyBrain>, Without<Player>)>,
    mut players: RewardedPlayerQuery,
    mut ledger: ResMut<MoralLedger>,
    mut director: ResMut<LevelDirector>,
    tuning: Res<CombatTuning>,
    time: Res<Time>,
    mut presentation: ResMut<Presentation>,
    mut level_events: EventWriter<LevelEvent>,
) {
    let mut processed = HashSet::new();

    for event in deaths.read() {
        if !processed.insert(event.entity) {
            continue;
        }

        // Player
        if let Ok((player, _, _, _, _, is_dead)) = players.get(event.entity) {
            if is_dead {
                continue;
            }
            commands.entity(player).insert(Dead);
            presentation.animation_trigger(player, "die");
            presentation.dialogue("Game Over", "Has perdido todas tus vidas.");
            level_events.write(LevelEvent::GameOver);
            crate::logger::log_warning("☠️ Game Over");
            continue;
        }

        let Ok((mut collider, mut velocity, is_dead, enemy_config, boss_brain, boss_config)) =
            victims.get_mut(event.entity)
        else {
            crate::logger::log_warning(&format!("EntityDied for unknown entity {:?}", event.entity));
            continue;
        };
        if is_dead {
            continue;
        }

        collider.enabled = false;
        velocity.0 = Vec2::ZERO;
        commands.entity(event.entity).insert(Dead);
        presentation.animation_trigger(event.entity, "die");

        let despawn_at = time.elapsed_secs() + CORPSE_DESPAWN_DELAY;

        if let Some(config) = enemy_config {
            let shifts = [
                ledger.add_luz(config.luz_on_defeat),
                ledger.add_sombra(config.sombra_on_defeat),
            ];
            presentation.moral_changed(ledger.luz, ledger.sombra);
            for shift in shifts.into_iter().flatten() {
                level_events.write(LevelEvent::AlignmentShift(shift));
            }

            reward_player(&mut players, config.experience_reward, &tuning, &mut presentation);
            commands.entity(event.entity).insert(DespawnAfter { despawn_time: despawn_at });

            let alive = enemies
                .iter()
                .filter(|(entity, health)| *entity != event.entity && health.is_alive())
                .count();
            if alive == 0 {
                director.complete_level(&mut presentation, &mut level_events);
            }

            crate::logger::log_info(&format!("👻 Enemy {:?} defeated", event.entity));
        } else if let Some(config) = boss_config {
            if let Some(mut brain) = boss_brain {
                brain.cancel_attack();
            }

            reward_player(&mut players, config.experience_reward, &tuning, &mut presentation);

            match &config.end_scene {
                Some(scene) if !scene.is_empty() => {
                    director.schedule_transition(scene.clone(), config.end_scene_delay);
                    level_events.write(LevelEvent::BossDefeated);
                }
                _ => {
                    commands.entity(event.entity).insert(DespawnAfter { despawn_time: despawn_at });
                }
            }

            crate::logger::log_info(&format!("👹 Boss {:?} defeated", event.entity));
        }
    }
}

/// System: деспавн entities с истёкшим DespawnAfter timeout
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();

    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            crate::logger::log(&format!("⚰️ Despawning entity {:?} (timeout)", entity));
            commands.entity(entity).despawn();
        }
    }
}
