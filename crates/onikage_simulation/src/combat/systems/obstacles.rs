//! Разрушаемые препятствия и kill gates

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use rand::Rng;

use crate::combat::{DespawnAfter, PlayerAttack};
use crate::components::{
    planar, BreakOutcome, Breakable, Hostile, HurtFlash, KillGate, ObstacleMask,
};
use crate::level::LevelEvent;
use crate::player::{Player, PlayerProgress};
use crate::presentation::{Presentation, Tint};
use crate::DeterministicRng;

/// Сколько висит разрушенное (не восстанавливаемое) препятствие до деспавна
pub const BROKEN_OBSTACLE_DESPAWN_DELAY: f32 = 2.0;

/// Доступ к препятствиям для атак игрока
#[derive(SystemParam)]
pub struct ObstacleAccess<'w, 's> {
    breakables: Query<
        'w,
        's,
        (Entity, &'static Transform, &'static mut Breakable, &'static mut HurtFlash),
        (Without<Player>, Without<Hostile>),
    >,
    mask: ResMut<'w, ObstacleMask>,
    rng: ResMut<'w, DeterministicRng>,
    commands: Commands<'w, 's>,
    time: Res<'w, Time>,
}

impl ObstacleAccess<'_, '_> {
    /// Удар по всем целым препятствиям в круге (каждое: не больше раза за взмах)
    pub fn strike_area(
        &mut self,
        center: Vec2,
        radius: f32,
        swing: &mut PlayerAttack,
        flash_duration: f32,
        presentation: &mut Presentation,
        level_events: &mut EventWriter<LevelEvent>,
    ) {
        let reach = radius + self.mask.cell_size * 0.5;

        for (entity, transform, mut breakable, mut flash) in self.breakables.iter_mut() {
            let position = planar(transform);
            if breakable.broken || position.distance(center) > reach {
                continue;
            }
            if !swing.mark_hit(entity) {
                continue;
            }

            let outcome = breakable.hit();
            presentation.tint(entity, Tint::Gray);
            flash.remaining = flash_duration;

            match outcome {
                BreakOutcome::Cracked => {
                    crate::logger::log(&format!(
                        "🪵 Obstacle {:?} hit: {}/{}",
                        entity, breakable.hits, breakable.hits_required
                    ));
                }
                BreakOutcome::Broken => {
                    for cell in &breakable.cells {
                        self.mask.unblock(*cell);
                    }

                    for drop in &breakable.drops {
                        if self.rng.rng.gen::<f32>() < drop.chance {
                            level_events.write(LevelEvent::ItemDropped {
                                item: drop.item.clone(),
                                position,
                            });
                        }
                    }

                    if breakable.respawn_after.is_none() {
                        self.commands.entity(entity).insert(DespawnAfter {
                            despawn_time: self.time.elapsed_secs() + BROKEN_OBSTACLE_DESPAWN_DELAY,
                        });
                    }

                    crate::logger::log_info(&format!("💥 Obstacle {:?} destroyed", entity));
                }
                BreakOutcome::Ignored => {}
            }
        }
    }
}

/// System: восстановление разрушенных препятствий с respawn
pub fn respawn_breakables(
    mut breakables: Query<(Entity, &mut Breakable)>,
    mut mask: ResMut<ObstacleMask>,
    time: Res<Time>,
    mut presentation: ResMut<Presentation>,
) {
    let delta = time.delta_secs();

    for (entity, mut breakable) in breakables.iter_mut() {
        if breakable.tick_respawn(delta) {
            for cell in &breakable.cells {
                mask.block(*cell);
            }
            presentation.tint(entity, Tint::White);
            crate::logger::log(&format!("🪵 Obstacle {:?} respawned", entity));
        }
    }
}

/// System: открытие ворот по счётчику убийств игрока
pub fn open_kill_gates(
    mut gates: Query<(Entity, &mut KillGate)>,
    players: Query<&PlayerProgress, With<Player>>,
    mut mask: ResMut<ObstacleMask>,
    mut level_events: EventWriter<LevelEvent>,
) {
    let Ok(progress) = players.single() else {
        return;
    };

    for (entity, mut gate) in gates.iter_mut() {
        if !gate.should_open(progress.kill_count) {
            continue;
        }

        gate.open = true;
        for cell in &gate.cells {
            mask.unblock(*cell);
        }
        level_events.write(LevelEvent::GateOpened);
        crate::logger::log_info(&format!(
            "⛩️ Gate {:?} opened after {} kills",
            entity, progress.kill_count
        ));
    }
}
