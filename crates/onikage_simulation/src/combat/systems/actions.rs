//! Player combat input: базовая атака, hit frame, смена режима, skills

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::ai::EnemyBrain;
use crate::combat::damage::{knockback_direction, strike_hostile, DamageOutcome, HostileTarget};
use crate::combat::{
    CombatMode, CombatModeChanged, CombatStance, DamageDealt, Dead, EntityDied, FuryChanged,
    FuryMeter, PlayerAction, PlayerAttack,
};
use crate::components::{
    planar, Collider, Facing, Health, Hostile, HurtCooldown, HurtFlash, KnockbackState, MoveSpeed,
};
use crate::config::{AttackTuning, CombatTuning};
use crate::level::LevelEvent;
use crate::player::{Player, PlayerMotion, PlayerProgress};
use crate::presentation::{Presentation, Tint};

use super::obstacles::ObstacleAccess;

/// Говорящий для floating text / fallback диалога игрока
pub const PLAYER_SPEAKER: &str = "Onikage";

/// Все события, которые пишет combat input
#[derive(SystemParam)]
pub struct CombatEvents<'w> {
    pub damage: EventWriter<'w, DamageDealt>,
    pub died: EventWriter<'w, EntityDied>,
    pub mode: EventWriter<'w, CombatModeChanged>,
    pub fury: EventWriter<'w, FuryChanged>,
    pub level: EventWriter<'w, LevelEvent>,
}

/// Цели атак игрока: Enemy и Boss
pub type HostileQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static Transform,
        &'static Collider,
        &'static mut Health,
        &'static mut HurtCooldown,
        &'static mut HurtFlash,
        &'static mut KnockbackState,
        Option<&'static mut EnemyBrain>,
    ),
    (With<Hostile>, Without<Player>),
>;

type PlayerCombatQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static Transform,
        &'static Facing,
        &'static mut CombatStance,
        &'static mut FuryMeter,
        &'static mut PlayerAttack,
        &'static mut Health,
        &'static mut MoveSpeed,
        &'static mut PlayerMotion,
        &'static PlayerProgress,
        Has<Dead>,
    ),
    With<Player>,
>;

/// Один area check по враждебным акторам
#[derive(Debug, Clone, Copy)]
struct Sweep {
    attacker: Entity,
    center: Vec2,
    radius: f32,
    damage: u32,
    mode: CombatMode,
    /// (distance, speed): None для skills
    knockback: Option<(f32, f32)>,
}

/// Применяет sweep ко всем Enemy/Boss в круге, возвращает число попаданий.
///
/// `swing` это текущий взмах базовой атаки; цель, уже получившая урон этим
/// взмахом, пропускается.
fn sweep_hostiles(
    sweep: Sweep,
    mut swing: Option<&mut PlayerAttack>,
    hostiles: &mut HostileQuery,
    flash_duration: f32,
    presentation: &mut Presentation,
    events: &mut CombatEvents,
) -> u32 {
    let mut landed = 0;

    for (entity, transform, collider, mut health, mut hurt, mut flash, mut knockback, mut brain) in
        hostiles.iter_mut()
    {
        let position = planar(transform);
        if !collider.overlaps_circle(position, sweep.center, sweep.radius) {
            continue;
        }
        if let Some(swing) = swing.as_deref() {
            if swing.hit_entities.contains(&entity) {
                continue;
            }
        }

        let outcome = strike_hostile(
            HostileTarget {
                entity,
                health: &mut *health,
                hurt: &mut *hurt,
                flash: &mut *flash,
                brain: brain.as_deref_mut(),
            },
            sweep.damage,
            sweep.mode,
            flash_duration,
            presentation,
        );

        if !outcome.landed() {
            continue;
        }

        landed += 1;
        if let Some(swing) = swing.as_deref_mut() {
            swing.mark_hit(entity);
        }

        events.damage.write(DamageDealt {
            attacker: sweep.attacker,
            target: entity,
            damage: sweep.damage,
            target_died: outcome == DamageOutcome::Killed,
        });

        match outcome {
            DamageOutcome::Wounded => {
                if let Some((distance, speed)) = sweep.knockback {
                    let direction = knockback_direction(sweep.center, position, Vec2::X);
                    knockback.apply(direction, distance, speed);
                }
            }
            DamageOutcome::Killed => {
                events.died.write(EntityDied {
                    entity,
                    killer: Some(sweep.attacker),
                });
            }
            DamageOutcome::Ignored => {}
        }
    }

    landed
}

/// Награда за попадания базовой атакой: Furia лечит, Sombra копит fury
fn reward_hits(
    landed: u32,
    mode: CombatMode,
    health: &mut Health,
    fury: &mut FuryMeter,
    tuning: &AttackTuning,
    events: &mut CombatEvents,
) {
    if landed == 0 {
        return;
    }

    match mode {
        CombatMode::Fury => {
            for _ in 0..landed {
                health.heal(tuning.fury_heal_per_hit);
            }
        }
        CombatMode::Shadow => {
            for _ in 0..landed {
                fury.add(tuning.fury_gain_per_hit);
            }
            events.fury.write(FuryChanged { ratio: fury.ratio() });
        }
    }
}

/// System: обработка боевого input игрока
///
/// Порядок для BasicAttack:
/// 1. canAttack (cooldown): иначе отказ без очереди
/// 2. Furia и fury < cost → отказ (только лог, состояние не меняется)
/// 3. cooldown + hit window, списание fury, анимация, рывок вперёд
/// 4. Немедленный circle check (повторяется на HitFrame пока окно открыто)
pub fn handle_player_actions(
    mut actions: EventReader<PlayerAction>,
    mut players: PlayerCombatQuery,
    mut hostiles: HostileQuery,
    mut obstacles: ObstacleAccess,
    tuning: Res<CombatTuning>,
    mut presentation: ResMut<Presentation>,
    mut events: CombatEvents,
) {
    let attack_tuning = &tuning.combat;

    for action in actions.read() {
        if matches!(action, PlayerAction::Move(_)) {
            continue;
        }

        let Ok((
            player,
            transform,
            facing,
            mut stance,
            mut fury,
            mut attack,
            mut health,
            mut speed,
            mut motion,
            progress,
            is_dead,
        )) = players.single_mut()
        else {
            crate::logger::log_warning(&format!("{:?} without a player entity", action));
            continue;
        };
        if is_dead {
            continue;
        }

        let position = planar(transform);
        let mode = stance.mode;

        match *action {
            PlayerAction::BasicAttack => {
                if !attack.can_attack() {
                    crate::logger::log("⏳ Attack rejected: cooldown");
                    continue;
                }
                if mode == CombatMode::Fury && !fury.can_afford(attack_tuning.fury_cost_basic_attack) {
                    crate::logger::log(&format!(
                        "⏳ Attack rejected: fury {:.0} < {:.0}",
                        fury.current, attack_tuning.fury_cost_basic_attack
                    ));
                    continue;
                }

                attack.start_swing(attack_tuning.attack_cooldown, attack_tuning.hit_window);
                if mode == CombatMode::Fury {
                    fury.consume(attack_tuning.fury_cost_basic_attack);
                    events.fury.write(FuryChanged { ratio: fury.ratio() });
                }

                presentation.animation_trigger(player, "attack");
                presentation.animation_float(player, "attackX", facing.0.x);
                presentation.animation_float(player, "attackY", facing.0.y);
                motion.start_dash(facing.0, tuning.player.dash_distance, tuning.player.dash_speed);

                crate::logger::log(&format!("⚔️ Basic attack ({})", mode.label()));
            }
            PlayerAction::HitFrame => {
                if !attack.is_hit_window_open() {
                    continue;
                }
            }
            PlayerAction::SwitchMode => {
                let mode = stance.toggle();
                speed.speed = tuning.player.speed_for(mode) + progress.speed_bonus;

                presentation.animation_bool(player, "isFuryMode", mode == CombatMode::Fury);
                let tint = match mode {
                    CombatMode::Fury => Tint::Red,
                    CombatMode::Shadow => Tint::Blue,
                };
                presentation.announce(
                    PLAYER_SPEAKER,
                    &format!("Modo: {}", mode.label()),
                    position + Vec2::Y,
                    tint,
                );
                events.mode.write(CombatModeChanged { mode });
                crate::logger::log_info(&format!("🔄 Combat mode → {}", mode.label()));
                continue;
            }
            PlayerAction::Skill(slot) => {
                let skill = *tuning.skills.get(slot);
                if mode == CombatMode::Fury {
                    if !fury.can_afford(skill.fury_cost) {
                        crate::logger::log(&format!(
                            "⏳ Skill {:?} rejected: fury {:.0} < {:.0}",
                            slot, fury.current, skill.fury_cost
                        ));
                        continue;
                    }
                    fury.consume(skill.fury_cost);
                    events.fury.write(FuryChanged { ratio: fury.ratio() });
                }

                let landed = sweep_hostiles(
                    Sweep {
                        attacker: player,
                        center: position,
                        radius: skill.radius,
                        damage: skill.damage,
                        mode,
                        knockback: None,
                    },
                    None,
                    &mut hostiles,
                    attack_tuning.hurt_flash,
                    &mut presentation,
                    &mut events,
                );
                crate::logger::log(&format!("🌀 Skill {:?} hit {} target(s)", slot, landed));
                continue;
            }
            PlayerAction::Move(_) => continue,
        }

        // BasicAttack / HitFrame: circle check перед игроком
        let center = position + facing.0 * attack_tuning.hit_offset;
        let landed = sweep_hostiles(
            Sweep {
                attacker: player,
                center,
                radius: attack_tuning.hit_radius,
                damage: attack_tuning.damage,
                mode,
                knockback: Some((attack_tuning.knockback_distance, attack_tuning.knockback_speed)),
            },
            Some(&mut *attack),
            &mut hostiles,
            attack_tuning.hurt_flash,
            &mut presentation,
            &mut events,
        );
        reward_hits(landed, mode, &mut *health, &mut *fury, attack_tuning, &mut events);

        obstacles.strike_area(
            center,
            attack_tuning.hit_radius,
            &mut *attack,
            attack_tuning.hurt_flash,
            &mut presentation,
            &mut events.level,
        );
    }
}
