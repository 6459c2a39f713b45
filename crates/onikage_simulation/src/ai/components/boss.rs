//! Boss components: brain с attack routine и config (Orc boss)

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Вариант атаки босса
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum BossAttackKind {
    Light,
    Heavy,
}

impl BossAttackKind {
    /// Animation trigger атаки
    pub fn trigger(self) -> &'static str {
        match self {
            BossAttackKind::Light => "attack1",
            BossAttackKind::Heavy => "attack2",
        }
    }
}

/// Урон / windup / cooldown одного варианта атаки
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossAttackProfile {
    pub damage: u32,
    pub windup: f32,
    pub cooldown: f32,
}

/// Фаза attack routine
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum AttackPhase {
    /// Урон в конце windup
    Windup { remaining: f32 },
    /// Cooldown после удара; routine всё ещё владеет боссом
    Recovery { remaining: f32 },
}

/// Активная атака: владеет боссом на windup + cooldown (без повторного входа)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct BossAttackRoutine {
    pub kind: BossAttackKind,
    pub phase: AttackPhase,
}

/// Параметры босса
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub max_health: u32,
    pub move_speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub light: BossAttackProfile,
    pub heavy: BossAttackProfile,
    pub knockback_distance: f32,
    pub knockback_speed: f32,
    /// Смещение центра (дистанции считаются от центра, не от pivot)
    pub center_offset: [f32; 2],
    /// Смещение индикатора обнаружения от центра
    pub indicator_offset: [f32; 2],
    /// Сцена финала; None/"": просто деспавн после смерти
    pub end_scene: Option<String>,
    pub end_scene_delay: f32,
    pub experience_reward: u32,
    pub collider_radius: f32,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            max_health: 250,
            move_speed: 2.2,
            detection_range: 6.0,
            attack_range: 1.6,
            light: BossAttackProfile {
                damage: 20,
                windup: 0.25,
                cooldown: 1.2,
            },
            heavy: BossAttackProfile {
                damage: 35,
                windup: 0.35,
                cooldown: 2.4,
            },
            knockback_distance: 1.2,
            knockback_speed: 12.0,
            center_offset: [0.0, 0.0],
            indicator_offset: [0.0, 1.0],
            end_scene: Some("Final".to_string()),
            end_scene_delay: 6.0,
            experience_reward: 5,
            collider_radius: 0.6,
        }
    }
}

impl BossConfig {
    pub fn profile(&self, kind: BossAttackKind) -> &BossAttackProfile {
        match kind {
            BossAttackKind::Light => &self.light,
            BossAttackKind::Heavy => &self.heavy,
        }
    }

    pub fn center(&self, position: Vec2) -> Vec2 {
        position + Vec2::from(self.center_offset)
    }

    pub fn indicator_position(&self, position: Vec2) -> Vec2 {
        self.center(position) + Vec2::from(self.indicator_offset)
    }
}

/// Что boss brain решил на этом тике
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BossDecision {
    pub velocity: Vec2,
    pub facing: Option<Vec2>,
    pub detection_changed: Option<bool>,
    /// Some(moving) когда меняется animation флаг isMoving
    pub moving_changed: Option<bool>,
    pub started: Option<BossAttackKind>,
    /// Урон игроку в конце windup
    pub strike: Option<u32>,
}

/// Неявное состояние босса: detected / attacking (+ HurtCooldown, Health снаружи)
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BossBrain {
    pub player_detected: bool,
    pub attack: Option<BossAttackRoutine>,
    pub moving: bool,
}

impl BossBrain {
    pub fn is_attacking(&self) -> bool {
        self.attack.is_some()
    }

    /// Смерть обрывает routine (отложенный удар не наносится)
    pub fn cancel_attack(&mut self) {
        self.attack = None;
    }

    fn advance_routine(&mut self, config: &BossConfig, delta: f32) -> Option<u32> {
        let routine = self.attack.as_mut()?;
        let profile = *config.profile(routine.kind);

        match routine.phase {
            AttackPhase::Windup { remaining } => {
                let remaining = remaining - delta;
                if remaining <= 0.0 {
                    routine.phase = AttackPhase::Recovery {
                        remaining: profile.cooldown,
                    };
                    return Some(profile.damage);
                }
                routine.phase = AttackPhase::Windup { remaining };
            }
            AttackPhase::Recovery { remaining } => {
                let remaining = remaining - delta;
                if remaining <= 0.0 {
                    self.attack = None;
                } else {
                    routine.phase = AttackPhase::Recovery { remaining };
                }
            }
        }
        None
    }

    fn set_moving(&mut self, moving: bool, decision: &mut BossDecision) {
        if self.moving != moving {
            self.moving = moving;
            decision.moving_changed = Some(moving);
        }
    }

    /// Один тик boss AI.
    ///
    /// `to_player`: вектор от центра босса к живому игроку.
    /// Attack routine тикает всегда (даже в hurt window); hurt window
    /// пропускает движение и старт новой атаки.
    pub fn think<R: Rng + ?Sized>(
        &mut self,
        config: &BossConfig,
        to_player: Option<Vec2>,
        hurting: bool,
        delta: f32,
        rng: &mut R,
    ) -> BossDecision {
        let mut decision = BossDecision {
            strike: self.advance_routine(config, delta),
            ..BossDecision::default()
        };

        let detected = to_player.is_some_and(|offset| offset.length() <= config.detection_range);
        if detected != self.player_detected {
            self.player_detected = detected;
            decision.detection_changed = Some(detected);
        }

        if hurting {
            return decision;
        }

        let Some(offset) = to_player.filter(|_| detected) else {
            self.set_moving(false, &mut decision);
            return decision;
        };

        if offset.length() > config.attack_range {
            let direction = offset.normalize_or_zero();
            decision.velocity = direction * config.move_speed;
            decision.facing = Some(direction);
            self.set_moving(true, &mut decision);
        } else {
            self.set_moving(false, &mut decision);
            if self.attack.is_none() {
                let kind = if rng.gen::<f32>() > 0.5 {
                    BossAttackKind::Heavy
                } else {
                    BossAttackKind::Light
                };
                self.attack = Some(BossAttackRoutine {
                    kind,
                    phase: AttackPhase::Windup {
                        remaining: config.profile(kind).windup,
                    },
                });
                decision.started = Some(kind);
            }
        }

        decision
    }
}
