//! Enemy FSM components (state machine, config, per-tick decision).

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Enemy FSM состояния
///
/// Ровно одно активно. `Dead`: terminal. `Hurt` входится снаружи (TakeDamage)
/// и выходит в `Chase`, когда гаснет hurt window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum EnemyState {
    Idle,
    /// Начальное состояние после спавна
    #[default]
    Patrol,
    Chase,
    Attack,
    Hurt,
    Dead,
}

/// Параметры обычного врага (Espíritu Engañado)
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub max_health: u32,
    pub damage: u32,
    pub move_speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    /// Длительность атаки (урон в начале, повтор не раньше конца)
    pub attack_duration: f32,
    pub knockback_distance: f32,
    pub knockback_speed: f32,
    /// Idle/Patrol: интервал смены направления (секунды)
    pub patrol_interval_min: f32,
    pub patrol_interval_max: f32,
    pub luz_on_defeat: i32,
    pub sombra_on_defeat: i32,
    pub experience_reward: u32,
    pub collider_radius: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_health: 50,
            damage: 15,
            move_speed: 2.0,
            detection_range: 5.0,
            attack_range: 1.5,
            attack_duration: 1.0,
            knockback_distance: 1.0,
            knockback_speed: 10.0,
            patrol_interval_min: 2.0,
            patrol_interval_max: 5.0,
            luz_on_defeat: 5,
            sombra_on_defeat: 5,
            experience_reward: 5,
            collider_radius: 0.4,
        }
    }
}

/// Что FSM решила на этом тике (применяется системой)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnemyDecision {
    pub velocity: Vec2,
    pub facing: Option<Vec2>,
    /// Some(detected) на фронте обнаружения
    pub detection_changed: Option<bool>,
    /// Начать атаку: урон + knockback игроку прямо сейчас
    pub start_attack: bool,
}

/// Мозг врага: состояние FSM + таймеры
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct EnemyBrain {
    pub state: EnemyState,
    pub player_detected: bool,
    /// Направление патруля (ZERO: ещё не выбрано)
    pub patrol_direction: Vec2,
    pub patrol_timer: f32,
    /// > 0 пока идёт атака
    pub attack_timer: f32,
    /// Последние отправленные animation флаги
    pub moving: bool,
    pub chasing: bool,
}

impl Default for EnemyBrain {
    fn default() -> Self {
        Self {
            state: EnemyState::Patrol,
            player_detected: false,
            patrol_direction: Vec2::ZERO,
            patrol_timer: 0.0,
            attack_timer: 0.0,
            moving: false,
            chasing: false,
        }
    }
}

impl EnemyBrain {
    /// Враг, стоящий на месте `timer` секунд перед патрулём
    pub fn idle(timer: f32) -> Self {
        Self {
            state: EnemyState::Idle,
            patrol_timer: timer,
            ..Self::default()
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_timer > 0.0
    }

    fn reroll_heading<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.patrol_direction = Vec2::from_angle(rng.gen_range(0.0..TAU));
    }

    fn reroll_timer<R: Rng + ?Sized>(&mut self, config: &EnemyConfig, rng: &mut R) {
        let min = config.patrol_interval_min.min(config.patrol_interval_max);
        let max = config.patrol_interval_max.max(min);
        self.patrol_timer = rng.gen_range(min..=max);
    }

    /// Один тик FSM.
    ///
    /// `to_player`: вектор от врага к живому игроку (None если игрока нет).
    /// Детекция оценивается до переходов, переходы: до движения.
    pub fn think<R: Rng + ?Sized>(
        &mut self,
        config: &EnemyConfig,
        to_player: Option<Vec2>,
        hurting: bool,
        delta: f32,
        rng: &mut R,
    ) -> EnemyDecision {
        let mut decision = EnemyDecision::default();
        if self.state == EnemyState::Dead {
            return decision;
        }

        self.attack_timer = (self.attack_timer - delta).max(0.0);

        let distance = to_player.map(|offset| offset.length());
        let detected = distance.is_some_and(|d| d <= config.detection_range);
        if detected != self.player_detected {
            self.player_detected = detected;
            decision.detection_changed = Some(detected);
        }

        match self.state {
            EnemyState::Idle => {
                self.patrol_timer -= delta;
                if self.patrol_timer <= 0.0 {
                    self.state = EnemyState::Patrol;
                    self.reroll_heading(rng);
                    self.reroll_timer(config, rng);
                }
                if detected {
                    self.state = EnemyState::Chase;
                }
            }
            EnemyState::Patrol => {
                if self.patrol_direction == Vec2::ZERO {
                    self.reroll_heading(rng);
                    self.reroll_timer(config, rng);
                }

                decision.velocity = self.patrol_direction * config.move_speed * 0.5;

                self.patrol_timer -= delta;
                if self.patrol_timer <= 0.0 {
                    self.reroll_heading(rng);
                    self.reroll_timer(config, rng);
                }
                if detected {
                    self.state = EnemyState::Chase;
                }
            }
            EnemyState::Chase => {
                if let (Some(offset), Some(distance)) = (to_player, distance) {
                    let direction = offset.normalize_or_zero();
                    decision.velocity = direction * config.move_speed;
                    decision.facing = Some(direction);

                    if distance <= config.attack_range {
                        self.state = EnemyState::Attack;
                        decision.velocity = Vec2::ZERO;
                    }
                }

                // Потерял игрока → патруль со свежим направлением (не Idle)
                if !detected {
                    self.state = EnemyState::Patrol;
                    self.reroll_heading(rng);
                }
            }
            EnemyState::Attack => match distance {
                Some(distance) if distance <= config.attack_range => {
                    if !self.is_attacking() {
                        self.attack_timer = config.attack_duration;
                        decision.start_attack = true;
                    }
                }
                _ => self.state = EnemyState::Chase,
            },
            EnemyState::Hurt => {
                // Выход по гаснущему hurt флагу, всегда в Chase
                if !hurting {
                    self.state = EnemyState::Chase;
                }
            }
            EnemyState::Dead => {}
        }

        decision
    }
}
