//! Damage протокол между акторами
//!
//! Урон применяется синхронно внутри атакующей системы: вызывающий сразу
//! видит health после удара. Правила:
//! - Enemy/Boss: игнор если мертв или в hurt window; иначе урон, вспышка цвета
//!   режима (Furia → red, Sombra → blue), hurt window 0.5s
//! - Player: игнор если мертв или неуязвим; иначе урон, invulnerability 0.3s,
//!   на 0 потеря жизни (с запасом жизней полное восстановление)

use bevy::prelude::*;

use crate::ai::{EnemyBrain, EnemyState};
use crate::components::{Health, HurtCooldown, HurtFlash, Invulnerability};
use crate::player::PlayerProgress;
use crate::presentation::{Presentation, Tint};

use super::CombatMode;

/// Результат одного TakeDamage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Мертв / hurt window / неуязвим: ничего не изменилось
    Ignored,
    Wounded,
    Killed,
}

impl DamageOutcome {
    pub fn landed(self) -> bool {
        self != DamageOutcome::Ignored
    }
}

/// Компонент-маркер: entity мертв (terminal)
#[derive(Component, Debug)]
pub struct Dead;

/// Компонент: деспавн entity после указанного времени
#[derive(Component, Debug)]
pub struct DespawnAfter {
    /// Время деспавна (в секундах от старта симуляции)
    pub despawn_time: f32,
}

/// Цвет вспышки попадания для режима атакующего
pub fn mode_tint(mode: CombatMode) -> Tint {
    match mode {
        CombatMode::Fury => Tint::Red,
        CombatMode::Shadow => Tint::Blue,
    }
}

/// Направление отталкивания от `from` к `to`; при совпадении точек: `fallback`
pub fn knockback_direction(from: Vec2, to: Vec2, fallback: Vec2) -> Vec2 {
    let direction = (to - from).normalize_or_zero();
    if direction == Vec2::ZERO {
        fallback.normalize_or_zero()
    } else {
        direction
    }
}

/// Цель атаки игрока (Enemy или Boss)
pub struct HostileTarget<'a> {
    pub entity: Entity,
    pub health: &'a mut Health,
    pub hurt: &'a mut HurtCooldown,
    pub flash: &'a mut HurtFlash,
    /// Только у обычных Enemy (FSM уходит в Hurt/Dead)
    pub brain: Option<&'a mut EnemyBrain>,
}

/// TakeDamage(amount, mode) для Enemy/Boss
pub fn strike_hostile(
    target: HostileTarget<'_>,
    amount: u32,
    mode: CombatMode,
    flash_duration: f32,
    presentation: &mut Presentation,
) -> DamageOutcome {
    let HostileTarget {
        entity,
        health,
        hurt,
        flash,
        brain,
    } = target;

    if !health.is_alive() || hurt.is_hurting() {
        return DamageOutcome::Ignored;
    }

    health.take_damage(amount);
    presentation.tint(entity, mode_tint(mode));
    flash.remaining = flash_duration;

    crate::logger::log(&format!(
        "🩸 {:?} takes {} damage ({}) → {}/{}",
        entity,
        amount,
        mode.label(),
        health.current,
        health.max
    ));

    if health.is_alive() {
        hurt.start();
        presentation.animation_trigger(entity, "hurt");
        if let Some(brain) = brain {
            brain.state = EnemyState::Hurt;
        }
        DamageOutcome::Wounded
    } else {
        if let Some(brain) = brain {
            brain.state = EnemyState::Dead;
        }
        DamageOutcome::Killed
    }
}

/// Игрок как цель атаки Enemy/Boss
pub struct PlayerTarget<'a> {
    pub entity: Entity,
    pub health: &'a mut Health,
    pub invulnerability: &'a mut Invulnerability,
    pub progress: &'a mut PlayerProgress,
}

/// TakeDamage(amount) для игрока (+ LoseLife на нуле)
pub fn strike_player(
    target: PlayerTarget<'_>,
    amount: u32,
    invulnerability_duration: f32,
    presentation: &mut Presentation,
) -> DamageOutcome {
    let PlayerTarget {
        entity,
        health,
        invulnerability,
        progress,
    } = target;

    if !health.is_alive() || invulnerability.is_active() {
        return DamageOutcome::Ignored;
    }

    health.take_damage(amount);
    presentation.animation_trigger(entity, "hurt");
    invulnerability.start(invulnerability_duration);

    if health.is_alive() {
        return DamageOutcome::Wounded;
    }

    let lives = progress.lose_life();
    if lives > 0 {
        health.restore_full();
        crate::logger::log_warning(&format!("💔 Player lost a life ({} left)", lives));
        DamageOutcome::Wounded
    } else {
        crate::logger::log_warning("💀 Player has no lives left");
        DamageOutcome::Killed
    }
}
