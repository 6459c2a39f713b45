//! AI decision-making module
//!
//! Enemy (Espíritu Engañado): FSM Idle/Patrol/Chase/Attack/Hurt/Dead.
//! Boss: неявное состояние (detected / attacking / hurting) + attack routine.
//!
//! Решения чистые (`EnemyBrain::think`, `BossBrain::think`), системы только
//! читают мир и применяют решение: velocity, facing, удары, bridge вызовы.

use bevy::prelude::*;

pub mod components;
pub mod systems;

// Re-export основных типов
pub use components::{
    AttackPhase, BossAttackKind, BossAttackProfile, BossAttackRoutine, BossBrain, BossConfig,
    BossDecision, EnemyBrain, EnemyConfig, EnemyDecision, EnemyState,
};

use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. enemy_ai → boss_ai (Ai): решения, удары по игроку
/// 2. integrate_velocity (Motion): до knockback шага
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                (systems::enemy_ai, systems::boss_ai)
                    .chain() // Последовательное выполнение для детерминизма (общий RNG)
                    .in_set(SimulationSet::Ai),
                systems::integrate_velocity
                    .in_set(SimulationSet::Motion)
                    .before(crate::combat::systems::step_knockback),
            ),
        );
    }
}
