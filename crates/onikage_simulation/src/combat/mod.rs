//! Combat system module
//!
//! ECS ответственность:
//! - Game state: Health, FuryMeter, CombatStance, PlayerAttack
//! - Combat rules: cooldown gating, fury экономика, hit resolution, knockback
//! - Events: PlayerAction (input), DamageDealt, EntityDied, CombatModeChanged, FuryChanged
//!
//! Presentation ответственность (через bridge):
//! - анимации атаки/hurt/die, цветовые вспышки, floating text смены режима

use bevy::prelude::*;

pub mod components;
pub mod damage;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::{CombatMode, CombatStance, FuryMeter, PlayerAttack, SkillSlot};
pub use damage::{
    knockback_direction, mode_tint, strike_hostile, strike_player, DamageOutcome, Dead,
    DespawnAfter, HostileTarget, PlayerTarget,
};
pub use events::{CombatModeChanged, DamageDealt, EntityDied, FuryChanged, PlayerAction};

use crate::SimulationSet;

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate по фазам `SimulationSet`:
/// 1. Timers: cooldowns, hurt windows, invulnerability, вспышки
/// 2. Input: PlayerAction → атаки, смена режима, skills
/// 3. Motion: knockback (после velocity и шагов игрока)
/// 4. Resolve: смерти, награды, respawn препятствий, kill gates
/// 5. Cleanup: деспавн по таймауту
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<PlayerAction>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<CombatModeChanged>()
            .add_event::<FuryChanged>();

        app.add_systems(
            FixedUpdate,
            (
                systems::tick_combat_timers.in_set(SimulationSet::Timers),
                systems::handle_player_actions.in_set(SimulationSet::Input),
                systems::step_knockback.in_set(SimulationSet::Motion),
                (
                    systems::handle_deaths,
                    systems::respawn_breakables,
                    systems::open_kill_gates,
                )
                    .chain()
                    .in_set(SimulationSet::Resolve),
                systems::despawn_after_timeout.in_set(SimulationSet::Cleanup),
            ),
        );
    }
}
