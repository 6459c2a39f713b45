//! Combat события: input игрока и результаты боя

use bevy::prelude::*;

use super::{CombatMode, SkillSlot};

/// Действие игрока (input edge, уже распознанный снаружи)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PlayerAction {
    /// Шаг на одну клетку (компоненты -1/0/1)
    Move(IVec2),
    BasicAttack,
    SwitchMode,
    Skill(SkillSlot),
    /// Animation-driven hit frame: повторный circle check в открытом hit window
    HitFrame,
}

/// Событие: урон нанесен
///
/// Генерируется после применения damage к Health.
/// Используется для UI, звуков, эффектов.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
    pub target_died: bool,
}

/// Событие: entity умер (health == 0)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Событие: режим игрока переключен
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CombatModeChanged {
    pub mode: CombatMode,
}

/// Событие: fury meter изменился (ratio 0..=1 для HUD)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FuryChanged {
    pub ratio: f32,
}
