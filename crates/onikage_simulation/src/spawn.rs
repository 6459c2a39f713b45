//! Spawn helpers для создания entities
//!
//! Все helpers берут параметры из `CombatTuning` (если resource есть в world).
//! Препятствия сразу блокируют свои клетки в `ObstacleMask`.

use bevy::prelude::*;

use crate::ai::{BossBrain, BossConfig, EnemyBrain, EnemyConfig};
use crate::combat::{CombatStance, FuryMeter, PlayerAttack};
use crate::components::{
    Breakable, Collider, Facing, Health, Hostile, HurtCooldown, HurtFlash, Invulnerability,
    KillGate, KnockbackState, MoveSpeed, ObstacleMask, Velocity,
};
use crate::config::CombatTuning;
use crate::player::{Player, PlayerMotion, PlayerProgress};

fn tuning(world: &World) -> CombatTuning {
    world.get_resource::<CombatTuning>().cloned().unwrap_or_default()
}

fn at(position: Vec2) -> Transform {
    Transform::from_translation(position.extend(0.0))
}

/// Спавн Onikage (режим Sombra, пустой fury meter)
pub fn spawn_player(world: &mut World, position: Vec2) -> Entity {
    let tuning = tuning(world);
    let stance = CombatStance::default();

    world
        .spawn((
            Player,
            at(position),
            Health::new(tuning.player.max_health),
            PlayerProgress::with_lives(tuning.player.lives),
            stance,
            FuryMeter::new(tuning.combat.max_fury),
            PlayerAttack::default(),
            MoveSpeed {
                speed: tuning.player.speed_for(stance.mode),
            },
            PlayerMotion::default(),
            Facing::default(),
            Invulnerability::default(),
            KnockbackState::respecting_obstacles(), // Игрок не вылетает в стены
            Collider::circle(tuning.player.collider_radius),
        ))
        .id()
}

/// Спавн Espíritu Engañado с параметрами из `tuning.enemy`
pub fn spawn_enemy(world: &mut World, position: Vec2) -> Entity {
    let config = tuning(world).enemy;
    spawn_enemy_with(world, position, config, EnemyBrain::default())
}

/// Спавн врага с явным config и начальным состоянием FSM
pub fn spawn_enemy_with(
    world: &mut World,
    position: Vec2,
    config: EnemyConfig,
    brain: EnemyBrain,
) -> Entity {
    let hurt_cooldown = tuning(world).combat.hurt_cooldown;

    world
        .spawn((
            Hostile,
            at(position),
            Health::new(config.max_health),
            HurtCooldown::new(hurt_cooldown),
            HurtFlash::default(),
            KnockbackState::default(),
            Velocity::default(),
            Facing::default(),
            Collider::circle(config.collider_radius),
            brain,
            config,
        ))
        .id()
}

/// Спавн босса (Orc) с параметрами из `tuning.boss`
pub fn spawn_boss(world: &mut World, position: Vec2) -> Entity {
    let config = tuning(world).boss;
    spawn_boss_with(world, position, config)
}

pub fn spawn_boss_with(world: &mut World, position: Vec2, config: BossConfig) -> Entity {
    let hurt_cooldown = tuning(world).combat.hurt_cooldown;

    world
        .spawn((
            Hostile,
            at(position),
            Health::new(config.max_health),
            HurtCooldown::new(hurt_cooldown),
            HurtFlash::default(),
            KnockbackState::default(),
            Velocity::default(),
            Facing::default(),
            Collider::circle(config.collider_radius),
            BossBrain::default(),
            config,
        ))
        .id()
}

/// Спавн разрушаемого препятствия; его клетки становятся solid
pub fn spawn_breakable(world: &mut World, position: Vec2, breakable: Breakable) -> Entity {
    if let Some(mut mask) = world.get_resource_mut::<ObstacleMask>() {
        for cell in &breakable.cells {
            mask.block(*cell);
        }
    }

    world
        .spawn((at(position), breakable, HurtFlash::default()))
        .id()
}

/// Спавн ворот, открывающихся по числу убийств
pub fn spawn_kill_gate(world: &mut World, position: Vec2, gate: KillGate) -> Entity {
    if let Some(mut mask) = world.get_resource_mut::<ObstacleMask>() {
        for cell in &gate.cells {
            mask.block(*cell);
        }
    }

    world.spawn((at(position), gate)).id()
}
