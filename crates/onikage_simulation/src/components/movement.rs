//! Movement компоненты: velocity, скорость, knockback

use bevy::prelude::*;

/// Линейная скорость (units/sec), интегрируется в Transform каждый тик
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Velocity(pub Vec2);

/// Скорость движения актора (units/sec)
#[derive(Component, Clone, Copy, Debug, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MoveSpeed {
    pub speed: f32,
}

impl Default for MoveSpeed {
    fn default() -> Self {
        Self { speed: 3.0 }
    }
}

/// Запас по времени сверх distance/speed, после которого knockback обрывается
pub const KNOCKBACK_TIMEOUT_SLACK: f32 = 0.15;

/// Одно активное смещение knockback.
///
/// Скорость падает линейно от `speed` до 0 по мере того как `travelled → distance`,
/// поэтому движение почти всегда завершается по таймауту
/// `distance / speed + 0.15`, не доходя до полной дистанции.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct KnockbackMotion {
    pub direction: Vec2,
    pub distance: f32,
    pub speed: f32,
    pub travelled: f32,
    pub elapsed: f32,
    pub max_time: f32,
}

impl KnockbackMotion {
    pub fn new(direction: Vec2, distance: f32, speed: f32) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            distance,
            speed,
            travelled: 0.0,
            elapsed: 0.0,
            max_time: distance / speed.max(0.0001) + KNOCKBACK_TIMEOUT_SLACK,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.travelled >= self.distance || self.elapsed >= self.max_time
    }

    /// Смещение на этот тик (None если движение уже завершено)
    pub fn next_step(&self, delta: f32) -> Option<Vec2> {
        if self.is_finished() {
            return None;
        }
        let progress = (self.travelled / self.distance).clamp(0.0, 1.0);
        let current_speed = self.speed + (0.0 - self.speed) * progress;
        Some(self.direction * current_speed * delta)
    }

    pub fn advance(&mut self, step: Vec2, delta: f32) {
        self.travelled += step.length();
        self.elapsed += delta;
    }
}

/// Knockback слот актора: не больше одного активного движения.
///
/// Новый `apply` отменяет текущий и стартует с текущей позиции.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct KnockbackState {
    pub active: Option<KnockbackMotion>,
    /// Игрок не может быть выбит в стену (проверка ObstacleMask)
    pub blocked_by_obstacles: bool,
}

impl KnockbackState {
    pub fn respecting_obstacles() -> Self {
        Self {
            active: None,
            blocked_by_obstacles: true,
        }
    }

    pub fn apply(&mut self, direction: Vec2, distance: f32, speed: f32) {
        self.active = Some(KnockbackMotion::new(direction, distance, speed));
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }
}
