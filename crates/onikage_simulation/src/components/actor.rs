//! Базовые компоненты акторов: Health, hurt window, invulnerability, facing, collider

use bevy::prelude::*;

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max. `current == 0` ⇒ актор мертв.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Heal(amount): при 0 no-op, иначе clamp до max
    pub fn heal(&mut self, amount: u32) {
        if amount == 0 {
            return;
        }
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    pub fn restore_full(&mut self) {
        self.current = self.max;
    }
}

/// Hurt window: пока активен, повторный урон игнорируется
///
/// Стартует после non-lethal удара, не отменяется: всегда дотикивает до конца.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HurtCooldown {
    pub remaining: f32,
    pub duration: f32,
}

impl Default for HurtCooldown {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl HurtCooldown {
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: 0.0,
            duration,
        }
    }

    pub fn is_hurting(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn start(&mut self) {
        self.remaining = self.duration;
    }

    pub fn tick(&mut self, delta: f32) {
        self.remaining = (self.remaining - delta).max(0.0);
    }
}

/// Неуязвимость игрока (после dash и после полученного удара)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Invulnerability {
    pub remaining: f32,
}

impl Invulnerability {
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Перекрывающиеся окна не укорачивают друг друга
    pub fn start(&mut self, duration: f32) {
        self.remaining = self.remaining.max(duration);
    }

    pub fn tick(&mut self, delta: f32) {
        self.remaining = (self.remaining - delta).max(0.0);
    }
}

/// Цветовая вспышка спрайта после попадания (reset в White по истечении)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HurtFlash {
    pub remaining: f32,
}

/// Направление взгляда (unit vector в плоскости XY)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Facing(pub Vec2);

impl Default for Facing {
    fn default() -> Self {
        // Спрайты по умолчанию смотрят вниз
        Self(Vec2::NEG_Y)
    }
}

impl Facing {
    /// Обновить направление; нулевой вектор игнорируется
    pub fn look(&mut self, direction: Vec2) {
        let normalized = direction.normalize_or_zero();
        if normalized != Vec2::ZERO {
            self.0 = normalized;
        }
    }

    /// Sprite flipX (смотрит влево)
    pub fn is_left(&self) -> bool {
        self.0.x < 0.0
    }
}

/// Круглый collider для hit queries; выключается при смерти
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Collider {
    pub radius: f32,
    pub enabled: bool,
}

impl Default for Collider {
    fn default() -> Self {
        Self::circle(0.3)
    }
}

impl Collider {
    pub fn circle(radius: f32) -> Self {
        Self {
            radius,
            enabled: true,
        }
    }

    /// Пересекается ли collider в `position` с кругом (center, radius)
    pub fn overlaps_circle(&self, position: Vec2, center: Vec2, radius: f32) -> bool {
        self.enabled && position.distance(center) <= radius + self.radius
    }
}

/// Маркер: цель для атак игрока (Enemy, Boss)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Hostile;

/// 2D позиция из Transform (симуляция живёт в плоскости XY)
pub fn planar(transform: &Transform) -> Vec2 {
    transform.translation.truncate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(100);
        assert_eq!(health.current, 100);

        health.take_damage(30);
        assert_eq!(health.current, 70);
        assert!(health.is_alive());

        health.take_damage(100); // Saturating sub
        assert_eq!(health.current, 0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_health_heal() {
        let mut health = Health::new(100);
        health.take_damage(50);

        health.heal(30);
        assert_eq!(health.current, 80);

        health.heal(0);
        assert_eq!(health.current, 80);

        health.heal(100); // Clamped to max
        assert_eq!(health.current, 100);
    }

    #[test]
    fn test_hurt_cooldown_runs_out() {
        let mut hurt = HurtCooldown::new(0.5);
        assert!(!hurt.is_hurting());

        hurt.start();
        assert!(hurt.is_hurting());

        hurt.tick(0.3);
        assert!(hurt.is_hurting());

        hurt.tick(0.3);
        assert!(!hurt.is_hurting());
        assert_eq!(hurt.remaining, 0.0);
    }

    #[test]
    fn test_invulnerability_windows_do_not_shorten() {
        let mut inv = Invulnerability::default();
        inv.start(0.3);
        inv.tick(0.1);
        inv.start(0.1);
        assert!((inv.remaining - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_facing_ignores_zero() {
        let mut facing = Facing::default();
        facing.look(Vec2::ZERO);
        assert_eq!(facing.0, Vec2::NEG_Y);

        facing.look(Vec2::new(-3.0, 0.0));
        assert_eq!(facing.0, Vec2::NEG_X);
        assert!(facing.is_left());
    }

    #[test]
    fn test_disabled_collider_never_overlaps() {
        let mut collider = Collider::circle(0.5);
        assert!(collider.overlaps_circle(Vec2::new(1.8, 0.0), Vec2::ZERO, 1.5));

        collider.enabled = false;
        assert!(!collider.overlaps_circle(Vec2::ZERO, Vec2::ZERO, 1.5));
    }

    #[derive(Debug, Clone)]
    enum HealthOp {
        Damage(u32),
        Heal(u32),
    }

    fn health_op() -> impl Strategy<Value = HealthOp> {
        prop_oneof![
            (0u32..300).prop_map(HealthOp::Damage),
            (0u32..300).prop_map(HealthOp::Heal),
        ]
    }

    proptest! {
        #[test]
        fn prop_health_stays_in_bounds(max in 1u32..1000, ops in prop::collection::vec(health_op(), 0..64)) {
            let mut health = Health::new(max);
            for op in ops {
                let was_dead = !health.is_alive();
                match op {
                    HealthOp::Damage(amount) => health.take_damage(amount),
                    HealthOp::Heal(amount) => health.heal(amount),
                }
                prop_assert!(health.current <= health.max);
                if was_dead {
                    if let HealthOp::Damage(_) = op {
                        prop_assert_eq!(health.current, 0);
                    }
                }
            }
        }
    }
}
