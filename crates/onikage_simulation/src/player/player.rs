//! Player компоненты: control marker, прогресс (xp/level/lives/kills), grid motion
//!
//! Отмечает entity которым управляет игрок через input (в отличие от AI).

use bevy::prelude::*;

use crate::combat::CombatMode;
use crate::components::{Health, MoveSpeed};
use crate::config::PlayerTuning;
use crate::presentation::Presentation;

/// Marker component для player-controlled entity
///
/// Акторы БЕЗ этого компонента управляются AI systems.
/// Акторы С этим компонентом получают команды из `PlayerAction` событий.
///
/// # Архитектурная заметка
/// - AI/hostile queries используют `Without<Player>` filter
/// - Input systems используют `With<Player>` filter
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Прогресс игрока: опыт, уровень, жизни, убийства
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerProgress {
    pub experience: u32,
    pub level: u32,
    pub lives: u32,
    pub kill_count: u32,
    /// Накопленный бонус скорости от уровней
    pub speed_bonus: f32,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self::with_lives(3)
    }
}

impl PlayerProgress {
    pub fn with_lives(lives: u32) -> Self {
        Self {
            experience: 0,
            level: 1,
            lives,
            kill_count: 0,
            speed_bonus: 0.0,
        }
    }

    /// Порог следующего уровня
    pub fn next_level_threshold(&self) -> u32 {
        self.level * 100
    }

    /// GainExperience: максимум один level-up за вызов, остаток опыта сохраняется.
    ///
    /// Возвращает true если уровень повышен.
    pub fn gain_experience(&mut self, amount: u32) -> bool {
        self.experience += amount;
        let threshold = self.next_level_threshold();
        if self.experience >= threshold {
            self.experience -= threshold;
            self.level += 1;
            return true;
        }
        false
    }

    /// AddKill (n ≤ 0 игнорируется), возвращает текущий счётчик
    pub fn add_kill(&mut self, amount: i32) -> u32 {
        if amount > 0 {
            self.kill_count += amount as u32;
        }
        self.kill_count
    }

    /// LoseLife, возвращает оставшиеся жизни
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }
}

/// Эффекты level-up: +max health, полное лечение, +скорость, диалог
pub fn apply_level_up(
    progress: &mut PlayerProgress,
    health: &mut Health,
    speed: &mut MoveSpeed,
    mode: CombatMode,
    tuning: &PlayerTuning,
    presentation: &mut Presentation,
) {
    health.max += tuning.level_health_bonus;
    health.restore_full();
    progress.speed_bonus += tuning.level_speed_bonus;
    speed.speed = tuning.speed_for(mode) + progress.speed_bonus;

    presentation.dialogue(
        "Nivel Ganado",
        &format!("Has subido al nivel {}", progress.level),
    );
    crate::logger::log_info(&format!("⭐ Player reached level {}", progress.level));
}

/// Шаг по сетке к соседней клетке
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct GridStep {
    pub target: Vec2,
}

/// Короткий рывок вперёд после базовой атаки
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct DashMotion {
    pub direction: Vec2,
    pub remaining: f32,
    pub speed: f32,
}

/// Движение игрока, управляемое input (не knockback)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerMotion {
    pub step: Option<GridStep>,
    pub dash: Option<DashMotion>,
}

impl PlayerMotion {
    /// Пока идёт шаг или рывок, новый шаг не начинается
    pub fn is_busy(&self) -> bool {
        self.step.is_some() || self.dash.is_some()
    }

    pub fn start_dash(&mut self, direction: Vec2, distance: f32, speed: f32) {
        let direction = direction.normalize_or_zero();
        if direction == Vec2::ZERO || distance <= 0.0 {
            return;
        }
        self.dash = Some(DashMotion {
            direction,
            remaining: distance,
            speed,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::RecordingBridge;

    #[test]
    fn test_experience_threshold_scales_with_level() {
        let mut progress = PlayerProgress::default();
        assert!(!progress.gain_experience(95));
        assert!(progress.gain_experience(10));
        assert_eq!(progress.level, 2);
        assert_eq!(progress.experience, 5);

        // Уровень 2 → порог 200
        assert!(!progress.gain_experience(190));
        assert!(progress.gain_experience(5));
        assert_eq!(progress.level, 3);
        assert_eq!(progress.experience, 0);
    }

    #[test]
    fn test_single_level_up_per_grant() {
        let mut progress = PlayerProgress::default();
        assert!(progress.gain_experience(1000));
        assert_eq!(progress.level, 2);
        assert_eq!(progress.experience, 900);
    }

    #[test]
    fn test_add_kill_ignores_non_positive() {
        let mut progress = PlayerProgress::default();
        assert_eq!(progress.add_kill(0), 0);
        assert_eq!(progress.add_kill(-3), 0);
        assert_eq!(progress.add_kill(2), 2);
    }

    #[test]
    fn test_lives_floor_at_zero() {
        let mut progress = PlayerProgress::with_lives(1);
        assert_eq!(progress.lose_life(), 0);
        assert_eq!(progress.lose_life(), 0);
    }

    #[test]
    fn test_level_up_effects() {
        let mut progress = PlayerProgress::default();
        let mut health = Health::new(100);
        health.take_damage(60);
        let mut speed = MoveSpeed { speed: 4.0 };
        let tuning = PlayerTuning::default();
        let mut presentation = Presentation::new(RecordingBridge::default());

        progress.gain_experience(100);
        apply_level_up(
            &mut progress,
            &mut health,
            &mut speed,
            CombatMode::Fury,
            &tuning,
            &mut presentation,
        );

        assert_eq!(health.max, 110);
        assert_eq!(health.current, 110);
        assert!((speed.speed - 4.1).abs() < 1e-6);
    }

    #[test]
    fn test_zero_dash_ignored() {
        let mut motion = PlayerMotion::default();
        motion.start_dash(Vec2::ZERO, 1.5, 8.0);
        assert!(!motion.is_busy());

        motion.start_dash(Vec2::new(0.0, -2.0), 1.5, 8.0);
        assert_eq!(motion.dash.map(|d| d.direction), Some(Vec2::NEG_Y));
    }
}
