//! Combat tuning: designer-настраиваемые числа в одном resource.
//!
//! Загружается из TOML (все поля опциональны, отсутствующие берутся из Default):
//!
//! ```toml
//! [combat]
//! attack_cooldown = 0.4
//! fury_cost_basic_attack = 15.0
//!
//! [enemy]
//! detection_range = 6.0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ai::{BossConfig, EnemyConfig};
use crate::combat::{CombatMode, SkillSlot};

/// Ошибки загрузки tuning файла
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tuning file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read tuning file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse tuning TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid tuning: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Все боевые параметры симуляции
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    pub player: PlayerTuning,
    pub combat: AttackTuning,
    pub skills: SkillsTuning,
    pub enemy: EnemyConfig,
    pub boss: BossConfig,
    pub moral: MoralTuning,
}

/// Параметры игрока (движение, dash, жизни)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: u32,
    pub lives: u32,
    /// Скорость в режиме Sombra
    pub shadow_speed: f32,
    /// Скорость в режиме Furia
    pub fury_speed: f32,
    pub dash_distance: f32,
    pub dash_speed: f32,
    /// Неуязвимость после dash и после полученного удара (секунды)
    pub invulnerability_duration: f32,
    pub level_health_bonus: u32,
    pub level_speed_bonus: f32,
    pub collider_radius: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 100,
            lives: 3,
            shadow_speed: 3.0,
            fury_speed: 4.0,
            dash_distance: 1.5,
            dash_speed: 8.0,
            invulnerability_duration: 0.3,
            level_health_bonus: 10,
            level_speed_bonus: 0.1,
            collider_radius: 0.3,
        }
    }
}

impl PlayerTuning {
    /// Базовая скорость режима (без бонуса уровня)
    pub fn speed_for(&self, mode: CombatMode) -> f32 {
        match mode {
            CombatMode::Shadow => self.shadow_speed,
            CombatMode::Fury => self.fury_speed,
        }
    }
}

/// Базовая атака игрока + fury экономика + hurt window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackTuning {
    pub attack_cooldown: f32,
    pub hit_window: f32,
    pub hit_radius: f32,
    /// Смещение центра hit circle вдоль facing
    pub hit_offset: f32,
    pub damage: u32,
    pub knockback_distance: f32,
    pub knockback_speed: f32,
    pub max_fury: f32,
    pub fury_gain_per_hit: f32,
    pub fury_cost_basic_attack: f32,
    pub fury_heal_per_hit: u32,
    /// Hurt window Enemy/Boss (секунды)
    pub hurt_cooldown: f32,
    /// Длительность цветовой вспышки при попадании
    pub hurt_flash: f32,
}

impl Default for AttackTuning {
    fn default() -> Self {
        Self {
            attack_cooldown: 0.5,
            hit_window: 0.2,
            hit_radius: 1.5,
            hit_offset: 0.5,
            damage: 10,
            knockback_distance: 1.0,
            knockback_speed: 10.0,
            max_fury: 100.0,
            fury_gain_per_hit: 10.0,
            fury_cost_basic_attack: 10.0,
            fury_heal_per_hit: 10,
            hurt_cooldown: 0.5,
            hurt_flash: 0.1,
        }
    }
}

/// Area-атака вокруг игрока
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillTuning {
    pub damage: u32,
    pub radius: f32,
    /// Стоимость в режиме Furia (в Sombra: бесплатно)
    pub fury_cost: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsTuning {
    pub one: SkillTuning,
    pub two: SkillTuning,
    pub three: SkillTuning,
}

impl Default for SkillsTuning {
    fn default() -> Self {
        Self {
            one: SkillTuning { damage: 15, radius: 1.8, fury_cost: 20.0 },
            two: SkillTuning { damage: 25, radius: 2.2, fury_cost: 35.0 },
            three: SkillTuning { damage: 40, radius: 2.5, fury_cost: 50.0 },
        }
    }
}

impl SkillsTuning {
    pub fn get(&self, slot: SkillSlot) -> &SkillTuning {
        match slot {
            SkillSlot::One => &self.one,
            SkillSlot::Two => &self.two,
            SkillSlot::Three => &self.three,
        }
    }
}

/// Пороги смены alignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoralTuning {
    pub luz_threshold: i32,
    pub sombra_threshold: i32,
}

impl Default for MoralTuning {
    fn default() -> Self {
        Self {
            luz_threshold: 50,
            sombra_threshold: 50,
        }
    }
}

impl CombatTuning {
    /// Парсинг TOML строки + валидация
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let tuning: Self = toml::from_str(content)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Загрузка tuning файла с диска
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let tuning = Self::from_toml_str(&content)?;
        crate::log_info(&format!("⚙️ Combat tuning loaded from {:?}", path));
        Ok(tuning)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        fn positive(name: &str, value: f32) -> ConfigResult<()> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be > 0 (got {value})")))
            }
        }

        if self.player.max_health == 0 {
            return Err(ConfigError::Invalid("player.max_health must be > 0".into()));
        }
        positive("player.shadow_speed", self.player.shadow_speed)?;
        positive("player.fury_speed", self.player.fury_speed)?;
        positive("player.dash_speed", self.player.dash_speed)?;

        positive("combat.attack_cooldown", self.combat.attack_cooldown)?;
        positive("combat.hit_window", self.combat.hit_window)?;
        positive("combat.hit_radius", self.combat.hit_radius)?;
        positive("combat.max_fury", self.combat.max_fury)?;
        positive("combat.knockback_speed", self.combat.knockback_speed)?;

        for (name, skill) in [
            ("skills.one", &self.skills.one),
            ("skills.two", &self.skills.two),
            ("skills.three", &self.skills.three),
        ] {
            positive(&format!("{name}.radius"), skill.radius)?;
            if skill.fury_cost < 0.0 {
                return Err(ConfigError::Invalid(format!("{name}.fury_cost must be >= 0")));
            }
        }

        if self.enemy.max_health == 0 || self.boss.max_health == 0 {
            return Err(ConfigError::Invalid("enemy/boss max_health must be > 0".into()));
        }
        positive("enemy.move_speed", self.enemy.move_speed)?;
        positive("boss.move_speed", self.boss.move_speed)?;

        if self.enemy.attack_range > self.enemy.detection_range {
            return Err(ConfigError::Invalid(format!(
                "enemy.attack_range ({}) exceeds detection_range ({})",
                self.enemy.attack_range, self.enemy.detection_range
            )));
        }
        if self.boss.attack_range > self.boss.detection_range {
            return Err(ConfigError::Invalid(format!(
                "boss.attack_range ({}) exceeds detection_range ({})",
                self.boss.attack_range, self.boss.detection_range
            )));
        }
        if self.enemy.patrol_interval_min > self.enemy.patrol_interval_max {
            return Err(ConfigError::Invalid("enemy.patrol_interval_min > patrol_interval_max".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        let tuning = CombatTuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.combat.attack_cooldown, 0.5);
        assert_eq!(tuning.combat.damage, 10);
        assert_eq!(tuning.player.speed_for(CombatMode::Shadow), 3.0);
        assert_eq!(tuning.player.speed_for(CombatMode::Fury), 4.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let tuning = CombatTuning::from_toml_str(
            r#"
            [combat]
            attack_cooldown = 0.4
            fury_cost_basic_attack = 15.0

            [enemy]
            detection_range = 6.0
            "#,
        )
        .expect("partial tuning should parse");

        assert_eq!(tuning.combat.attack_cooldown, 0.4);
        assert_eq!(tuning.combat.fury_cost_basic_attack, 15.0);
        assert_eq!(tuning.combat.hit_radius, 1.5);
        assert_eq!(tuning.enemy.detection_range, 6.0);
        assert_eq!(tuning.enemy.attack_range, 1.5);
        assert_eq!(tuning.boss.max_health, 250);
    }

    #[test]
    fn test_skill_table_from_toml() {
        let tuning = CombatTuning::from_toml_str(
            r#"
            [skills.two]
            damage = 30
            radius = 3.0
            fury_cost = 40.0
            "#,
        )
        .expect("skill override should parse");

        assert_eq!(tuning.skills.get(SkillSlot::Two).damage, 30);
        assert_eq!(tuning.skills.get(SkillSlot::One).damage, 15);
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        let result = CombatTuning::from_toml_str(
            r#"
            [enemy]
            detection_range = 1.0
            attack_range = 2.0
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_negative_cooldown_rejected() {
        let result = CombatTuning::from_toml_str("[combat]\nattack_cooldown = -1.0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = CombatTuning::from_toml_str("[combat\nattack_cooldown = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = CombatTuning::load("definitely/not/here/tuning.toml");
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }
}
