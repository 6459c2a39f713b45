//! Боевая стойка игрока: режим Sombra/Furia + fury meter

use bevy::prelude::*;

/// Боевой режим игрока
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum CombatMode {
    /// Sombra: медленнее, атаки бесплатны, попадания копят fury
    #[default]
    Shadow,
    /// Furia: быстрее, атаки стоят fury, попадания лечат
    Fury,
}

impl CombatMode {
    pub fn toggled(self) -> Self {
        match self {
            CombatMode::Shadow => CombatMode::Fury,
            CombatMode::Fury => CombatMode::Shadow,
        }
    }

    /// Подпись режима для floating text
    pub fn label(self) -> &'static str {
        match self {
            CombatMode::Shadow => "Sombra",
            CombatMode::Fury => "Furia",
        }
    }
}

/// Текущий режим игрока (переключается без cooldown)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CombatStance {
    pub mode: CombatMode,
}

impl CombatStance {
    pub fn toggle(&mut self) -> CombatMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    pub fn is_fury(&self) -> bool {
        self.mode == CombatMode::Fury
    }
}

/// Fury meter: `0 ≤ current ≤ max` после любой мутации
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct FuryMeter {
    pub current: f32,
    pub max: f32,
}

impl Default for FuryMeter {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl FuryMeter {
    /// Пустой meter
    pub fn new(max: f32) -> Self {
        Self {
            current: 0.0,
            max: max.max(0.0),
        }
    }

    /// AddFuria
    pub fn add(&mut self, amount: f32) {
        self.current = (self.current + amount).clamp(0.0, self.max);
    }

    /// ConsumeFuria (безусловный, clamp снизу в 0)
    pub fn consume(&mut self, amount: f32) {
        self.current = (self.current - amount).clamp(0.0, self.max);
    }

    pub fn can_afford(&self, cost: f32) -> bool {
        self.current >= cost
    }

    /// Заполненность 0..=1 (для HUD)
    pub fn ratio(&self) -> f32 {
        if self.max > 0.0 {
            (self.current / self.max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Слот area-скилла (клавиши 1/2/3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum SkillSlot {
    One,
    Two,
    Three,
}
