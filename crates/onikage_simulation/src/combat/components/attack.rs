//! Базовая атака игрока: cooldown + hit window

use bevy::prelude::*;

/// Состояние базовой атаки игрока
///
/// `cooldown_timer > 0` ⇒ canAttack == false, новая атака отклоняется (без очереди).
/// Пока открыт hit window, `HitFrame` повторяет circle check; каждая цель
/// получает урон не больше одного раза за взмах.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerAttack {
    pub cooldown_timer: f32,
    pub hit_window_timer: f32,
    /// Кого уже задел текущий взмах
    pub hit_entities: Vec<Entity>,
}

impl PlayerAttack {
    pub fn can_attack(&self) -> bool {
        self.cooldown_timer <= 0.0
    }

    pub fn is_hit_window_open(&self) -> bool {
        self.hit_window_timer > 0.0
    }

    /// Начать взмах: cooldown + hit window, список целей сбрасывается
    pub fn start_swing(&mut self, cooldown: f32, hit_window: f32) {
        self.cooldown_timer = cooldown;
        self.hit_window_timer = hit_window;
        self.hit_entities.clear();
    }

    /// true если цель ещё не задета этим взмахом (и теперь помечена)
    pub fn mark_hit(&mut self, target: Entity) -> bool {
        if self.hit_entities.contains(&target) {
            return false;
        }
        self.hit_entities.push(target);
        true
    }

    pub fn tick(&mut self, delta: f32) {
        self.cooldown_timer = (self.cooldown_timer - delta).max(0.0);
        self.hit_window_timer = (self.hit_window_timer - delta).max(0.0);
    }
}
