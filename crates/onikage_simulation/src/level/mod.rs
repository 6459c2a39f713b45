//! Level orchestration: первый контакт, завершение уровня, смена сцены
//!
//! Симуляция не грузит сцены: она только сообщает наружу `LevelEvent`,
//! а presentation слой решает, что с ним делать.

use bevy::prelude::*;

use crate::presentation::Presentation;
use crate::progress::Alignment;
use crate::SimulationSet;

/// Наставник, комментирующий начало боя
pub const MENTOR_SPEAKER: &str = "Fukurō";

/// Событие уровня (дублируется в bridge через `level_event`)
#[derive(Event, Debug, Clone, PartialEq)]
pub enum LevelEvent {
    /// Первый враг обнаружил игрока
    CombatTriggered,
    /// Все обычные враги мертвы
    LevelComplete,
    BossDefeated,
    /// Время загрузить сцену (после отсчёта)
    SceneTransition(String),
    GateOpened,
    ItemDropped { item: String, position: Vec2 },
    GameOver,
    /// Luz/Sombra достигла порога (сообщается на каждое начисление за порогом)
    AlignmentShift(Alignment),
}

/// Отложенный переход на сцену
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTransition {
    pub scene: String,
    pub remaining: f32,
}

/// Resource: флаги уровня (однократные события) + отложенный переход
#[derive(Resource, Debug, Default, Clone)]
pub struct LevelDirector {
    pub combat_started: bool,
    pub level_complete: bool,
    pub pending_transition: Option<PendingTransition>,
}

impl LevelDirector {
    /// Первый контакт с врагом: диалог наставника, один раз за уровень
    pub fn trigger_combat(
        &mut self,
        presentation: &mut Presentation,
        events: &mut EventWriter<LevelEvent>,
    ) {
        if self.combat_started {
            return;
        }
        self.combat_started = true;
        presentation.dialogue(
            MENTOR_SPEAKER,
            "¡Espíritus Engañados se acercan! Recuerda: La furia ciega, la sombra engaña.",
        );
        events.write(LevelEvent::CombatTriggered);
        crate::logger::log_info("⚔️ Combat triggered");
    }

    /// Последний враг побеждён
    pub fn complete_level(
        &mut self,
        presentation: &mut Presentation,
        events: &mut EventWriter<LevelEvent>,
    ) {
        if self.level_complete {
            return;
        }
        self.level_complete = true;
        presentation.dialogue("Nivel Completado", "Has derrotado a todos los enemigos.");
        events.write(LevelEvent::LevelComplete);
        crate::logger::log_info("🏁 Level complete");
    }

    /// Запланировать переход; новый вызов заменяет предыдущий
    pub fn schedule_transition(&mut self, scene: String, delay: f32) {
        crate::logger::log_info(&format!("🎬 Scene '{}' in {:.1}s", scene, delay));
        self.pending_transition = Some(PendingTransition {
            scene,
            remaining: delay,
        });
    }

    /// Продвигает отсчёт; возвращает сцену, когда время вышло
    pub fn tick_transition(&mut self, delta: f32) -> Option<String> {
        let pending = self.pending_transition.as_mut()?;
        pending.remaining -= delta;
        if pending.remaining > 0.0 {
            return None;
        }
        self.pending_transition.take().map(|pending| pending.scene)
    }
}

/// System: отсчёт отложенного перехода сцены
pub fn tick_scene_transition(
    mut director: ResMut<LevelDirector>,
    mut events: EventWriter<LevelEvent>,
    time: Res<Time>,
) {
    if let Some(scene) = director.tick_transition(time.delta_secs()) {
        events.write(LevelEvent::SceneTransition(scene));
    }
}

/// System: пересылает LevelEvent в presentation bridge
pub fn forward_level_events(
    mut events: EventReader<LevelEvent>,
    mut presentation: ResMut<Presentation>,
) {
    for event in events.read() {
        presentation.level_event(event);
    }
}

/// Level Plugin
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LevelEvent>()
            .init_resource::<LevelDirector>()
            .add_systems(
                FixedUpdate,
                (tick_scene_transition, forward_level_events)
                    .chain()
                    .in_set(SimulationSet::Cleanup),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_fires_after_delay() {
        let mut director = LevelDirector::default();
        director.schedule_transition("Final".to_string(), 1.0);

        assert_eq!(director.tick_transition(0.6), None);
        assert_eq!(director.tick_transition(0.6), Some("Final".to_string()));
        assert!(director.pending_transition.is_none());
        assert_eq!(director.tick_transition(0.6), None);
    }

    #[test]
    fn test_no_transition_without_schedule() {
        let mut director = LevelDirector::default();
        assert_eq!(director.tick_transition(10.0), None);
    }
}
