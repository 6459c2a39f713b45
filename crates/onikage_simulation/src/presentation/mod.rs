//! Presentation bridge: всё, что симуляция просит показать/проиграть.
//!
//! ECS не знает про спрайты, аниматоры, UI и звук. Вместо глобальных
//! менеджеров bridge инжектится как resource при сборке App:
//!
//! ```ignore
//! app.insert_resource(Presentation::new(MyEngineBridge::new(...)));
//! ```
//!
//! Все вызовы fire-and-forget. Единственный возврат: `floating_text`
//! (показан ли текст); при `false` используем диалог как fallback.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use crate::level::LevelEvent;

/// Цвет вспышки / подсветки спрайта
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    White,
    Red,
    Blue,
    Gray,
    Gold,
}

/// Интерфейс внешнего presentation слоя (движок, UI, тестовый recorder)
pub trait PresentationBridge: Send + Sync {
    /// Floating text над миром. Возвращает true если текст показан.
    fn floating_text(&mut self, message: &str, position: Vec2, tint: Tint) -> bool;

    fn dialogue(&mut self, speaker: &str, message: &str);

    fn animation_trigger(&mut self, entity: Entity, name: &str);

    fn animation_float(&mut self, entity: Entity, name: &str, value: f32);

    fn animation_bool(&mut self, entity: Entity, name: &str, value: bool);

    fn tint(&mut self, entity: Entity, tint: Tint);

    /// Показать/скрыть индикатор обнаружения над актором
    fn detection_indicator(&mut self, entity: Entity, visible: bool);

    /// Позиция индикатора (босс двигает его каждый тик)
    fn move_indicator(&mut self, _entity: Entity, _position: Vec2) {}

    fn moral_changed(&mut self, luz: i32, sombra: i32);

    fn level_event(&mut self, event: &LevelEvent);
}

/// Resource-обёртка над инжектированным bridge
#[derive(Resource)]
pub struct Presentation {
    bridge: Box<dyn PresentationBridge>,
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new(LoggingBridge)
    }
}

impl Presentation {
    pub fn new(bridge: impl PresentationBridge + 'static) -> Self {
        Self {
            bridge: Box::new(bridge),
        }
    }

    /// Floating text, при неудаче: диалог от `speaker`
    pub fn announce(&mut self, speaker: &str, message: &str, position: Vec2, tint: Tint) {
        if !self.bridge.floating_text(message, position, tint) {
            self.bridge.dialogue(speaker, message);
        }
    }
}

impl std::ops::Deref for Presentation {
    type Target = dyn PresentationBridge;

    fn deref(&self) -> &Self::Target {
        self.bridge.as_ref()
    }
}

impl std::ops::DerefMut for Presentation {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.bridge.as_mut()
    }
}

/// Default bridge: пишет всё в logger, floating text не поддерживает
pub struct LoggingBridge;

impl PresentationBridge for LoggingBridge {
    fn floating_text(&mut self, _message: &str, _position: Vec2, _tint: Tint) -> bool {
        false
    }

    fn dialogue(&mut self, speaker: &str, message: &str) {
        crate::log_info(&format!("💬 {}: {}", speaker, message));
    }

    fn animation_trigger(&mut self, entity: Entity, name: &str) {
        crate::log(&format!("🎞️ {:?} trigger '{}'", entity, name));
    }

    fn animation_float(&mut self, _entity: Entity, _name: &str, _value: f32) {}

    fn animation_bool(&mut self, _entity: Entity, _name: &str, _value: bool) {}

    fn tint(&mut self, _entity: Entity, _tint: Tint) {}

    fn detection_indicator(&mut self, entity: Entity, visible: bool) {
        crate::log(&format!("❗ {:?} detection indicator → {}", entity, visible));
    }

    fn moral_changed(&mut self, luz: i32, sombra: i32) {
        crate::log_info(&format!("⚖️ Luz {} / Sombra {}", luz, sombra));
    }

    fn level_event(&mut self, event: &LevelEvent) {
        crate::log_info(&format!("🏯 Level event: {:?}", event));
    }
}

/// Записанный вызов bridge (для тестов и headless tooling)
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationCall {
    FloatingText { message: String, position: Vec2, tint: Tint },
    Dialogue { speaker: String, message: String },
    AnimationTrigger { entity: Entity, name: String },
    AnimationFloat { entity: Entity, name: String, value: f32 },
    AnimationBool { entity: Entity, name: String, value: bool },
    Tint { entity: Entity, tint: Tint },
    DetectionIndicator { entity: Entity, visible: bool },
    MoralChanged { luz: i32, sombra: i32 },
    Level(LevelEvent),
}

/// Bridge, который записывает все вызовы в общий буфер.
///
/// Буфер разделяется через `calls()`: тест держит handle и читает после тиков.
#[derive(Clone)]
pub struct RecordingBridge {
    calls: Arc<Mutex<Vec<PresentationCall>>>,
    /// Эмуляция отсутствия FloatingTextManager в сцене
    pub floating_text_available: bool,
}

impl Default for RecordingBridge {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            floating_text_available: true,
        }
    }
}

impl RecordingBridge {
    pub fn without_floating_text() -> Self {
        Self {
            floating_text_available: false,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<PresentationCall>>> {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: PresentationCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl PresentationBridge for RecordingBridge {
    fn floating_text(&mut self, message: &str, position: Vec2, tint: Tint) -> bool {
        if !self.floating_text_available {
            return false;
        }
        self.record(PresentationCall::FloatingText {
            message: message.to_string(),
            position,
            tint,
        });
        true
    }

    fn dialogue(&mut self, speaker: &str, message: &str) {
        self.record(PresentationCall::Dialogue {
            speaker: speaker.to_string(),
            message: message.to_string(),
        });
    }

    fn animation_trigger(&mut self, entity: Entity, name: &str) {
        self.record(PresentationCall::AnimationTrigger {
            entity,
            name: name.to_string(),
        });
    }

    fn animation_float(&mut self, entity: Entity, name: &str, value: f32) {
        self.record(PresentationCall::AnimationFloat {
            entity,
            name: name.to_string(),
            value,
        });
    }

    fn animation_bool(&mut self, entity: Entity, name: &str, value: bool) {
        self.record(PresentationCall::AnimationBool {
            entity,
            name: name.to_string(),
            value,
        });
    }

    fn tint(&mut self, entity: Entity, tint: Tint) {
        self.record(PresentationCall::Tint { entity, tint });
    }

    fn detection_indicator(&mut self, entity: Entity, visible: bool) {
        self.record(PresentationCall::DetectionIndicator { entity, visible });
    }

    fn moral_changed(&mut self, luz: i32, sombra: i32) {
        self.record(PresentationCall::MoralChanged { luz, sombra });
    }

    fn level_event(&mut self, event: &LevelEvent) {
        self.record(PresentationCall::Level(event.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_announce_uses_floating_text_when_available() {
        let bridge = RecordingBridge::default();
        let calls = bridge.calls();
        let mut presentation = Presentation::new(bridge);

        presentation.announce("Onikage", "Modo: Furia", Vec2::ZERO, Tint::Red);

        let calls = calls.lock().expect("calls lock");
        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], PresentationCall::FloatingText { .. }));
    }

    #[test]
    fn test_announce_falls_back_to_dialogue() {
        let bridge = RecordingBridge::without_floating_text();
        let calls = bridge.calls();
        let mut presentation = Presentation::new(bridge);

        presentation.announce("Onikage", "Modo: Sombra", Vec2::ZERO, Tint::Blue);

        let calls = calls.lock().expect("calls lock");
        assert_eq!(
            calls.as_slice(),
            &[PresentationCall::Dialogue {
                speaker: "Onikage".into(),
                message: "Modo: Sombra".into(),
            }]
        );
    }
}
