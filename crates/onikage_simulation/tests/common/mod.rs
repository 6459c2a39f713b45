//! Общий harness для integration тестов
//!
//! App без MinimalPlugins: время двигаем вручную, FixedUpdate запускаем
//! напрямую по одному тику, executor однопоточный.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use bevy::ecs::schedule::ExecutorKind;
use bevy::prelude::*;
use onikage_simulation::*;

pub const DT: f32 = 1.0 / TICK_HZ as f32;

/// Сколько тиков занимает `seconds` (с запасом в один тик)
pub fn ticks_for(seconds: f32) -> usize {
    (seconds / DT).ceil() as usize + 1
}

pub struct TestWorld {
    pub app: App,
    calls: Arc<Mutex<Vec<PresentationCall>>>,
}

impl TestWorld {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, CombatTuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: CombatTuning) -> Self {
        Self::with_bridge(seed, tuning, RecordingBridge::default())
    }

    pub fn with_bridge(seed: u64, tuning: CombatTuning, bridge: RecordingBridge) -> Self {
        let calls = bridge.calls();
        let mut app = App::new();

        app.init_resource::<Time>()
            .add_plugins(SimulationPlugin { seed })
            .insert_resource(tuning)
            .insert_resource(Presentation::new(bridge));

        app.edit_schedule(FixedUpdate, |schedule| {
            schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        });

        Self { app, calls }
    }

    pub fn world(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn tick(&mut self) {
        let world = self.app.world_mut();
        world
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(DT));
        world.run_schedule(FixedUpdate);
    }

    pub fn run(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    pub fn act(&mut self, action: PlayerAction) {
        self.world().send_event(action);
    }

    /// Действие + один тик
    pub fn act_and_tick(&mut self, action: PlayerAction) {
        self.act(action);
        self.tick();
    }

    pub fn get<T: Component + Clone>(&mut self, entity: Entity) -> T {
        self.world()
            .get::<T>(entity)
            .cloned()
            .unwrap_or_else(|| panic!("{:?} has no {}", entity, std::any::type_name::<T>()))
    }

    pub fn position(&mut self, entity: Entity) -> Vec2 {
        self.get::<Transform>(entity).translation.truncate()
    }

    pub fn set_position(&mut self, entity: Entity, position: Vec2) {
        if let Some(mut transform) = self.world().get_mut::<Transform>(entity) {
            transform.translation = position.extend(0.0);
        }
    }

    pub fn health(&mut self, entity: Entity) -> u32 {
        self.get::<Health>(entity).current
    }

    pub fn is_dead(&mut self, entity: Entity) -> bool {
        self.world().get::<Dead>(entity).is_some()
    }

    pub fn exists(&mut self, entity: Entity) -> bool {
        self.world().get_entity(entity).is_ok()
    }

    pub fn calls(&self) -> Vec<PresentationCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn count_calls(&self, predicate: impl Fn(&PresentationCall) -> bool) -> usize {
        self.calls().iter().filter(|call| predicate(call)).count()
    }

    pub fn triggers(&self, entity: Entity, name: &str) -> usize {
        self.count_calls(|call| {
            matches!(call, PresentationCall::AnimationTrigger { entity: e, name: n } if *e == entity && n == name)
        })
    }

    pub fn dialogues(&self, speaker: &str) -> usize {
        self.count_calls(|call| matches!(call, PresentationCall::Dialogue { speaker: s, .. } if s == speaker))
    }

    pub fn level_events(&self, event: &LevelEvent) -> usize {
        self.count_calls(|call| matches!(call, PresentationCall::Level(e) if e == event))
    }
}

/// Враг, стоящий на месте и не замечающий игрока (мишень)
pub fn dummy_enemy() -> EnemyConfig {
    EnemyConfig {
        move_speed: 0.0,
        detection_range: 0.5,
        attack_range: 0.4,
        ..EnemyConfig::default()
    }
}

/// Босс-мишень: не замечает игрока
pub fn dummy_boss() -> BossConfig {
    BossConfig {
        detection_range: 0.5,
        attack_range: 0.4,
        ..BossConfig::default()
    }
}
