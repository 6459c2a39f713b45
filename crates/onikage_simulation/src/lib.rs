//! Onikage Simulation Core
//!
//! Headless ECS-симуляция боевой системы на Bevy 0.16:
//! - Combat resolver игрока (Sombra/Furia режимы, fury meter, skills)
//! - Enemy AI (Idle/Patrol/Chase/Attack/Hurt/Dead FSM)
//! - Orc boss (light/heavy attack routine, scripted финал)
//! - Damage / knockback / invulnerability протокол между акторами
//!
//! Рендер, анимации, звук, диалоговый UI: снаружи, через `PresentationBridge`.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod level;
pub mod logger;
pub mod player;
pub mod presentation;
pub mod progress;
pub mod spawn;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, BossBrain, BossConfig, EnemyBrain, EnemyConfig, EnemyState};
pub use combat::{
    CombatMode, CombatPlugin, CombatStance, DamageDealt, DamageOutcome, Dead, EntityDied,
    FuryMeter, PlayerAction, PlayerAttack, SkillSlot,
};
pub use components::*;
pub use config::{CombatTuning, ConfigError};
pub use level::{LevelDirector, LevelEvent, LevelPlugin};
pub use logger::{log, log_error, log_info, log_warning};
pub use player::{Player, PlayerMotion, PlayerPlugin, PlayerProgress};
pub use presentation::{Presentation, PresentationBridge, PresentationCall, RecordingBridge, Tint};
pub use progress::{Alignment, MoralLedger, ProgressPlugin};

/// Fixed tick симуляции (60Hz)
pub const TICK_HZ: f64 = 60.0;

/// Порядок фаз внутри одного FixedUpdate тика.
///
/// Timers → Input → Ai → Motion → Resolve → Cleanup.
/// AI оценивает переходы ДО интеграции движения; смерти обрабатываются
/// после того как все атаки тика применены.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Cooldowns, hurt windows, invulnerability, flashes
    Timers,
    /// PlayerAction события → атаки, смена режима, skills
    Input,
    /// Enemy FSM + boss routine
    Ai,
    /// Velocity integration, knockback, dash, grid steps
    Motion,
    /// Смерти, награды, препятствия
    Resolve,
    /// Деспавн, scene transitions, forwarding событий в bridge
    Cleanup,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin {
    pub seed: u64,
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            .insert_resource(DeterministicRng::new(self.seed))
            .init_resource::<CombatTuning>()
            .init_resource::<ObstacleMask>()
            .init_resource::<Presentation>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Timers,
                    SimulationSet::Input,
                    SimulationSet::Ai,
                    SimulationSet::Motion,
                    SimulationSet::Resolve,
                    SimulationSet::Cleanup,
                )
                    .chain(),
            )
            .add_plugins((
                CombatPlugin,
                AIPlugin,
                PlayerPlugin,
                ProgressPlugin,
                LevelPlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Каждый `app.update()` продвигает время ровно на один fixed tick,
/// поэтому FixedUpdate отрабатывает один раз за update независимо от wall clock.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin { seed })
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / TICK_HZ,
        )));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
