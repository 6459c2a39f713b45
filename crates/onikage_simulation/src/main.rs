//! Headless симуляция Onikage
//!
//! Запускает Bevy App без рендера: игрок против трёх Espíritus Engañados и
//! босса, input задан простым скриптом. Первый аргумент (опционально) это TOML tuning.

use bevy::prelude::*;
use onikage_simulation::logger::{log_error, log_info};
use onikage_simulation::spawn::{spawn_boss, spawn_enemy, spawn_player};
use onikage_simulation::{
    create_headless_app, CombatTuning, Health, LevelDirector, MoralLedger, PlayerAction,
    PlayerProgress, SkillSlot,
};

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);
    log_info(&format!("Starting Onikage headless simulation (seed: {})", seed));

    if let Some(path) = std::env::args().nth(1) {
        match CombatTuning::load(&path) {
            Ok(tuning) => {
                app.insert_resource(tuning);
            }
            Err(error) => {
                log_error(&format!("Failed to load tuning '{}': {}", path, error));
                std::process::exit(1);
            }
        }
    }

    let world = app.world_mut();
    let player = spawn_player(world, Vec2::ZERO);
    for position in [Vec2::new(3.0, 1.0), Vec2::new(-3.0, 2.0), Vec2::new(0.0, -4.0)] {
        spawn_enemy(world, position);
    }
    spawn_boss(world, Vec2::new(12.0, 0.0));

    // Запускаем 1200 тиков симуляции (20 секунд)
    for tick in 0..1200u32 {
        let action = match tick % 60 {
            0 if tick % 600 == 0 => Some(PlayerAction::SwitchMode),
            15 => Some(PlayerAction::BasicAttack),
            30 => Some(PlayerAction::Skill(SkillSlot::One)),
            45 => Some(PlayerAction::Move(IVec2::new(1, 0))),
            _ => None,
        };
        if let Some(action) = action {
            app.world_mut().send_event(action);
        }

        app.update();

        if tick % 120 == 0 {
            let world = app.world();
            let health = world.get::<Health>(player).map(|h| h.current).unwrap_or(0);
            log_info(&format!(
                "Tick {}: {} entities, player hp {}",
                tick,
                world.entities().len(),
                health
            ));
        }
    }

    let world = app.world();
    if let Some(progress) = world.get::<PlayerProgress>(player) {
        log_info(&format!(
            "Player: level {}, kills {}, lives {}",
            progress.level, progress.kill_count, progress.lives
        ));
    }
    let ledger = world.resource::<MoralLedger>();
    log_info(&format!(
        "Alignment: {} (score {})",
        ledger.alignment().label(),
        ledger.score()
    ));
    log_info(&format!(
        "Level complete: {}",
        world.resource::<LevelDirector>().level_complete
    ));
}
