//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (health, hurt window, invulnerability, facing, collider)
//! - movement: velocity, move speed, knockback
//! - world: obstacle grid, breakables, kill gates
//!
//! Боевое состояние игрока живёт в `combat`, AI мозги: в `ai`.

pub mod actor;
pub mod movement;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use world::*;
