//! Combat systems

pub mod actions;
pub mod death;
pub mod knockback;
pub mod obstacles;
pub mod timers;

// Re-export all systems
pub use actions::*;
pub use death::*;
pub use knockback::*;
pub use obstacles::*;
pub use timers::*;
