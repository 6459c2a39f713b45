//! AI systems (Enemy FSM, Boss, movement)

pub mod boss;
pub mod fsm;
pub mod movement;
pub mod strike;

// Re-export all systems
pub use boss::*;
pub use fsm::*;
pub use movement::*;
pub use strike::*;
