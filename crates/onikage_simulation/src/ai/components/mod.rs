//! AI components

pub mod boss;
pub mod fsm;

#[cfg(test)]
mod fsm_tests;

// Re-export all components
pub use boss::*;
pub use fsm::*;
