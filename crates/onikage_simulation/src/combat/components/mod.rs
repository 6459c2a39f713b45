//! Combat components

pub mod attack;
pub mod stance;


// Re-export all components
pub use attack::*;
pub use stance::*;
