//! Utility functions module
//! 
//! Contains the seedable random source and the shuffle used to vary
//! question and option order between runs.

pub mod random;
pub mod shuffle;

// Re-export commonly used items
pub use random::{GameRng, RandomSource};
pub use shuffle::{shuffle, shuffled};
