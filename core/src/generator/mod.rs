use crate::*;
pub use random::*;
pub use task::*;

mod random;
mod task;

/// Number of mazes sampled before settling for the best candidate seen.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

pub trait PuzzleGenerator {
    fn generate(self, profile: DifficultyProfile) -> Result<Puzzle, GenerationError>;
}

/// Seeded generation with the default attempt budget.
pub fn generate(profile: DifficultyProfile, seed: u64) -> Result<Puzzle, GenerationError> {
    RandomPuzzleGenerator::new(seed).generate(profile)
}
