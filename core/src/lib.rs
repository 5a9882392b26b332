#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use error::*;
pub use generator::*;
pub use maze::*;
pub use session::*;
pub use solver::*;
pub use types::*;
pub use walls::*;

mod error;
mod generator;
mod maze;
mod session;
mod solver;
mod types;
mod walls;

/// Named generation presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];

    pub const fn profile(self) -> DifficultyProfile {
        use Difficulty::*;
        match self {
            Easy => DifficultyProfile::new_unchecked(6, 6, 0.25, 6),
            Medium => DifficultyProfile::new_unchecked(8, 8, 0.30, 10),
            Hard => DifficultyProfile::new_unchecked(10, 10, 0.35, 15),
            Expert => DifficultyProfile::new_unchecked(12, 12, 0.40, 20),
        }
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
            Expert => "expert",
        }
    }
}

impl From<Difficulty> for DifficultyProfile {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.profile()
    }
}

/// Generation parameters: grid size, probability of each internal edge carrying a wall, and the minimum number of
/// protagonist moves the generated puzzle should require.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub width: Coord,
    pub height: Coord,
    pub wall_density: f64,
    pub min_moves: u32,
}

impl DifficultyProfile {
    pub const fn new_unchecked(width: Coord, height: Coord, wall_density: f64, min_moves: u32) -> Self {
        Self {
            width,
            height,
            wall_density,
            min_moves,
        }
    }

    /// Clamps the grid to at least 2x2 and the density to `[0, 1]`. A NaN density is treated as an open maze.
    pub fn new(width: Coord, height: Coord, wall_density: f64, min_moves: u32) -> Self {
        let width = width.clamp(2, MAX_DIMENSION);
        let height = height.clamp(2, MAX_DIMENSION);
        let wall_density = if wall_density.is_nan() {
            0.0
        } else {
            wall_density.clamp(0.0, 1.0)
        };
        Self::new_unchecked(width, height, wall_density, min_moves)
    }

    pub const fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// A generated puzzle. Immutable; the solver guarantees `optimal_path` escapes from the start pair in exactly
/// `min_moves` moves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PuzzleRepr", into = "PuzzleRepr")]
pub struct Puzzle {
    maze: Maze,
    start: Position,
    exit: Position,
    adversary_start: Position,
    min_moves: u32,
    optimal_path: Vec<Move>,
    seed: u64,
    requested_min_moves: u32,
}

impl Puzzle {
    /// Assembles a puzzle around an arbitrary maze, solving it to fill in the optimal path. Returns `None` when a position
    /// lies outside the maze, both pieces share a cell, or the configuration cannot be escaped.
    pub fn from_parts(
        maze: Maze,
        start: Position,
        adversary_start: Position,
        exit: Position,
    ) -> Option<Self> {
        let result = Self::check(&maze, start, adversary_start, exit).ok()?;
        Some(Self::from_solution(maze, start, adversary_start, exit, result, 0, 0))
    }

    fn check(
        maze: &Maze,
        start: Position,
        adversary_start: Position,
        exit: Position,
    ) -> Result<SolveResult, PuzzleError> {
        for position in [start, adversary_start, exit] {
            maze.validate_position(position)?;
        }
        if start == adversary_start {
            return Err(PuzzleError::SharedStart(start));
        }
        let result = solve(maze, start, adversary_start, exit);
        if !result.solvable {
            return Err(PuzzleError::Unsolvable);
        }
        Ok(result)
    }

    pub(crate) fn from_solution(
        maze: Maze,
        start: Position,
        adversary_start: Position,
        exit: Position,
        result: SolveResult,
        seed: u64,
        requested_min_moves: u32,
    ) -> Self {
        Self {
            maze,
            start,
            exit,
            adversary_start,
            min_moves: result.min_moves,
            optimal_path: result.path,
            seed,
            requested_min_moves,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn exit(&self) -> Position {
        self.exit
    }

    pub fn adversary_start(&self) -> Position {
        self.adversary_start
    }

    pub fn min_moves(&self) -> u32 {
        self.min_moves
    }

    pub fn optimal_path(&self) -> &[Move] {
        &self.optimal_path
    }

    /// Seed the puzzle was generated from; regenerating with the same profile and seed yields the same puzzle.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn requested_min_moves(&self) -> u32 {
        self.requested_min_moves
    }

    /// False when generation fell back to an easier candidate than requested.
    pub fn meets_requested_difficulty(&self) -> bool {
        self.min_moves >= self.requested_min_moves
    }

    /// Re-runs the solver on the stored configuration.
    pub fn solve(&self) -> SolveResult {
        solve(&self.maze, self.start, self.adversary_start, self.exit)
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct PuzzleRepr {
    maze: Maze,
    start: Position,
    exit: Position,
    adversary_start: Position,
    min_moves: u32,
    optimal_path: Vec<Move>,
    seed: u64,
    requested_min_moves: u32,
}

/// Loaded puzzles are re-solved; the stored solution has to be exactly what the solver reports.
impl TryFrom<PuzzleRepr> for Puzzle {
    type Error = PuzzleError;

    fn try_from(repr: PuzzleRepr) -> Result<Self, PuzzleError> {
        let result = Self::check(&repr.maze, repr.start, repr.adversary_start, repr.exit)?;
        if result.min_moves != repr.min_moves || result.path != repr.optimal_path {
            return Err(PuzzleError::SolutionMismatch {
                stored: repr.min_moves,
                solved: result.min_moves,
            });
        }
        Ok(Self::from_solution(
            repr.maze,
            repr.start,
            repr.adversary_start,
            repr.exit,
            result,
            repr.seed,
            repr.requested_min_moves,
        ))
    }
}

impl From<Puzzle> for PuzzleRepr {
    fn from(puzzle: Puzzle) -> Self {
        Self {
            maze: puzzle.maze,
            start: puzzle.start,
            exit: puzzle.exit,
            adversary_start: puzzle.adversary_start,
            min_moves: puzzle.min_moves,
            optimal_path: puzzle.optimal_path,
            seed: puzzle.seed,
            requested_min_moves: puzzle.requested_min_moves,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn profile_constructor_clamps_inputs() {
        let profile = DifficultyProfile::new(0, 500, 1.5, 3);

        assert_eq!(profile.width, 2);
        assert_eq!(profile.height, MAX_DIMENSION);
        assert_eq!(profile.wall_density, 1.0);

        let profile = DifficultyProfile::new(4, 4, f64::NAN, 3);
        assert_eq!(profile.wall_density, 0.0);
    }

    #[test]
    fn presets_grow_harder() {
        let profiles = Difficulty::ALL.map(Difficulty::profile);

        for pair in profiles.windows(2) {
            assert!(pair[0].cell_count() < pair[1].cell_count());
            assert!(pair[0].min_moves < pair[1].min_moves);
        }
    }

    #[test]
    fn from_parts_rejects_unsolvable_configurations() {
        let maze = Maze::open(4, 1).unwrap();
        let (adversary, exit) = (Position::new(0, 0), Position::new(3, 0));

        assert!(Puzzle::from_parts(maze.clone(), Position::new(1, 0), adversary, exit).is_none());

        let puzzle = Puzzle::from_parts(maze, Position::new(2, 0), adversary, exit).unwrap();
        assert_eq!(puzzle.min_moves(), 1);
        assert_eq!(puzzle.optimal_path(), &[Move::Right]);
        assert!(puzzle.meets_requested_difficulty());
    }

    #[test]
    fn loading_rechecks_positions_and_solution() {
        let maze = Maze::open(4, 1).unwrap();
        let (start, adversary, exit) = (Position::new(2, 0), Position::new(0, 0), Position::new(3, 0));
        let puzzle = Puzzle::from_parts(maze, start, adversary, exit).unwrap();
        let repr = PuzzleRepr::from(puzzle.clone());

        assert_eq!(Puzzle::try_from(repr.clone()), Ok(puzzle));

        let outside = PuzzleRepr {
            start: Position::new(7, -3),
            ..repr.clone()
        };
        assert_eq!(
            Puzzle::try_from(outside),
            Err(PuzzleError::Maze(MazeError::OutOfBounds(Position::new(7, -3))))
        );

        let shared = PuzzleRepr {
            start: Position::new(0, 0),
            ..repr.clone()
        };
        assert_eq!(Puzzle::try_from(shared), Err(PuzzleError::SharedStart(Position::new(0, 0))));

        let trapped = PuzzleRepr {
            start: Position::new(1, 0),
            ..repr.clone()
        };
        assert_eq!(Puzzle::try_from(trapped), Err(PuzzleError::Unsolvable));

        let padded = PuzzleRepr {
            min_moves: 0,
            optimal_path: vec![Move::Left, Move::Left, Move::Left],
            ..repr
        };
        assert_eq!(
            Puzzle::try_from(padded),
            Err(PuzzleError::SolutionMismatch { stored: 0, solved: 1 })
        );
    }
}
