use thiserror::Error;

use crate::{Coord, Direction, Position};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Invalid maze dimensions {width}x{height}")]
    InvalidDimensions { width: Coord, height: Coord },
    #[error("Wall grid shape does not match declared size")]
    InvalidShape,
    #[error("Position {0} is outside the maze")]
    OutOfBounds(Position),
    #[error("Wall {direction:?} of {position} is not mirrored by its neighbour")]
    AsymmetricWall {
        position: Position,
        direction: Direction,
    },
    #[error("Wall {direction:?} of {position} points outside the maze")]
    BoundaryWall {
        position: Position,
        direction: Direction,
    },
    #[error("Wall mask {mask:#06b} of {position} has unknown bits")]
    InvalidWallBits { position: Position, mask: u8 },
}

/// Reasons a stored puzzle is refused when it is loaded back.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error("Protagonist and adversary both start at {0}")]
    SharedStart(Position),
    #[error("Puzzle cannot be escaped")]
    Unsolvable,
    #[error("Stored solution takes {stored} moves but the solver found {solved}")]
    SolutionMismatch { stored: u32, solved: u32 },
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("No solvable puzzle found after {attempts} attempts")]
    BudgetExhausted { attempts: u32 },
}

pub type Result<T, E = MazeError> = core::result::Result<T, E>;
