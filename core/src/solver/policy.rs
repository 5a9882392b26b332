use serde::{Deserialize, Serialize};

use crate::*;

/// Result of the adversary's two sub-steps following one protagonist move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reaction {
    Moved(Position),
    Captured(Position),
}

impl Reaction {
    pub const fn is_capture(self) -> bool {
        matches!(self, Self::Captured(_))
    }
}

/// One adversary sub-step: close the horizontal gap if that edge is open, otherwise the vertical one, otherwise
/// stay put. Puzzles are validated against this exact preference order.
pub fn step(maze: &Maze, adversary: Position, protagonist: Position) -> Position {
    if protagonist.x != adversary.x {
        let direction = if protagonist.x > adversary.x {
            Direction::Right
        } else {
            Direction::Left
        };
        if !maze.is_edge_blocked(adversary, direction) {
            return adversary.offset(direction);
        }
    }

    if protagonist.y != adversary.y {
        let direction = if protagonist.y > adversary.y {
            Direction::Down
        } else {
            Direction::Up
        };
        if !maze.is_edge_blocked(adversary, direction) {
            return adversary.offset(direction);
        }
    }

    adversary
}

/// Full reaction to a protagonist move: two sub-steps, with a capture check after each.
pub fn react(maze: &Maze, adversary: Position, protagonist: Position) -> Reaction {
    let mut adversary = adversary;
    for _ in 0..2 {
        adversary = step(maze, adversary, protagonist);
        if adversary == protagonist {
            return Reaction::Captured(adversary);
        }
    }
    Reaction::Moved(adversary)
}
