use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    #[default]
    Playing,
    Escaped,
    Captured,
}

impl SessionStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Escaped | Self::Captured)
    }
}

/// Outcome of a single protagonist move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Continued,
    Escaped,
    Captured,
    /// Blocked direction or finished session; nothing changed.
    Rejected,
}

impl Outcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Snapshot {
    protagonist: Position,
    adversary: Position,
    moves: u32,
    status: SessionStatus,
}

/// Play-time state for one puzzle: positions, move counter and an undo stack. Moves go through the same adversary
/// policy as the solver, so hints always agree with what happens on the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    puzzle: Puzzle,
    protagonist: Position,
    adversary: Position,
    moves: u32,
    status: SessionStatus,
    history: Vec<Snapshot>,
}

impl SessionState {
    pub fn new(puzzle: Puzzle) -> Self {
        Self {
            protagonist: puzzle.start(),
            adversary: puzzle.adversary_start(),
            moves: 0,
            status: Default::default(),
            history: Vec::new(),
            puzzle,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn protagonist(&self) -> Position {
        self.protagonist
    }

    pub fn adversary(&self) -> Position {
        self.adversary
    }

    pub fn move_count(&self) -> u32 {
        self.moves
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Whether the protagonist may take `mv` right now.
    pub fn can_move(&self, mv: Move) -> bool {
        !self.status.is_finished()
            && mv
                .direction()
                .is_none_or(|direction| !self.puzzle.maze().is_edge_blocked(self.protagonist, direction))
    }

    /// Moves [`SessionState::apply_move`] would currently accept, in solver order.
    pub fn legal_moves(&self) -> SmallVec<[Move; 5]> {
        Move::ALL
            .into_iter()
            .filter(|&mv| self.can_move(mv))
            .collect()
    }

    /// One protagonist move followed by the adversary's two sub-steps. Reaching the exit ends the game before the
    /// adversary reacts.
    pub fn apply_move(&mut self, mv: Move) -> Outcome {
        if !self.can_move(mv) {
            log::debug!("Rejected {mv:?} from {} ({:?})", self.protagonist, self.status);
            return Outcome::Rejected;
        }

        let next = match mv.direction() {
            Some(direction) => self.protagonist.offset(direction),
            None => self.protagonist,
        };
        self.history.push(self.snapshot());
        self.protagonist = next;
        self.moves += 1;

        if next == self.puzzle.exit() {
            self.status = SessionStatus::Escaped;
            return Outcome::Escaped;
        }

        match react(self.puzzle.maze(), self.adversary, next) {
            Reaction::Moved(adversary) => {
                self.adversary = adversary;
                Outcome::Continued
            }
            Reaction::Captured(adversary) => {
                self.adversary = adversary;
                self.status = SessionStatus::Captured;
                Outcome::Captured
            }
        }
    }

    /// Reverts the last accepted move, including one that ended the game. Returns false with nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    /// Starts over on `puzzle`, dropping all history.
    pub fn reset(&mut self, puzzle: Puzzle) {
        *self = Self::new(puzzle);
    }

    /// Restarts the current puzzle.
    pub fn restart(&mut self) {
        if let Some(&initial) = self.history.first() {
            self.restore(initial);
            self.history.clear();
        }
    }

    /// First move of an optimal escape from the current positions, if one exists.
    pub fn hint(&self) -> Option<Move> {
        if self.status.is_finished() {
            return None;
        }
        hint(
            self.puzzle.maze(),
            self.protagonist,
            self.adversary,
            self.puzzle.exit(),
        )
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            protagonist: self.protagonist,
            adversary: self.adversary,
            moves: self.moves,
            status: self.status,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.protagonist = snapshot.protagonist;
        self.adversary = snapshot.adversary;
        self.moves = snapshot.moves;
        self.status = snapshot.status;
    }
}
