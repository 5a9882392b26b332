use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use super::policy::{self, Reaction};
use crate::*;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    pub solvable: bool,
    pub min_moves: u32,
    pub path: Vec<Move>,
}

impl SolveResult {
    fn solved(path: Vec<Move>) -> Self {
        Self {
            solvable: true,
            min_moves: path.len() as u32,
            path,
        }
    }

    fn unsolvable() -> Self {
        Self::default()
    }

    /// Next best move, or `None` when unsolvable or already on the exit.
    pub fn first_move(&self) -> Option<Move> {
        self.path.first().copied()
    }
}

/// Joint position pair, the deduplication key of the search.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct SearchState {
    protagonist: Position,
    adversary: Position,
}

#[derive(Debug)]
struct SearchNode {
    state: SearchState,
    came_from: Option<(usize, Move)>,
}

/// Breadth-first search over (protagonist, adversary) pairs for the fewest protagonist moves that reach `exit`
/// without being captured.
///
/// Reaching the exit ends the game before the adversary reacts, so escaping is safe even onto a cell the adversary
/// would have reached. Every pair is expanded at most once, which bounds the search by the square of the cell count.
pub fn solve(maze: &Maze, start: Position, adversary_start: Position, exit: Position) -> SolveResult {
    if [start, adversary_start, exit]
        .into_iter()
        .any(|position| !maze.contains(position))
    {
        log::warn!("Solve requested outside the maze: {start}, {adversary_start}, {exit}");
        return SolveResult::unsolvable();
    }
    if start == exit {
        return SolveResult::solved(Vec::new());
    }
    if start == adversary_start {
        return SolveResult::unsolvable();
    }

    let initial = SearchState {
        protagonist: start,
        adversary: adversary_start,
    };
    let mut nodes = vec![SearchNode {
        state: initial,
        came_from: None,
    }];
    let mut visited: HashSet<SearchState> = HashSet::from([initial]);
    let mut frontier = VecDeque::from([0]);

    while let Some(index) = frontier.pop_front() {
        let SearchState {
            protagonist,
            adversary,
        } = nodes[index].state;

        for mv in Move::ALL {
            let next = match mv.direction() {
                Some(direction) => match maze.neighbor(protagonist, direction) {
                    Some(next) => next,
                    None => continue,
                },
                None => protagonist,
            };

            if next == exit {
                let mut path = reconstruct_path(&nodes, index);
                path.push(mv);
                log::trace!(
                    "Solved {start} vs {adversary_start} in {} moves, {} states explored",
                    path.len(),
                    nodes.len()
                );
                return SolveResult::solved(path);
            }

            let Reaction::Moved(adversary) = policy::react(maze, adversary, next) else {
                continue;
            };

            let state = SearchState {
                protagonist: next,
                adversary,
            };
            if visited.insert(state) {
                nodes.push(SearchNode {
                    state,
                    came_from: Some((index, mv)),
                });
                frontier.push_back(nodes.len() - 1);
            }
        }
    }

    log::trace!(
        "No escape for {start} vs {adversary_start}, {} states explored",
        nodes.len()
    );
    SolveResult::unsolvable()
}

fn reconstruct_path(nodes: &[SearchNode], mut index: usize) -> Vec<Move> {
    let mut path = Vec::new();
    while let Some((parent, mv)) = nodes[index].came_from {
        path.push(mv);
        index = parent;
    }
    path.reverse();
    path
}

/// First move of an optimal escape from the given pair, the in-game hint.
pub fn hint(maze: &Maze, protagonist: Position, adversary: Position, exit: Position) -> Option<Move> {
    solve(maze, protagonist, adversary, exit).first_move()
}
