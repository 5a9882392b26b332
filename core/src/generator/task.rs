use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::random::{choose_endpoints, sample_maze};
use super::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Mazes sampled so far.
    pub attempts: u32,
    /// Mazes discarded because the exit was not reachable from the start.
    pub unreachable: u32,
    /// Joint searches run over candidate adversary cells.
    pub solver_calls: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TaskStatus {
    Pending,
    Done(Puzzle),
}

#[derive(Clone, Debug)]
struct Candidate {
    maze: Maze,
    start: Position,
    adversary_start: Position,
    exit: Position,
    result: SolveResult,
}

/// Puzzle generation as a resumable unit of work: each [`GenerationTask::step`] samples and evaluates one maze.
///
/// Dropping the task cancels generation; [`GenerationTask::best_so_far`] gives access to the fallback found so far.
#[derive(Clone, Debug)]
pub struct GenerationTask {
    profile: DifficultyProfile,
    seed: u64,
    max_attempts: u32,
    rng: SmallRng,
    stats: GenerationStats,
    best: Option<Candidate>,
    accepted: Option<Puzzle>,
}

impl GenerationTask {
    pub fn new(profile: DifficultyProfile, seed: u64, max_attempts: u32) -> Self {
        let profile = DifficultyProfile::new(
            profile.width,
            profile.height,
            profile.wall_density,
            profile.min_moves,
        );
        Self {
            profile,
            seed,
            max_attempts,
            rng: SmallRng::seed_from_u64(seed),
            stats: Default::default(),
            best: None,
            accepted: None,
        }
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn stats(&self) -> GenerationStats {
        self.stats
    }

    pub fn attempts_made(&self) -> u32 {
        self.stats.attempts
    }

    pub fn is_exhausted(&self) -> bool {
        self.stats.attempts >= self.max_attempts
    }

    /// Best solvable puzzle observed so far, even if below the requested difficulty.
    pub fn best_so_far(&self) -> Option<Puzzle> {
        if let Some(puzzle) = &self.accepted {
            return Some(puzzle.clone());
        }
        self.best.clone().map(|candidate| self.make_puzzle(candidate))
    }

    /// Runs one attempt, or settles on the result once the target is met or the budget is spent.
    pub fn step(&mut self) -> Result<TaskStatus, GenerationError> {
        if let Some(puzzle) = &self.accepted {
            return Ok(TaskStatus::Done(puzzle.clone()));
        }

        if self.is_exhausted() {
            return match self.best.clone() {
                Some(candidate) => {
                    log::warn!(
                        "Target of {} moves not reached after {} attempts, falling back to {} moves",
                        self.profile.min_moves,
                        self.stats.attempts,
                        candidate.result.min_moves
                    );
                    let puzzle = self.make_puzzle(candidate);
                    self.accepted = Some(puzzle.clone());
                    Ok(TaskStatus::Done(puzzle))
                }
                None => Err(GenerationError::BudgetExhausted {
                    attempts: self.stats.attempts,
                }),
            };
        }

        if let Some(candidate) = self.attempt() {
            log::debug!(
                "Accepted {} move puzzle on attempt {} after {} solver calls",
                candidate.result.min_moves,
                self.stats.attempts,
                self.stats.solver_calls
            );
            let puzzle = self.make_puzzle(candidate);
            self.accepted = Some(puzzle.clone());
            return Ok(TaskStatus::Done(puzzle));
        }
        Ok(TaskStatus::Pending)
    }

    /// Drives the task to completion.
    pub fn finish(mut self) -> Result<Puzzle, GenerationError> {
        loop {
            if let TaskStatus::Done(puzzle) = self.step()? {
                return Ok(puzzle);
            }
        }
    }

    /// One sampled maze. Returns a candidate only if it meets the target; weaker solvable ones are kept as fallback.
    fn attempt(&mut self) -> Option<Candidate> {
        self.stats.attempts += 1;
        let maze = sample_maze(&mut self.rng, &self.profile);
        let (start, exit) = choose_endpoints(&mut self.rng, &self.profile);

        if !reachable(&maze, start, exit) {
            self.stats.unreachable += 1;
            log::trace!(
                "Attempt {}: exit {exit} unreachable from {start}",
                self.stats.attempts
            );
            return None;
        }

        let mut attempt_best: Option<(Position, SolveResult)> = None;
        for adversary_start in maze.positions() {
            if adversary_start == start || adversary_start == exit {
                continue;
            }

            self.stats.solver_calls += 1;
            let result = solve(&maze, start, adversary_start, exit);
            if !result.solvable {
                continue;
            }

            if result.min_moves >= self.profile.min_moves {
                return Some(Candidate {
                    maze,
                    start,
                    adversary_start,
                    exit,
                    result,
                });
            }

            let improves = attempt_best
                .as_ref()
                .is_none_or(|(_, best)| result.min_moves > best.min_moves);
            if improves {
                attempt_best = Some((adversary_start, result));
            }
        }

        let (adversary_start, result) = attempt_best?;
        log::trace!(
            "Attempt {}: best placement {adversary_start} needs {} moves",
            self.stats.attempts,
            result.min_moves
        );
        let improves_overall = self
            .best
            .as_ref()
            .is_none_or(|best| result.min_moves > best.result.min_moves);
        if improves_overall {
            self.best = Some(Candidate {
                maze,
                start,
                adversary_start,
                exit,
                result,
            });
        }
        None
    }

    fn make_puzzle(&self, candidate: Candidate) -> Puzzle {
        Puzzle::from_solution(
            candidate.maze,
            candidate.start,
            candidate.adversary_start,
            candidate.exit,
            candidate.result,
            self.seed,
            self.profile.min_moves,
        )
    }
}
