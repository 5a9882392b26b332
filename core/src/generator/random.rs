use rand::prelude::*;

use super::*;

/// Generation strategy that samples random mazes and brute-forces the adversary placement on each.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomPuzzleGenerator {
    seed: u64,
    max_attempts: u32,
}

impl RandomPuzzleGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Incremental form of [`PuzzleGenerator::generate`], for callers that need to spread or cancel the work.
    pub fn task(self, profile: DifficultyProfile) -> GenerationTask {
        GenerationTask::new(profile, self.seed, self.max_attempts)
    }
}

impl PuzzleGenerator for RandomPuzzleGenerator {
    fn generate(self, profile: DifficultyProfile) -> Result<Puzzle, GenerationError> {
        self.task(profile).finish()
    }
}

/// Flags every internal edge as a wall with probability `wall_density`. Each call builds a fresh maze, so a
/// rejected attempt leaves nothing behind.
pub(super) fn sample_maze(rng: &mut SmallRng, profile: &DifficultyProfile) -> Maze {
    let mut builder =
        MazeBuilder::new(profile.width, profile.height).expect("profile dimensions should be clamped");

    for y in 0..profile.height {
        for x in 0..profile.width {
            let position = Position::new(x, y);
            if x + 1 < profile.width && rng.random_bool(profile.wall_density) {
                builder
                    .add_wall(position, Direction::Right)
                    .expect("edge should be internal");
            }
            if y + 1 < profile.height && rng.random_bool(profile.wall_density) {
                builder
                    .add_wall(position, Direction::Down)
                    .expect("edge should be internal");
            }
        }
    }
    builder.build()
}

/// Picks an exit among the corners and edge midpoints, and places the start at its mirror image so the two sit on
/// opposite sides of the maze.
pub(super) fn choose_endpoints(rng: &mut SmallRng, profile: &DifficultyProfile) -> (Position, Position) {
    let (max_x, max_y) = (profile.width - 1, profile.height - 1);
    let candidates = [
        Position::new(0, 0),
        Position::new(max_x, 0),
        Position::new(0, max_y),
        Position::new(max_x, max_y),
        Position::new(max_x / 2, 0),
        Position::new(max_x / 2, max_y),
        Position::new(0, max_y / 2),
        Position::new(max_x, max_y / 2),
    ];
    let exit = candidates[rng.random_range(0..candidates.len())];
    let start = Position::new(max_x - exit.x, max_y - exit.y);
    (start, exit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampled_density_extremes() {
        let mut rng = SmallRng::seed_from_u64(7);

        let open = sample_maze(&mut rng, &DifficultyProfile::new(5, 4, 0.0, 1));
        assert_eq!(open.wall_count(), 0);

        let closed = sample_maze(&mut rng, &DifficultyProfile::new(5, 4, 1.0, 1));
        // (w - 1) * h vertical edges plus w * (h - 1) horizontal ones
        assert_eq!(closed.wall_count(), 4 * 4 + 5 * 3);
        assert!(!reachable(&closed, Position::new(0, 0), Position::new(1, 0)));
    }

    #[test]
    fn endpoints_sit_on_opposite_sides() {
        let mut rng = SmallRng::seed_from_u64(3);
        let profile = DifficultyProfile::new(6, 4, 0.3, 1);

        for _ in 0..32 {
            let (start, exit) = choose_endpoints(&mut rng, &profile);
            assert_ne!(start, exit);
            assert_eq!(start.x + exit.x, 5);
            assert_eq!(start.y + exit.y, 3);
            assert!(exit.x == 0 || exit.x == 5 || exit.y == 0 || exit.y == 3);
        }
    }
}
