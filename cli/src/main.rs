use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use labyrinth_core::{
    DEFAULT_MAX_ATTEMPTS, Difficulty, DifficultyProfile, GenerationTask, Move, Outcome, Puzzle,
    PuzzleGenerator, RandomPuzzleGenerator, SessionState, TaskStatus, ToNdIndex, distances, solve,
};
use web_time::{Instant, SystemTime, UNIX_EPOCH};

use render::{Marks, render};

mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Generate, solve and replay pursuit mazes", long_about = None)]
struct Args {
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new puzzle
    Generate {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Force a seed instead of one derived from the clock
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the puzzle as JSON instead of a board
        #[arg(long)]
        json: bool,
    },
    /// Re-solve a puzzle saved with `generate --json`
    Solve { file: PathBuf },
    /// Replay moves (U, D, L, R, or `.` to wait) on a saved puzzle
    Play {
        file: PathBuf,
        moves: String,

        /// Undo this many moves after replaying
        #[arg(long, default_value_t = 0)]
        undo: usize,
    },
    /// Time generation across the presets
    Bench {
        #[arg(short, long, default_value_t = 20)]
        runs: u64,
    },
}

#[derive(clap::Args, Debug)]
struct ProfileArgs {
    #[arg(short, long, value_enum, default_value_t = Preset::Medium)]
    difficulty: Preset,

    #[arg(long)]
    width: Option<i32>,

    #[arg(long)]
    height: Option<i32>,

    #[arg(long)]
    density: Option<f64>,

    #[arg(long)]
    min_moves: Option<u32>,

    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,
}

impl ProfileArgs {
    fn profile(&self) -> DifficultyProfile {
        let preset = Difficulty::from(self.difficulty).profile();
        DifficultyProfile::new(
            self.width.unwrap_or(preset.width),
            self.height.unwrap_or(preset.height),
            self.density.unwrap_or(preset.wall_density),
            self.min_moves.unwrap_or(preset.min_moves),
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl From<Preset> for Difficulty {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Easy => Difficulty::Easy,
            Preset::Medium => Difficulty::Medium,
            Preset::Hard => Difficulty::Hard,
            Preset::Expert => Difficulty::Expert,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    match args.command {
        Command::Generate {
            profile,
            seed,
            json,
        } => run_generate(&profile, seed, json),
        Command::Solve { file } => run_solve(&load_puzzle(&file)?),
        Command::Play { file, moves, undo } => run_play(load_puzzle(&file)?, &moves, undo),
        Command::Bench { runs } => run_bench(runs),
    }
}

fn clock_seed() -> Result<u64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock is before the epoch")?;
    Ok(elapsed.as_nanos() as u64)
}

fn load_puzzle(path: &Path) -> Result<Puzzle> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid puzzle in {}", path.display()))
}

fn path_string(path: &[Move]) -> String {
    path.iter().map(|mv| mv.symbol()).collect()
}

fn run_generate(args: &ProfileArgs, seed: Option<u64>, json: bool) -> Result<()> {
    let seed = match seed {
        Some(seed) => seed,
        None => clock_seed()?,
    };
    let profile = args.profile();
    log::debug!("Generating {profile:?} with seed {seed}");

    let started = Instant::now();
    let puzzle = RandomPuzzleGenerator::new(seed)
        .with_max_attempts(args.max_attempts)
        .generate(profile)
        .context("Puzzle generation failed")?;
    log::info!("Generated in {:?}", started.elapsed());

    if json {
        println!("{}", serde_json::to_string_pretty(&puzzle)?);
        return Ok(());
    }

    let marks = Marks {
        protagonist: puzzle.start(),
        adversary: puzzle.adversary_start(),
        exit: puzzle.exit(),
    };
    print!("{}", render(puzzle.maze(), &marks));
    println!("seed: {}", puzzle.seed());
    println!(
        "moves: {} (requested {})",
        puzzle.min_moves(),
        puzzle.requested_min_moves()
    );
    if !puzzle.meets_requested_difficulty() {
        println!("note: fell back to an easier puzzle than requested");
    }
    println!("solution: {}", path_string(puzzle.optimal_path()));
    Ok(())
}

fn run_solve(puzzle: &Puzzle) -> Result<()> {
    let result = solve(
        puzzle.maze(),
        puzzle.start(),
        puzzle.adversary_start(),
        puzzle.exit(),
    );
    if !result.solvable {
        bail!("Puzzle has no escape");
    }
    println!("{} moves: {}", result.min_moves, path_string(&result.path));
    if result.path != puzzle.optimal_path() {
        log::warn!(
            "Stored solution {} differs from the solver's",
            path_string(puzzle.optimal_path())
        );
    }
    Ok(())
}

fn run_play(puzzle: Puzzle, moves: &str, undo: usize) -> Result<()> {
    let mut session = SessionState::new(puzzle);

    for symbol in moves.chars().filter(|c| !c.is_whitespace()) {
        let mv = Move::from_symbol(symbol).with_context(|| format!("Unknown move {symbol:?}"))?;
        match session.apply_move(mv) {
            Outcome::Rejected => log::warn!("Move {symbol:?} rejected"),
            outcome => log::info!("{mv:?}: {outcome:?}"),
        }
    }
    for _ in 0..undo {
        if !session.undo() {
            log::warn!("Nothing left to undo");
            break;
        }
    }

    let marks = Marks {
        protagonist: session.protagonist(),
        adversary: session.adversary(),
        exit: session.puzzle().exit(),
    };
    print!("{}", render(session.puzzle().maze(), &marks));
    println!("status: {:?} after {} moves", session.status(), session.move_count());
    match session.hint() {
        Some(mv) => println!("hint: {mv:?}"),
        None if !session.is_finished() => println!("hint: no escape left"),
        None => {}
    }
    Ok(())
}

fn run_bench(runs: u64) -> Result<()> {
    println!("preset  avg_ms  avg_attempts  avg_moves  detour  fallbacks  failures");
    for difficulty in Difficulty::ALL {
        let profile = difficulty.profile();
        let (mut millis, mut attempts, mut moves, mut walk) = (0.0, 0u64, 0u64, 0u64);
        let (mut fallbacks, mut failures) = (0u64, 0u64);

        for seed in 0..runs {
            let started = Instant::now();
            let mut task = GenerationTask::new(profile, seed, DEFAULT_MAX_ATTEMPTS);
            let outcome = loop {
                match task.step() {
                    Ok(TaskStatus::Pending) => continue,
                    Ok(TaskStatus::Done(puzzle)) => break Ok(puzzle),
                    Err(err) => break Err(err),
                }
            };
            millis += started.elapsed().as_secs_f64() * 1000.0;
            attempts += u64::from(task.attempts_made());

            match outcome {
                Ok(puzzle) => {
                    moves += u64::from(puzzle.min_moves());
                    let field = distances(puzzle.maze(), puzzle.start());
                    walk += u64::from(field[puzzle.exit().to_nd_index()].unwrap_or_default());
                    if !puzzle.meets_requested_difficulty() {
                        fallbacks += 1;
                    }
                }
                Err(err) => {
                    log::warn!("{} seed {seed}: {err}", difficulty.name());
                    failures += 1;
                }
            }
        }

        let solved = (runs - failures).max(1) as f64;
        println!(
            "{:<7} {:>7.1} {:>13.1} {:>10.1} {:>7.2} {:>10} {:>9}",
            difficulty.name(),
            millis / runs.max(1) as f64,
            attempts as f64 / runs.max(1) as f64,
            moves as f64 / solved,
            moves as f64 / (walk.max(1) as f64),
            fallbacks,
            failures,
        );
    }
    Ok(())
}
