use std::io::BufRead;
use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use anstream::eprintln;
use anstream::print;
use anstream::println;
use clap::Parser;
use hrsw::Stopwatch;
use human_duration::human_duration;
use owo_colors::OwoColorize;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use tracing_subscriber::EnvFilter;

use greedy_search::algorithms::greedy::GreedySearch;
use greedy_search::space::Path;
use greedy_search::problems::sliding_tiles::SlidingTilesGrid;
use greedy_search::problems::sliding_tiles::SlidingTilesError;

#[cfg(all(not(target_env = "msvc"), not(feature = "mem_profile")))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[cfg(feature = "mem_profile")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

/// Solves sliding-tiles puzzles with greedy best-first search.
#[derive(Parser, Debug)]
#[clap(long_version = greedy_search::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Starting grid, whitespace-separated and row-major. `0` is the blank.
    #[arg(long, env = "SLIDING_TILES_START", default_value = "0 2 1 6 7 4 3 8 5")]
    pub start: String,

    /// Goal grid, whitespace-separated and row-major. `0` is the blank.
    #[arg(long, env = "SLIDING_TILES_GOAL", default_value = "1 2 3 8 0 4 7 6 5")]
    pub goal: String,

    /// Start from this many random moves away from the goal instead.
    #[arg(long)]
    pub scramble: Option<usize>,
    #[arg(long, default_value_t = 0u64)]
    pub seed: u64,

    /// Redraw the board for every step, waiting this long between them.
    #[arg(long)]
    pub animate_ms: Option<u64>,

    /// Print search and memory stats.
    #[arg(long)]
    pub stats: bool,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

fn parse(what: &str, grid: &str) -> Result<SlidingTilesGrid, SlidingTilesError> {
    SlidingTilesGrid::try_from(grid).inspect_err(|e| {
        eprintln!("{} {what} grid {grid:?}: {e}", "Invalid".red());
    })
}

fn main() -> ExitCode {
    #[cfg(feature = "mem_profile")]
    let _profiler = dhat::Profiler::new_heap();

    let args = Args::parse();
    args.color.write_global();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Ok(goal) = parse("goal", &args.goal) else {
        return ExitCode::from(2);
    };
    let start = match args.scramble {
        Some(moves) => goal.scramble(&mut ChaCha8Rng::seed_from_u64(args.seed), moves),
        None => match parse("start", &args.start) {
            Ok(start) => start,
            Err(_) => return ExitCode::from(2),
        },
    };
    if start.side() != goal.side() {
        eprintln!(
            "{} start is {}x{} but goal is {}x{}",
            "Mismatched grids:".red(),
            start.side(),
            start.side(),
            goal.side(),
            goal.side()
        );
        return ExitCode::from(2);
    }
    log::info!("Solving from\n{start}");

    let mut stopwatch = Stopwatch::new_started();
    let mut search = GreedySearch::new(
        start,
        |g: &SlidingTilesGrid| g.manhattan_distance(&goal) as f64,
        |g: &SlidingTilesGrid| *g == goal,
        SlidingTilesGrid::neighbours,
    );
    let solution = search.find_next_goal();
    stopwatch.stop();

    if args.stats {
        println!(
            "Searched for {} ({})",
            human_duration(&stopwatch.elapsed()),
            search.stats()
        );
        if let Err(e) = search.print_memory_stats() {
            log::warn!("Failed to print memory stats: {e}");
        }
    }

    let Some(path) = solution else {
        println!("{}", "Didn't find a solution!".red());
        return ExitCode::FAILURE;
    };

    print!(
        "Found a solution with {} steps.",
        path.steps().bold().green()
    );
    let mut out = anstream::stdout();
    if let Some(ms) = args.animate_ms {
        println!(" Press Enter to see it!");
        let mut line = String::new();
        if let Err(e) = std::io::stdin().lock().read_line(&mut line) {
            log::warn!("Failed to wait for Enter: {e}");
        }
        let delay = Duration::from_millis(ms);
        if let Err(e) = show_path(&mut out, &path, true, |_| std::thread::sleep(delay)) {
            log::warn!("Failed to print the solution: {e}");
        }
    } else {
        println!();
        if let Err(e) = show_path(&mut out, &path, false, |_| ()) {
            log::warn!("Failed to print the solution: {e}");
        }
    }

    ExitCode::SUCCESS
}

const CLEAR_SCREEN: &str = "\u{1b}[2J\u{1b}[H";

/// Writes every step of `path`.
///
/// When animating, each step starts on a cleared screen and `wait` runs once
/// the step is flushed, so it stays visible for the whole wait.
fn show_path<W: Write>(
    out: &mut W,
    path: &Path<SlidingTilesGrid>,
    animate: bool,
    mut wait: impl FnMut(&mut W),
) -> std::io::Result<()> {
    for (i, step) in path.iter().enumerate() {
        if animate {
            write!(out, "{CLEAR_SCREEN}")?;
        }
        writeln!(out, "{} {}", "Step".yellow(), i)?;
        write!(out, "{step}")?;
        out.flush()?;
        if animate {
            wait(out);
        }
    }
    Ok(())
}
