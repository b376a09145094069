//! Timing experiment for the threaded multiply engine.
//!
//! Builds random matrices of a user-chosen size, multiplies them with a
//! user-chosen number of worker threads, and prints per-worker row counts
//! and CPU times next to the wall-clock time of the whole multiply. With the
//! orthonormal option the product is `A * At`, which should print as the
//! identity matrix and makes correctness visible at a glance.

use std::time::{Duration, Instant};

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use rowmul::{multiply, Matrix};

/// Computes c = a x b for random matrices of user-specified size.
#[derive(Parser)]
#[command(name = "rowmul", version, about)]
struct Cli {
    /// Number of rows of c and a
    #[arg(short = 'n', long = "rows", default_value_t = 4)]
    rows: usize,

    /// Number of columns of c and b
    #[arg(short = 'm', long = "cols", default_value_t = 4)]
    cols: usize,

    /// Number of columns of a and rows of b
    #[arg(short = 'p', long = "inner", default_value_t = 4)]
    inner: usize,

    /// Number of worker threads (0 runs a single pass on the calling thread)
    #[arg(short = 't', long = "threads", default_value_t = 0)]
    threads: usize,

    /// Seed for the random number generator
    #[arg(short = 's', long = "seed", default_value_t = 0)]
    seed: u64,

    /// Orthonormalize a and use its transpose as b (forces square, implies -v)
    #[arg(short = 'o', long = "orthonormal")]
    orthonormal: bool,

    /// Print a, b, and a x b
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> rowmul::Result<()> {
    let verbose = cli.verbose || cli.orthonormal;
    let (n, m, p) = if cli.orthonormal {
        (cli.rows, cli.rows, cli.rows)
    } else {
        (cli.rows, cli.cols, cli.inner)
    };

    let mut rng = StdRng::seed_from_u64(cli.seed);
    let mut a = Matrix::random(n, p, &mut rng);
    let b = if cli.orthonormal {
        a.orthonormalize();
        a.transpose()
    } else {
        Matrix::random(p, m, &mut rng)
    };

    if verbose {
        println!("a:\n{a}");
        println!("b:\n{b}");
    }

    let wall_start = Instant::now();
    let (c, stats) = multiply(&a, &b, cli.threads)?;
    let wall = wall_start.elapsed();

    if verbose {
        println!("c (= a x b):\n{c}");
    }

    for (worker, s) in stats.iter().enumerate() {
        println!(
            "worker {worker:3}: {:6} rows, {:.6} s cpu",
            s.rows_completed,
            s.cpu_time.as_secs_f64()
        );
    }
    let total_cpu: Duration = stats.iter().map(|s| s.cpu_time).sum();
    println!("total worker cpu time: {:.6} s", total_cpu.as_secs_f64());
    println!("wall clock time:       {:.6} s", wall.as_secs_f64());

    Ok(())
}
