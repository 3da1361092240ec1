use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use grid_shortest_path::batch::BatchSimulation;
use grid_shortest_path::config::Config;
use grid_shortest_path::grid::Grid;
use grid_shortest_path::input::resolve_endpoints;
use grid_shortest_path::session::{AlgorithmRunner, Session};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if config.quiet { "warn" } else { "info" })
    });
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    if config.batch {
        let mut batch = BatchSimulation::new(config.clone());
        batch.run().context("batch run failed")?;
        if !config.quiet {
            batch.print_summary();
        }
        if batch.mismatches() > 0 {
            anyhow::bail!("{} grids produced different path lengths", batch.mismatches());
        }
        return Ok(());
    }

    let grid = load_grid(&config)?;
    let (start, goal) = resolve_endpoints(&grid, config.start.as_deref(), config.goal.as_deref())
        .context("invalid endpoint")?;
    info!(rows = grid.rows(), cols = grid.cols(), %start, %goal, "grid ready");

    let mut session = Session::new(grid, start, goal)
        .context("cannot search between these endpoints")?
        .with_config(&config);
    let runners = AlgorithmRunner::from_config(&config);
    let (results, comparison) = session.run(&runners)?;

    if !config.quiet {
        let (start, goal) = session.endpoints();
        println!("\n=== RESULTS ===");
        for (result, run) in results.iter().zip(&comparison.runs) {
            match result.outcome.path() {
                Some(path) => println!("{} ({} steps): {}", result.name, path.steps(), path),
                None => println!("{}: no path from {} to {}", result.name, start, goal),
            }
            print!("{}", run.stats);
        }
        println!();
        println!("Legend: S=Start, G=Goal, #=Obstacle, d=Dijkstra path, a=A* path, .=Empty");
        print!("{}", session.grid());
        println!();
        print!("{comparison}");
    }
    Ok(())
}

fn load_grid(config: &Config) -> anyhow::Result<Grid> {
    if let Some(path) = &config.grid_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let grid = text
            .parse::<Grid>()
            .with_context(|| format!("parsing {}", path.display()))?;
        return Ok(grid);
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, obstacles = config.obstacles, "generating grid");
    let mut rng = StdRng::seed_from_u64(seed);

    // keep the requested endpoints free of obstacles
    let blank = Grid::try_new(config.rows, config.cols)?;
    let (start, goal) = resolve_endpoints(&blank, config.start.as_deref(), config.goal.as_deref())
        .context("invalid endpoint")?;
    let grid = Grid::random(config.rows, config.cols, config.obstacles, &[start, goal], &mut rng)?;
    Ok(grid)
}
