//! Main CLI application for the bit-plane life simulator

use anyhow::{Context, Result};
use bitplane_life::{
    config::{CliOverrides, Settings},
    life::{create_example_patterns, load_pattern_from_file, seed_plane, Automaton, Matrix},
    utils::{ColorOutput, GridRenderer},
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "bitplane_life")]
#[command(about = "Bit-plane Game of Life simulator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evolve a boolean grid loaded from a pattern file
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Seed pattern file (overrides config)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print every generation instead of only the last one
        #[arg(long)]
        show_all: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Evolve bit-planes of a packed 32-bit matrix, one automaton per bit
    Planes {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Seed pattern file (overrides config)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Bit-plane indices to evolve (overrides config)
        #[arg(long, num_args = 1..)]
        planes: Option<Vec<u32>>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            pattern,
            generations,
            output,
            show_all,
            verbose,
        } => run_command(config, pattern, generations, output, show_all, verbose),
        Commands::Planes {
            config,
            pattern,
            generations,
            planes,
            verbose,
        } => planes_command(config, pattern, generations, planes, verbose),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(config_path: &PathBuf, overrides: CliOverrides) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Settings::default()
    };

    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn run_command(
    config_path: PathBuf,
    pattern_file: Option<PathBuf>,
    generations: Option<usize>,
    output_dir: Option<PathBuf>,
    show_all: bool,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("Starting boolean-grid simulation"));

    let settings = load_settings(
        &config_path,
        CliOverrides {
            generations,
            pattern_file,
            output_dir,
            planes: None,
        },
    )?;

    if verbose {
        println!("Configuration:");
        println!("  Generations: {}", settings.simulation.generations);
        println!("  Pattern file: {}", settings.input.pattern_file.display());
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }

    let start_time = Instant::now();
    let history = bitplane_life::run_simulation(&settings)?;
    let total_time = start_time.elapsed();

    let final_grid = history.last().context("Simulation produced no generations")?;
    println!(
        "{}",
        ColorOutput::success(&format!(
            "Evolved {} generations in {:.3}s ({} live cells remain)",
            history.len() - 1,
            total_time.as_secs_f64(),
            final_grid.live_count()
        ))
    );

    if show_all {
        println!("\n{}", GridRenderer::format_history(&history));
    } else {
        println!("\nFinal state:");
        println!("{}", GridRenderer::format_grid_compact(final_grid));
    }

    if settings.output.save_history {
        GridRenderer::save_history(
            &history,
            &settings.output.output_directory,
            &settings.output.format,
        )
        .context("Failed to save history")?;
        println!(
            "{}",
            ColorOutput::success(&format!(
                "History saved to {}",
                settings.output.output_directory.display()
            ))
        );
    }

    Ok(())
}

fn planes_command(
    config_path: PathBuf,
    pattern_file: Option<PathBuf>,
    generations: Option<usize>,
    planes: Option<Vec<u32>>,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("Starting bit-plane simulation"));

    let settings = load_settings(
        &config_path,
        CliOverrides {
            generations,
            pattern_file,
            output_dir: None,
            planes,
        },
    )?;

    let pattern = load_pattern_from_file(&settings.input.pattern_file)
        .context("Failed to load seed pattern")?;
    let bits = settings.planes.resolve();

    let mut matrix: Matrix<u32> = Matrix::new(pattern.width(), pattern.height(), 0);
    for &bit in &bits {
        seed_plane(&mut matrix, bit, &pattern)
            .with_context(|| format!("Failed to seed plane {bit}"))?;
    }

    if verbose {
        println!(
            "Evolving {} plane(s) of a {}x{} packed matrix",
            bits.len(),
            matrix.width(),
            matrix.height()
        );
    }

    let automaton = Automaton::new(settings.simulation.rule.clone());
    let start_time = Instant::now();

    for generation in 1..=settings.simulation.generations {
        automaton.step_planes(&mut matrix, bits.iter().copied())?;
        if verbose {
            println!(
                "generation {:3}  {}",
                generation,
                GridRenderer::format_plane_summary(&matrix, &bits)
            );
        }
    }

    let total_time = start_time.elapsed();
    println!(
        "{}",
        ColorOutput::success(&format!(
            "Evolved {} generations across {} plane(s) in {:.3}s",
            settings.simulation.generations,
            bits.len(),
            total_time.as_secs_f64()
        ))
    );
    println!("{}", GridRenderer::format_plane_summary(&matrix, &bits));

    if bits.len() <= 3 {
        println!();
        for &bit in &bits {
            println!("{}", GridRenderer::format_plane(&matrix, bit)?);
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/patterns");
    let output_dir = directory.join("output/generations");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let default_settings = Settings::default();
        default_settings
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_patterns(&input_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", input_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    // Short boolean run on the blinker
    let mut blinker_config = Settings::default();
    blinker_config.simulation.generations = 2;
    blinker_config.input.pattern_file = PathBuf::from("input/patterns/blinker.txt");
    blinker_config.to_file(&examples_dir.join("blinker.yaml"))?;

    // Packed run over one plane per color channel
    let mut planes_config = Settings::default();
    planes_config.simulation.generations = 8;
    planes_config.planes.bits = Some(vec![0, 8, 16, 24]);
    planes_config.input.pattern_file = PathBuf::from("input/patterns/glider.txt");
    planes_config.to_file(&examples_dir.join("planes.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your patterns to {}", input_dir.display());
    println!("3. Run: cargo run -- run --config config/default.yaml");

    Ok(())
}
