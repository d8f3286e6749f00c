//! Bit-plane Game of Life engine
//!
//! This library evolves Conway-style cellular automata over anything that
//! exposes a boolean grid: plain boolean matrices, or single bit-planes of
//! matrices of packed integer values (such as 32-bit colors). Evolving every
//! bit-plane of a packed matrix independently is exactly equivalent to
//! unpacking, evolving, and repacking, so a packed matrix can host one
//! independent automaton per bit.

pub mod config;
pub mod life;
pub mod utils;

pub use config::Settings;
pub use life::{Automaton, BitGrid, BitPlaneView, GridError, Matrix, PackedValue, Rule};

use anyhow::{Context, Result};

/// Run the boolean-grid simulation described by `settings`.
///
/// Loads the configured seed pattern, evolves it for the configured number
/// of generations, and returns the full history, generation 0 included.
pub fn run_simulation(settings: &Settings) -> Result<Vec<Matrix<bool>>> {
    let pattern = life::load_pattern_from_file(&settings.input.pattern_file)
        .context("Failed to load seed pattern")?;

    let automaton = Automaton::new(settings.simulation.rule.clone());
    let mut history = Vec::with_capacity(settings.simulation.generations + 1);
    let mut grid = pattern;
    history.push(grid.clone());

    for _ in 0..settings.simulation.generations {
        automaton.step(&mut grid);
        history.push(grid.clone());
    }

    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_run_simulation() {
        let temp_dir = tempdir().unwrap();
        let pattern_path = temp_dir.path().join("blinker.txt");
        std::fs::write(&pattern_path, "000\n111\n000\n").unwrap();

        let mut settings = Settings::default();
        settings.input.pattern_file = pattern_path;
        settings.simulation.generations = 2;

        let history = run_simulation(&settings).unwrap();
        assert_eq!(history.len(), 3);
        // Blinker has period 2.
        assert_eq!(history[0], history[2]);
        assert_ne!(history[0], history[1]);
    }
}
