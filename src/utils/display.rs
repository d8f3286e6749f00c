//! Console rendering and history output for simulations

use crate::config::OutputFormat;
use crate::life::{extract_plane, Matrix, PackedValue};
use anyhow::{Context, Result};
use itertools::Itertools;
use std::path::Path;

/// Formats grids and simulation histories for console and file output.
pub struct GridRenderer;

impl GridRenderer {
    /// Format a boolean grid in compact form.
    pub fn format_grid_compact(grid: &Matrix<bool>) -> String {
        let mut output = String::new();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                output.push(if grid.get(x, y) { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a boolean grid with row and column coordinates.
    pub fn format_grid_with_coords(grid: &Matrix<bool>) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for y in 0..grid.height() {
            output.push_str(&format!("{:2} ", y));
            for x in 0..grid.width() {
                output.push_str(if grid.get(x, y) { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Format one bit-plane of a packed matrix.
    pub fn format_plane<V: PackedValue>(matrix: &Matrix<V>, bit: u32) -> Result<String> {
        let plane = extract_plane(matrix, bit).context("Cannot render plane")?;
        Ok(format!(
            "Plane {} ({} live):\n{}",
            bit,
            plane.live_count(),
            Self::format_grid_compact(&plane)
        ))
    }

    /// One-line live-cell census of the selected planes of a packed matrix.
    pub fn format_plane_summary<V: PackedValue>(matrix: &Matrix<V>, bits: &[u32]) -> String {
        let counts = bits
            .iter()
            .map(|&bit| {
                let count = extract_plane(matrix, bit)
                    .map(|plane| plane.live_count())
                    .unwrap_or(0);
                format!("{bit}:{count}")
            })
            .join("  ");
        format!("live cells per plane  {counts}")
    }

    /// Format a whole evolution history, one grid per generation.
    pub fn format_history(history: &[Matrix<bool>]) -> String {
        let mut output = String::new();
        for (generation, grid) in history.iter().enumerate() {
            output.push_str(&format!(
                "Generation {} ({} live):\n",
                generation,
                grid.live_count()
            ));
            output.push_str(&Self::format_grid_compact(grid));
            output.push('\n');
        }
        output
    }

    /// Save an evolution history to files in the requested format.
    pub fn save_history<P: AsRef<Path>>(
        history: &[Matrix<bool>],
        output_dir: P,
        format: &OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        match format {
            OutputFormat::Text => {
                for (generation, grid) in history.iter().enumerate() {
                    let filepath = output_dir.join(format!("generation_{:03}.txt", generation));
                    std::fs::write(filepath, crate::life::io::pattern_to_string(grid))?;
                }
            }
            OutputFormat::Json => {
                let filepath = output_dir.join("history.json");
                let json = serde_json::to_string_pretty(history)
                    .context("Failed to serialize history")?;
                std::fs::write(filepath, json)?;
            }
            OutputFormat::Visual => {
                let filepath = output_dir.join("history_visual.txt");
                std::fs::write(filepath, Self::format_history(history))?;
            }
        }

        Ok(())
    }
}

/// Color output utilities.
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it).
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color.
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message.
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message.
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message.
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message.
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Magenta => 35,
            Color::Cyan => 36,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn checker_grid() -> Matrix<bool> {
        let mut grid = Matrix::new(3, 3, false);
        for y in 0..3 {
            for x in 0..3 {
                grid.set(x, y, (x + y) % 2 == 0);
            }
        }
        grid
    }

    #[test]
    fn test_grid_formatting() {
        let grid = checker_grid();

        let compact = GridRenderer::format_grid_compact(&grid);
        assert!(compact.contains('█'));
        assert!(compact.contains('·'));

        let with_coords = GridRenderer::format_grid_with_coords(&grid);
        assert!(with_coords.contains(" 0 1 2"));
    }

    #[test]
    fn test_plane_summary() {
        let mut packed: Matrix<u8> = Matrix::new(2, 2, 0);
        packed.set(0, 0, 0b11);
        packed.set(1, 1, 0b01);

        let summary = GridRenderer::format_plane_summary(&packed, &[0, 1]);
        assert!(summary.contains("0:2"));
        assert!(summary.contains("1:1"));
    }

    #[test]
    fn test_save_history_text() {
        let temp_dir = tempdir().unwrap();
        let history = vec![checker_grid(), Matrix::new(3, 3, false)];

        GridRenderer::save_history(&history, temp_dir.path(), &OutputFormat::Text).unwrap();
        assert!(temp_dir.path().join("generation_000.txt").exists());
        assert!(temp_dir.path().join("generation_001.txt").exists());
    }

    #[test]
    fn test_save_history_json() {
        let temp_dir = tempdir().unwrap();
        let history = vec![checker_grid()];

        GridRenderer::save_history(&history, temp_dir.path(), &OutputFormat::Json).unwrap();
        let json = std::fs::read_to_string(temp_dir.path().join("history.json")).unwrap();
        let parsed: Vec<Matrix<bool>> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, history);
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
