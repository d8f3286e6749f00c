//! Text-file loading and saving of seed patterns

use super::bitplane::{BitPlaneView, PackedValue};
use super::matrix::{BitGrid, Matrix};
use anyhow::{Context, Result};
use std::path::Path;

/// Load a boolean pattern from a text file.
/// Format: one line per row, '1' for live cells and '0' for dead cells.
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P) -> Result<Matrix<bool>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_pattern(&content)
        .with_context(|| format!("Failed to parse pattern from file: {}", path.as_ref().display()))
}

/// Parse a pattern from its string representation.
pub fn parse_pattern(content: &str) -> Result<Matrix<bool>> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Pattern is empty or contains no valid rows");
    }

    let height = lines.len();
    let width = lines[0].len();

    if width == 0 {
        anyhow::bail!("Pattern rows cannot be empty");
    }

    let mut pattern = Matrix::new(width, height, false);

    for (y, line) in lines.iter().enumerate() {
        if line.len() != width {
            anyhow::bail!(
                "Row {} has length {}, expected {} (all rows must have the same length)",
                y,
                line.len(),
                width
            );
        }

        for (x, ch) in line.chars().enumerate() {
            match ch {
                '0' => {}
                '1' => pattern
                    .try_set(x, y, true)
                    .context("Pattern coordinates out of range")?,
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                    ch,
                    x,
                    y
                ),
            }
        }
    }

    Ok(pattern)
}

/// Save a boolean pattern to a text file.
pub fn save_pattern_to_file<P: AsRef<Path>>(pattern: &Matrix<bool>, path: P) -> Result<()> {
    let content = pattern_to_string(pattern);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write pattern to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a pattern to its string representation.
pub fn pattern_to_string(pattern: &Matrix<bool>) -> String {
    let mut result = String::with_capacity(pattern.height() * (pattern.width() + 1));

    for y in 0..pattern.height() {
        for x in 0..pattern.width() {
            result.push(if pattern.get(x, y) { '1' } else { '0' });
        }
        result.push('\n');
    }

    result
}

/// Write a boolean pattern into one bit-plane of a packed matrix.
///
/// The pattern must have the same dimensions as the matrix; every other
/// plane keeps its bits.
pub fn seed_plane<V: PackedValue>(
    matrix: &mut Matrix<V>,
    bit: u32,
    pattern: &Matrix<bool>,
) -> Result<()> {
    if pattern.width() != matrix.width() || pattern.height() != matrix.height() {
        anyhow::bail!(
            "Pattern is {}x{} but the target matrix is {}x{}",
            pattern.width(),
            pattern.height(),
            matrix.width(),
            matrix.height()
        );
    }

    let mut view = BitPlaneView::new(matrix, bit).context("Cannot seed plane")?;
    for y in 0..pattern.height() {
        for x in 0..pattern.width() {
            view.set(x, y, pattern.get(x, y));
        }
    }
    Ok(())
}

/// Create example pattern files for seeding simulations.
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // Glider
    let glider_content = "01000\n00100\n11100\n00000\n00000\n";
    std::fs::write(dir.join("glider.txt"), glider_content).context("Failed to write glider.txt")?;

    // Blinker (oscillator)
    let blinker_content = "000\n111\n000\n";
    std::fs::write(dir.join("blinker.txt"), blinker_content)
        .context("Failed to write blinker.txt")?;

    // Block (still life)
    let block_content = "0000\n0110\n0110\n0000\n";
    std::fs::write(dir.join("block.txt"), block_content).context("Failed to write block.txt")?;

    // Beacon (oscillator)
    let beacon_content = "110000\n110000\n001100\n001100\n";
    std::fs::write(dir.join("beacon.txt"), beacon_content).context("Failed to write beacon.txt")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::bitplane::extract_plane;
    use tempfile::tempdir;

    #[test]
    fn test_parse_pattern() {
        let content = "010\n101\n010\n";
        let pattern = parse_pattern(content).unwrap();

        assert_eq!(pattern.width(), 3);
        assert_eq!(pattern.height(), 3);
        assert_eq!(pattern.live_count(), 4);
        assert!(pattern.get(1, 0));
        assert!(pattern.get(0, 1));
        assert!(pattern.get(2, 1));
        assert!(pattern.get(1, 2));
    }

    #[test]
    fn test_pattern_to_string() {
        let mut pattern = Matrix::new(3, 2, false);
        pattern.set(0, 0, true);
        pattern.set(2, 1, true);
        assert_eq!(pattern_to_string(&pattern), "100\n001\n");
    }

    #[test]
    fn test_round_trip() {
        let original = "010\n101\n010\n";
        let pattern = parse_pattern(original).unwrap();
        assert_eq!(pattern_to_string(&pattern), original);
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("pattern.txt");

        let mut original = Matrix::new(3, 2, false);
        original.set(0, 0, true);
        original.set(1, 1, true);

        save_pattern_to_file(&original, &file_path).unwrap();
        let loaded = load_pattern_from_file(&file_path).unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_invalid_input() {
        // Invalid character
        assert!(parse_pattern("010\n1X1\n010\n").is_err());

        // Inconsistent row lengths
        assert!(parse_pattern("010\n11\n010\n").is_err());

        // Empty content
        assert!(parse_pattern("").is_err());
    }

    #[test]
    fn test_seed_plane() {
        let pattern = parse_pattern("10\n01\n").unwrap();
        let mut packed: Matrix<u32> = Matrix::new(2, 2, 0xff00);

        seed_plane(&mut packed, 0, &pattern).unwrap();

        assert_eq!(extract_plane(&packed, 0).unwrap(), pattern);
        // Plane 9 (part of the 0xff00 fill) is untouched.
        assert!(extract_plane(&packed, 9).unwrap().get(0, 0));
        assert_eq!(packed.get(0, 0), 0xff01);
    }

    #[test]
    fn test_seed_plane_dimension_mismatch() {
        let pattern = parse_pattern("10\n01\n").unwrap();
        let mut packed: Matrix<u32> = Matrix::new(3, 3, 0);
        assert!(seed_plane(&mut packed, 0, &pattern).is_err());
    }

    #[test]
    fn test_seed_plane_invalid_bit() {
        let pattern = parse_pattern("10\n01\n").unwrap();
        let mut packed: Matrix<u8> = Matrix::new(2, 2, 0);
        assert!(seed_plane(&mut packed, 8, &pattern).is_err());
    }

    #[test]
    fn test_create_example_patterns() {
        let temp_dir = tempdir().unwrap();
        create_example_patterns(temp_dir.path()).unwrap();

        for name in ["glider.txt", "blinker.txt", "block.txt", "beacon.txt"] {
            assert!(temp_dir.path().join(name).exists());
        }

        let glider = load_pattern_from_file(temp_dir.path().join("glider.txt")).unwrap();
        assert_eq!(glider.width(), 5);
        assert_eq!(glider.height(), 5);
        assert_eq!(glider.live_count(), 5);
    }
}
