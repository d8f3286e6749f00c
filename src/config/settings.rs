//! Configuration settings for the bit-plane life simulator

use crate::life::Rule;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Bit width of the packed cell value the simulator drives (RGBA color).
pub const PACKED_BITS: u32 = 32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub planes: PlaneConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub generations: usize,
    pub rule: Rule,
}

/// Which bit-planes of the packed matrix take part in the simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaneConfig {
    /// Bit indices to evolve; `None` means every plane of the packed value.
    pub bits: Option<Vec<u32>>,
}

impl PlaneConfig {
    /// Resolve the configured subset into concrete bit indices.
    pub fn resolve(&self) -> Vec<u32> {
        match &self.bits {
            Some(bits) => bits.clone(),
            None => (0..PACKED_BITS).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub pattern_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_history: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
    Visual,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                generations: 10,
                rule: Rule::conway(),
            },
            planes: PlaneConfig { bits: None },
            input: InputConfig {
                pattern_file: PathBuf::from("input/patterns/glider.txt"),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save_history: false,
                output_directory: PathBuf::from("output/generations"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file.
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings.
    pub fn validate(&self) -> Result<()> {
        if self.simulation.generations == 0 {
            anyhow::bail!("Number of generations must be positive");
        }

        self.simulation
            .rule
            .validate()
            .context("Invalid birth/survival rule")?;

        if let Some(bits) = &self.planes.bits {
            if bits.is_empty() {
                anyhow::bail!("Plane list cannot be empty; omit it to evolve every plane");
            }
            for &bit in bits {
                if bit >= PACKED_BITS {
                    anyhow::bail!(
                        "Plane index {} out of range for {}-bit cells",
                        bit,
                        PACKED_BITS
                    );
                }
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides.
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(ref pattern_file) = cli_overrides.pattern_file {
            self.input.pattern_file = pattern_file.clone();
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if let Some(ref bits) = cli_overrides.planes {
            self.planes.bits = Some(bits.clone());
        }
    }
}

/// Command line overrides for settings.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub generations: Option<usize>,
    pub pattern_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub planes: Option<Vec<u32>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");

        let mut settings = Settings::default();
        settings.simulation.generations = 7;
        settings.planes.bits = Some(vec![0, 8, 16, 24]);
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.simulation.generations, 7);
        assert_eq!(loaded.planes.resolve(), vec![0, 8, 16, 24]);
        assert_eq!(loaded.simulation.rule, Rule::conway());
    }

    #[test]
    fn test_validation_rejects_zero_generations() {
        let mut settings = Settings::default();
        settings.simulation.generations = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_plane_index() {
        let mut settings = Settings::default();
        settings.planes.bits = Some(vec![0, 32]);
        assert!(settings.validate().is_err());

        settings.planes.bits = Some(vec![]);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_rule() {
        let mut settings = Settings::default();
        settings.simulation.rule.birth.push(12);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_plane_resolution_defaults_to_all() {
        let settings = Settings::default();
        let bits = settings.planes.resolve();
        assert_eq!(bits.len(), PACKED_BITS as usize);
        assert_eq!(bits[0], 0);
        assert_eq!(*bits.last().unwrap(), PACKED_BITS - 1);
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            generations: Some(3),
            pattern_file: Some(PathBuf::from("other.txt")),
            output_dir: None,
            planes: Some(vec![1, 2]),
        };
        settings.merge_with_cli(&overrides);

        assert_eq!(settings.simulation.generations, 3);
        assert_eq!(settings.input.pattern_file, PathBuf::from("other.txt"));
        assert_eq!(settings.planes.resolve(), vec![1, 2]);
        assert_eq!(
            settings.output.output_directory,
            Settings::default().output.output_directory
        );
    }
}
