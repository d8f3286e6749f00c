//! Configuration management for the bit-plane life simulator

pub mod settings;

pub use settings::{
    CliOverrides, InputConfig, OutputConfig, OutputFormat, PlaneConfig, Settings, SimulationConfig,
    PACKED_BITS,
};
