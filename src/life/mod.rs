//! Cellular-automaton core: matrix storage, bit-plane views, rule engine

pub mod bitplane;
pub mod io;
pub mod matrix;
pub mod rules;

pub use bitplane::{extract_plane, BitPlaneView, PackedValue};
pub use io::{
    create_example_patterns, load_pattern_from_file, parse_pattern, save_pattern_to_file,
    seed_plane,
};
pub use matrix::{BitGrid, GridError, Matrix};
pub use rules::{live_neighbors, Automaton, Rule};
