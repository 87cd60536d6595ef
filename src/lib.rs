pub mod constants;
pub mod config;
pub mod lattice;
pub mod math;
pub mod world;
