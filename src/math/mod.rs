pub mod rotor4;

pub use rotor4::{Bivec4, Rotor4};
