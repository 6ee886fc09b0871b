pub mod differences;
pub mod engine;
pub mod linear;
pub mod projection;
pub mod quadratic;
pub mod solver;
pub mod statistics;
