pub mod etdrk4;
pub mod ifrk4;
pub mod solver;

pub use etdrk4::*;
pub use ifrk4::*;
pub use solver::*;
