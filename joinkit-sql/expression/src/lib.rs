pub mod aggregate;
pub mod ast;
pub mod builder;
mod comparison;
pub mod error;
pub mod execution;
mod logical;
pub mod operator;
mod string;

pub use num_traits;

#[cfg(test)]
mod tests;
