//! Concrete record types and the macros used to define them

pub mod macros;
pub mod product;

pub use product::Product;
