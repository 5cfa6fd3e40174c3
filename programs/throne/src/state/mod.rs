pub mod throne;

pub use throne::*;
