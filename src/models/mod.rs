pub mod crop;
pub mod field;
pub mod prediction;

pub use crop::*;
pub use field::*;
pub use prediction::*;
