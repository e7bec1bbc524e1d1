pub mod account;
pub mod prediction;

pub use account::*;
pub use prediction::*;
