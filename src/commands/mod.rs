pub mod stats;
pub mod update;

pub use stats::*;
pub use update::*;
