pub mod context;
pub mod rule;
pub mod validation;

pub use context::*;
pub use rule::*;
pub use validation::*;
