//! A collection of various utility helpers.

mod environment;
pub use self::environment::*;

mod error;
pub use self::error::*;

mod parallel;
pub use self::parallel::parallel_collect;

mod random;
pub use self::random::*;

/// Alias to a scalar floating type.
pub type Float = f64;
