//! SQL text: fixed table queries and the SELECT admission guard.

mod builder;
mod guard;
pub use builder::*;
pub use guard::*;
