//! Stage and customer generation

mod orders;
mod stage;

pub use orders::*;
pub use stage::*;
