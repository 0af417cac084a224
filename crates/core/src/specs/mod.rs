pub mod model;
pub mod selection;

pub use model::*;
pub use selection::*;
