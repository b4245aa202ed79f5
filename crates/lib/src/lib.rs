mod catalog;
mod error;
mod filter;
mod index;
mod model;
mod normalize;
mod project;
pub mod render;

pub use catalog::*;
pub use error::*;
pub use filter::*;
pub use index::*;
pub use model::*;
pub use normalize::*;
pub use project::*;
