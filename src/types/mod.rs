pub mod query;
pub mod resource;

pub use query::*;
pub use resource::*;
