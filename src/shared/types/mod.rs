pub mod errors;
pub mod pagination;
pub mod status;

pub use errors::*;
pub use pagination::*;
pub use status::*;
