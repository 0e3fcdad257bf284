pub mod repository;
pub mod codeowners;
pub mod scan;

pub use repository::*;
pub use codeowners::*;
pub use scan::*;
