pub mod branch;
pub mod fetch;
pub mod filter;

pub use branch::{read_head_marker, BranchResolver, BranchSource};
pub use fetch::{codeowners_url, read_local_codeowners, CODEOWNERS_SUBPATH};
pub use filter::filter_content;
