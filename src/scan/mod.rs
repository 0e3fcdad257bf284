pub mod local;
pub mod scanner;

pub use local::scan_local;
pub use scanner::OrgScanner;
