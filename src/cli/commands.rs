pub mod serve;
pub mod summary;

pub use serve::serve;
pub use summary::print_summary;
