mod status;
mod summary;

pub use status::write_status;
pub use summary::{title_case, write_summary};
