pub mod error;
pub mod home;
pub mod listings;
pub mod preview;

pub use error::error_page;
pub use home::search_page;
pub use listings::{listings_fragment, ListingsVm};
pub use preview::{request_preview_page, PreviewVm};
