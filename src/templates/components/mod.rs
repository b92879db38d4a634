pub mod card;
pub mod error;
pub mod filters;

pub use card::{property_card, skeleton_card};
pub use error::{error_banner, RetryLink};
pub use filters::{filter_form, name_form, pagination, sort_form};
