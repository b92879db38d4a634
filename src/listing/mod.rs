pub mod codec;
pub mod controller;
pub mod error;
pub mod filters;
pub mod normalize;
pub mod request;
pub mod transport;

pub use codec::QueryMap;
pub use controller::{ListingController, LoadState};
pub use error::ListingError;
pub use filters::{Category, FilterState, SortKey};
pub use normalize::PropertyRecord;
pub use transport::{HttpTransport, Transport};
