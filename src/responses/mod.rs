pub mod errors;
pub mod html;
pub mod json;
pub mod redirect;

pub use errors::{error_to_response, ResultResp};
pub use html::{html_fragment_response, html_response};
pub use json::json_response;
pub use redirect::see_other;
