mod error;
mod http_mapping;
mod traits;

pub use error::{ItemError, Result};
pub use http_mapping::item_error_to_status_code;
pub use traits::{ItemRepository, ScopedClientFactory};
