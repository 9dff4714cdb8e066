pub mod event;
pub mod identity;
pub mod items;

pub use event::{ApiGatewayRequest, ApiGatewayResponse, EventError};
pub use identity::Identity;
pub use items::{create_item, delete_item, get_item, route, update_item, HandlerError};
