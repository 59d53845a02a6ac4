pub mod auth;
pub mod response;

pub use auth::{authorize, require_admin, require_staff, AuthUser};
pub use response::{ApiResponse, ApiResult};
