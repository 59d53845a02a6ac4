// handlers/public/auth/mod.rs - Account creation and token acquisition
//
// No authentication required. Mounted under /api.

pub mod session; // POST /api/{staff,admin}/login
pub mod signup; // POST /api/{staff,admin}/signup

pub use session::{admin_login, staff_login};
pub use signup::{admin_signup, staff_signup};
