// handlers/protected/staff/mod.rs - Routes for the `staff` role

pub mod channel;
pub mod leave;
pub mod profile;
pub mod submissions;

pub use channel::{announcements as announcements_get, suggest as suggestions_post};
pub use leave::{post as leave_post, responses as leave_responses_get};
pub use profile::{delete as profile_delete, get as profile_get, put as profile_put};
pub use submissions::{submit_material as tlm_post, submit_topic_log as talm_post};
