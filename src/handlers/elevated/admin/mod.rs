// handlers/elevated/admin/mod.rs - Routes for the `admin` role

pub mod channel;
pub mod leave;
pub mod staff;
pub mod stats;
pub mod submissions;

pub use channel::{
    announcements as announcement_get, broadcast as announcement_post, suggestions as suggestions_get,
};
pub use leave::{
    approve_by_email as leave_approve_put, decide as leave_decide_put, list as leave_list_get,
    reject_by_email as leave_reject_put,
};
pub use staff::{add as staff_add_post, delete as staff_delete, list as staff_list_get, show as staff_show_get};
pub use stats::get as stats_get;
pub use submissions::{materials as tlm_list_get, topic_logs as talm_list_get};
