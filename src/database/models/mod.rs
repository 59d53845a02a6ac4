pub mod account;
pub mod channel;
pub mod leave;
pub mod submission;

pub use account::{Account, AccountProfile, DeletedAccount, NewAccount, ProfileUpdate};
pub use channel::{Announcement, AnnouncementFeed, Suggestion, RECENT_WINDOW_DAYS};
pub use leave::{Decision, LeaveApplication, LeaveStatus, LeaveWithOwner, NewLeave};
pub use submission::{MaterialWithOwner, NewTopicLog, TeachingMaterial, TopicLog, TopicLogWithOwner};
