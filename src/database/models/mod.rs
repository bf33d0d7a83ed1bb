pub mod activity_log;
pub mod message;
pub mod plugin;
pub mod project;
pub mod site;
pub mod team;
pub mod user;

pub use activity_log::NewActivityLog;
pub use message::NewMessage;
pub use plugin::Plugin;
pub use project::Project;
pub use site::Site;
pub use team::{Team, TeamMember};
pub use user::User;
