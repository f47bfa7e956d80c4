//! API endpoint modules.

mod bans;
mod groups;
mod members;
mod servers;
mod updates;

pub use bans::BansApi;
pub use groups::GroupsApi;
pub use members::MembersApi;
pub use servers::ServersApi;
pub use updates::{DeleteReport, UpdatesApi};
