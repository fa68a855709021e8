mod agent;
mod record;
mod user;

pub use agent::Agent;
pub use record::{FileRecord, Payload, RecordStatus};
pub use user::{User, UserOrigin, UserRole};
