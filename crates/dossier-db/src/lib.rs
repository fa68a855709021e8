//! Flat-file persistence for the dossier service.
//!
//! Collections are JSON arrays on disk, one file per entity. Repositories
//! keep the working copy in memory and write through after every mutation;
//! a failed write is logged and the in-memory state stays authoritative
//! for the session.

mod db;
mod store;

pub use db::agent::AgentRepository;
pub use db::record::RecordRepository;
pub use db::user::UserRepository;
pub use store::JsonStore;
