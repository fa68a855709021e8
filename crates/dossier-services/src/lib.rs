//! Collaborator services around the dossier core: the payload codec used at
//! upload/download time, the batch action dispatcher, and archive building
//! for bulk downloads.

pub mod archive;
pub mod batch;
pub mod payload;

pub use batch::{BatchDispatcher, BatchOutcome, ConfirmationPrompt};
