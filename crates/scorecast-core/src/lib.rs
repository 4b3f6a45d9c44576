// Library root: the at-bat data model and the upstream analysis document
// shared by the analytics engine and the front end.

pub mod document;
pub mod event;

pub use document::{AnalysisDocument, DocumentError, GameMetadata, OwnerStatBlocks, StatLine};
pub use event::{AtBatEvent, AtBatResult, Owner, Runners};
