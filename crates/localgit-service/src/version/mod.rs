//! Version numbering and the version log.

pub mod sequencer;
pub mod service;

pub use sequencer::VersionSequencer;
pub use service::VersionService;
