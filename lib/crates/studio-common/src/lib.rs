pub mod agent;
pub mod manifest;
pub mod run;
pub mod sse;

pub use agent::{AgentEntry, DEFAULT_CONFIG, EntryStatus};
pub use manifest::RootManifest;
pub use run::{DEFAULT_STREAM_MODE, RunRequest};
pub use sse::{DEFAULT_EVENT_NAME, SseEvent};
