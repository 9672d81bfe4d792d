//! Background tasks reporting to the dashboard state owner.

pub mod core;
pub mod poller;
pub mod submitter;

pub use self::core::{Effect, SubmissionTimings, WorkerContext, WorkerMessage};
pub use poller::{PollSchedule, PollTask, start_pollers};
