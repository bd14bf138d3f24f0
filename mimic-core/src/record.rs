//! Types and traits for recording progress of a collection run.
//!
//! [`Collector`](crate::collector::Collector) emits a [`Record`] for every progress
//! report and hands it to a [`Recorder`]. Environments return a [`Record`] from every
//! step as well, holding diagnostics such as the reward of the step.
//!
//! ```rust
//! use mimic_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("total_steps", RecordValue::Scalar(120.0));
//! record.insert("last_reward", RecordValue::Scalar(-42.5));
//! assert_eq!(record.get_scalar("total_steps").unwrap(), 120.0);
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
