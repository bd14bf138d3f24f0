//! Errors in the library.
use thiserror::Error;

/// Errors in accessing values of a [`Record`](crate::record::Record).
#[derive(Error, Debug)]
pub enum RecordError {
    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}

/// Errors raised by [`RandomizationSampler`](crate::randomization::RandomizationSampler).
///
/// None of these are recovered by the library. They indicate either a caller asking for
/// a parameter that does not exist or a defect in the randomization configuration.
#[derive(Error, Debug, PartialEq)]
pub enum RandomizationError {
    /// The parameter is not registered.
    #[error("Unknown randomization parameter: {0}")]
    UnknownParameter(String),

    /// The distribution tag of a configuration entry is neither `uniform` nor `normal`.
    #[error("Unknown randomization type for {name}: {kind}")]
    UnsupportedDistribution {
        /// Parameter name.
        name: String,
        /// The tag found in the configuration.
        kind: String,
    },

    /// The parameter exists, but its distribution cannot serve the requested draw.
    #[error("Parameter {name} cannot be sampled as {expected}")]
    IncompatibleDistribution {
        /// Parameter name.
        name: String,
        /// What the caller asked for.
        expected: String,
    },

    /// Bounds or moments of a distribution are invalid.
    #[error("Invalid randomization parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Description of the problem.
        reason: String,
    },
}

/// Failure to load a previously persisted [`Dataset`](crate::dataset::Dataset).
///
/// This is the only error class recovered by
/// [`Collector::run`](crate::collector::Collector::run).
#[derive(Error, Debug)]
pub enum DatasetLoadError {
    /// The file could not be opened or read.
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// The file content is not a valid dataset.
    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A [`Sample`](crate::dataset::Sample) holds a NaN or an infinite value.
///
/// JSON has no representation of such values, so the sample cannot be persisted.
#[derive(Error, Debug, PartialEq)]
#[error("Non-finite value in {field} of sample {index}")]
pub struct NonFiniteSampleError {
    /// Position of the sample in the dataset.
    pub index: usize,

    /// Serialized key of the offending field.
    pub field: &'static str,
}
