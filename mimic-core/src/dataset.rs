//! Expert dataset.
//!
//! A [`Dataset`] is an ordered sequence of [`Sample`]s. It is persisted as a JSON array
//! of objects with the keys `acts`, `obs` and `predictedX`, written in sorted key order
//! and indented with four spaces so that files stay diffable:
//!
//! ```json
//! [
//!     {
//!         "acts": [
//!             0.1,
//! ...
//! ```
use crate::error::{DatasetLoadError, NonFiniteSampleError};
use anyhow::Result;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

const INDENT: &[u8] = b"    ";

/// A labeled training example, produced once per simulation step.
///
/// Fields are declared in the order of their serialized keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sample {
    /// Action of the expert controller.
    pub acts: Vec<f64>,

    /// Augmented observation.
    pub obs: Vec<f64>,

    /// State trajectory predicted by the expert controller, one row per time step.
    #[serde(rename = "predictedX")]
    pub predicted_x: Vec<Vec<f64>>,
}

impl Sample {
    /// Constructs a sample, converting the predicted trajectory into nested rows.
    pub fn new(obs: Vec<f64>, acts: Vec<f64>, predicted_x: &Array2<f64>) -> Self {
        Self {
            acts,
            obs,
            predicted_x: predicted_x.outer_iter().map(|row| row.to_vec()).collect(),
        }
    }

    /// Returns the key of the first field holding a NaN or an infinite value.
    pub fn non_finite_field(&self) -> Option<&'static str> {
        let finite = |v: &f64| v.is_finite();
        if !self.acts.iter().all(finite) {
            Some("acts")
        } else if !self.obs.iter().all(finite) {
            Some("obs")
        } else if !self.predicted_x.iter().flatten().all(finite) {
            Some("predictedX")
        } else {
            None
        }
    }
}

/// Append-only sequence of [`Sample`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if there is no sample.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Appends a sample.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Appends all samples of `other`, keeping their order.
    pub fn extend(&mut self, other: Dataset) {
        self.samples.extend(other.samples);
    }

    /// Returns an iterator over the samples in collection order.
    pub fn iter(&self) -> std::slice::Iter<Sample> {
        self.samples.iter()
    }

    /// Returns the samples.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Loads a dataset written by [`Dataset::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetLoadError> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        Ok(serde_json::from_reader(rdr)?)
    }

    /// Checks that every value of every sample is finite.
    pub fn check_finite(&self) -> Result<(), NonFiniteSampleError> {
        self.samples
            .iter()
            .enumerate()
            .find_map(|(index, s)| {
                s.non_finite_field()
                    .map(|field| NonFiniteSampleError { index, field })
            })
            .map_or(Ok(()), Err)
    }

    /// Writes the dataset, overwriting the file at `path`.
    ///
    /// Fails without touching the file if a sample holds a non-finite value.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.check_finite()?;
        let file = File::create(path)?;
        let mut wtr = BufWriter::new(file);
        self.write_json(&mut wtr)?;
        wtr.flush()?;
        Ok(())
    }

    /// Returns the persisted representation.
    pub fn to_json_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_json(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    fn write_json<W: Write>(&self, wtr: W) -> Result<()> {
        self.check_finite()?;
        let mut ser = Serializer::with_formatter(wtr, PrettyFormatter::with_indent(INDENT));
        self.serialize(&mut ser)?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl std::iter::FromIterator<Sample> for Dataset {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}
