//! Core functionalities.
mod augment;
mod controller;
mod env;
mod step;
pub use augment::{Augmenter, IdentityAugmenter};
pub use controller::{Configurable, Controller};
pub use env::Env;
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment.
///
/// Environments are not vectorized in this library, so one object holds exactly
/// one observation.
pub trait Obs: Clone + Debug {
    /// Returns the observation as a flat vector.
    fn to_vec(&self) -> Vec<f64>;
}

/// An action of an environment.
pub trait Act: Clone + Debug {
    /// Returns the action as a flat vector.
    ///
    /// This is the representation stored in the `acts` field of a
    /// [`Sample`](crate::dataset::Sample).
    fn to_vec(&self) -> Vec<f64>;
}
