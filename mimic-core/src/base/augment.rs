//! Feature augmentation of observations.
use super::Obs;

/// Transforms an observation into the feature vector stored in the dataset.
///
/// The transform must be pure: the same observation always gives the same features.
pub trait Augmenter<O: Obs> {
    /// Returns the augmented observation.
    fn augment(&self, obs: &O) -> Vec<f64>;
}

/// Stores observations as they are.
#[derive(Clone, Debug, Default)]
pub struct IdentityAugmenter;

impl<O: Obs> Augmenter<O> for IdentityAugmenter {
    fn augment(&self, obs: &O) -> Vec<f64> {
        obs.to_vec()
    }
}
