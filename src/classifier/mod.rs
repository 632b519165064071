/// Classifier: one-hot column encoding and a seeded CART decision tree.
///
/// ```text
///   FeatureTable ──► encoder (one-hot + passthrough) ──► tree ──► Tier
/// ```

pub mod encoder;
pub mod pipeline;
pub mod rng;
pub mod tree;
