//! Dataset collaborators consumed by the objectives.
//!
//! Only the metadata side of a dataset (labels and sample weights) is needed
//! to compute gradients; feature storage and binning live elsewhere.

pub mod metadata;

pub use metadata::Metadata;
