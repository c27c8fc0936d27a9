//! Classification core: band stacks, type normalization, spectral indices,
//! the fixed decision tree and the classifier facade, plus the no-data mask
//! and parameters consumed by the high-level `api` module.
pub mod classifier;
pub mod indices;
pub mod nodata;
pub mod normalize;
pub mod params;
pub mod stack;
pub mod tree;
