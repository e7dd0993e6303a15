//! Core processing building blocks: background sampling, flood-fill
//! segmentation, alpha compositing, content cropping, resampling and canvas
//! fitting, plus the per-cell pipeline that chains them. These are the
//! primitives consumed by the high-level `api` module.
pub mod params;
pub mod processing;
