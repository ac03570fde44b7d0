pub mod normalize;
pub mod pattern;
pub mod scope;

pub use normalize::{NormalizedResult, RawHit, ResultKind, is_package_index, normalize_hits};
pub use pattern::{BucketSet, build_pattern, normalize_bucket, prioritize};
pub use scope::Scope;

/// Suffix that distinguishes package-manifest indices from object indices.
pub const PACKAGE_INDEX_SUFFIX: &str = "_packages";
