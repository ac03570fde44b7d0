use tracing::warn;

use spyglass_domain::BucketSet;

use crate::{Error, Result, SpyglassService};

impl SpyglassService {
	/// Resolves the set of known buckets for a request that did not name one.
	///
	/// The default bucket comes from config, not from the catalog call. A
	/// failed enumeration degrades to an empty available set when the config
	/// allows it; the second element reports whether that happened.
	pub(crate) async fn resolve_buckets(&self) -> Result<(BucketSet, bool)> {
		let default_bucket = self.cfg.catalog.default_bucket.clone();

		match self.providers.catalog.fetch_bucket_list(&self.cfg.catalog).await {
			Ok(available) => Ok((BucketSet { available, default_bucket }, false)),
			Err(err) if self.cfg.catalog.degraded_ok => {
				warn!(
					error = %err,
					"Bucket enumeration failed; continuing with an empty bucket set."
				);

				Ok((BucketSet { available: Vec::new(), default_bucket }, true))
			},
			Err(err) => Err(Error::MetadataUnavailable { message: err.to_string() }),
		}
	}
}
