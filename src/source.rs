// Where samples come from. The poller is generic over this so tests can script samples.

use crate::error::SourceError;
use crate::models::Sample;
use std::future::Future;

pub trait SampleSource {
    /// Fetch the current counters of `container` (name or id), stamped at arrival.
    fn fetch(&self, container: &str) -> impl Future<Output = Result<Sample, SourceError>> + Send;
}
