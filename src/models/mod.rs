// Domain models

mod metrics;
mod sample;

pub use metrics::{DerivedMetrics, OutputFormat};
pub use sample::{Clock, Sample, SampleTime};
