// Convert a raw Docker stats API response into a Sample.

use crate::models::{Sample, SampleTime};
use bollard::models::ContainerStatsResponse;

/// Extract cumulative CPU ns and memory usage. `None` when the response carries no CPU
/// counter. Missing memory stats read as 0.
pub(crate) fn sample_from_response(
    s: &ContainerStatsResponse,
    timestamp: SampleTime,
) -> Option<Sample> {
    let cpu_total_ns = s
        .cpu_stats
        .as_ref()?
        .cpu_usage
        .as_ref()?
        .total_usage?;

    let memory_bytes = s.memory_stats.as_ref().and_then(|m| m.usage).unwrap_or(0);

    Some(Sample {
        timestamp,
        cpu_total_ns,
        memory_bytes,
    })
}
