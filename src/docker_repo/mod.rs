// Docker container samples via bollard

mod stats;

use crate::error::SourceError;
use crate::models::{Clock, Sample};
use crate::source::SampleSource;
use bollard::Docker;
use bollard::errors::Error as DockerError;
use bollard::query_parameters::StatsOptions;
use futures_util::StreamExt;
use std::time::Duration;

pub struct DockerRepo {
    docker: Docker,
    clock: Clock,
    timeout: Duration,
}

impl DockerRepo {
    /// Connect using DOCKER_HOST when set, otherwise the platform's default socket.
    /// The client is lazy: an unreachable daemon surfaces on the first `fetch`.
    pub fn connect(clock: Clock, timeout: Duration) -> anyhow::Result<Self> {
        let docker = Docker::connect_with_defaults()?;
        Ok(Self {
            docker,
            clock,
            timeout,
        })
    }

    async fn fetch_once(&self, container: &str) -> Result<Sample, SourceError> {
        let options = StatsOptions {
            stream: false,
            ..Default::default()
        };
        let mut stream = self.docker.stats(container, Some(options));

        let response = match stream.next().await {
            Some(Ok(r)) => r,
            Some(Err(e)) => return Err(map_docker_error(container, e)),
            None => {
                return Err(SourceError::Unavailable(format!(
                    "empty stats stream for container {}",
                    container
                )));
            }
        };
        let timestamp = self.clock.now();

        stats::sample_from_response(&response, timestamp).ok_or_else(|| {
            SourceError::Unavailable(format!(
                "stats for container {} carry no cpu usage",
                container
            ))
        })
    }
}

impl SampleSource for DockerRepo {
    async fn fetch(&self, container: &str) -> Result<Sample, SourceError> {
        match tokio::time::timeout(self.timeout, self.fetch_once(container)).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Unavailable(format!(
                "stats request for container {} timed out after {:?}",
                container, self.timeout
            ))),
        }
    }
}

fn map_docker_error(container: &str, e: DockerError) -> SourceError {
    match e {
        DockerError::DockerResponseServerError {
            status_code: 404, ..
        } => SourceError::NotFound(container.to_string()),
        other => SourceError::Unavailable(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_docker_error_404_is_not_found() {
        let e = DockerError::DockerResponseServerError {
            status_code: 404,
            message: "No such container: web".into(),
        };
        assert!(matches!(
            map_docker_error("web", e),
            SourceError::NotFound(name) if name == "web"
        ));
    }

    #[test]
    fn map_docker_error_server_error_is_unavailable() {
        let e = DockerError::DockerResponseServerError {
            status_code: 500,
            message: "boom".into(),
        };
        assert!(matches!(
            map_docker_error("web", e),
            SourceError::Unavailable(_)
        ));
    }
}
