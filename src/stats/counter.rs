use std::time::Duration;

use crate::job::JobResult;

/// Number of recorded results and their summed latency.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Counter {
    /// Number of recorded results.
    pub count:    u64,
    /// Summed latency of the recorded results.
    pub duration: Duration,
}

impl Counter {
    /// Average latency in seconds, `0.0` when nothing was recorded.
    pub fn mean_secs(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.duration.as_secs_f64() / self.count as f64
    }
}

impl std::ops::AddAssign<&JobResult> for Counter {
    fn add_assign(&mut self, res: &JobResult) {
        self.count += 1;
        // saturates instead of panicking on absurd latencies
        self.duration = self.duration.saturating_add(res.elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summed_latency_saturates() {
        let mut counter = Counter::default();
        counter += &JobResult::new(200u16, Duration::from_millis(10));
        counter += &JobResult::new(200u16, Duration::MAX);
        assert_eq!(counter.count, 2);
        assert_eq!(counter.duration, Duration::MAX);
    }
}
