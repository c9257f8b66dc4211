use cpu_time::ProcessTime;
use std::time::{Duration, Instant};

/// One wall-clock sample of a single execution, plus the result it produced.
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub value: T,
    pub wall: Duration,
    pub cpu: Duration,
}

impl<T> Timed<T> {
    /// Elapsed wall milliseconds, truncated.
    pub fn wall_ms(&self) -> u64 {
        self.wall.as_millis() as u64
    }

    pub fn cpu_ms(&self) -> u64 {
        self.cpu.as_millis() as u64
    }
}

/// Execute `work` exactly once, stamping wall and process-CPU clocks
/// immediately before and after. Errors in the work propagate as panics
/// would; nothing is retried.
pub fn time<T>(work: impl FnOnce() -> T) -> Timed<T> {
    let cpu_start = ProcessTime::now();
    let wall_start = Instant::now();
    let value = work();
    Timed {
        value,
        wall: wall_start.elapsed(),
        cpu: cpu_start.elapsed(),
    }
}

/// Summary over sorted per-trial wall times in microseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub trials: usize,
    pub min_us: u64,
    pub avg_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub max_us: u64,
}

impl Stats {
    pub fn from_samples(mut samples_us: Vec<u64>) -> Stats {
        samples_us.sort_unstable();
        let n = samples_us.len();
        let sum: u64 = samples_us.iter().sum();
        Stats {
            trials: n,
            min_us: samples_us[0],
            avg_us: sum / n as u64,
            p50_us: samples_us[(n * 50 / 100).min(n - 1)],
            p95_us: samples_us[(n * 95 / 100).min(n - 1)],
            max_us: samples_us[n - 1],
        }
    }
}

/// A measured counting run: the count, the first timed trial's clocks, and
/// every trial's wall time for optional statistics.
#[derive(Debug, Clone)]
pub struct Measurement {
    pub count: u64,
    pub wall: Duration,
    pub cpu: Duration,
    pub samples_us: Vec<u64>,
}

impl Measurement {
    pub fn wall_ms(&self) -> u64 {
        self.wall.as_millis() as u64
    }

    pub fn cpu_ms(&self) -> u64 {
        self.cpu.as_millis() as u64
    }

    /// Trial statistics; None for the single-sample default, where a
    /// summary over one point would only restate the sample.
    pub fn stats(&self) -> Option<Stats> {
        if self.samples_us.len() > 1 {
            Some(Stats::from_samples(self.samples_us.clone()))
        } else {
            None
        }
    }
}

/// Run `warmup` discarded executions, then `trials` timed ones (at least
/// one). The reported wall/cpu clocks are the first timed trial's, keeping
/// the single-sample default identical to a bare `time()` call.
pub fn measure(trials: usize, warmup: usize, mut work: impl FnMut() -> u64) -> Measurement {
    for _ in 0..warmup {
        let _ = work();
    }
    let mut samples_us = Vec::with_capacity(trials.max(1));
    let mut first: Option<(u64, Duration, Duration)> = None;
    for _ in 0..trials.max(1) {
        let t = time(&mut work);
        samples_us.push(t.wall.as_micros() as u64);
        if first.is_none() {
            first = Some((t.value, t.wall, t.cpu));
        }
    }
    let (count, wall, cpu) = first.unwrap_or((0, Duration::ZERO, Duration::ZERO));
    Measurement {
        count,
        wall,
        cpu,
        samples_us,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_returns_the_work_result() {
        let t = time(|| 42u64);
        assert_eq!(t.value, 42);
    }

    #[test]
    fn wall_millis_truncate() {
        let t = Timed {
            value: 0u64,
            wall: Duration::from_micros(1900),
            cpu: Duration::from_micros(900),
        };
        assert_eq!(t.wall_ms(), 1);
        assert_eq!(t.cpu_ms(), 0);
    }

    #[test]
    fn time_covers_the_whole_execution() {
        let t = time(|| std::thread::sleep(Duration::from_millis(5)));
        assert!(t.wall >= Duration::from_millis(5));
    }

    #[test]
    fn stats_ordering_holds() {
        let s = Stats::from_samples(vec![5, 1, 3]);
        assert_eq!(s.trials, 3);
        assert_eq!(s.min_us, 1);
        assert_eq!(s.max_us, 5);
        assert_eq!(s.avg_us, 3);
        assert!(s.min_us <= s.p50_us);
        assert!(s.p50_us <= s.p95_us);
        assert!(s.p95_us <= s.max_us);
    }

    #[test]
    fn stats_single_sample() {
        let s = Stats::from_samples(vec![17]);
        assert_eq!(s.min_us, 17);
        assert_eq!(s.p50_us, 17);
        assert_eq!(s.p95_us, 17);
        assert_eq!(s.max_us, 17);
    }

    #[test]
    fn measure_runs_every_trial_and_keeps_the_count() {
        let mut calls = 0u64;
        let m = measure(5, 2, || {
            calls += 1;
            11
        });
        assert_eq!(calls, 7); // 2 warmup + 5 timed
        assert_eq!(m.count, 11);
        assert_eq!(m.samples_us.len(), 5);
        assert!(m.stats().is_some());
    }

    #[test]
    fn measure_single_trial_has_no_stats() {
        let m = measure(1, 0, || 3);
        assert_eq!(m.count, 3);
        assert_eq!(m.samples_us.len(), 1);
        assert!(m.stats().is_none());
    }
}
