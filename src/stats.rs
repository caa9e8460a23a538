use std::fmt;
use std::time::{Duration, Instant};

use log::info;

pub const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Rendering speed over one reporting interval.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Throughput {
    pub elapsed: Duration,
    pub pixels: u64,
    pub frame_pixels: u64,
}

impl Throughput {
    pub fn pixels_per_second(&self) -> f64 {
        self.pixels as f64 / self.elapsed.as_secs_f64()
    }

    pub fn frames_per_second(&self) -> f64 {
        self.pixels_per_second() / self.frame_pixels as f64
    }
}

impl fmt::Display for Throughput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pps = self.pixels_per_second();
        let fps = self.frames_per_second();
        if fps < 1.0 {
            write!(f, "{:.1} s/f {:.1} p/s", 1.0 / fps, pps)
        } else {
            write!(f, "{:.1} f/s {:.1} mp/s", fps, 0.000001 * pps)
        }
    }
}

/// Counts rendered pixels and produces a `Throughput` about once per interval.
pub struct Stats {
    interval: Duration,
    since: Instant,
    pixels: u64,
}

impl Stats {
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    pub fn starting_at(interval: Duration, since: Instant) -> Self {
        Self {
            interval,
            since,
            pixels: 0,
        }
    }

    pub fn record_frame(&mut self, width: usize, height: usize) {
        self.pixels += (width * height) as u64;
    }

    /// Closes the current interval if it is over. `frame_pixels` is the size
    /// of the latest frame, used to turn pixel rates into frame rates.
    pub fn poll(&mut self, now: Instant, frame_pixels: usize) -> Option<Throughput> {
        let elapsed = now.saturating_duration_since(self.since);
        if elapsed <= self.interval {
            return None;
        }
        if frame_pixels == 0 {
            // nothing on screen, start a fresh interval
            self.pixels = 0;
            self.since = now;
            return None;
        }
        let report = Throughput {
            elapsed,
            pixels: self.pixels,
            frame_pixels: frame_pixels as u64,
        };
        info!("{}", report);
        self.pixels = 0;
        self.since = now;
        Some(report)
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new(REPORT_INTERVAL)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_fast_format() {
        let t = Throughput {
            elapsed: Duration::from_secs(2),
            pixels: 640 * 480 * 120,
            frame_pixels: 640 * 480,
        };
        assert_eq!(t.to_string(), "60.0 f/s 18.4 mp/s");
    }

    #[test]
    fn test_slow_format() {
        let t = Throughput {
            elapsed: Duration::from_secs(4),
            pixels: 1000,
            frame_pixels: 2000,
        };
        assert_eq!(t.to_string(), "8.0 s/f 250.0 p/s");
    }

    #[test]
    fn test_poll_interval() {
        let start = Instant::now();
        let mut stats = Stats::starting_at(REPORT_INTERVAL, start);
        stats.record_frame(100, 100);
        assert_eq!(stats.poll(start + Duration::from_millis(500), 10000), None);
        stats.record_frame(100, 100);
        let report = stats.poll(start + Duration::from_millis(1250), 10000).unwrap();
        assert_eq!(report.pixels, 20000);
        assert_eq!(report.elapsed, Duration::from_millis(1250));
        assert!((report.frames_per_second() - 1.6).abs() < 1e-9);

        // counters restart after a report
        stats.record_frame(10, 10);
        let report = stats.poll(start + Duration::from_millis(2500), 100).unwrap();
        assert_eq!(report.pixels, 100);
    }

    #[test]
    fn test_empty_frame_restarts_interval() {
        let start = Instant::now();
        let mut stats = Stats::starting_at(REPORT_INTERVAL, start);
        stats.record_frame(100, 100);
        assert_eq!(stats.poll(start + Duration::from_secs(5), 0), None);

        stats.record_frame(20, 10);
        assert_eq!(stats.poll(start + Duration::from_millis(5500), 200), None);
        let report = stats.poll(start + Duration::from_millis(6500), 200).unwrap();
        assert_eq!(report.pixels, 200);
        assert_eq!(report.elapsed, Duration::from_millis(1500));
    }
}
