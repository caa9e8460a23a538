use std::fs;
use std::io::{stdout, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::warn;

#[derive(Clone)]
pub struct Benchmark {
    f: Rc<dyn Fn()>,
    name: String,
    iterations: usize,
    pixels: u64,
}

pub enum Unit {
    Nanosecond,
    Microsecond,
    Millisecond,
    Second,
}

impl Unit {
    pub fn format(&self, d: &Duration, width: usize) -> String {
        let (symbol, value) = match self {
            Self::Nanosecond => ("ns", d.as_nanos()),
            Self::Microsecond => ("µs", d.as_micros()),
            Self::Millisecond => ("ms", d.as_millis()),
            Self::Second => ("s", d.as_secs() as u128),
        };
        format!("{:>width$}{:<2}", value, symbol)
    }

    pub fn scaled(d: &Duration, treshold: u128) -> Self {
        if d.as_nanos() < treshold {
            Self::Nanosecond
        } else if d.as_micros() < treshold {
            Self::Microsecond
        } else if d.as_millis() < treshold {
            Self::Millisecond
        } else {
            Self::Second
        }
    }
}

impl Benchmark {
    /// `pixels` is the number of pixels (or samples) one call of `f` produces.
    pub fn iter<F: Fn() + 'static>(name: &str, n: usize, pixels: u64, f: F) -> Self {
        Self {
            f: Rc::new(f),
            name: name.to_string(),
            iterations: n,
            pixels,
        }
    }

    fn run(&self) -> Duration {
        let start = Instant::now();
        for _ in 0..self.iterations {
            (self.f)();
        }
        Instant::now() - start
    }
}

pub struct BenchResult {
    pub name: String,
    pub iterations: usize,
    pub pixels: u64,
    pub total: Duration,
}

impl BenchResult {
    pub fn per_call(&self) -> Duration {
        self.total.div_f64(self.iterations.max(1) as f64)
    }

    pub fn mega_pixels_per_second(&self) -> f64 {
        let secs = self.total.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        0.000001 * (self.pixels * self.iterations as u64) as f64 / secs
    }
}

pub struct BenchmarkReport {
    benches: Vec<Benchmark>,
    results: Vec<BenchResult>,
}

impl BenchmarkReport {
    pub fn new() -> Self {
        Self {
            benches: vec![],
            results: vec![],
        }
    }

    pub fn add_bench(&mut self, bench: Benchmark) {
        self.benches.push(bench);
    }

    pub fn with_benches(benches: &[Benchmark]) -> Self {
        let mut this = Self::new();
        for bench in benches {
            this.add_bench(bench.clone());
        }
        this
    }

    pub fn results(&self) -> &[BenchResult] {
        &self.results
    }

    pub fn run(&mut self) {
        for bench in &self.benches {
            let total = bench.run();
            self.results.push(BenchResult {
                name: bench.name.to_string(),
                iterations: bench.iterations,
                pixels: bench.pixels,
                total,
            });
            print!(".");
            stdout().flush().unwrap();
        }
        println!();
        stdout().flush().unwrap();
    }

    pub fn show(&self) {
        println!(
            "  {: <30} {: >8}   {: >8}   {: >8}",
            "benchmark", "total", "per_call", "mp/s"
        );
        for r in &self.results {
            let per_call = r.per_call();
            println!(
                "  {: <30} {}   {}   {:>8.1}",
                r.name,
                Unit::scaled(&r.total, 100000).format(&r.total, 6),
                Unit::scaled(&per_call, 100000).format(&per_call, 6),
                r.mega_pixels_per_second(),
            )
        }
        stdout().flush().unwrap();
    }

    pub fn to_csv(&self) -> String {
        let mut lines: Vec<String> =
            vec!["benchmark,total_us,iterations,per_call_us,mpps".to_string()];
        for r in &self.results {
            lines.push(format!(
                "{},{},{},{},{:.3}",
                r.name,
                r.total.as_micros(),
                r.iterations,
                r.per_call().as_micros(),
                r.mega_pixels_per_second(),
            ));
        }
        lines.push("".to_string());
        lines.join("\n")
    }

    pub fn report(&mut self, name: &str) {
        print!("Benchmark: {}", name);
        self.run();
        self.show();
        let filename = format!("benchmark_{}.csv", name);
        if let Err(e) = fs::write(&filename, self.to_csv()) {
            warn!("could not write {}: {}", filename, e);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_runs_every_iteration() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let bench = Benchmark::iter("count", 5, 10, move || counter.set(counter.get() + 1));
        let mut report = BenchmarkReport::with_benches(&[bench]);
        report.run();
        assert_eq!(calls.get(), 5);
        assert_eq!(report.results().len(), 1);
        assert_eq!(report.results()[0].iterations, 5);
        assert!(report.to_csv().starts_with("benchmark,total_us"));
    }

    #[test]
    fn test_unit_scaling() {
        let d = Duration::from_micros(1500);
        assert!(matches!(Unit::scaled(&d, 1000), Unit::Millisecond));
        assert_eq!(Unit::Microsecond.format(&d, 6), "  1500µs");
    }
}
