use std::io::{self, Write};
use std::time::Instant;

use vlckit::prelude::Time;

pub struct ProgressTracker {
    start_time: Instant,
    last_update: Instant,
    verbose: bool,
}

fn clock(time: Time) -> String {
    let secs = time.as_millis().max(0) / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

impl ProgressTracker {
    pub fn new(verbose: bool) -> Self {
        let now = Instant::now();
        ProgressTracker {
            start_time: now,
            last_update: now,
            verbose,
        }
    }

    pub fn update(&mut self, time: Option<Time>, length: Option<Time>) {
        if !self.verbose {
            return;
        }
        let now = Instant::now();

        // At most ten updates a second
        if now.duration_since(self.last_update).as_millis() < 100 {
            return;
        }
        self.last_update = now;

        let time = time.unwrap_or(Time::ZERO);
        match length {
            Some(length) if length > Time::ZERO => {
                let progress = time.as_millis() as f64 / length.as_millis() as f64;
                eprint!(
                    "\rTime {} of {} ({}%)",
                    clock(time),
                    clock(length),
                    (progress * 100.0) as u32
                );
            }
            _ => eprint!("\rTime {}", clock(time)),
        }

        let _ = io::stderr().flush();
    }

    pub fn finish(&mut self, outcome: &str) {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        eprintln!("\r{} after {:.2}s", outcome, elapsed);
    }
}
