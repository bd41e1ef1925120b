//! The boot log shown before the console comes up.

use std::time::{Duration, Instant};

/// Boot-log lines revealed one per interval.
///
/// Independent of the dialogue state: it only decides how many of the
/// content's boot lines are visible at a given moment.
#[derive(Debug)]
pub struct BootLog {
    lines: Vec<String>,
    started: Instant,
    interval: Duration,
    shown: usize,
}

impl BootLog {
    pub fn new(lines: Vec<String>, interval: Duration, now: Instant) -> Self {
        Self {
            lines,
            started: now,
            interval,
            shown: 0,
        }
    }

    /// Advances to `now`. Returns whether a new line became visible.
    pub fn tick(&mut self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.started);
        let due = if self.interval.is_zero() {
            self.lines.len()
        } else {
            usize::try_from(elapsed.as_millis() / self.interval.as_millis())
                .unwrap_or(usize::MAX)
                .min(self.lines.len())
        };

        let advanced = due > self.shown;
        self.shown = self.shown.max(due);
        advanced
    }

    /// Shows every line immediately.
    pub fn skip(&mut self) {
        self.shown = self.lines.len();
    }

    pub fn visible(&self) -> &[String] {
        &self.lines[..self.shown]
    }

    pub fn is_done(&self) -> bool {
        self.shown == self.lines.len()
    }

    /// When the last line is (or was) due.
    pub fn finishes_at(&self) -> Instant {
        let count = u32::try_from(self.lines.len()).unwrap_or(u32::MAX);
        self.started + self.interval * count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boot(n: usize) -> (Instant, BootLog) {
        let t0 = Instant::now();
        let lines = (1..=n).map(|i| format!("[OK] step {i}")).collect();
        (t0, BootLog::new(lines, Duration::from_millis(150), t0))
    }

    #[test]
    fn reveals_one_line_per_interval() {
        let (t0, mut log) = boot(3);

        assert!(!log.tick(t0));
        assert!(log.visible().is_empty());

        assert!(log.tick(t0 + Duration::from_millis(150)));
        assert_eq!(log.visible(), ["[OK] step 1"]);

        assert!(!log.tick(t0 + Duration::from_millis(299)));
        assert!(log.tick(t0 + Duration::from_millis(450)));
        assert_eq!(log.visible().len(), 3);
        assert!(log.is_done());
    }

    #[test]
    fn never_overruns() {
        let (t0, mut log) = boot(2);
        log.tick(t0 + Duration::from_secs(60));

        assert_eq!(log.visible().len(), 2);
        assert_eq!(log.finishes_at(), t0 + Duration::from_millis(300));
    }

    #[test]
    fn skip_shows_everything() {
        let (_t0, mut log) = boot(4);
        log.skip();

        assert!(log.is_done());
        assert_eq!(log.visible().len(), 4);
    }
}
