//! Progress observer seam.

/// Receives the loading progress percent on every loading-state transition.
pub trait ProgressObserver {
    fn on_progress_update(&mut self, percent: f64);
}

impl<F: FnMut(f64)> ProgressObserver for F {
    fn on_progress_update(&mut self, percent: f64) {
        self(percent)
    }
}

/// Observer that records every update it receives.
#[derive(Debug, Clone, Default)]
pub struct ProgressLog {
    updates: Vec<f64>,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> &[f64] {
        &self.updates
    }

    /// Drain recorded updates.
    pub fn take(&mut self) -> Vec<f64> {
        std::mem::take(&mut self.updates)
    }
}

impl ProgressObserver for ProgressLog {
    fn on_progress_update(&mut self, percent: f64) {
        self.updates.push(percent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_observers() {
        let mut seen = Vec::new();
        {
            let mut observer = |p: f64| seen.push(p);
            observer.on_progress_update(40.0);
            observer.on_progress_update(99.0);
        }
        assert_eq!(seen, vec![40.0, 99.0]);
    }

    #[test]
    fn progress_log_records_and_drains() {
        let mut log = ProgressLog::new();
        log.on_progress_update(0.0);
        log.on_progress_update(100.0);
        assert_eq!(log.updates(), &[0.0, 100.0]);
        assert_eq!(log.take(), vec![0.0, 100.0]);
        assert!(log.updates().is_empty());
    }
}
