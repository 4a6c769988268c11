/// Logs render progress in fixed percentage steps.
#[derive(Debug)]
pub struct ProgressLog {
    step_percent: u32,
    last_step: u32,
}

impl ProgressLog {
    pub fn new(step_percent: u32) -> Self {
        Self {
            step_percent: step_percent.clamp(1, 100),
            last_step: 0,
        }
    }

    /// Record that `rows_done` of `total_rows` rows are finished.
    ///
    /// Returns the percentage just reported, if a new step was crossed.
    pub fn on_row(&mut self, rows_done: u32, total_rows: u32) -> Option<u32> {
        if total_rows == 0 {
            return None;
        }

        let percent = (100 * u64::from(rows_done) / u64::from(total_rows)) as u32;
        let step = percent / self.step_percent;
        if step <= self.last_step {
            return None;
        }

        self.last_step = step;
        let reported = step * self.step_percent;
        log::info!("Percentage done: {}%", reported);
        Some(reported)
    }
}
