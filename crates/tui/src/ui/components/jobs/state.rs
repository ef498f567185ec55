//! In-memory job queue backing the policy log card.
//!
//! Jobs advance one lifecycle step per tick so the log visibly moves while
//! the console is open: Pending, then InProgress, then Success.

use chrono::Utc;
use ratatui::layout::Constraint;
use tenure_types::{Job, JobStatus, JobType};

use crate::ui::components::common::{Column, DataTableState, Row};

#[derive(Debug)]
pub struct JobsState {
    jobs: Vec<Job>,
    next_id: u64,
    pub table: DataTableState,
}

impl Default for JobsState {
    fn default() -> Self {
        Self::new()
    }
}

impl JobsState {
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            next_id: 1,
            table: DataTableState::new(vec![
                Column::new("Status", "status", Constraint::Length(12)),
                Column::new("Type", "type", Constraint::Min(14)),
                Column::new("Started", "started", Constraint::Length(17)),
                Column::new("Finished", "finished", Constraint::Length(17)),
            ]),
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Enqueues a new job of the given type. Newest jobs sort to the top of
    /// the log.
    pub fn create_job(&mut self, job_type: JobType) -> &Job {
        let id = format!("job-{}", self.next_id);
        self.next_id += 1;
        self.jobs.insert(0, Job::new(id, job_type, Utc::now()));
        self.refresh_rows();
        &self.jobs[0]
    }

    /// Advances every non-terminal job by one lifecycle step. Returns true
    /// when anything changed so the caller can mark the frame dirty.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        for job in &mut self.jobs {
            match job.status {
                JobStatus::Pending => {
                    job.status = JobStatus::InProgress;
                    changed = true;
                }
                JobStatus::InProgress => {
                    job.status = JobStatus::Success;
                    job.finished_at = Some(Utc::now());
                    changed = true;
                }
                _ => {}
            }
        }
        if changed {
            self.refresh_rows();
        }
        changed
    }

    fn refresh_rows(&mut self) {
        let rows = self
            .jobs
            .iter()
            .map(|job| {
                Row::default()
                    .cell("status", job.status.label())
                    .cell("type", job.job_type.label())
                    .cell("started", job.created_at.format("%Y-%m-%d %H:%M").to_string())
                    .cell(
                        "finished",
                        job.finished_at
                            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                            .unwrap_or_else(|| "-".to_string()),
                    )
            })
            .collect();
        self.table.set_rows(rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_jobs_start_pending_and_get_unique_ids() {
        let mut jobs = JobsState::new();
        let first_id = jobs.create_job(JobType::DataRetention).id.clone();
        let second_id = jobs.create_job(JobType::DataRetention).id.clone();
        assert_ne!(first_id, second_id);
        assert!(jobs.jobs().iter().all(|job| job.status == JobStatus::Pending));
        // Newest first.
        assert_eq!(jobs.jobs()[0].id, second_id);
    }

    #[test]
    fn ticks_walk_the_lifecycle_to_success() {
        let mut jobs = JobsState::new();
        jobs.create_job(JobType::DataRetention);

        assert!(jobs.tick());
        assert_eq!(jobs.jobs()[0].status, JobStatus::InProgress);
        assert!(jobs.jobs()[0].finished_at.is_none());

        assert!(jobs.tick());
        assert_eq!(jobs.jobs()[0].status, JobStatus::Success);
        assert!(jobs.jobs()[0].finished_at.is_some());

        // Terminal jobs are left alone.
        assert!(!jobs.tick());
    }

    #[test]
    fn rows_track_the_job_list() {
        let mut jobs = JobsState::new();
        assert!(jobs.table.rows.is_empty());
        jobs.create_job(JobType::DataRetention);
        assert_eq!(jobs.table.rows.len(), 1);
        assert_eq!(jobs.table.rows[0].cells.get("status").map(String::as_str), Some("Pending"));
        jobs.tick();
        assert_eq!(jobs.table.rows[0].cells.get("status").map(String::as_str), Some("In progress"));
    }
}
