//! Processing several icons in one run.

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{Error, Result};

use super::{Masker, Report};

/// One input to output conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Job {
    /// Create a job from an input and output path.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// What to do when a job fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failing job.
    #[default]
    Abort,
    /// Log the failure and move on to the next job.
    Continue,
}

/// Result of a single job.
#[derive(Debug)]
pub struct JobOutcome {
    pub job: Job,
    pub result: Result<Report>,
}

/// Outcomes of every job that ran, in order.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<JobOutcome>,
}

impl BatchSummary {
    /// Number of jobs that completed.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of jobs that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Turn the summary into an error if any job failed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Batch`] with the failure count.
    pub fn check(&self) -> Result<()> {
        match self.failed() {
            0 => Ok(()),
            failed => Err(Error::Batch {
                failed,
                total: self.outcomes.len(),
            }),
        }
    }
}

/// Runs a [`Masker`] over a list of jobs, one file at a time.
#[derive(Debug, Clone)]
pub struct Batch {
    masker: Masker,
    policy: FailurePolicy,
    progress: bool,
}

impl Batch {
    /// Create a batch runner. Progress display is off by default.
    #[must_use]
    pub const fn new(masker: Masker, policy: FailurePolicy) -> Self {
        Self {
            masker,
            policy,
            progress: false,
        }
    }

    /// Show a progress bar on stderr while running.
    #[must_use]
    pub const fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Process every job in order.
    ///
    /// `on_success` runs after each completed job, with the progress bar
    /// suspended so it can print.
    ///
    /// # Errors
    ///
    /// Under [`FailurePolicy::Abort`], returns the first failure wrapped in
    /// [`Error::Job`]. Under [`FailurePolicy::Continue`] this only returns
    /// `Ok`; call [`BatchSummary::check`] to surface failures.
    pub fn run<F>(&self, jobs: &[Job], mut on_success: F) -> Result<BatchSummary>
    where
        F: FnMut(&Job, &Report),
    {
        let pb = if self.progress {
            let pb = ProgressBar::new(jobs.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} Masking [{bar:40.cyan/blue}] {pos}/{len}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut summary = BatchSummary::default();

        for job in jobs {
            let result = self.masker.process(&job.input, &job.output);
            pb.inc(1);

            match result {
                Ok(report) => {
                    pb.suspend(|| on_success(job, &report));
                    summary.outcomes.push(JobOutcome {
                        job: job.clone(),
                        result: Ok(report),
                    });
                }
                Err(err) => {
                    let err = Error::Job {
                        path: job.input.clone(),
                        source: Box::new(err),
                    };
                    if self.policy == FailurePolicy::Abort {
                        pb.abandon();
                        return Err(err);
                    }

                    tracing::error!("{err}");
                    summary.outcomes.push(JobOutcome {
                        job: job.clone(),
                        result: Err(err),
                    });
                }
            }
        }

        pb.finish_and_clear();

        if summary.failed() > 0 {
            tracing::warn!(
                "{} of {} images failed",
                summary.failed(),
                summary.outcomes.len()
            );
        }

        Ok(summary)
    }
}
