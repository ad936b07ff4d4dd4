use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::{DateTime, Duration, Local, SubsecRound};

use super::records::SessionRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
enum TimerState {
    Stopped {
        /// Duration of the last finished session, kept on display after stopping.
        last: Duration,
    },
    Running {
        started_at: DateTime<Local>,
        project: Arc<str>,
    },
}

/// Stopwatch with two states. There is no pause, a paused session is just a stopped one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    state: TimerState,
}

impl Default for Timer {
    fn default() -> Self {
        Self {
            state: TimerState::Stopped {
                last: Duration::zero(),
            },
        }
    }
}

impl Timer {
    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    /// Starts a session for `project`. Moments are truncated to whole seconds so that durations
    /// are always a whole amount of seconds.
    pub fn start(&mut self, now: DateTime<Local>, project: Arc<str>) -> Result<DateTime<Local>> {
        if self.is_running() {
            bail!("Timer is already running");
        }
        let started_at = now.trunc_subsecs(0);
        self.state = TimerState::Running {
            started_at,
            project,
        };
        Ok(started_at)
    }

    pub fn stop(&mut self, now: DateTime<Local>, notes: String) -> Result<SessionRecord> {
        let TimerState::Running {
            started_at,
            project,
        } = &self.state
        else {
            bail!("Timer is not running");
        };

        // The clock may go backwards between start and stop, never end before the start.
        let end = now.trunc_subsecs(0).max(*started_at);
        let record = SessionRecord {
            project: project.clone(),
            start: *started_at,
            end,
            notes,
        };
        self.state = TimerState::Stopped {
            last: record.duration(),
        };
        Ok(record)
    }

    /// Time spent in the running session, or the length of the last session when stopped.
    pub fn elapsed(&self, now: DateTime<Local>) -> Duration {
        match &self.state {
            TimerState::Stopped { last } => *last,
            TimerState::Running { started_at, .. } => {
                (now.trunc_subsecs(0) - *started_at).max(Duration::zero())
            }
        }
    }
}
