//! Domain state of the application. [Tracker] is the single owner of the project list, the
//! stopwatch and the finished sessions; windows only render it and send it commands.

pub mod export;
pub mod projects;
pub mod records;
pub mod timer;

use std::collections::BTreeSet;

use anyhow::{bail, Result};
use chrono::{DateTime, Duration, Local};
use tracing::{debug, info};

use crate::utils::clock::Clock;
use projects::ProjectRegistry;
use records::{RecordStore, SessionRecord};
use timer::Timer;

pub struct Tracker {
    projects: ProjectRegistry,
    timer: Timer,
    records: RecordStore,
    clock: Box<dyn Clock>,
}

impl Tracker {
    pub fn new(projects: ProjectRegistry, clock: impl Clock) -> Self {
        Self {
            projects,
            timer: Timer::default(),
            records: RecordStore::default(),
            clock: Box::new(clock),
        }
    }

    pub fn projects(&self) -> &ProjectRegistry {
        &self.projects
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed(self.clock.now())
    }

    pub fn select_project(&mut self, index: usize) -> Result<()> {
        self.ensure_stopped()?;
        self.projects.select(index)
    }

    pub fn start(&mut self) -> Result<DateTime<Local>> {
        let project = self.projects.selected().into();
        let started_at = self.timer.start(self.clock.now(), project)?;
        info!("Started tracking {} at {started_at}", self.projects.selected());
        Ok(started_at)
    }

    pub fn stop(&mut self, notes: String) -> Result<&SessionRecord> {
        let record = self.timer.stop(self.clock.now(), notes)?;
        info!(
            "Stopped tracking {} after {}s",
            record.project,
            record.duration().num_seconds()
        );
        Ok(self.records.push(record))
    }

    pub fn add_project(&mut self) -> Result<&str> {
        self.ensure_stopped()?;
        let name = self.projects.add();
        debug!("Added project {name}");
        Ok(name)
    }

    pub fn rename_project(&mut self, index: usize, name: &str) -> Result<()> {
        self.ensure_stopped()?;
        self.projects.rename(index, name)?;
        debug!("Renamed project {index} to {name}");
        Ok(())
    }

    pub fn delete_projects(&mut self, indices: &BTreeSet<usize>) -> Result<usize> {
        self.ensure_stopped()?;
        let removed = self.projects.delete(indices)?;
        debug!("Deleted {removed} projects");
        Ok(removed)
    }

    pub fn delete_records(&mut self, indices: &BTreeSet<usize>) -> usize {
        let removed = self.records.delete(indices);
        debug!("Deleted {removed} records");
        removed
    }

    fn ensure_stopped(&self) -> Result<()> {
        if self.timer.is_running() {
            bail!("Projects can't be changed while the timer is running");
        }
        Ok(())
    }
}
