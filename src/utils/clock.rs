use chrono::{DateTime, Local};

/// Represents an entity responsible for providing dates across application. This allows the
/// timer to be driven with exact timestamps during testing.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Local>;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock starting at 2024-03-15 09:00:00 that moves `step_secs` forward on every call.
#[cfg(test)]
pub fn ticking_clock(step_secs: i64) -> MockClock {
    use chrono::{Duration, TimeZone};

    let start = Local.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
    let mut calls = 0;
    let mut clock = MockClock::new();
    clock.expect_now().returning(move || {
        let now = start + Duration::seconds(calls * step_secs);
        calls += 1;
        now
    });
    clock
}
