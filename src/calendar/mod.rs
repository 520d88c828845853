mod grid;
mod pager;
mod util;
mod widget;
pub(crate) use self::grid::{GridBuilder, GridError};
pub(crate) use self::pager::MonthPager;
pub(crate) use self::widget::MonthCalendar;
use time::{error::IndeterminateOffset, Date, OffsetDateTime, UtcOffset};

/// Source of the current date
pub(crate) trait Clock {
    fn today(&self) -> Date;
}

/// The system clock, read in the local UTC offset as determined at startup
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SystemClock(UtcOffset);

impl SystemClock {
    // The local offset can only be determined soundly while the process is
    // single-threaded, so this must be called before spawning any threads.
    pub(crate) fn new() -> Result<SystemClock, IndeterminateOffset> {
        UtcOffset::current_local_offset().map(SystemClock)
    }
}

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(self.0).date()
    }
}

/// A clock that is stuck on a single date
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FixedClock(pub(crate) Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}
