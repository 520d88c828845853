use std::iter::successors;
use time::{Date, Weekday, Weekday::*};

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) const SUNDAY_FIRST: [Weekday; DAYS_IN_WEEK] = [
    Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday,
];

pub(crate) trait WeekdayExt {
    /// Zero-based position of the weekday in a Sunday-first week
    fn index0(&self) -> usize;

    /// Number of days from `start` forwards to `self`, in `0..7`
    fn days_since(&self, start: Weekday) -> u8;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> usize {
        self.number_days_from_sunday().into()
    }

    fn days_since(&self, start: Weekday) -> u8 {
        (self.number_days_from_sunday() + 7 - start.number_days_from_sunday()) % 7
    }
}

/// Iterate over `date` and every following day, stopping at the end of
/// representable time
pub(crate) fn iter_days_from(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day())
}
