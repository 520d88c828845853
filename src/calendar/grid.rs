use super::util::{iter_days_from, WeekdayExt, DAYS_IN_WEEK, SUNDAY_FIRST};
use super::Clock;
use crate::locale::Locale;
use crate::tasks::TaskBook;
use thiserror::Error;
use time::{Date, Duration, Month};

pub(crate) const GRID_WEEKS: usize = 6;

pub(crate) const GRID_DAYS: usize = GRID_WEEKS * DAYS_IN_WEEK;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DateCell {
    pub(crate) date: Date,
    pub(crate) day: u8,
    pub(crate) is_today: bool,
    pub(crate) has_task: bool,
    /// Set on the leading cells up to and including the first of the month,
    /// and on every cell from the following month's first day onwards.  Note
    /// that this marks the 1st of the displayed month itself.
    pub(crate) is_offset: bool,
}

impl DateCell {
    pub(crate) fn in_target_month(&self) -> bool {
        !self.is_offset
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct WeekdayLabel {
    pub(crate) text: &'static str,
}

/// Six weeks of consecutive days covering a month, starting on the locale's
/// first day of the week
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    first_of_month: Date,
    offset: u8,
    month_label: &'static str,
    cells: [DateCell; GRID_DAYS],
    weekday_labels: [WeekdayLabel; DAYS_IN_WEEK],
}

impl MonthGrid {
    pub(crate) fn first_of_month(&self) -> Date {
        self.first_of_month
    }

    pub(crate) fn year(&self) -> i32 {
        self.first_of_month().year()
    }

    pub(crate) fn month(&self) -> Month {
        self.first_of_month().month()
    }

    /// The locale's abbreviated name for the month
    pub(crate) fn month_label(&self) -> &'static str {
        self.month_label
    }

    /// Number of days from the previous month shown before the 1st
    pub(crate) fn offset(&self) -> u8 {
        self.offset
    }

    pub(crate) fn cells(&self) -> &[DateCell; GRID_DAYS] {
        &self.cells
    }

    pub(crate) fn weeks(&self) -> impl Iterator<Item = &[DateCell]> + '_ {
        self.cells().chunks_exact(DAYS_IN_WEEK)
    }

    pub(crate) fn weekday_labels(&self) -> &[WeekdayLabel; DAYS_IN_WEEK] {
        &self.weekday_labels
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GridBuilder<C> {
    clock: C,
    locale: Locale,
    tasks: TaskBook,
}

impl<C: Clock> GridBuilder<C> {
    pub(crate) fn new(clock: C, locale: Locale, tasks: TaskBook) -> Self {
        GridBuilder {
            clock,
            locale,
            tasks,
        }
    }

    pub(crate) fn today(&self) -> Date {
        self.clock.today()
    }

    pub(crate) fn tasks(&self) -> &TaskBook {
        &self.tasks
    }

    /// The month number at which navigation starts
    pub(crate) fn current_month_number(&self) -> i32 {
        u8::from(self.today().month()).into()
    }

    /// Build the grid for `month_number`, counted from January of the current
    /// year.  Numbers outside `1..=12` select months in earlier or later
    /// years.
    pub(crate) fn build(&self, month_number: i32) -> Result<MonthGrid, GridError> {
        let today = self.clock.today();
        let first_of_month = resolve_month(today.year(), month_number)?;
        let offset = first_of_month
            .weekday()
            .days_since(self.locale.first_weekday());
        let start = first_of_month
            .checked_sub(Duration::days(offset.into()))
            .ok_or(GridError::OutOfTime)?;
        let mut month_starts = 0;
        let cells = iter_days_from(start)
            .take(GRID_DAYS)
            .enumerate()
            .map(|(i, date)| {
                if date.day() == 1 {
                    month_starts += 1;
                }
                DateCell {
                    date,
                    day: date.day(),
                    is_today: date == today,
                    has_task: self.tasks.find(date).is_some(),
                    is_offset: i <= usize::from(offset) || month_starts > 1,
                }
            })
            .collect::<Vec<_>>();
        let cells = <[DateCell; GRID_DAYS]>::try_from(cells).map_err(|_| GridError::OutOfTime)?;
        Ok(MonthGrid {
            first_of_month,
            offset,
            month_label: self.locale.short_month(first_of_month.month()),
            cells,
            weekday_labels: self.weekday_labels(),
        })
    }

    /// The locale's abbreviated weekday names, rotated to begin on its first
    /// day of the week
    pub(crate) fn weekday_labels(&self) -> [WeekdayLabel; DAYS_IN_WEEK] {
        let mut weekdays = SUNDAY_FIRST;
        weekdays.rotate_left(self.locale.first_weekday().index0());
        weekdays.map(|wd| WeekdayLabel {
            text: self.locale.short_weekday(wd),
        })
    }
}

fn resolve_month(reference_year: i32, month_number: i32) -> Result<Date, GridError> {
    let out_of_range = || GridError::MonthOutOfRange(month_number);
    let months_after_january = i64::from(month_number) - 1;
    let year = i64::from(reference_year) + months_after_january.div_euclid(12);
    let year = i32::try_from(year).map_err(|_| out_of_range())?;
    let month_index = u8::try_from(months_after_january.rem_euclid(12)).map_err(|_| out_of_range())?;
    Date::from_calendar_date(year, Month::January.nth_next(month_index), 1)
        .map_err(|_| out_of_range())
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum GridError {
    #[error("month number {0} lies outside the supported range of dates")]
    MonthOutOfRange(i32),
    #[error("reached the end of time")]
    OutOfTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::FixedClock;
    use crate::locale::EN_US;
    use crate::tasks::Task;
    use time::macros::date;
    use time::Weekday::*;

    const TODAY: Date = date!(2026 - 10 - 18);

    fn builder(locale: Locale) -> GridBuilder<FixedClock> {
        GridBuilder::new(FixedClock(TODAY), locale, TaskBook::sample(TODAY))
    }

    fn monday_first() -> Locale {
        Locale::lookup("en_GB").unwrap()
    }

    #[test]
    fn test_always_six_weeks() {
        for wd in SUNDAY_FIRST {
            let builder = builder(EN_US.with_week_start(wd));
            for month_number in -30..=30 {
                let grid = builder.build(month_number).unwrap();
                assert_eq!(grid.cells().len(), 42);
                assert_eq!(grid.weeks().count(), 6);
                assert_eq!(grid.weekday_labels().len(), 7);
                assert_eq!(grid.cells()[0].date.weekday(), wd);
            }
        }
    }

    #[test]
    fn test_consecutive_days() {
        let builder = builder(monday_first());
        for month_number in -15..=15 {
            let grid = builder.build(month_number).unwrap();
            for pair in grid.cells().windows(2) {
                assert_eq!(pair[0].date.next_day(), Some(pair[1].date));
            }
        }
    }

    #[test]
    fn test_starts_on_or_before_first() {
        let builder = builder(monday_first());
        for month_number in 1..=12 {
            let grid = builder.build(month_number).unwrap();
            let first = grid.first_of_month();
            assert_eq!(first.day(), 1);
            assert_eq!(
                grid.cells()[usize::from(grid.offset())].date,
                first,
                "month {month_number}"
            );
            assert!(grid.offset() < 7);
        }
    }

    #[test]
    fn test_first_on_wednesday_week_from_monday() {
        let grid = builder(monday_first()).build(7).unwrap();
        assert_eq!(grid.first_of_month(), date!(2026 - 07 - 01));
        assert_eq!(grid.first_of_month().weekday(), Wednesday);
        assert_eq!(grid.offset(), 2);
        let cells = grid.cells();
        assert_eq!(cells[0].date, date!(2026 - 06 - 29));
        assert_eq!(cells[0].date.weekday(), Monday);
        assert!(!cells[0].in_target_month());
        assert_eq!(cells[1].date, date!(2026 - 06 - 30));
        assert_eq!(cells[1].date.weekday(), Tuesday);
        assert!(!cells[1].in_target_month());
    }

    #[test]
    fn test_offset_boundary() {
        // October 2026 begins on a Thursday.  With weeks starting on Monday
        // the grid runs from 28 September to 8 November.
        let grid = builder(monday_first()).build(10).unwrap();
        let flags = grid.cells().map(|c| c.is_offset);
        let mut expected = [false; 42];
        expected[..=3].fill(true);
        expected[34..].fill(true);
        assert_eq!(flags, expected);
        assert_eq!(grid.cells()[3].date, date!(2026 - 10 - 01));
        assert!(!grid.cells()[3].in_target_month());
        assert_eq!(grid.cells()[4].date, date!(2026 - 10 - 02));
        assert!(grid.cells()[4].in_target_month());
        assert_eq!(grid.cells()[33].date, date!(2026 - 10 - 31));
        assert!(grid.cells()[33].in_target_month());
        assert_eq!(grid.cells()[34].date, date!(2026 - 11 - 01));
    }

    #[test]
    fn test_offset_boundary_no_leading_days() {
        // November 2026 begins on a Sunday
        let grid = builder(EN_US).build(11).unwrap();
        assert_eq!(grid.offset(), 0);
        let cells = grid.cells();
        assert_eq!(cells[0].date, date!(2026 - 11 - 01));
        assert!(cells[0].is_offset);
        assert!(cells[1..30].iter().all(DateCell::in_target_month));
        assert_eq!(cells[30].date, date!(2026 - 12 - 01));
        assert!(cells[30..].iter().all(|c| c.is_offset));
    }

    #[test]
    fn test_day_numbers() {
        let grid = builder(monday_first()).build(10).unwrap();
        let days = grid.cells().map(|c| c.day);
        assert_eq!(&days[..5], &[28, 29, 30, 1, 2]);
        assert_eq!(&days[33..], &[31, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_today_flag() {
        let builder = builder(monday_first());
        for month_number in -12..=24 {
            let grid = builder.build(month_number).unwrap();
            let in_window = grid.cells().iter().any(|c| c.date == TODAY);
            let todays = grid.cells().iter().filter(|c| c.is_today).count();
            assert_eq!(todays, usize::from(in_window), "month {month_number}");
        }
        let grid = builder.build(10).unwrap();
        let today = grid.cells().iter().find(|c| c.is_today).unwrap();
        assert_eq!(today.date, TODAY);
        assert!(builder.build(7).unwrap().cells().iter().all(|c| !c.is_today));
    }

    #[test]
    fn test_task_flag() {
        let builder = builder(monday_first());
        for month_number in 8..=11 {
            let grid = builder.build(month_number).unwrap();
            for cell in grid.cells() {
                assert_eq!(cell.has_task, builder.tasks().find(cell.date).is_some());
            }
        }
        let grid = builder.build(10).unwrap();
        let task_days = grid
            .cells()
            .iter()
            .filter(|c| c.has_task)
            .map(|c| c.date)
            .collect::<Vec<_>>();
        assert_eq!(
            task_days,
            [
                date!(2026 - 10 - 01),
                date!(2026 - 10 - 14),
                date!(2026 - 10 - 15),
                date!(2026 - 10 - 17),
                date!(2026 - 10 - 18),
            ]
        );
    }

    #[test]
    fn test_task_flag_custom_book() {
        let tasks = TaskBook::new(vec![Task::new("Dentist", false, date!(2026 - 11 - 03))]);
        let builder = GridBuilder::new(FixedClock(TODAY), EN_US, tasks);
        let grid = builder.build(10).unwrap();
        let flagged = grid.cells().iter().filter(|c| c.has_task).collect::<Vec<_>>();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].date, date!(2026 - 11 - 03));
        assert!(!flagged[0].in_target_month());
    }

    #[test]
    fn test_month_rollover() {
        let builder = builder(EN_US);
        assert_eq!(builder.current_month_number(), 10);
        for (month_number, first) in [
            (1, date!(2026 - 01 - 01)),
            (12, date!(2026 - 12 - 01)),
            (13, date!(2027 - 01 - 01)),
            (25, date!(2028 - 01 - 01)),
            (0, date!(2025 - 12 - 01)),
            (-11, date!(2025 - 01 - 01)),
            (-12, date!(2024 - 12 - 01)),
        ] {
            let grid = builder.build(month_number).unwrap();
            assert_eq!(grid.first_of_month(), first, "month {month_number}");
            assert_eq!(grid.year(), first.year());
            assert_eq!(grid.month(), first.month());
        }
    }

    #[test]
    fn test_month_label() {
        let grid = builder(Locale::lookup("sv_SE").unwrap()).build(3).unwrap();
        assert_eq!(grid.month_label(), "mars");
        let grid = builder(EN_US).build(14).unwrap();
        assert_eq!(grid.month_label(), "Feb");
    }

    #[test]
    fn test_end_of_time() {
        let builder = GridBuilder::new(
            FixedClock(date!(9999 - 06 - 15)),
            EN_US,
            TaskBook::sample(date!(9999 - 06 - 15)),
        );
        assert!(builder.build(11).is_ok());
        assert_eq!(builder.build(12), Err(GridError::OutOfTime));
        assert_eq!(builder.build(13), Err(GridError::MonthOutOfRange(13)));
        assert_eq!(
            builder.build(i32::MAX),
            Err(GridError::MonthOutOfRange(i32::MAX))
        );
    }

    #[test]
    fn test_start_of_time() {
        let today = Date::from_calendar_date(-9999, Month::June, 15).unwrap();
        let builder = GridBuilder::new(FixedClock(today), EN_US, TaskBook::sample(today));
        assert!(builder.build(2).is_ok());
        assert_eq!(builder.build(0), Err(GridError::MonthOutOfRange(0)));
        assert_eq!(
            builder.build(i32::MIN),
            Err(GridError::MonthOutOfRange(i32::MIN))
        );
    }

    #[test]
    fn test_weekday_labels_sunday_first() {
        let labels = builder(EN_US).weekday_labels().map(|l| l.text);
        assert_eq!(labels, ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);
    }

    #[test]
    fn test_weekday_labels_monday_first() {
        let labels = builder(Locale::lookup("de_DE").unwrap()).weekday_labels();
        assert_eq!(
            labels.map(|l| l.text),
            ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"]
        );
    }

    #[test]
    fn test_weekday_labels_are_rotations() {
        let names = SUNDAY_FIRST.map(|wd| EN_US.short_weekday(wd));
        for wd in SUNDAY_FIRST {
            let texts = builder(EN_US.with_week_start(wd))
                .weekday_labels()
                .map(|l| l.text);
            assert_eq!(texts[0], EN_US.short_weekday(wd));
            let mut back = texts;
            back.rotate_right(wd.index0());
            assert_eq!(back, names);
            let mut full_turn = texts;
            full_turn.rotate_left(DAYS_IN_WEEK);
            assert_eq!(full_turn, texts);
        }
    }

    #[test]
    fn test_grid_columns_match_labels() {
        let builder = builder(EN_US.with_week_start(Thursday));
        let grid = builder.build(5).unwrap();
        for week in grid.weeks() {
            for (cell, label) in std::iter::zip(week, grid.weekday_labels()) {
                assert_eq!(EN_US.short_weekday(cell.date.weekday()), label.text);
            }
        }
    }
}
