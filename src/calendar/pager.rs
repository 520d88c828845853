use super::grid::{GridBuilder, GridError, MonthGrid};
use super::Clock;
use crate::tasks::Task;

/// The month currently on display.  Every navigation rebuilds the whole grid;
/// if that fails, the previous month stays in place.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthPager<C> {
    builder: GridBuilder<C>,
    month_number: i32,
    grid: MonthGrid,
}

impl<C: Clock> MonthPager<C> {
    pub(crate) fn new(builder: GridBuilder<C>) -> Result<Self, GridError> {
        let month_number = builder.current_month_number();
        let grid = builder.build(month_number)?;
        Ok(MonthPager {
            builder,
            month_number,
            grid,
        })
    }

    pub(crate) fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub(crate) fn month_number(&self) -> i32 {
        self.month_number
    }

    pub(crate) fn tasks_today(&self) -> impl Iterator<Item = &Task> + '_ {
        self.builder.tasks().on(self.builder.today())
    }

    pub(crate) fn next_month(&mut self) -> Result<(), GridError> {
        let month_number = self
            .month_number
            .checked_add(1)
            .ok_or(GridError::MonthOutOfRange(self.month_number))?;
        self.show(month_number)
    }

    pub(crate) fn previous_month(&mut self) -> Result<(), GridError> {
        let month_number = self
            .month_number
            .checked_sub(1)
            .ok_or(GridError::MonthOutOfRange(self.month_number))?;
        self.show(month_number)
    }

    pub(crate) fn this_month(&mut self) -> Result<(), GridError> {
        self.show(self.builder.current_month_number())
    }

    fn show(&mut self, month_number: i32) -> Result<(), GridError> {
        let grid = self.builder.build(month_number)?;
        log::debug!(
            "Showing {} {} from {} (month number {month_number}, {} leading days)",
            grid.month(),
            grid.year(),
            grid.cells()[0].date,
            grid.offset()
        );
        self.month_number = month_number;
        self.grid = grid;
        Ok(())
    }
}
