use super::grid::{DateCell, WeekdayLabel, GRID_WEEKS};
use super::pager::MonthPager;
use super::Clock;
use crate::tasks::Task;
use crate::theme::{
    BASE_STYLE, MONTH_STYLE, OFFSET_DAY_STYLE, TASKS_HEADING_STYLE, TASK_DAY_MODIFIER,
    TODAY_STYLE, WEEKDAY_STYLE, YEAR_STYLE,
};
use ratatui::{layout::Flex, prelude::*, widgets::*};
use std::iter::zip;
use std::marker::PhantomData;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 7;

/// Number of columns taken up by a single day's number, brackets included
const CELL_WIDTH: u16 = 4;

/// Width of the calendar in columns
const MAIN_WIDTH: u16 = DAY_WIDTH * 6 + CELL_WIDTH;

/// Number of lines taken up by the year, the month, and a blank line
const TITLE_LINES: u16 = 3;

/// Number of lines taken up by the weekday header and its rule
const HEADER_LINES: u16 = 2;

/// Number of lines taken up by each week of the calendar
const WEEK_LINES: u16 = 2;

const GRID_TOP: u16 = TITLE_LINES + HEADER_LINES;

#[allow(clippy::cast_possible_truncation)]
const TASKS_TOP: u16 = GRID_TOP + WEEK_LINES * (GRID_WEEKS as u16);

const ACS_HLINE: char = '─';

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthCalendar<C> {
    _data: PhantomData<C>,
}

impl<C> MonthCalendar<C> {
    pub(crate) fn new() -> MonthCalendar<C> {
        MonthCalendar { _data: PhantomData }
    }
}

impl<C: Clock> StatefulWidget for MonthCalendar<C> {
    type State = MonthPager<C>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [area] = Layout::horizontal([MAIN_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let grid = state.grid();
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(grid.year(), grid.month_label());
        canvas.draw_header(grid.weekday_labels());
        for (week_no, week) in zip(0u16.., grid.weeks()) {
            for (column, cell) in zip(0u16.., week) {
                canvas.draw_day(week_no, column, cell);
            }
        }
        let tasks = state.tasks_today().collect::<Vec<_>>();
        canvas.draw_tasks(&tasks);
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, year: i32, month_label: &str) {
        self.mvprint(0, 0, year.to_string(), YEAR_STYLE);
        self.mvprint(1, 0, month_label, MONTH_STYLE);
    }

    fn draw_header(&mut self, labels: &[WeekdayLabel]) {
        for (column, label) in zip(0u16.., labels) {
            let text = label.text.to_uppercase();
            let width = u16::try_from(Span::raw(text.as_str()).width()).unwrap_or(u16::MAX);
            let indent = CELL_WIDTH.saturating_sub(width) / 2;
            self.mvprint(
                TITLE_LINES,
                DAY_WIDTH * column + indent,
                text,
                WEEKDAY_STYLE,
            );
        }
        self.hline(TITLE_LINES + 1, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, column: u16, cell: &DateCell) {
        let s = if cell.is_today {
            format!("[{:2}]", cell.day)
        } else {
            format!(" {:2} ", cell.day)
        };
        let mut style = if cell.in_target_month() {
            BASE_STYLE
        } else {
            OFFSET_DAY_STYLE
        };
        if cell.has_task {
            style = style.add_modifier(TASK_DAY_MODIFIER);
        }
        if cell.is_today {
            style = style.patch(TODAY_STYLE);
        }
        self.mvprint(GRID_TOP + week_no * WEEK_LINES, DAY_WIDTH * column, s, style);
    }

    fn draw_tasks(&mut self, tasks: &[&Task]) {
        self.mvprint(TASKS_TOP, 0, "Today", TASKS_HEADING_STYLE);
        for (y, task) in zip(TASKS_TOP + 1.., tasks) {
            let mark = if task.completed { 'x' } else { ' ' };
            self.mvprint(y, 0, format!("[{mark}] {}", task.title), BASE_STYLE);
        }
        if tasks.is_empty() {
            self.mvprint(TASKS_TOP + 1, 0, "Nothing to do", OFFSET_DAY_STYLE);
        }
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Rendering through a Paragraph truncates text running past the
            // right edge instead of panicking.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), BASE_STYLE);
    }
}
