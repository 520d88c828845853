use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const YEAR_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) const MONTH_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.fg(Color::Gray);

/// Days shown from the neighboring months
pub(crate) const OFFSET_DAY_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const TODAY_STYLE: Style = Style::new()
    .fg(Color::LightCyan)
    .add_modifier(Modifier::BOLD);

pub(crate) const TASK_DAY_MODIFIER: Modifier = Modifier::UNDERLINED;

pub(crate) const TASKS_HEADING_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);
