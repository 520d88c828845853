use time::{Date, Duration};

/// How many completed sample tasks fall on each day, keyed by the day's
/// distance from today
const SAMPLE_DAYS: &[(i64, usize)] = &[(0, 7), (-1, 3), (-3, 1), (-4, 1), (-17, 1)];

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Task {
    pub(crate) title: String,
    pub(crate) completed: bool,
    pub(crate) date: Date,
}

impl Task {
    pub(crate) fn new<S: Into<String>>(title: S, completed: bool, date: Date) -> Task {
        Task {
            title: title.into(),
            completed,
            date,
        }
    }
}

/// An in-memory, read-only list of tasks.  Lookups are linear scans.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct TaskBook(Vec<Task>);

impl TaskBook {
    #[cfg(test)]
    pub(crate) fn new(tasks: Vec<Task>) -> TaskBook {
        TaskBook(tasks)
    }

    /// The demonstration tasks shown by the calendar, dated relative to
    /// `today`
    pub(crate) fn sample(today: Date) -> TaskBook {
        let mut tasks = Vec::new();
        for &(days, qty) in SAMPLE_DAYS {
            let Some(date) = today.checked_add(Duration::days(days)) else {
                continue;
            };
            tasks.extend((1..=qty).map(|n| Task::new(format!("Task {n}"), true, date)));
        }
        TaskBook(tasks)
    }

    /// Return the first task on the same calendar day as `date`
    pub(crate) fn find(&self, date: Date) -> Option<&Task> {
        self.0.iter().find(|t| t.date == date)
    }

    pub(crate) fn on(&self, date: Date) -> impl Iterator<Item = &Task> + '_ {
        self.0.iter().filter(move |t| t.date == date)
    }
}
