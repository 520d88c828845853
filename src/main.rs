mod app;
mod calendar;
mod help;
mod locale;
mod tasks;
mod theme;
use crate::app::App;
use crate::calendar::{Clock, FixedClock, GridBuilder, MonthPager, SystemClock};
use crate::locale::{parse_weekday, Locale};
use crate::tasks::TaskBook;
use anyhow::Context;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::{Path, PathBuf};
use time::{format_description::FormatItem, macros::format_description, Date, Weekday};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Options {
    today: Option<Date>,
    locale: Option<String>,
    week_start: Option<Weekday>,
    log_file: Option<PathBuf>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('l') | Arg::Long("locale") => {
                    opts.locale = Some(parser.value()?.string()?);
                }
                Arg::Short('w') | Arg::Long("week-start") => {
                    let value = parser.value()?.string()?;
                    match parse_weekday(&value) {
                        Ok(wd) => opts.week_start = Some(wd),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                Arg::Long("today") => {
                    let value = parser.value()?.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => opts.today = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                Arg::Long("log-file") => opts.log_file = Some(PathBuf::from(parser.value()?)),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let _logger = init_logging(opts.log_file.as_deref())?;
                let locale = opts.resolve_locale()?;
                log::info!(
                    "Using locale {} with weeks starting on {}",
                    locale.name(),
                    locale.first_weekday()
                );
                match opts.today {
                    Some(today) => launch(FixedClock(today), locale),
                    None => {
                        let clock = SystemClock::new().context("failed to determine local date")?;
                        launch(clock, locale)
                    }
                }
            }
            Command::Help => {
                println!("Usage: taskcal [OPTIONS]");
                println!();
                println!("Terminal month calendar with locale-aware week starts and daily tasks");
                println!();
                println!("Options:");
                println!("  -l, --locale <NAME>       Use the given locale, e.g. \"de_DE\" [default: from LC_ALL, LC_TIME, or LANG]");
                println!("  -w, --week-start <DAY>    Start weeks on the given day, e.g. \"monday\"");
                println!("      --today <YYYY-MM-DD>  Pretend that today is the given date");
                println!("      --log-file <PATH>     Write log messages to the given file");
                println!("  -h, --help                Display this help message and exit");
                println!("  -V, --version             Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

impl Options {
    fn resolve_locale(&self) -> anyhow::Result<Locale> {
        let locale = match self.locale.as_deref() {
            Some(name) => Locale::lookup(name)
                .with_context(|| format!("no calendar conventions known for locale {name:?}"))?,
            None => Locale::from_env(),
        };
        Ok(match self.week_start {
            Some(wd) => locale.with_week_start(wd),
            None => locale,
        })
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

// Logging is only set up when a file is given, as anything written to stderr
// would garble the calendar.
fn init_logging(log_file: Option<&Path>) -> anyhow::Result<Option<LoggerHandle>> {
    let Some(path) = log_file else {
        return Ok(None);
    };
    let handle = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)
        .context("invalid log specification")?
        .log_to_file(FileSpec::try_from(path).context("invalid log file path")?)
        .start()
        .context("failed to start logger")?;
    Ok(Some(handle))
}

fn launch<C: Clock>(clock: C, locale: Locale) -> anyhow::Result<()> {
    let tasks = TaskBook::sample(clock.today());
    let builder = GridBuilder::new(clock, locale, tasks);
    let pager = MonthPager::new(builder).context("failed to lay out the current month")?;
    with_terminal(|mut terminal| {
        terminal.hide_cursor().context("failed to hide cursor")?;
        App::new(pager).run(terminal)?;
        Ok(())
    })
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
