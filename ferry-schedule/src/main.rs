use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ferry_schedule::Error;
use ferry_schedule::canonical;
use ferry_schedule::config::{ServerConfig, SiteConfig};
use ferry_schedule::domain::{Location, SchedulePeriod, ValidationError};
use ferry_schedule::ingest::{TableLayout, merge_period, read_table_file, rules_from_table};
use ferry_schedule::publish::publish_site;
use ferry_schedule::render::{render_day, render_text};
use ferry_schedule::schedule::{DirectionFilter, build_day_view, build_day_view_for};
use ferry_schedule::web::{AppState, SharedSchedule, create_router};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Text,
    Json,
    Html,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Validate a schedule file and summarize it
    Check {
        #[arg(long, default_value = "schedule.yaml")]
        schedule: PathBuf,
    },
    /// Show every sailing on one date
    Day {
        #[arg(long, default_value = "schedule.yaml")]
        schedule: PathBuf,
        /// Date to show (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// any, arrive or depart
        #[arg(long, default_value = "any")]
        direction: DirectionFilter,
        /// Location the direction is relative to
        #[arg(long)]
        home: Option<String>,
        /// Only these services (repeatable)
        #[arg(long)]
        service: Vec<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Display times in 12-hour format
        #[arg(long = "12h")]
        twelve_hour: bool,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Publish a static site covering several days
    Publish {
        #[arg(long, default_value = "schedule.yaml")]
        schedule: PathBuf,
        #[arg(long, default_value = "site")]
        output_dir: PathBuf,
        /// First date to publish (YYYY-MM-DD)
        #[arg(long)]
        start_date: NaiveDate,
        /// Number of days to publish (default: 30)
        #[arg(long)]
        days: Option<u32>,
        #[arg(long = "12h")]
        twelve_hour: bool,
        #[arg(long)]
        home: Option<String>,
        /// Directory containing styles.css
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Add a period from an extracted timetable (CSV) to the schedule
    Ingest {
        #[arg(long, default_value = "schedule.yaml")]
        schedule: PathBuf,
        #[arg(long, default_value = "ctc")]
        service: String,
        /// Name of the period, e.g. Summer or Winter
        #[arg(long)]
        name: String,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        /// CSV produced by the table extractor
        #[arg(long)]
        table: PathBuf,
        /// Where the timetable was published
        #[arg(long)]
        url: Option<String>,
        /// Origin of the first time column
        #[arg(long, default_value = "Chebeague Island")]
        outbound_from: String,
        /// Origin of the second time column
        #[arg(long, default_value = "Cousins Island")]
        outbound_to: String,
        /// Timezone for a newly created service
        #[arg(long, default_value = "America/New_York")]
        tzid: String,
    },
    /// Serve day pages and the JSON API over HTTP
    Serve {
        #[arg(long, default_value = "schedule.yaml")]
        schedule: PathBuf,
        #[arg(long)]
        bind: Option<SocketAddr>,
        #[arg(long)]
        home: Option<String>,
        #[arg(long = "12h")]
        twelve_hour: bool,
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Site settings with command-line overrides applied.
fn site_config(home: Option<String>, twelve_hour: bool, static_dir: Option<PathBuf>) -> SiteConfig {
    let mut site = SiteConfig::default().with_12h(twelve_hour);
    if let Some(home) = home {
        site.home = home;
    }
    if let Some(dir) = static_dir {
        site = site.with_static_dir(dir);
    }
    site
}

fn write_output(output: Option<&Path>, contents: &str) -> Result<(), Error> {
    match output {
        Some(path) => {
            std::fs::write(path, contents).map_err(|e| Error::io(path, e))?;
            info!(path = %path.display(), "wrote output");
        }
        None => print!("{contents}"),
    }
    Ok(())
}

fn check(schedule: &Path) -> Result<(), Error> {
    let document = canonical::load(schedule)?;
    for service in document.services() {
        let rules: usize = service.periods().iter().map(|p| p.departures().len()).sum();
        println!(
            "{} ({}): {} periods, {} departures",
            service.id(),
            service.tzid(),
            service.periods().len(),
            rules
        );
        for period in service.periods() {
            println!(
                "  {} {}..{} ({} departures)",
                period.name(),
                period.start_date(),
                period.end_date(),
                period.departures().len()
            );
        }
    }
    Ok(())
}

fn day(
    schedule: &Path,
    date: NaiveDate,
    direction: DirectionFilter,
    site: &SiteConfig,
    services: &[String],
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), Error> {
    let document = canonical::load(schedule)?;
    let view = if services.is_empty() {
        build_day_view(&document, date, direction, &site.home)
    } else {
        let ids: Vec<&str> = services.iter().map(String::as_str).collect();
        build_day_view_for(&document, &ids, date, direction, &site.home)?
    };

    let rendered = match format {
        OutputFormat::Text => render_text(&view, site.time_format()),
        OutputFormat::Json => serde_json::to_string_pretty(&view)? + "\n",
        OutputFormat::Html => render_day(&view, site, "")?,
    };
    write_output(output, &rendered)
}

#[allow(clippy::too_many_arguments)]
fn ingest(
    schedule: &Path,
    service: &str,
    name: String,
    start: NaiveDate,
    end: NaiveDate,
    table: &Path,
    url: Option<String>,
    layout: &TableLayout,
    tzid: &str,
) -> Result<(), Error> {
    let rows = read_table_file(table)?;
    let report = rules_from_table(&rows, layout);
    if !report.skipped.is_empty() || report.unreadable_cells > 0 {
        warn!(
            skipped = report.skipped.len(),
            unreadable_cells = report.unreadable_cells,
            "table had problems, check the result"
        );
    }
    if report.rules.is_empty() {
        warn!(table = %table.display(), "no departures found in table");
    }

    let period = SchedulePeriod::new(name, start, end, report.rules)
        .map_err(|e| ValidationError::new(Location::service(service), e))?;
    let period = match url {
        Some(url) => period.with_url(url),
        None => period,
    };

    let document = canonical::load_or_empty(schedule)?;
    let merged = merge_period(&document, service, tzid, period)?;
    canonical::save(&merged, schedule)
}

async fn serve(schedule: &Path, site: SiteConfig, config: ServerConfig) -> Result<(), Error> {
    let state = AppState::new(SharedSchedule::load(schedule)?, site, &config.cache);
    let static_dir = state.site.static_dir.clone();

    // Re-read the schedule file in the background
    let reload_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(config.reload_interval);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            reload_state.reload().await;
        }
    });

    let app = create_router(state, &static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(Error::Server)?;
    info!(addr = %config.bind, "ferry schedule listening");
    axum::serve(listener, app).await.map_err(Error::Server)
}

async fn run(args: Args) -> Result<(), Error> {
    match args.cmd {
        Command::Check { schedule } => check(&schedule),
        Command::Day {
            schedule,
            date,
            direction,
            home,
            service,
            format,
            twelve_hour,
            output,
        } => {
            let site = site_config(home, twelve_hour, None);
            day(&schedule, date, direction, &site, &service, format, output.as_deref())
        }
        Command::Publish {
            schedule,
            output_dir,
            start_date,
            days,
            twelve_hour,
            home,
            static_dir,
        } => {
            let mut site = site_config(home, twelve_hour, static_dir);
            if let Some(days) = days {
                site = site.with_days(days);
            }
            let document = canonical::load(&schedule)?;
            let report = publish_site(&document, &site, &output_dir, start_date)?;
            println!(
                "Published {} days ({} files) to {}",
                report.days.len(),
                report.files_written,
                output_dir.display()
            );
            Ok(())
        }
        Command::Ingest {
            schedule,
            service,
            name,
            start,
            end,
            table,
            url,
            outbound_from,
            outbound_to,
            tzid,
        } => {
            let layout = TableLayout::new(outbound_from, outbound_to);
            ingest(&schedule, &service, name, start, end, &table, url, &layout, &tzid)
        }
        Command::Serve {
            schedule,
            bind,
            home,
            twelve_hour,
            static_dir,
        } => {
            let site = site_config(home, twelve_hour, static_dir);
            let mut config = ServerConfig::default();
            if let Some(bind) = bind {
                config = config.with_bind(bind);
            }
            serve(&schedule, site, config).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "failed");
            ExitCode::FAILURE
        }
    }
}
