use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use barfindr::days::{full_name, parse_day};
use barfindr::{category, config, filter, geo, happy_hour, hours, query};
use barfindr::{Bar, Catalog, Config, FilterCriteria, Location, SortKey};
use chrono::{Datelike, Local, NaiveTime, Weekday};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "barfindr", about = "Query the Austin bar directory", version)]
struct Cli {
    /// Directory holding one JSON file per bar
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search, filter and sort the listing
    List(ListArgs),
    /// Show one bar by slug or id
    Show { id_or_slug: String },
    /// Bars with happy hour on a day (today by default)
    HappyHour {
        #[arg(long)]
        day: Option<String>,
        /// Group every happy-hour bar by day instead
        #[arg(long, conflicts_with = "day")]
        week: bool,
    },
    /// Bars open at a given day and time (now by default)
    Open {
        #[arg(long)]
        day: Option<String>,
        #[arg(long)]
        time: Option<String>,
    },
    /// Bars nearest to a point, closest first
    Nearby {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Only bars within this many miles
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Bars in a browse category, e.g. `feature patio`
    Category { attribute: String, value: String },
    /// Every tag in use
    Tags,
    /// Where to center a map of every bar
    Center,
    /// Check every record; exits non-zero when problems are found
    Validate,
}

#[derive(Args)]
struct ListArgs {
    /// A listing URL query string, e.g. "search=patio&sort=rating-high"
    #[arg(long, conflicts_with_all = ["search", "tag", "price", "min_rating", "happy_hour", "sort"])]
    query: Option<String>,
    #[arg(long)]
    search: Option<String>,
    #[arg(long = "tag")]
    tag: Vec<String>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    price: Vec<u8>,
    #[arg(long)]
    min_rating: Option<f64>,
    #[arg(long)]
    happy_hour: bool,
    /// default, rating-high, rating-low, name-asc or name-desc
    #[arg(long)]
    sort: Option<SortKey>,
}

impl ListArgs {
    fn criteria(self) -> FilterCriteria {
        if let Some(qs) = self.query {
            return query::parse(&qs);
        }
        FilterCriteria {
            query: self.search.unwrap_or_default(),
            tags: self.tag,
            happy_hour_only: self.happy_hour,
            prices: self.price,
            min_rating: self.min_rating,
            sort: self.sort.unwrap_or_default(),
        }
    }
}

#[derive(Serialize)]
struct Listing<'a> {
    total: usize,
    shown: usize,
    bars: Vec<&'a Bar>,
}

#[derive(Serialize)]
struct Distance<'a> {
    miles: f64,
    bar: &'a Bar,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn day_arg(day: Option<&str>) -> anyhow::Result<Weekday> {
    match day {
        Some(d) => parse_day(d).with_context(|| format!("{d:?} is not a day of the week")),
        None => Ok(Local::now().weekday()),
    }
}

fn time_arg(time: Option<&str>) -> anyhow::Result<NaiveTime> {
    match time {
        Some(t) => {
            let minutes = hours::parse_time(t)?;
            NaiveTime::from_hms_opt(u32::from(minutes / 60), u32::from(minutes % 60), 0)
                .with_context(|| format!("{t:?} is not a time of day"))
        }
        None => Ok(Local::now().time()),
    }
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config::DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::resolve(cli.data_dir.as_deref())?;
    let catalog: Catalog = barfindr::load_dir(&config.data_dir).with_context(|| {
        format!("failed to load bars from {}", config.data_dir.display())
    })?;
    let bars = catalog.bars();

    match cli.command {
        Command::List(args) => {
            let criteria = args.criteria();
            tracing::debug!(query = %query::to_query_string(&criteria), "listing");
            let found = filter::apply(bars, &criteria);
            print_json(&Listing {
                total: bars.len(),
                shown: found.len(),
                bars: found,
            })?;
        }
        Command::Show { id_or_slug } => print_json(catalog.find(&id_or_slug)?)?,
        Command::HappyHour { week: true, .. } => {
            let schedule: Vec<_> = happy_hour::weekly_schedule(bars)
                .into_iter()
                .map(|(day, bars)| {
                    let names: Vec<&str> = bars.iter().map(|b| b.name.as_str()).collect();
                    (full_name(day), names)
                })
                .collect();
            print_json(&schedule)?;
        }
        Command::HappyHour { day, .. } => {
            let day = day_arg(day.as_deref())?;
            tracing::info!(day = full_name(day), "happy hour lookup");
            print_json(&happy_hour::bars_with_happy_hour_on(bars, day))?;
        }
        Command::Open { day, time } => {
            let day = day_arg(day.as_deref())?;
            let time = time_arg(time.as_deref())?;
            print_json(&hours::open_bars_at(bars, day, time))?;
        }
        Command::Nearby { lat, lng, radius } => {
            let found: Vec<Distance> = geo::nearest(bars, Location::new(lat, lng), radius)
                .into_iter()
                .map(|(bar, miles)| Distance { miles, bar })
                .collect();
            print_json(&found)?;
        }
        Command::Category { attribute, value } => {
            let category = category::resolve(&attribute, &value);
            print_json(&serde_json::json!({
                "category": &category,
                "bars": category.select(bars),
            }))?;
        }
        Command::Tags => print_json(&catalog.all_tags())?,
        Command::Center => print_json(&geo::geographic_center(bars))?,
        Command::Validate => {
            let report = catalog.validate();
            for issue in &report.issues {
                tracing::warn!("{issue}");
            }
            print_json(&report)?;
            if !report.is_valid() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
    config::load_dotenv();
    init_tracing();

    run(Cli::parse())
}
