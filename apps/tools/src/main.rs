use std::{path::PathBuf, str::FromStr, sync::Arc};

use anyhow::{anyhow, Context, Result};
use catalog::Catalog;
use clap::{Parser, Subcommand};
use planner::format;
use serde::Serialize;
use server_api::{ApiContext, PhotoLibrary};
use shared::{
    domain::AttractionCategory,
    protocol::{FlightSort, ItineraryView, MealSelectionRequest, SwipeEvent},
};
use storage::SessionStore;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    /// Catalog file to use instead of the bundled cities.
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[arg(long, default_value = "images")]
    images_dir: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Cities,
    Attractions {
        #[arg(long)]
        city: String,
        #[arg(long = "category", value_parser = AttractionCategory::from_str)]
        categories: Vec<AttractionCategory>,
    },
    Itinerary {
        #[arg(long)]
        city: String,
        /// Fill a meal gap, as `DAY=RESTAURANT`.
        #[arg(long, value_parser = parse_meal)]
        meal: Option<MealSelectionRequest>,
        /// Print a table instead of JSON.
        #[arg(long)]
        plain: bool,
    },
    Flights {
        #[arg(long)]
        city: String,
        #[arg(long, default_value = "listed", value_parser = parse_sort)]
        sort: FlightSort,
    },
    /// Replays events against a fresh session and prints the resulting view.
    Swipe {
        #[arg(long)]
        city: String,
        /// `like`, `skip`, `prev_photo`, `next_photo`, `finalize` or
        /// `filter=Museum,Shopping`.
        #[arg(long = "event", value_parser = parse_event)]
        events: Vec<SwipeEvent>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load catalog '{}'", path.display()))?,
        None => Catalog::builtin()?,
    };
    let ctx = ApiContext {
        store: SessionStore::new(),
        catalog: Arc::new(catalog),
        photos: PhotoLibrary::new(&cli.images_dir),
    };

    match cli.command {
        Command::Cities => print_json(&server_api::list_cities(&ctx).await),
        Command::Attractions { city, categories } => {
            let attractions = server_api::list_attractions(&ctx, &city, categories).await?;
            print_json(&attractions)
        }
        Command::Itinerary { city, meal, plain } => {
            let session = server_api::create_session(&ctx).await.session_id;
            let view = match meal {
                Some(request) => server_api::select_meal(&ctx, session, &city, request).await?,
                None => server_api::itinerary_view(&ctx, session, &city).await?,
            };
            if plain {
                print_itinerary(&view);
                Ok(())
            } else {
                print_json(&view)
            }
        }
        Command::Flights { city, sort } => {
            print_json(&server_api::list_flights(&ctx, &city, sort).await?)
        }
        Command::Swipe { city, events } => {
            let session = server_api::create_session(&ctx).await.session_id;
            let mut view = server_api::swipe_view(&ctx, session, &city).await?;
            for event in events {
                view = server_api::apply_swipe_event(&ctx, session, &city, event).await?;
            }
            print_json(&view)
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_itinerary(view: &ItineraryView) {
    for day in &view.days {
        println!("{} ({}) - {}", day.label, day.date, day.theme);
        for row in &day.rows {
            println!(
                "  {:<15} {:<28} {:>8}  {}",
                format::time_range(&row.time_range),
                row.location,
                format::duration(row.duration_minutes),
                format::category(&row.category),
            );
        }
    }
    for gap in view.meal_gaps.iter().filter(|gap| gap.filled_by.is_none()) {
        println!("{} has no {} planned", gap.day, gap.meal);
    }
    println!(
        "{} days, {} attractions, {} meals, {}",
        view.summary.days,
        view.summary.attractions,
        view.summary.meals,
        format::hours_and_minutes(view.summary.total_minutes),
    );
}

fn parse_meal(raw: &str) -> Result<MealSelectionRequest> {
    let (day, restaurant) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected DAY=RESTAURANT, got '{raw}'"))?;
    Ok(MealSelectionRequest {
        day: day.trim().to_string(),
        restaurant: restaurant.trim().to_string(),
    })
}

fn parse_sort(raw: &str) -> Result<FlightSort> {
    match raw.to_ascii_lowercase().as_str() {
        "listed" => Ok(FlightSort::Listed),
        "cost" => Ok(FlightSort::Cost),
        "rating" => Ok(FlightSort::Rating),
        other => Err(anyhow!("unknown sort '{other}' (listed, cost, rating)")),
    }
}

fn parse_event(raw: &str) -> Result<SwipeEvent> {
    if let Some(list) = raw.strip_prefix("filter=") {
        let categories = list
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(AttractionCategory::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(SwipeEvent::SetFilter { categories });
    }
    match raw {
        "like" => Ok(SwipeEvent::Like),
        "skip" => Ok(SwipeEvent::Skip),
        "prev_photo" => Ok(SwipeEvent::PrevPhoto),
        "next_photo" => Ok(SwipeEvent::NextPhoto),
        "finalize" => Ok(SwipeEvent::Finalize),
        other => Err(anyhow!("unknown swipe event '{other}'")),
    }
}
