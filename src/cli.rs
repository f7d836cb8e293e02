use crate::{config::Config, recurring_reconciliation};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use placetrust_application::prelude as flows;
use placetrust_core::{
    entities::*,
    search::{GeoFilter, NearbyPlace, SearchCriteria},
};
use placetrust_db_sqlite::Connections;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "placetrust", about, version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// URL of the SQLite database
    #[arg(long, global = true, value_name = "DATABASE_URL")]
    db_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Recompute the rating aggregates from the reviews
    Reconcile {
        /// Only recompute a single place
        #[arg(long, value_name = "ID")]
        place: Option<String>,
        /// Continue an interrupted run after this place
        #[arg(long, value_name = "ID", conflicts_with = "place")]
        resume_after: Option<String>,
    },
    /// Recompute the rating aggregates periodically
    Watch,
    /// List places around a location ordered by distance
    Nearby {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        #[arg(long)]
        radius_km: f64,
        #[arg(long)]
        max_results: Option<usize>,
    },
    /// Search places by term and attributes
    Search {
        #[arg(long)]
        term: Option<String>,
        #[arg(long = "cuisine")]
        cuisines: Vec<String>,
        #[arg(long = "dietary")]
        dietary_tags: Vec<String>,
        #[arg(long)]
        min_price: Option<i64>,
        #[arg(long)]
        max_price: Option<i64>,
        #[arg(long)]
        min_rating: Option<f64>,
        #[arg(long, allow_negative_numbers = true, requires_all = ["lng", "radius_km"])]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true, requires_all = ["lat", "radius_km"])]
        lng: Option<f64>,
        #[arg(long, requires_all = ["lat", "lng"])]
        radius_km: Option<f64>,
        #[arg(long, default_value_t = 1)]
        page: i64,
        #[arg(long)]
        page_size: Option<i64>,
    },
    /// Show the reputation of a user
    User {
        #[arg(long)]
        id: String,
    },
}

pub async fn run() -> Result<()> {
    let args = Args::parse();
    let mut cfg = Config::try_load_from_file_or_default(args.config.as_deref())?;
    if let Some(db_url) = args.db_url {
        cfg.db.conn_sqlite = db_url;
    }

    log::info!("Connecting to SQLite database {}", cfg.db.conn_sqlite);
    let connections = Connections::init(&cfg.db.conn_sqlite, cfg.db.conn_pool_size.into())?;
    placetrust_db_sqlite::run_embedded_database_migrations(connections.exclusive()?)?;

    match args.command {
        Command::Reconcile {
            place: Some(place_id),
            ..
        } => {
            let aggregate = flows::reconcile_place_rating(&connections, &place_id)?;
            println!("{place_id}\t{aggregate}");
        }
        Command::Reconcile {
            place: None,
            resume_after,
        } => {
            let summary = recurring_reconciliation::run_once(
                &connections,
                cfg.reconciliation.settings,
                resume_after.map(Id::from),
            )
            .await?;
            println!(
                "processed: {}, failed: {}, last processed: {}",
                summary.processed,
                summary.failed.len(),
                summary
                    .last_processed
                    .as_ref()
                    .map(Id::as_str)
                    .unwrap_or("-")
            );
            for place_id in &summary.failed {
                println!("failed: {place_id}");
            }
            if summary.cancelled {
                if let Some(last) = &summary.last_processed {
                    println!("cancelled, resume with --resume-after {last}");
                }
            }
        }
        Command::Watch => {
            recurring_reconciliation::run(&connections, cfg.reconciliation).await?;
        }
        Command::Nearby {
            lat,
            lng,
            radius_km,
            max_results,
        } => {
            let center = MapPoint::try_from_lat_lng_deg(lat, lng)?;
            let nearby = flows::find_nearby_places(
                &connections,
                center,
                radius_km,
                max_results.unwrap_or(cfg.search.max_nearby_results),
            )?;
            for NearbyPlace { place, distance } in nearby {
                println!("{}\t{}\t{}\t{}", place.id, distance, place.rating, place.name);
            }
        }
        Command::Search {
            term,
            cuisines,
            dietary_tags,
            min_price,
            max_price,
            min_rating,
            lat,
            lng,
            radius_km,
            page,
            page_size,
        } => {
            let dietary_tags = dietary_tags
                .iter()
                .map(|tag| DietaryType::parse(tag))
                .collect::<Result<Vec<_>, _>>()?;
            let geo = match (lat, lng, radius_km) {
                (Some(lat), Some(lng), Some(radius_km)) => Some(GeoFilter {
                    center: MapPoint::try_from_lat_lng_deg(lat, lng)?,
                    radius: Distance::from_km(radius_km),
                }),
                (None, None, None) => None,
                _ => return Err(anyhow!("Incomplete geo filter")),
            };
            let criteria = SearchCriteria {
                search_term: term,
                cuisines,
                dietary_tags,
                min_price,
                max_price,
                min_rating,
                geo,
                page,
                page_size: page_size.unwrap_or(cfg.search.default_page_size),
            };
            let result = flows::search_places(&connections, &criteria)?;
            println!("total: {}", result.total_count);
            for hit in result.hits {
                let distance = hit
                    .distance
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".into());
                println!(
                    "{}\t{}\t{}\t{}",
                    hit.place.id, distance, hit.place.rating, hit.place.name
                );
            }
        }
        Command::User { id } => {
            let (user, tier) = flows::get_reputation(&connections, &id)?;
            println!(
                "{}\tpoints: {}\treviews: {}\ttier: {}",
                user.id, user.points, user.review_count, tier
            );
        }
    }
    Ok(())
}
