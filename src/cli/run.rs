use crate::cli::RunArgs;
use crate::config::Config;
use crate::output::write_run_artifacts;
use crate::pipeline::{Phase, Pipeline, Query};
use crate::provider::create_generator;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

pub async fn execute(args: RunArgs) -> anyhow::Result<()> {
    info!("Loading config from {:?}", args.config);
    let mut config = Config::load(&args.config)?;

    if let Some(report_dir) = args.report_dir.clone() {
        config.report_dir = report_dir;
    }
    config.validate()?;

    // Caller-level validation: these fail hard before the pipeline starts.
    let query = build_query(&args)?;

    if args.dry_run {
        print_execution_plan(&config, &query);
        return Ok(());
    }

    let generator = create_generator(&config)?;
    let run_id = format!("run-{}", short_id());
    info!("Starting pipeline run {}", run_id);

    let pipeline = Pipeline::new(generator, config.clone());
    let state = pipeline.run(query).await;

    let artifacts = write_run_artifacts(&config.report_dir, &run_id, &state)?;
    tracing::debug!(
        "Artifacts written: {:?}, {:?}, {:?}, {:?}, {:?}",
        artifacts.scout_file,
        artifacts.explorer_file,
        artifacts.itinerary_file,
        artifacts.summary_file,
        artifacts.log_file
    );

    println!("\n📊 Run {} finished: {}", run_id, state.phase);
    println!("   Searches: {} ({} failed)", state.stats.searches, state.stats.failed_searches);
    println!("   Unique links: {}", state.stats.links_found);
    println!(
        "   Batches: {} ({} failed), links analyzed: {}",
        state.stats.batches, state.stats.failed_batches, state.stats.analyzed_count
    );
    println!("   Itinerary events: {}", state.itinerary.len());
    println!("   Rejected links: {}", state.rejected.len());
    println!("   Dropped as online: {}", state.dropped_online.len());
    println!("   Artifacts: {}", artifacts.run_dir.display());

    if args.fail_on_empty && state.phase == Phase::NoResults {
        bail!("no links discovered for this query");
    }

    Ok(())
}

fn build_query(args: &RunArgs) -> anyhow::Result<Query> {
    let city = args.city.trim().to_string();
    if city.is_empty() {
        bail!("city must not be empty");
    }

    let interests: Vec<String> = args
        .interests
        .iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect();
    if interests.is_empty() {
        bail!("at least one interest is required");
    }

    let start_date = parse_date(&args.from).context("invalid --from date")?;
    let end_date = parse_date(&args.to).context("invalid --to date")?;
    if start_date > end_date {
        bail!("--from ({start_date}) must not be after --to ({end_date})");
    }

    Ok(Query {
        city,
        interests,
        start_date,
        end_date,
    })
}

fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("expected YYYY-MM-DD, got '{value}'"))
}

fn short_id() -> String {
    Uuid::new_v4().to_string().chars().take(8).collect()
}

fn print_execution_plan(config: &Config, query: &Query) {
    println!("\n=== Execution Plan ===\n");
    println!("City: {}", query.city);
    println!("Dates: {} to {}", query.start_date, query.end_date);
    println!("Model: {}", config.provider.model);
    println!("Report dir: {:?}", config.report_dir);
    println!(
        "\nSearches to run (concurrency {}):",
        config.scout.max_concurrent_searches
    );
    for interest in &query.interests {
        println!("  - \"{}\" (up to {} links)", interest, config.scout.links_per_search);
    }
    println!(
        "\nAnalysis: batches of {} links, concurrency {}",
        config.explorer.batch_size, config.explorer.max_concurrent_batches
    );
    println!();
}
