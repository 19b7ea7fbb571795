use crate::cli::EditArgs;
use crate::config::Config;
use crate::editor::{process_edit, EditRequest};
use crate::error::EditError;
use crate::provider::create_generator;
use anyhow::Context;
use chrono::{Local, NaiveDate};

pub async fn execute(args: EditArgs) -> anyhow::Result<()> {
    let config = Config::load(&args.config)?;
    config.validate()?;

    let raw_activity =
        std::fs::read_to_string(&args.activity).map_err(|e| EditError::ReadActivity {
            path: args.activity.clone(),
            source: e,
        })?;
    let current_activity: serde_json::Value =
        serde_json::from_str(&raw_activity).map_err(EditError::ActivityJson)?;

    let day_date = match &args.date {
        Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .with_context(|| format!("expected YYYY-MM-DD, got '{value}'"))?,
        None => Local::now().date_naive(),
    };

    let request = EditRequest {
        edit_request: args.request.clone(),
        current_activity,
        city: args.city.clone(),
        day_date,
        interests: args.interests.clone().unwrap_or_default(),
    };

    let generator = create_generator(&config)?;
    let response = process_edit(generator.as_ref(), &config, &request).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
