//! Renders the intervention calendar as JSON for the presentation layer.
//!
//! Usage: `render_calendar [QUERY]` where `QUERY` is the calendar's filter
//! query string, e.g. `mode=daily&date=2024-05-06&technician=Mario`.

use std::env;

use chrono::Utc;
use config::Config;
use dotenvy::dotenv;

use fieldservice_calendar::forms::calendar::CalendarFilterForm;
use fieldservice_calendar::models::config::CalendarConfig;
use fieldservice_calendar::repository::JsonInterventionRepository;
use fieldservice_calendar::services::calendar::load_calendar_page;
use fieldservice_calendar::services::z_order::ZOrderManager;

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            std::process::exit(1);
        }
    };

    let calendar_config = match settings.try_deserialize::<CalendarConfig>() {
        Ok(calendar_config) => calendar_config,
        Err(err) => {
            log::error!("Error loading calendar config: {}", err);
            std::process::exit(1);
        }
    };

    let query = env::args().nth(1).unwrap_or_default();
    let form = match CalendarFilterForm::from_query(&query) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Error decoding filter {query:?}: {err}");
            std::process::exit(2);
        }
    };

    let repo = JsonInterventionRepository::new(&calendar_config.interventions_path);
    let today = Utc::now()
        .with_timezone(&calendar_config.display_offset())
        .date_naive();
    let mut z_order = ZOrderManager::new();

    let page = match load_calendar_page(&repo, form, &calendar_config, today, &mut z_order) {
        Ok(page) => page,
        Err(err) => {
            log::error!("Error rendering calendar: {err}");
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&page) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            log::error!("Error serializing calendar: {err}");
            std::process::exit(1);
        }
    }
}
