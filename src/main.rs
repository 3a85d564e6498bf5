// Bring in required crates
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use diet_recipe::templates::{LOADING, render_state};
use diet_recipe::{BackendConfig, BuildMode, DietType, HttpBackend, RecipeController, RequestState};

#[derive(Parser)]
#[command(name = "diet-recipe", about = "Get a dinner recipe that fits your diet")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Recipe service base URL
    #[arg(long, global = true, env = "RECIPE_BACKEND_URL")]
    backend_url: Option<String>,

    /// Selects the default base when no URL is given
    #[arg(long, global = true, value_enum, env = "RECIPE_BUILD_MODE")]
    mode: Option<BuildMode>,

    /// Origin the production `/api` base is resolved against
    #[arg(long, global = true, env = "RECIPE_SITE_ORIGIN")]
    site_origin: Option<String>,

    /// Give up on requests after this many seconds (default: wait forever)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Ask the service for a recipe
    Recipe {
        #[arg(long, value_enum, default_value_t = DietType::Vegetarian)]
        diet: DietType,

        /// Cuisine preference, e.g. "Italian"
        #[arg(long, default_value = "")]
        cuisine: String,

        /// Cooking time in minutes (10-120); empty to let the service choose
        #[arg(long, default_value = "30")]
        cooking_time: String,

        /// Print the recipe as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Check that the service is up
    Health,
}

impl Cli {
    fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            backend_url: self.backend_url.clone(),
            mode: self.mode.unwrap_or_default(),
            site_origin: self.site_origin.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "diet_recipe=debug,info" } else { "diet_recipe=info,warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = cli.backend_config();
    let backend = HttpBackend::new(config.timeout)?;

    match cli.command {
        Command::Recipe { diet, cuisine, cooking_time, json } => {
            let controller = RecipeController::new(backend, config);
            controller.set_diet_type(diet).await;
            controller.set_cuisine(cuisine).await;
            controller.set_cooking_time(cooking_time).await;
            eprintln!("{}", LOADING);

            let state = controller.submit().await;
            match (&state, json) {
                (RequestState::Succeeded(recipe), true) => {
                    println!("{}", serde_json::to_string_pretty(recipe)?)
                }
                (RequestState::Failed(err), _) => {
                    eprintln!("{}", render_state(&state)?);
                    // 2 for bad input or configuration, 1 for service failures
                    let code = if err.is_client_side() { 2 } else { 1 };
                    return Ok(ExitCode::from(code));
                }
                _ => println!("{}", render_state(&state)?),
            }
        }
        Command::Health => {
            let base = config.endpoint_base()?;
            let health = backend.health(&base).await?;
            println!("{base}: {}", health.status);
        }
    }
    Ok(ExitCode::SUCCESS)
}

// Entry point of the app
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // If run() returns an error, log and exit
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
