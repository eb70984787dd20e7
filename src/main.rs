use chrono::Utc;
use clap::{Parser, Subcommand};
use cloud_gal::api::{CloudinaryApi, MediaApi};
use cloud_gal::config::{self, Credentials, FetchConfig};
use cloud_gal::document::{self, RunError};
use cloud_gal::output;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "cloud-gal")]
#[command(about = "Fetch a Cloudinary photo library into a gallery document")]
#[command(long_about = "\
Fetch a Cloudinary photo library into a gallery document

Every top-level Cloudinary folder becomes an album. Assets outside any
folder only appear in the flat carousel list.

  Folder key          Album title
  2024-sol_april  →   2024 Sol April
  2023-12-lisbon  →   2023 12 Lisbon

Albums are sorted by title, descending, so date-prefixed folders come out
newest first. Items inside an album are newest first.

Credentials come from the environment:

  CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY, CLOUDINARY_API_SECRET
  or CLOUDINARY_URL=cloudinary://<key>:<secret>@<cloud>

Run 'cloud-gal gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Output document (overrides `output` in the config file)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch all folders and write the gallery document
    Fetch,
    /// List remote folders without fetching assets
    Folders,
    /// Validate config and credentials without network access
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            output::print_error_report(&error);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), RunError> {
    match cli.command {
        Command::Fetch => {
            let (config, credentials) = load_settings(&cli.config)?;
            let output_path = cli
                .output
                .unwrap_or_else(|| PathBuf::from(&config.output));
            let api = CloudinaryApi::new(&credentials, &config.api);

            println!("==> Fetching {}", credentials.cloud_name);
            let doc = document::build_document(
                &api,
                &config,
                &credentials.cloud_name,
                Utc::now(),
                |event| output::print_fetch_event(&event),
            )?;
            document::write_document(&doc, &output_path)?;
            output::print_fetch_summary(&doc, &output_path);
        }
        Command::Folders => {
            let (config, credentials) = load_settings(&cli.config)?;
            let api = CloudinaryApi::new(&credentials, &config.api);
            let folders = api.list_folders()?;
            output::print_folder_list(&folders);
        }
        Command::Check => {
            let (config, credentials) = load_settings(&cli.config)?;
            println!("==> Config is valid");
            println!("    Cloud: {}", credentials.cloud_name);
            println!(
                "    Output: {}",
                cli.output
                    .unwrap_or_else(|| PathBuf::from(&config.output))
                    .display()
            );
            println!("    Cover overrides: {}", config.covers.len());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config file and the environment credentials.
fn load_settings(config_path: &Path) -> Result<(FetchConfig, Credentials), RunError> {
    let config = config::load_config(config_path)?;
    let credentials = Credentials::from_env_vars(|name| std::env::var(name).ok())?;
    Ok((config, credentials))
}
