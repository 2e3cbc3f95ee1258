use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use changelog_handler::cli::correct_option;
use changelog_handler::cli::orchestration::{self, ChangelogLocation, ExtractArgs};
use changelog_handler::config;
use changelog_handler::domain::{Category, TagOrder, VersionId};
use changelog_handler::ui;

#[derive(clap::Parser)]
#[command(
    name = "changelog-handler",
    version,
    disable_version_flag = true,
    about = "Parse a change log for specific version changes"
)]
struct Args {
    #[arg(
        value_name = "VERSION",
        required_unless_present = "list",
        help = "The version to parse the changelog for (or 'unreleased')"
    )]
    release: Option<VersionId>,

    #[arg(short, long, help = "Path to output changes to")]
    output_path: Option<PathBuf>,

    #[arg(
        short,
        long,
        num_args = 1..,
        value_name = "TAG",
        help = "Order that change tags will appear"
    )]
    tag_order: Option<Vec<Category>>,

    #[arg(long, help = "Optional heading to prepend before outputting changes")]
    prepend: Option<String>,

    #[arg(long, help = "Append the link to the version found in the change log")]
    add_link: bool,

    #[arg(
        short = 'd',
        long,
        conflicts_with = "changelog_path",
        help = "Path to the directory to search for the change log"
    )]
    changelog_dir: Option<PathBuf>,

    #[arg(
        short = 'p',
        long,
        help = "Path to the change log; use this to specify an alternate filename"
    )]
    changelog_path: Option<PathBuf>,

    #[arg(long, help = "Print the structured record of the version as JSON")]
    json: bool,

    #[arg(long, help = "List the versions found in the change log and exit")]
    list: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Enable debug logging on stderr")]
    verbose: bool,

    #[arg(
        short = 'v',
        long = "version",
        action = clap::ArgAction::Version,
        help = "Print version information"
    )]
    version: (),
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            process::exit(1);
        }
    };

    let location = ChangelogLocation {
        dir: args.changelog_dir.clone(),
        path: args.changelog_path.clone(),
    };

    if args.list {
        match orchestration::run_list(&location, &config) {
            Ok(list) => ui::write_output(&list, None)?,
            Err(e) => {
                ui::display_error(&e.to_string());
                process::exit(1);
            }
        }
        return Ok(());
    }

    let Some(version) = args.release.clone() else {
        Args::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "a VERSION is required",
            )
            .exit();
    };

    // Command-line order wins over the configured one
    let tag_order = match &args.tag_order {
        Some(categories) => TagOrder::new(categories).unwrap_or_else(|e| {
            Args::command()
                .error(clap::error::ErrorKind::ValueValidation, e.to_string())
                .exit()
        }),
        None => match config.tag_order() {
            Ok(order) => order,
            Err(e) => {
                ui::display_error(&e.to_string());
                process::exit(1);
            }
        },
    };

    let extract_args = ExtractArgs {
        version,
        location,
        tag_order,
        prepend: args.prepend.as_deref().map(correct_option),
        add_link: args.add_link || config.output.add_link,
        json: args.json,
    };

    let result = match orchestration::run_extract(&extract_args, &config) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&e.to_string());
            process::exit(1);
        }
    };

    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }

    if let Err(e) = ui::write_output(&result.output, args.output_path.as_deref()) {
        ui::display_error(&format!("Failed to write changes: {}", e));
        process::exit(1);
    }

    if let Some(path) = &args.output_path {
        ui::display_success(&format!(
            "Wrote changes for {} from {} to {}",
            extract_args.version,
            result.changelog_path.display(),
            path.display()
        ));
    }

    Ok(())
}

/// Installs a stderr subscriber; `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
