use bday_post::{config, input, output, render};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bday-post")]
#[command(about = "Batch generator for birthday greeting post images")]
#[command(long_about = "\
Batch generator for birthday greeting post images

Reads people from a JSON or CSV file and composites their photos as
circular portraits onto a template, up to five per post, each labeled
with their name. Posts land in the output directory as Post1.jpg,
Post2.jpg, ...

Input format (JSON array or CSV with a header row):

  [
    {\"name\": \"Alice Raj\", \"image_path\": \"photos/alice.jpg\", \"dob\": \"1994-08-06\"},
    {\"name\": \"Bo Chen\",   \"image_path\": \"photos/bo.jpg\"}
  ]

  name,image_path,dob
  Alice Raj,photos/alice.jpg,1994-08-06
  Bo Chen,photos/bo.jpg,

dob is optional and only used by --only-today.

Run 'bday-post gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./config.toml if present, else stock defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render posts from a people file
    Render {
        /// People file (.json or .csv)
        input: PathBuf,
        /// Only include people whose birthday (dob) is today
        #[arg(long)]
        only_today: bool,
    },
    /// Validate a people file without rendering
    Check {
        /// People file (.json or .csv)
        input: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::load_config_or_default(Path::new("config.toml"))?,
    };

    match cli.command {
        Command::Render { input, only_today } => {
            let records = input::read_records(&input)?;
            let mut people = input::validate(&records)?;
            if only_today {
                people = input::due_today(people, chrono::Local::now().date_naive());
            }
            let paths = render::render_posts(&people, &config)?;
            let batches = input::chunk_people(&people, config.layout.max_per_row);
            output::print_render_output(&batches, &paths);
        }
        Command::Check { input } => {
            let records = input::read_records(&input)?;
            let people = input::validate(&records)?;
            output::print_check_output(&people);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
