use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use roteiro_pdf::itinerary::{PreferenceRecord, build_prompt};
use roteiro_pdf::{DEFAULT_FILE_NAME, ExportOptions, PageSize};

#[derive(Parser)]
#[command(name = "roteiro-pdf")]
#[command(version)]
#[command(about = "Paginate rendered itinerary sections into an A4 PDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Paginate image files (one per section, in order) into a PDF
    Export {
        /// Rendered section images (PNG or JPEG)
        #[arg(value_name = "IMAGE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output PDF file
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_FILE_NAME)]
        output: PathBuf,

        /// JPEG quality for embedded slices (1-100)
        #[arg(short, long, default_value_t = 95)]
        quality: u8,

        /// Page width in millimetres
        #[arg(long, default_value_t = PageSize::A4.width)]
        page_width: f32,

        /// Page height in millimetres
        #[arg(long, default_value_t = PageSize::A4.height)]
        page_height: f32,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Document author (the traveller's name)
        #[arg(long)]
        author: Option<String>,
    },

    /// Print the generation prompt for a preference record (JSON)
    Prompt {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn run(cli: Cli) -> Result<(), roteiro_pdf::Error> {
    match cli.command {
        Commands::Export {
            inputs,
            output,
            quality,
            page_width,
            page_height,
            title,
            author,
        } => {
            let options = ExportOptions {
                page: PageSize::new(page_width, page_height),
                jpeg_quality: quality,
                title,
                author,
                ..Default::default()
            };
            let exported = roteiro_pdf::export_image_files(&inputs, &output, &options)?;
            println!(
                "Wrote {} ({} pages, {} bytes)",
                output.display(),
                exported.page_count,
                exported.bytes.len()
            );
        }
        Commands::Prompt { input } => {
            let json = std::fs::read_to_string(&input)?;
            let prefs = PreferenceRecord::from_json(&json)?;
            println!("{}", build_prompt(&prefs));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
