use std::path::{Path, PathBuf};

use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info};

use markerparser::{files, OutputFormat};

/// Translate between marker and artillery trp arrays
#[derive(Parser)]
#[command(name = "markerparser")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// From a Sweet Markers array to Tuntematon Fire Support trps
    #[command(alias = "totfs")]
    ToTuntematonFireSupport {
        /// Load the marker array from FILE
        #[arg(short, long, visible_alias = "sourceFile", value_name = "FILE")]
        source_file: PathBuf,

        /// Layout of the converted trp entries
        #[arg(long, value_enum, default_value_t = Format::Padded)]
        format: Format,
    },

    /// From Tuntematon Fire Support trps to a Sweet Markers array (not implemented)
    #[command(alias = "tosm")]
    ToSweetMarkers {
        /// Load the trp array from FILE
        #[arg(short, long, visible_alias = "sourceFile", value_name = "FILE")]
        source_file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// [name,x,y]
    Padded,
    /// [name,x,y,[x,y]]
    PaddedWithCoords,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Padded => OutputFormat::Padded,
            Format::PaddedWithCoords => OutputFormat::PaddedWithCoords,
        }
    }
}

fn main() {
    fn inner(cli: Cli) -> Result<(), markerparser::Error> {
        let converted = match cli.command {
            Commands::ToTuntematonFireSupport {
                source_file,
                format,
            } => {
                info!("Running sweet-to-tun on file {:?}", source_file);
                let text = files::read_source(&source_file)?;
                markerparser::convert(&text, format.into())?
            }
            Commands::ToSweetMarkers { source_file } => {
                info!("Running tun-to-sweet on file {:?}", source_file);
                let text = files::read_source(&source_file)?;
                markerparser::tun_to_sweet(&text)?
            }
        };

        info!("Parsed the input to the following array:");
        println!("\n{}\n", converted);

        files::write_timestamped(Path::new("."), &Local::now(), &converted)?;

        info!("Finished");
        Ok(())
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = inner(cli) {
        error!("{}", e);
        std::process::exit(2);
    }
}
