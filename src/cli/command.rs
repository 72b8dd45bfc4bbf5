use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(
        about = "Load a countries-and-medals dataset into the store",
        long_about = "Read a JSON dataset ({\"countries\": [...], \"medals\": [...]}) and insert the rows into the SQLite store in a single transaction. Countries are upserted by name."
    )]
    Import {
        #[arg(
            long,
            value_name = "PATH",
            help = "Path to the JSON dataset file",
            required = true
        )]
        file: PathBuf,
    },
}
