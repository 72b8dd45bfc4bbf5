use std::path::PathBuf;

use crate::configuration::Configuration;

pub struct Context {
    pub config: Configuration,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        let config = Configuration {
            data_dir: PathBuf::from(&cli.data_dir),
            api_listen: cli.api_listen,
            log_file: cli.log_file.clone().map(PathBuf::from),
            reset: cli.reset,
        };
        Self { config }
    }

    pub fn db_path(&self) -> PathBuf {
        self.config.data_dir.join("goldmedal.sqlite")
    }
}
