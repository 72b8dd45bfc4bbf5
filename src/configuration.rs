use std::{net::SocketAddr, path::PathBuf};

#[derive(Clone)]
pub struct Configuration {
    pub data_dir: PathBuf,
    pub api_listen: SocketAddr,
    pub log_file: Option<PathBuf>,
    pub reset: bool,
}
