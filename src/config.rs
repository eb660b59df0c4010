// SPDX-License-Identifier: MPL-2.0

use std::{fs::read_to_string, path::PathBuf};

const APP_NAME: &str = "hourbook";
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";

pub fn load_config(config_path: Option<PathBuf>) -> Config {
    let config_toml: PartialConfig = config_path
        .or_else(|| dirs::config_local_dir().map(|dir| dir.join(APP_NAME).join("config.toml")))
        .and_then(|path| {
            log::debug!("Reading configuration at path {:?}", &path);
            match read_to_string(&path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => Some(config),
                    Err(err) => {
                        log::warn!("Could not parse config at path {:?} {err}", path);
                        None
                    }
                },
                Err(err) => {
                    log::trace!(
                        "Could not read path {path:?} (assuming no config file set yet) {err}"
                    );
                    None
                }
            }
        })
        .unwrap_or_default();

    let database_path = config_toml
        .database_path
        .or_else(|| dirs::data_local_dir().map(|dir| dir.join(APP_NAME).join("hourbook.db")))
        .expect("OS data directory could not be determined, use config file to set a database file location");
    log::trace!("Config: database_path is {:?}", &database_path);

    let listen_addr = config_toml
        .listen_addr
        .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
    log::trace!("Config: listen_addr is {listen_addr}");

    Config {
        database_path,
        listen_addr,
    }
}

pub struct Config {
    pub database_path: PathBuf,
    pub listen_addr: String,
}

#[derive(Default, serde::Deserialize)]
struct PartialConfig {
    database_path: Option<PathBuf>,
    listen_addr: Option<String>,
}
