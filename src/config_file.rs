use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};

const CF_CONFIG_DIR: &str = "CF_CONFIG_DIR";
const XDG_CONFIG_HOME: &str = "XDG_CONFIG_HOME";
const APP_DATA: &str = "AppData";

// Config path precedence
// 1. CF_CONFIG_DIR
// 2. XDG_CONFIG_HOME
// 3. AppData (windows only)
// 4. HOME
pub fn config_dir() -> Result<String> {
    let path: PathBuf;

    let cf_config_dir = get_env_var(CF_CONFIG_DIR);
    let xdg_config_home = get_env_var(XDG_CONFIG_HOME);
    let app_data = get_env_var(APP_DATA);

    if !cf_config_dir.is_empty() {
        path = Path::new(&cf_config_dir).to_path_buf();
    } else if !xdg_config_home.is_empty() {
        path = Path::new(&xdg_config_home).join("cf");
    } else if !app_data.is_empty() && std::env::consts::OS == "windows" {
        path = Path::new(&app_data).join("Cloud Foundry CLI");
    } else {
        match dirs::home_dir() {
            Some(home) => {
                path = home.join(".config").join("cf");
            }
            None => {
                return Err(anyhow!("could not find home directory"));
            }
        }
    }

    path_to_string(&path)
}

pub fn config_file() -> Result<String> {
    let config_dir = config_dir()?;
    path_to_string(&Path::new(&config_dir).join("config.toml"))
}

pub fn hosts_file() -> Result<String> {
    let config_dir = config_dir()?;
    path_to_string(&Path::new(&config_dir).join("hosts.toml"))
}

fn path_to_string(path: &Path) -> Result<String> {
    match path.to_str() {
        None => Err(anyhow!("path is not a valid UTF-8 sequence")),
        Some(s) => Ok(s.to_string()),
    }
}

pub fn parse_default_config() -> Result<crate::config_from_file::FileConfig> {
    let config_file_path = config_file()?;

    // A missing config file means we start from the defaults.
    let path = Path::new(&config_file_path);
    let mut root = if !path.exists() {
        crate::config::new_blank_root()?
    } else {
        let contents = read_config_file(&config_file_path)?;
        contents
            .parse::<toml_edit::Document>()
            .with_context(|| format!("failed to parse {}", config_file_path))?
    };

    // The hosts live in their own file.
    let hosts_file_path = hosts_file()?;
    let path = Path::new(&hosts_file_path);
    if path.exists() {
        let contents = read_config_file(&hosts_file_path)?;
        let doc = contents
            .parse::<toml_edit::Document>()
            .with_context(|| format!("failed to parse {}", hosts_file_path))?;
        let hosts = doc.as_table().clone();
        root.insert("hosts", toml_edit::Item::Table(hosts));
    }

    Ok(crate::config::new_config(root))
}

fn read_config_file(filename: &str) -> Result<String> {
    fs::read_to_string(filename).with_context(|| format!("failed to read from {}", filename))
}

pub fn get_env_var(key: &str) -> String {
    match env::var(key) {
        Ok(val) => val,
        Err(_) => "".to_string(),
    }
}
