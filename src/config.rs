use anyhow::Result;

/// This trait describes interaction with the configuration for cf.
pub trait Config {
    /// Returns a value from the configuration by its key.
    fn get(&self, hostname: &str, key: &str) -> Result<String>;
    /// Returns a value from the configuration by its key, with the source.
    fn get_with_source(&self, hostname: &str, key: &str) -> Result<(String, String)>;
    /// Sets a value in the configuration by its key.
    #[cfg(test)]
    fn set(&mut self, hostname: &str, key: &str, value: &str) -> Result<()>;

    /// Get the hosts.
    fn hosts(&self) -> Result<Vec<String>>;
    /// Get the default host.
    fn default_host(&self) -> Result<String>;
    /// Get the default host with the source.
    fn default_host_with_source(&self) -> Result<(String, String)>;
}

pub struct ConfigOption {
    pub key: String,
    pub default_value: String,
}

pub fn config_options() -> Vec<ConfigOption> {
    // color is "enabled" or "disabled" and toggles ANSI colors in the terminal.
    vec![ConfigOption {
        key: "color".to_string(),
        default_value: "enabled".to_string(),
    }]
}

// new_blank_root returns a document holding the default value of every known option.
pub fn new_blank_root() -> Result<toml_edit::Document> {
    let mut doc = toml_edit::Document::new();

    for option in config_options() {
        doc.insert(&option.key, toml_edit::value(option.default_value));
    }

    Ok(doc)
}

pub fn new_config(root: toml_edit::Document) -> crate::config_from_file::FileConfig {
    crate::config_from_file::FileConfig {
        map: crate::config_map::ConfigMap {
            root: root.as_table().clone(),
        },
    }
}

#[cfg(test)]
pub fn new_blank_config() -> Result<crate::config_from_file::FileConfig> {
    Ok(new_config(new_blank_root()?))
}
