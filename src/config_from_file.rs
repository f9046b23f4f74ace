use anyhow::{anyhow, Result};

// This type implements a Config interface and represents a config file on disk.
#[derive(Debug, Clone)]
pub struct FileConfig {
    pub map: crate::config_map::ConfigMap,
}

#[derive(Debug, Clone)]
pub struct HostConfig {
    pub map: crate::config_map::ConfigMap,
    pub host: String,
}

impl FileConfig {
    fn get_hosts_table(&self) -> Result<toml_edit::Table> {
        match self.map.find_entry("hosts") {
            Ok(hosts) => match hosts.as_table() {
                Some(h) => Ok(h.clone()),
                None => Err(anyhow!("hosts is not a table")),
            },
            // No hosts have been configured yet.
            Err(_) => Ok(toml_edit::Table::new()),
        }
    }

    fn get_host_entries(&self) -> Result<Vec<HostConfig>> {
        let hosts_table = self.get_hosts_table()?;

        let host_configs = hosts_table
            .iter()
            .map(|(host, v)| {
                let root = if let toml_edit::Item::Table(t) = v {
                    t.clone()
                } else {
                    toml_edit::Table::new()
                };

                HostConfig {
                    map: crate::config_map::ConfigMap { root },
                    host: host.to_string(),
                }
            })
            .collect();

        Ok(host_configs)
    }

    fn get_host_config(&self, hostname: &str) -> Result<HostConfig> {
        self.get_host_entries()?
            .into_iter()
            .find(|host_config| host_config.host == hostname)
            .ok_or_else(|| anyhow!("host {} not found", hostname))
    }
}

impl crate::config::Config for FileConfig {
    fn get(&self, hostname: &str, key: &str) -> Result<String> {
        let (val, _) = self.get_with_source(hostname, key)?;
        Ok(val)
    }

    fn get_with_source(&self, hostname: &str, key: &str) -> Result<(String, String)> {
        if hostname.is_empty() {
            let default_source = crate::config_file::config_file()?;
            let value = self.map.get_string_value(key)?;

            return Ok((value, default_source));
        }

        let hosts_source = crate::config_file::hosts_file()?;

        let host_config = self.get_host_config(hostname)?;

        let value = host_config.map.get_string_value(key)?;

        Ok((value, hosts_source))
    }

    #[cfg(test)]
    fn set(&mut self, hostname: &str, key: &str, value: &str) -> Result<()> {
        if hostname.is_empty() {
            return self.map.set_string_value(key, value);
        }

        let mut host_config = match self.get_host_config(hostname) {
            Ok(host_config) => host_config,
            // The host doesn't exist yet, start it from an empty table.
            Err(_) => HostConfig {
                map: crate::config_map::ConfigMap {
                    root: toml_edit::Table::new(),
                },
                host: hostname.to_string(),
            },
        };

        host_config.map.set_string_value(key, value)?;

        let mut hosts_table = self.get_hosts_table()?;
        hosts_table.insert(hostname, toml_edit::Item::Table(host_config.map.root));

        // Reset the hosts.
        self.map.root.insert("hosts", toml_edit::Item::Table(hosts_table));

        Ok(())
    }

    fn hosts(&self) -> Result<Vec<String>> {
        let hosts_table = self.get_hosts_table()?;

        Ok(hosts_table.iter().map(|(host, _)| host.to_string()).collect())
    }

    fn default_host(&self) -> Result<String> {
        let (host, _) = self.default_host_with_source()?;
        Ok(host)
    }

    fn default_host_with_source(&self) -> Result<(String, String)> {
        let hosts = self.hosts()?;

        if hosts.is_empty() {
            return Err(anyhow!("No hosts found"));
        }

        let hosts_source = crate::config_file::hosts_file()?;

        if hosts.len() == 1 {
            return Ok((hosts[0].to_string(), hosts_source));
        }

        // Find the default host.
        for host_config in self.get_host_entries()? {
            if host_config.map.get_bool_value("default")? {
                return Ok((host_config.host, hosts_source));
            }
        }

        Err(anyhow!("No host has been set as default"))
    }
}
