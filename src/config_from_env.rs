use anyhow::Result;

use crate::config_file::get_env_var;

const CF_HOST: &str = "CF_HOST";
const CF_TOKEN: &str = "CF_TOKEN";

// EnvConfig layers CF_HOST and CF_TOKEN over another config.
pub struct EnvConfig<'a> {
    pub config: &'a mut (dyn crate::config::Config + Send + Sync + 'a),
}

impl<'a> EnvConfig<'a> {
    pub fn inherit_env(config: &'a mut (dyn crate::config::Config + Send + Sync + 'a)) -> Self {
        EnvConfig { config }
    }
}

impl crate::config::Config for EnvConfig<'_> {
    fn get(&self, hostname: &str, key: &str) -> Result<String> {
        let (val, _) = self.get_with_source(hostname, key)?;
        Ok(val)
    }

    fn get_with_source(&self, hostname: &str, key: &str) -> Result<(String, String)> {
        if !hostname.is_empty() && key == "token" {
            let token = get_env_var(CF_TOKEN);
            if !token.is_empty() {
                return Ok((token, CF_TOKEN.to_string()));
            }
        }

        self.config.get_with_source(hostname, key)
    }

    #[cfg(test)]
    fn set(&mut self, hostname: &str, key: &str, value: &str) -> Result<()> {
        self.config.set(hostname, key, value)
    }

    fn hosts(&self) -> Result<Vec<String>> {
        let mut hosts = self.config.hosts()?;

        let host = get_env_var(CF_HOST);
        if !host.is_empty() && !hosts.contains(&host) {
            hosts.push(host);
        }

        Ok(hosts)
    }

    fn default_host(&self) -> Result<String> {
        let (host, _) = self.default_host_with_source()?;
        Ok(host)
    }

    fn default_host_with_source(&self) -> Result<(String, String)> {
        let host = get_env_var(CF_HOST);
        if !host.is_empty() {
            return Ok((host, CF_HOST.to_string()));
        }

        self.config.default_host_with_source()
    }
}
