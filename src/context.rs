use anyhow::Result;

use crate::config::Config;

pub struct Context<'a> {
    pub config: &'a mut (dyn Config + Send + Sync + 'a),
    pub io: crate::iostreams::IoStreams,
    pub debug: bool,
}

impl<'a> Context<'a> {
    pub fn new(config: &'a mut (dyn Config + Send + Sync + 'a)) -> Self {
        // Let's get our IO streams.
        let mut io = crate::iostreams::IoStreams::system();

        // The config can only turn color off, never force it on.
        if let Ok(color) = config.get("", "color") {
            if color == "disabled" {
                io.set_color_enabled(false);
            }
        }

        Context {
            config,
            io,
            debug: false,
        }
    }

    /// Returns the session stored for the default host.
    pub fn session(&self) -> crate::session::ConfigSession {
        crate::session::ConfigSession::from_config(&*self.config)
    }

    /// Returns an API client for the host the session is logged in to.
    pub fn api_client(&self, session: &crate::session::ConfigSession) -> Result<crate::http::CloudControllerClient> {
        let skip_ssl_validation = self
            .config
            .get(&session.host, "skip_ssl_validation")
            .map(|v| v == "true")
            .unwrap_or(false);

        Ok(crate::http::CloudControllerClient::new(
            &session.host,
            &session.token,
            skip_ssl_validation,
        )?)
    }
}
