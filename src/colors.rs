use crate::config_file::get_env_var;

pub fn env_color_disabled() -> bool {
    !get_env_var("NO_COLOR").is_empty() || get_env_var("CLICOLOR") == "0"
}

pub fn env_color_forced() -> bool {
    !get_env_var("CLICOLOR_FORCE").is_empty() && get_env_var("CLICOLOR_FORCE") != "0"
}

pub struct ColorScheme {
    enabled: bool,
}

impl ColorScheme {
    pub fn new(enabled: bool) -> Self {
        ColorScheme { enabled }
    }

    fn paint(&self, color: ansi_term::Colour, t: &str) -> String {
        if !self.enabled {
            return t.to_string();
        }

        color.bold().paint(t).to_string()
    }

    pub fn red(&self, t: &str) -> String {
        self.paint(ansi_term::Colour::Red, t)
    }

    pub fn green(&self, t: &str) -> String {
        self.paint(ansi_term::Colour::Green, t)
    }

    pub fn cyan(&self, t: &str) -> String {
        self.paint(ansi_term::Colour::Cyan, t)
    }
}
