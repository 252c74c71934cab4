use log::LevelFilter;

/// Logger configuration used by mural.
///
/// `app_level_filter` applies to the mural crates, `level_filter` to everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerConfig {
    pub app_level_filter: LevelFilter,
    pub level_filter: LevelFilter,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            app_level_filter: LevelFilter::Info,
            level_filter: LevelFilter::Info,
        }
    }
}

impl LoggerConfig {
    pub fn debug() -> Self {
        Self {
            app_level_filter: LevelFilter::Debug,
            level_filter: LevelFilter::Info,
        }
    }

    /// The default filter handed to `env_logger`; `RUST_LOG` still overrides it.
    pub fn filter(&self) -> String {
        let app = self.app_level_filter.to_string().to_lowercase();
        format!(
            "{},mural={app},mural_core={app},mural_audio={app}",
            self.level_filter.to_string().to_lowercase(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_string() {
        assert_eq!(
            LoggerConfig::debug().filter(),
            "info,mural=debug,mural_core=debug,mural_audio=debug"
        );
    }
}
