use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};

use crate::config::logger_config::LoggerConfig;

pub const DEFAULT_GUI_PATH: &str = "data/mural";
pub const MODULES_PATH: &str = "data/modules";

/// The configuration shared by the session and the command table.
pub type SharedConfig = Arc<RwLock<AppConfig>>;

/// Front-end configuration, read from and written back to a `.mural` file.
/// Please use [`AppConfigBuilder`] if you want to build it from code.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub lang: String,
    /// Id of the game module.
    pub module: String,
    /// Explicit GUI directory, wins over the module one.
    pub gui_path: Option<PathBuf>,
    pub debug: bool,
    pub fullscreen: bool,
    /// Width and height; `0x0` keeps the native resolution.
    pub resolution: (f32, f32),
    pub max_fps: u32,
    pub map_fow: bool,
    pub map_full: bool,
    pub main_font: String,
    pub menu_music: String,
    pub button_click_sound: String,
    pub effects_volume: f32,
    pub effects_mute: bool,
    pub music_volume: f32,
    pub music_mute: bool,
    /// Login and password.
    pub server_user: Option<(String, String)>,
    /// Host and port.
    pub server: Option<(String, u16)>,
    pub server_close: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lang: "english".to_string(),
            module: String::new(),
            gui_path: None,
            debug: false,
            fullscreen: false,
            resolution: (0.0, 0.0),
            max_fps: 60,
            map_fow: true,
            map_full: false,
            main_font: String::new(),
            menu_music: String::new(),
            button_click_sound: String::new(),
            effects_volume: 0.0,
            effects_mute: false,
            music_volume: 0.0,
            music_mute: false,
            server_user: None,
            server: None,
            server_close: false,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "" | "true" | "on" | "1" => Some(true),
        "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn parse_pair<A: std::str::FromStr, B: std::str::FromStr>(values: &[&str]) -> Option<(A, B)> {
    match values {
        [a, b] => Some((a.trim().parse().ok()?, b.trim().parse().ok()?)),
        _ => None,
    }
}

impl AppConfig {
    /// Directory holding the UI archives, descriptors and saves.
    pub fn gui_path(&self) -> PathBuf {
        match (&self.gui_path, self.module.is_empty()) {
            (Some(path), _) => path.clone(),
            (None, false) => Path::new(MODULES_PATH).join(&self.module).join("mural"),
            (None, true) => PathBuf::from(DEFAULT_GUI_PATH),
        }
    }

    pub fn logger_config(&self) -> LoggerConfig {
        if self.debug {
            LoggerConfig::debug()
        } else {
            LoggerConfig::default()
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).with_context(|| format!("reading config {:?}", path))?;
        Ok(Self::parse(&text))
    }

    /// Parses `key:value` lines. Unknown keys and malformed values are logged and skipped.
    pub fn parse(text: &str) -> Self {
        let mut config = Self::default();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            // a bare key is a flag
            let (key, value) = line.split_once(':').unwrap_or((line, ""));
            if let Err(reason) = config.apply(key.trim(), value.trim()) {
                log::warn!("config line {}: {}: {}", number + 1, key.trim(), reason);
            }
        }
        config
    }

    fn apply(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let values: Vec<&str> = value.split(';').collect();
        let invalid = || format!("invalid value {:?}", value);
        let flag = || parse_bool(value).ok_or_else(invalid);
        let float = || value.parse::<f32>().map_err(|_| invalid());

        match key {
            "lang" => self.lang = value.to_string(),
            "module" => self.module = value.to_string(),
            "gui-path" => self.gui_path = Some(PathBuf::from(value)),
            "debug" => self.debug = flag()?,
            "fullscreen" => self.fullscreen = flag()?,
            "resolution" => self.resolution = parse_pair(&values).ok_or_else(invalid)?,
            "max-fps" => self.max_fps = value.parse().map_err(|_| invalid())?,
            "map-fow" => self.map_fow = flag()?,
            "map-full" => self.map_full = flag()?,
            "main-font" => self.main_font = value.to_string(),
            "menu-music" => self.menu_music = value.to_string(),
            "button-click-sound" => self.button_click_sound = value.to_string(),
            "effects-volume" => self.effects_volume = float()?,
            "effects-mute" => self.effects_mute = flag()?,
            "music-volume" => self.music_volume = float()?,
            "music-mute" => self.music_mute = flag()?,
            "server-user" => self.server_user = Some(parse_pair(&values).ok_or_else(invalid)?),
            "server" => self.server = Some(parse_pair(&values).ok_or_else(invalid)?),
            "server-close" => self.server_close = flag()?,
            _ => return Err("unknown key".to_string()),
        }
        Ok(())
    }

    /// The configuration in `.mural` syntax.
    pub fn to_config_string(&self) -> String {
        let mut out = String::new();
        let mut line = |key: &str, value: &dyn std::fmt::Display| {
            let _ = writeln!(out, "{}:{}", key, value);
        };

        line("lang", &self.lang);
        if !self.module.is_empty() {
            line("module", &self.module);
        }
        if let Some(path) = &self.gui_path {
            line("gui-path", &path.display());
        }
        line("debug", &self.debug);
        line("fullscreen", &self.fullscreen);
        line("resolution", &format!("{};{}", self.resolution.0, self.resolution.1));
        line("max-fps", &self.max_fps);
        line("map-fow", &self.map_fow);
        line("map-full", &self.map_full);
        line("main-font", &self.main_font);
        line("menu-music", &self.menu_music);
        line("button-click-sound", &self.button_click_sound);
        line("effects-volume", &self.effects_volume);
        line("effects-mute", &self.effects_mute);
        line("music-volume", &self.music_volume);
        line("music-mute", &self.music_mute);
        if let Some((login, password)) = &self.server_user {
            line("server-user", &format!("{};{}", login, password));
        }
        if let Some((host, port)) = &self.server {
            line("server", &format!("{};{}", host, port));
        }
        line("server-close", &self.server_close);
        out
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_config_string()).with_context(|| format!("writing config {:?}", path))?;
        log::debug!("config saved to {:?}", path);
        Ok(())
    }

    pub fn into_shared(self) -> SharedConfig {
        Arc::new(RwLock::new(self))
    }
}

/// `AppConfigBuilder` is a convenience builder to create a `AppConfig` from code.
#[derive(Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Create a new `AppConfigBuilder` builder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lang(mut self, lang: &str) -> Self {
        self.config.lang = lang.to_string();
        self
    }

    /// Sets the game module; the GUI path follows it unless set explicitly.
    pub fn with_module(mut self, module: &str) -> Self {
        self.config.module = module.to_string();
        self
    }

    pub fn with_gui_path(mut self, gui_path: impl Into<PathBuf>) -> Self {
        self.config.gui_path = Some(gui_path.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    pub fn with_resolution(mut self, width: f32, height: f32) -> Self {
        self.config.resolution = (width, height);
        self
    }

    pub fn with_menu_music(mut self, menu_music: &str) -> Self {
        self.config.menu_music = menu_music.to_string();
        self
    }

    pub fn with_music_volume(mut self, volume: f32, mute: bool) -> Self {
        self.config.music_volume = volume;
        self.config.music_mute = mute;
        self
    }

    pub fn with_effects_volume(mut self, volume: f32, mute: bool) -> Self {
        self.config.effects_volume = volume;
        self.config.effects_mute = mute;
        self
    }

    /// Retrieves the configuration built
    pub fn get(self) -> AppConfig {
        self.config
    }
}
