use mural_core::types::Volume;

use super::{
    required_option, unknown_option, Command, CommandError, CommandHandler, CommandResult, STATUS_AUDIO,
    STATUS_BAD_OPTION,
};
use crate::gui::GuiData;

const OPTIONS: &[&str] = &[
    "play",
    "stop",
    "next",
    "prev",
    "music-volume",
    "set-music-volume",
    "set-music-mute",
    "effects-volume",
    "set-effects-volume",
    "set-effects-mute",
];

fn volume_arg(cmd: &Command) -> Result<Volume, CommandError> {
    let value = cmd.arg(0).ok_or_else(|| CommandError::args("no volume given"))?;
    let volume: f32 = value
        .parse()
        .map_err(|_| CommandError::args(format!("invalid volume: {}", value)))?;
    if !volume.is_finite() {
        return Err(CommandError::args(format!("invalid volume: {}", value)));
    }
    Ok(Volume(volume))
}

fn mute_arg(cmd: &Command) -> Result<bool, CommandError> {
    match cmd.arg(0) {
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(value) => Err(CommandError::args(format!("invalid mute value: {}, expected true|false", value))),
        None => Err(CommandError::args("no mute value given, expected true|false")),
    }
}

fn audio_error(e: anyhow::Error) -> CommandError {
    CommandError::new(STATUS_AUDIO, format!("{:#}", e))
}

/// `guiaudio <op> [value]`, music through the main menu player and effects through the
/// global effects sink. Volume and mute changes are kept in the configuration.
pub fn gui_audio(gui: &mut GuiData, cmd: &Command) -> Result<String, CommandError> {
    let option = required_option(cmd, OPTIONS)?;
    if gui.menu().is_none() {
        return Err(CommandError::new(STATUS_BAD_OPTION, "no main menu"));
    }

    match option {
        "effects-volume" => return Ok(gui.effects().volume().0.to_string()),
        "set-effects-volume" => {
            let volume = volume_arg(cmd)?;
            gui.effects().set_volume(volume);
            gui.config_mut().effects_volume = volume.0;
            return Ok(format!("effects volume set to {}", volume.0));
        }
        "set-effects-mute" => {
            let mute = mute_arg(cmd)?;
            gui.effects().set_mute(mute);
            gui.config_mut().effects_mute = mute;
            return Ok(format!("effects mute set to {}", mute));
        }
        _ => {}
    }

    let config = gui.shared_config();
    let Some(music) = gui.menu_mut().map(|menu| menu.music_mut()) else {
        return Err(CommandError::new(STATUS_BAD_OPTION, "no main menu"));
    };
    let message = match option {
        "play" => {
            music.play().map_err(audio_error)?;
            format!("playing track {}", music.index())
        }
        "stop" => {
            music.stop();
            "stopped".to_string()
        }
        "next" => {
            music.next().map_err(audio_error)?;
            format!("playing track {}", music.index())
        }
        "prev" => {
            music.prev().map_err(audio_error)?;
            format!("playing track {}", music.index())
        }
        "music-volume" => music.volume().0.to_string(),
        "set-music-volume" => {
            let volume = volume_arg(cmd)?;
            music.set_volume(volume);
            config.write().unwrap_or_else(|p| p.into_inner()).music_volume = volume.0;
            format!("music volume set to {}", volume.0)
        }
        "set-music-mute" => {
            let mute = mute_arg(cmd)?;
            music.set_mute(mute);
            config.write().unwrap_or_else(|p| p.into_inner()).music_mute = mute;
            format!("music mute set to {}", mute)
        }
        option => return Err(unknown_option(option, OPTIONS)),
    };
    Ok(message)
}

pub struct GuiAudio;
impl CommandHandler for GuiAudio {
    fn call(&self, gui: &mut GuiData, cmd: &Command) -> CommandResult {
        gui_audio(gui, cmd).into()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::command::{STATUS_BAD_ARGS, STATUS_OK};
    use crate::gui::testing::gui_data;

    fn audio(option: &str, args: &[&str]) -> Command {
        args.iter()
            .fold(Command::new("guiaudio").with_option(option), |cmd, arg| cmd.with_arg(arg))
    }

    #[test]
    fn every_op_needs_the_menu() {
        let mut gui = gui_data("unused");
        for option in OPTIONS {
            assert_eq!(GuiAudio.call(&mut gui, &audio(option, &["1"])).code, STATUS_BAD_OPTION, "{}", option);
        }
    }

    #[test]
    fn bad_options_and_args() {
        let mut gui = gui_data("unused");
        let menu = gui.open_menu(Vec::new());
        gui.set_menu(Some(menu));

        assert_eq!(GuiAudio.call(&mut gui, &audio("set-music-volume", &[])).code, STATUS_BAD_ARGS);
        assert_eq!(GuiAudio.call(&mut gui, &audio("set-music-volume", &["loud"])).code, STATUS_BAD_ARGS);
        assert_eq!(GuiAudio.call(&mut gui, &audio("set-effects-mute", &["yes"])).code, STATUS_BAD_ARGS);
        assert_eq!(GuiAudio.call(&mut gui, &audio("rewind", &[])).code, STATUS_BAD_OPTION);
        assert_eq!(GuiAudio.call(&mut gui, &Command::new("guiaudio")).code, STATUS_BAD_OPTION);
        // nothing to play
        assert_eq!(GuiAudio.call(&mut gui, &audio("play", &[])).code, STATUS_AUDIO);
    }

    #[test]
    fn volumes_reach_players_and_config() {
        let mut gui = gui_data("unused");
        let menu = gui.open_menu(Vec::new());
        gui.set_menu(Some(menu));

        assert_eq!(GuiAudio.call(&mut gui, &audio("set-music-volume", &["-1.5"])).code, STATUS_OK);
        assert_eq!(GuiAudio.call(&mut gui, &audio("music-volume", &[])), CommandResult::ok("-1.5"));
        assert_eq!(gui.config().music_volume, -1.5);

        assert_eq!(GuiAudio.call(&mut gui, &audio("set-music-mute", &["true"])).code, STATUS_OK);
        assert!(gui.menu().unwrap().music().is_muted());
        assert!(gui.config().music_mute);

        assert_eq!(GuiAudio.call(&mut gui, &audio("set-effects-volume", &["0.5"])).code, STATUS_OK);
        assert_eq!(GuiAudio.call(&mut gui, &audio("effects-volume", &[])), CommandResult::ok("0.5"));
        assert_eq!(GuiAudio.call(&mut gui, &audio("set-effects-mute", &["false"])).code, STATUS_OK);
        assert!(!gui.effects().is_muted());
        assert_eq!(gui.config().effects_volume, 0.5);
    }
}
