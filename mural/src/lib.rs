//! The mural front-end: wrappers binding simulation entities to their graphics, the HUD and
//! main menu state, and the `gui*` command surface.

#![allow(clippy::uninlined_format_args)]

pub mod command;
pub mod config;
pub mod gui;
pub mod hud;
pub mod menu;
pub mod simulation;
pub mod wrapper;

pub use command::{dispatch, dispatch_line, Command, CommandError, CommandResult};
pub use gui::GuiData;
pub use hud::Hud;
pub use menu::MainMenu;
