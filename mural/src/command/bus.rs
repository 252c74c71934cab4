//! Lets scripts running on other threads issue commands.
//!
//! Requests queue up on a channel and run on the thread owning the [`GuiData`] when it calls
//! [`CommandBus::pump`]; the caller blocks until its reply arrives.

use crossbeam_channel::{Receiver, Sender};

use super::{dispatch, Command, CommandError, CommandResult};
use crate::gui::GuiData;

/// Status returned to a client whose bus is gone.
pub const STATUS_BUS_CLOSED: i32 = 6;

struct Request {
    command: Command,
    reply: Sender<CommandResult>,
}

pub struct CommandBus {
    sender: Sender<Request>,
    receiver: Receiver<Request>,
}

impl Default for CommandBus {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandBus {
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self { sender, receiver }
    }

    pub fn client(&self) -> CommandClient {
        CommandClient {
            sender: self.sender.clone(),
        }
    }

    /// Runs every queued request. Returns how many ran.
    pub fn pump(&self, gui: &mut GuiData) -> usize {
        let mut count = 0;
        while let Ok(request) = self.receiver.try_recv() {
            let result = dispatch(gui, &request.command);
            if request.reply.send(result).is_err() {
                log::debug!("{}: caller went away before the reply", request.command.verb);
            }
            count += 1;
        }
        count
    }
}

/// The sending half of a [`CommandBus`]; cheap to clone and `Send`.
#[derive(Clone)]
pub struct CommandClient {
    sender: Sender<Request>,
}

impl CommandClient {
    /// Queues `command` and waits for its result.
    pub fn call(&self, command: Command) -> CommandResult {
        let (reply, result) = crossbeam_channel::bounded(1);
        let verb = command.verb.clone();
        if self.sender.send(Request { command, reply }).is_err() {
            return CommandError::new(STATUS_BUS_CLOSED, format!("{}: command bus closed", verb)).into();
        }
        result
            .recv()
            .unwrap_or_else(|_| CommandError::new(STATUS_BUS_CLOSED, format!("{}: command bus closed", verb)).into())
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::command::STATUS_OK;
    use crate::gui::testing::gui_data;

    #[test]
    fn commands_from_another_thread() {
        let bus = CommandBus::new();
        let client = bus.client();
        let script = thread::spawn(move || {
            let version = client.call(Command::new("guishow").with_option("version"));
            let resolution = client.call(Command::new("guiset").with_option("resolution").with_arg("800x600"));
            (version, resolution)
        });

        let mut gui = gui_data("unused");
        while !script.is_finished() {
            bus.pump(&mut gui);
            thread::yield_now();
        }
        bus.pump(&mut gui);

        let (version, resolution) = script.join().unwrap();
        assert_eq!(version.code, STATUS_OK);
        assert_eq!(resolution.code, STATUS_OK);
        assert_eq!(gui.config().resolution, (800.0, 600.0));
    }

    #[test]
    fn closed_bus() {
        let bus = CommandBus::new();
        let client = bus.client();
        drop(bus);
        assert_eq!(client.call(Command::new("guishow")).code, STATUS_BUS_CLOSED);
    }
}
