// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The link between the input thread and the playback loop.
//!
//! Commands travel one way over an unbounded FIFO, so queueing never blocks
//! the input thread. Once the loop has applied a tick's batch of commands it
//! sends [`Ack::Continue`] back; the input thread waits for it before reading
//! the next line, so at most one command is ever in flight.

use std::sync::mpsc::{self, Receiver, RecvError, SendError, Sender};

use crate::actions::commands::AppCommand;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Ack {
    Continue,
}

/// Creates a connected command channel.
///
/// The sender half goes to the input thread, the receiver half to the loop.
pub(crate) fn command_channel() -> (CommandSender, CommandReceiver) {
    let (command_tx, command_rx) = mpsc::channel();
    let (ack_tx, ack_rx) = mpsc::channel();

    (
        CommandSender { command_tx, ack_rx },
        CommandReceiver { command_rx, ack_tx },
    )
}

pub(crate) struct CommandSender {
    command_tx: Sender<AppCommand>,
    ack_rx: Receiver<Ack>,
}

impl CommandSender {
    /// Queues a command without blocking.
    pub(crate) fn push(&self, command: AppCommand) -> Result<(), SendError<AppCommand>> {
        self.command_tx.send(command)
    }

    /// Blocks until the loop acknowledges the commands queued so far.
    pub(crate) fn wait_for_ack(&self) -> Result<Ack, RecvError> {
        self.ack_rx.recv()
    }
}

pub(crate) struct CommandReceiver {
    command_rx: Receiver<AppCommand>,
    ack_tx: Sender<Ack>,
}

impl CommandReceiver {
    /// Blocks until a command is available.
    #[cfg(test)]
    pub(crate) fn pop_blocking(&self) -> Result<AppCommand, RecvError> {
        self.command_rx.recv()
    }

    /// Takes every command queued right now, oldest first.
    pub(crate) fn drain_if_any(&self) -> Vec<AppCommand> {
        self.command_rx.try_iter().collect()
    }

    /// Releases the input thread after a batch has been applied.
    pub(crate) fn acknowledge(&self) {
        // The input thread may already have gone away during shutdown.
        let _ = self.ack_tx.send(Ack::Continue);
    }
}
