//! Channels between input handling, the editor and the user interface.

use crossbeam::channel::{self, Receiver, Sender};

use crate::command::{EditorCommand, EditorEvent};

/// Commands waiting for the next editor update.
#[derive(Debug)]
pub struct CommandQueue {
    tx: Sender<EditorCommand>,
    rx: Receiver<EditorCommand>,
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandQueue {
    pub fn new() -> Self {
        let (tx, rx) = channel::unbounded();
        Self { tx, rx }
    }

    /// A sender that can be handed to input code.
    pub fn sender(&self) -> Sender<EditorCommand> {
        self.tx.clone()
    }

    /// Take every command queued so far, oldest first.
    pub fn drain(&self) -> Vec<EditorCommand> {
        self.rx.try_iter().collect()
    }
}

/// Outgoing editor notifications.
#[derive(Debug)]
pub struct EventQueue {
    tx: Sender<EditorEvent>,
    rx: Receiver<EditorEvent>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    pub fn new() -> Self {
        let (tx, rx) = channel::unbounded();
        Self { tx, rx }
    }

    /// Receiver for listeners; every clone competes for the same events.
    pub fn receiver(&self) -> Receiver<EditorEvent> {
        self.rx.clone()
    }

    pub fn send(&self, event: EditorEvent) {
        // The queue holds its own receiver, so the channel never disconnects.
        if self.tx.send(event).is_err() {
            tracing::warn!("editor event channel closed");
        }
    }
}
