use crossbeam::channel::{self, Receiver, Sender};
use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::color::SplashColor;

//Splash commands
// UI collaborators send these; the frame driver applies them at the start of the next tick
#[derive(Clone, Debug, PartialEq)]
pub enum SplashCommand {
    Emit {
        x: f64,
        y: f64,
        color: Option<SplashColor>,
    },
    Resize {
        width: u32,
        height: u32,
    },
    Stop,
}

pub static SPLASH_COMMAND_SENDER: Lazy<Mutex<Option<Sender<SplashCommand>>>> =
    Lazy::new(|| Mutex::new(None));

pub fn create_channel() -> (Sender<SplashCommand>, Receiver<SplashCommand>) {
    channel::unbounded()
}

/// Makes `tx` the target of `send_command` for the rest of the page lifetime.
pub fn install_sender(tx: Sender<SplashCommand>) {
    *SPLASH_COMMAND_SENDER.lock() = Some(tx);
}

/// Forwards a command to the installed driver. Returns `false` when no
/// driver is listening, in which case the command is dropped.
pub fn send_command(cmd: SplashCommand) -> bool {
    match SPLASH_COMMAND_SENDER.lock().as_ref() {
        Some(tx) => tx.send(cmd).is_ok(),
        None => {
            log::debug!("no splash driver installed, dropping {:?}", cmd);
            false
        }
    }
}

/// Queues a splash on the installed driver; see `send_command`.
pub fn emit(x: f64, y: f64, color: Option<SplashColor>) -> bool {
    send_command(SplashCommand::Emit { x, y, color })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_reaches_installed_driver() {
        let (tx, rx) = create_channel();
        install_sender(tx);
        let red = SplashColor::from_rgb(255, 0, 0);
        assert!(emit(3.0, 4.0, Some(red.clone())));
        assert_eq!(
            rx.try_recv().unwrap(),
            SplashCommand::Emit { x: 3.0, y: 4.0, color: Some(red) }
        );

        drop(rx);
        assert!(!emit(1.0, 1.0, None), "closed channel should refuse commands");
    }
}
