//! Prompt input and Ctrl-C handling

use std::io::{self, BufRead};
use std::thread;

use tokio::sync::mpsc;
use tracing::debug;

use super::commands::{UiCommand, UnknownCommand};

/// One line of user input, parsed
pub type UiInput = Result<UiCommand, UnknownCommand>;

/// Start the stdin reader and the Ctrl-C listener.
///
/// Both feed the returned channel; end of input and Ctrl-C arrive as
/// [`UiCommand::Quit`]. Stdin is read on a plain thread so a pending read
/// never holds up runtime shutdown.
pub fn spawn_input() -> mpsc::Receiver<UiInput> {
    let (tx, rx) = mpsc::channel(16);

    let ctrl_c_tx = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Ctrl-C received");
            let _ = ctrl_c_tx.send(Ok(UiCommand::Quit)).await;
        }
    });

    thread::spawn(move || read_commands(io::stdin().lock(), tx));
    rx
}

/// Forward parsed lines until end of input or until the receiver is gone
pub fn read_commands<R: BufRead>(reader: R, tx: mpsc::Sender<UiInput>) {
    for line in reader.lines() {
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }
        if tx.blocking_send(line.parse()).is_err() {
            return;
        }
    }
    let _ = tx.blocking_send(Ok(UiCommand::Quit));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_become_commands_then_quit() {
        let input: &[u8] = b"start\n\nbogus\nstop\n";
        let (tx, mut rx) = mpsc::channel(8);

        read_commands(input, tx);

        assert_eq!(rx.blocking_recv(), Some(Ok(UiCommand::Start)));
        assert_eq!(
            rx.blocking_recv(),
            Some(Err(UnknownCommand("bogus".to_string())))
        );
        assert_eq!(rx.blocking_recv(), Some(Ok(UiCommand::Stop)));
        assert_eq!(rx.blocking_recv(), Some(Ok(UiCommand::Quit)));
        assert_eq!(rx.blocking_recv(), None);
    }
}
