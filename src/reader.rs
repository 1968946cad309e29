use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::Sender;
use log::{error, info};

use crate::types::InputEvent;

#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Why the reader loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderExit {
    EndOfInput,
    Failed,
    Shutdown,
    Disconnected,
}

/// Reads lines until the input ends, fails, `shutdown` is raised or the
/// receiving side is dropped. Blocks on `send` while the queue is full.
/// Bytes that are not valid UTF-8 are replaced, so the line still reaches
/// the parser instead of ending the stream.
pub fn run_reader<R: BufRead>(
    mut input: R,
    sender: &Sender<InputEvent>,
    shutdown: &AtomicBool,
) -> ReaderExit {
    let mut buf = Vec::new();
    loop {
        if shutdown.load(Ordering::Relaxed) {
            info!("Reader received shutdown signal");
            return ReaderExit::Shutdown;
        }

        buf.clear();
        let event = match input.read_until(b'\n', &mut buf) {
            Ok(0) => {
                info!("End of input");
                let _ = sender.send(InputEvent::Closed);
                return ReaderExit::EndOfInput;
            }
            Ok(_) => InputEvent::Line(String::from_utf8_lossy(&buf).into_owned()),
            Err(e) => {
                error!("Input read error: {}", e);
                let _ = sender.send(InputEvent::Failed(e.into()));
                return ReaderExit::Failed;
            }
        };

        if sender.send(event).is_err() {
            info!("Input channel disconnected, reader exiting");
            return ReaderExit::Disconnected;
        }
    }
}

/// Starts the reader on stdin in a background thread.
pub fn spawn_stdin_reader(
    sender: Sender<InputEvent>,
    shutdown: Arc<AtomicBool>,
) -> std::io::Result<thread::JoinHandle<ReaderExit>> {
    thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            info!("Reading samples from stdin");
            let stdin = std::io::stdin();
            run_reader(stdin.lock(), &sender, &shutdown)
        })
}
