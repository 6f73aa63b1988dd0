//! The periodic flush that runs beside every persisted [`super::Table`].
//!
//! The worker is a plain thread waiting on a stop channel with a timeout:
//! every elapsed interval is a tick, any message (or the sender going away)
//! ends the loop. The table decides what a tick does.

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, error};

pub(crate) struct Autosave {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

/// Lifecycle of a table's autosave worker. Once `Stopped` it never restarts.
pub(crate) enum AutosaveState {
    Idle,
    Running(Autosave),
    Stopped,
}

impl Autosave {
    pub(crate) fn start<F>(name: &str, interval: Duration, mut tick: F) -> io::Result<Autosave>
    where
        F: FnMut() -> bool + Send + 'static,
    {
        //! Spawn the worker. `tick` runs once per `interval` until it returns
        //! `false` or the worker is stopped.

        let (stop, signal) = mpsc::channel::<()>();
        let thread_name = format!("autosave-{}", name);

        let handle = thread::Builder::new().name(thread_name).spawn(move || {
            loop {
                match signal.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        if !tick() {
                            break;
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            debug!("autosave worker exited");
        })?;

        debug!("save timer started for {} every {:?}", name, interval);
        Ok(Autosave { stop, handle })
    }

    pub(crate) fn stop(self) {
        //! Signal the worker and wait for it. A save already in progress
        //! completes first.

        let _ = self.stop.send(());
        if self.handle.join().is_err() {
            error!("autosave worker panicked");
        }
    }
}
