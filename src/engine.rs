//! Pipelined command engine.
//!
//! Submissions land in a FIFO; a single pump task drains it, writing each
//! command and awaiting exactly one reply before touching the next. Reply
//! correlation is purely positional, which is sound because nothing ever
//! reorders the queue. The pump is single-flight: an atomic flag ensures at
//! most one runs, and it self-terminates when the queue drains.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::{oneshot, Notify};
use tracing::{debug, trace};

use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::types::{Arg, Value};

/// A submitted command waiting for its turn on the wire.
struct QueuedCommand {
    args: Vec<Arg>,
    inline: bool,
    completion: oneshot::Sender<Result<Value>>,
}

/// Handle to the shared engine state.
pub(crate) struct Engine {
    shared: Arc<Shared>,
}

struct Shared {
    /// Exclusively held by the running pump.
    conn: tokio::sync::Mutex<Connection>,
    queue: Mutex<VecDeque<QueuedCommand>>,
    pump_active: AtomicBool,
    closed: AtomicBool,
    /// The transport error that poisoned the connection, if any.
    fatal: Mutex<Option<Error>>,
    /// Signaled whenever a pump task exits.
    idle: Notify,
}

impl Engine {
    pub fn new(conn: Connection) -> Self {
        Self {
            shared: Arc::new(Shared {
                conn: tokio::sync::Mutex::new(conn),
                queue: Mutex::new(VecDeque::new()),
                pump_active: AtomicBool::new(false),
                closed: AtomicBool::new(false),
                fatal: Mutex::new(None),
                idle: Notify::new(),
            }),
        }
    }

    /// Enqueues a command and resolves with its reply.
    ///
    /// Commands complete in submission order. A top-level error reply
    /// resolves as [`Error::Server`] and leaves the connection usable; a
    /// transport failure resolves this and every queued command with the
    /// same error.
    pub async fn submit(&self, args: Vec<Arg>, inline_hint: bool) -> Result<Value> {
        if self.shared.closed.load(Ordering::Acquire) {
            return Err(self.poison_error());
        }

        let (tx, rx) = oneshot::channel();
        self.shared
            .queue
            .lock()
            .expect("command queue poisoned")
            .push_back(QueuedCommand {
                args,
                inline: inline_hint,
                completion: tx,
            });

        if !self.shared.pump_active.swap(true, Ordering::AcqRel) {
            tokio::spawn(pump(Arc::clone(&self.shared)));
        }

        // The sender is only dropped unresolved if the runtime tears the
        // pump down mid-flight.
        rx.await.unwrap_or(Err(Error::ConnectionClosed))
    }

    /// Stops accepting submissions, drains commands already queued, then
    /// half-closes the stream. Idempotent.
    pub async fn close(&self) -> Result<()> {
        if self.shared.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        debug!("closing connection");

        loop {
            let idle = self.shared.idle.notified();
            tokio::pin!(idle);
            idle.as_mut().enable();
            if !self.shared.pump_active.load(Ordering::Acquire) {
                break;
            }
            idle.await;
        }

        let mut conn = self.shared.conn.lock().await;
        conn.shutdown().await
    }

    fn poison_error(&self) -> Error {
        self.shared
            .fatal
            .lock()
            .expect("fatal slot poisoned")
            .clone()
            .unwrap_or(Error::ConnectionClosed)
    }
}

/// Drains the command FIFO: write one, await one reply, resolve the
/// submitter. Exits when the queue is empty.
async fn pump(shared: Arc<Shared>) {
    let mut conn = shared.conn.lock().await;

    loop {
        let next = shared.queue.lock().expect("command queue poisoned").pop_front();
        let Some(command) = next else {
            shared.pump_active.store(false, Ordering::Release);
            // A submission may land between the empty pop and the flag
            // store; reclaim the pump for it, otherwise this task is done.
            let requeued = !shared
                .queue
                .lock()
                .expect("command queue poisoned")
                .is_empty();
            if requeued && !shared.pump_active.swap(true, Ordering::AcqRel) {
                continue;
            }
            break;
        };

        let poisoned = shared.fatal.lock().expect("fatal slot poisoned").clone();
        if let Some(error) = poisoned {
            let _ = command.completion.send(Err(error));
            continue;
        }

        trace!(command = command_name(&command.args), "writing command");
        let outcome = match conn.write_command(&command.args, command.inline).await {
            Ok(()) => conn.read_reply().await,
            Err(error) => Err(error),
        };

        match outcome {
            Ok(Value::Error(message)) => {
                let _ = command.completion.send(Err(Error::Server(message)));
            }
            Ok(value) => {
                let _ = command.completion.send(Ok(value));
            }
            Err(error) => {
                debug!(%error, "transport failure, failing queued commands");
                shared.closed.store(true, Ordering::Release);
                *shared.fatal.lock().expect("fatal slot poisoned") = Some(error.clone());
                let _ = command.completion.send(Err(error.clone()));
                let drained: Vec<QueuedCommand> = shared
                    .queue
                    .lock()
                    .expect("command queue poisoned")
                    .drain(..)
                    .collect();
                for queued in drained {
                    let _ = queued.completion.send(Err(error.clone()));
                }
            }
        }
    }

    drop(conn);
    shared.idle.notify_waiters();
}

fn command_name(args: &[Arg]) -> &str {
    match args.first() {
        Some(Arg::Text(name)) => name,
        _ => "<raw>",
    }
}
