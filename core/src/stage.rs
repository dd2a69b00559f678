//! Bounded hand-off queues between pipeline stages.
//!
//! A stage is a task that pulls from its upstream queue and pushes into a
//! bounded `mpsc` channel of its own. `send` waits while the channel is full, so a
//! slow consumer holds back every stage in front of it. Dropping a receiver ends
//! the producer feeding it, which in turn drops its own upstream receiver.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Feeds every item of `items` into a new queue.
pub fn spawn_source<I>(
    name: &'static str,
    items: I,
    capacity: usize,
) -> (mpsc::Receiver<I::Item>, JoinHandle<()>)
where
    I: IntoIterator + Send + 'static,
    I::IntoIter: Send,
    I::Item: Send + 'static,
{
    let (tx, rx) = mpsc::channel(capacity);

    let handle = tokio::spawn(async move {
        for item in items {
            if tx.send(item).await.is_err() {
                debug!(stage = name, "downstream closed early");
                return;
            }
        }
        debug!(stage = name, "finished");
    });

    (rx, handle)
}

/// Replaces every upstream item with the sequence `expand` returns for it.
///
/// The expansion is consumed lazily, one item per free queue slot.
pub fn spawn_flat_map<T, U, It, F>(
    name: &'static str,
    mut upstream: mpsc::Receiver<T>,
    capacity: usize,
    mut expand: F,
) -> (mpsc::Receiver<U>, JoinHandle<()>)
where
    T: Send + 'static,
    U: Send + 'static,
    It: IntoIterator<Item = U>,
    It::IntoIter: Send,
    F: FnMut(T) -> It + Send + 'static,
{
    let (tx, rx) = mpsc::channel(capacity);

    let handle = tokio::spawn(async move {
        while let Some(item) = upstream.recv().await {
            for out in expand(item) {
                if tx.send(out).await.is_err() {
                    debug!(stage = name, "downstream closed early");
                    return;
                }
            }
        }
        debug!(stage = name, "upstream drained");
    });

    (rx, handle)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
