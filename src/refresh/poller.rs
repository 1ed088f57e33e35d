//! Background fetch task of the current page.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::{RefreshOutcome, RequestSequence};
use crate::controller::Controller;
use crate::data::WindowControl;

/// Drives a page's fetches.
///
/// The page is loaded once on spawn. A live page is then fetched again a
/// fixed delay after each fetch completes, successful or not, so two polls
/// never overlap. Outcomes are collected without blocking through
/// [`RefreshLoop::poll`].
///
/// Dropping the loop aborts the poll task and any manual refresh still in
/// flight, and closes the channel: nothing fetched afterwards is delivered.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use sirona_client::SironaClient;
/// use sirona_console::controller::HomeController;
/// use sirona_console::data::WindowControl;
/// use sirona_console::refresh::{RefreshLoop, RequestSequence};
/// use tokio::sync::watch;
///
/// # tokio_test::block_on(async {
/// let api = Arc::new(SironaClient::builder().build().unwrap());
/// let (_window_tx, window_rx) = watch::channel(WindowControl::default());
/// let mut refresh = RefreshLoop::spawn(
///     Arc::new(HomeController::new(api)),
///     window_rx,
///     RequestSequence::new(),
///     Duration::from_secs(4),
/// );
/// // Nothing has arrived yet; poll() never blocks
/// let _ = refresh.poll();
/// # });
/// ```
#[derive(Debug)]
pub struct RefreshLoop {
    controller: Arc<dyn Controller>,
    window: watch::Receiver<WindowControl>,
    sequence: RequestSequence,
    sender: mpsc::Sender<RefreshOutcome>,
    receiver: mpsc::Receiver<RefreshOutcome>,
    task: JoinHandle<()>,
    manual: Vec<JoinHandle<()>>,
}

impl RefreshLoop {
    /// Spawn the fetch task for `controller`. Must be called within a tokio
    /// runtime.
    pub fn spawn(
        controller: Arc<dyn Controller>,
        window: watch::Receiver<WindowControl>,
        sequence: RequestSequence,
        interval: Duration,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(16);

        let task = tokio::spawn(run(
            controller.clone(),
            window.clone(),
            sequence.clone(),
            sender.clone(),
            interval,
        ));

        Self {
            controller,
            window,
            sequence,
            sender,
            receiver,
            task,
            manual: Vec::new(),
        }
    }

    /// Fetch now, alongside the polling schedule. The result competes with
    /// in-flight polls through the shared sequence.
    pub fn refresh_now(&mut self) {
        self.manual.retain(|handle| !handle.is_finished());

        let seq = self.sequence.next();
        let window = self.window.borrow().resolve();
        let controller = self.controller.clone();
        let sender = self.sender.clone();
        self.manual.push(tokio::spawn(async move {
            let outcome = fetch(controller.as_ref(), seq, window).await;
            let _ = sender.send(outcome).await;
        }));
    }

    /// Take the next delivered outcome, if any. Never blocks.
    pub fn poll(&mut self) -> Option<RefreshOutcome> {
        self.receiver.try_recv().ok()
    }

    /// Wait for the next outcome.
    pub async fn next_outcome(&mut self) -> Option<RefreshOutcome> {
        self.receiver.recv().await
    }

    pub fn sequence(&self) -> &RequestSequence {
        &self.sequence
    }

    pub fn is_live(&self) -> bool {
        self.controller.is_live()
    }
}

impl Drop for RefreshLoop {
    fn drop(&mut self) {
        self.task.abort();
        for handle in &self.manual {
            handle.abort();
        }
        self.receiver.close();
    }
}

async fn fetch(
    controller: &dyn Controller,
    seq: u64,
    window: sirona_types::TimeWindow,
) -> RefreshOutcome {
    let route = controller.route();
    tracing::debug!(%route, seq, start = window.start, end = window.end, "refreshing");
    let results = controller.refresh(window).await;
    RefreshOutcome {
        seq,
        route,
        window,
        results,
    }
}

async fn run(
    controller: Arc<dyn Controller>,
    window: watch::Receiver<WindowControl>,
    sequence: RequestSequence,
    sender: mpsc::Sender<RefreshOutcome>,
    interval: Duration,
) {
    loop {
        let seq = sequence.next();
        // Live windows end at the moment of the fetch
        let resolved = window.borrow().resolve();
        let outcome = fetch(controller.as_ref(), seq, resolved).await;
        if sender.send(outcome).await.is_err() {
            break;
        }
        if !controller.is_live() {
            break;
        }
        tokio::time::sleep(interval).await;
    }
}
