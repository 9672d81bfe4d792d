//! Session setup and initialization

use crate::config::Config;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::environment::Environment;
use crate::ledger::{Ledger, LedgerClient};
use crate::workers::{
    PollSchedule, SubmissionTimings, WorkerContext, WorkerMessage, start_pollers,
};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Messages from poll and submission tasks
    pub worker_receiver: mpsc::Receiver<WorkerMessage>,
    /// Join handles for the poll tasks
    pub join_handles: Vec<JoinHandle<()>>,
    /// Shutdown sender to stop all pollers
    pub shutdown_sender: broadcast::Sender<()>,
    /// Starts submissions and resyncs on behalf of the state owner
    pub context: WorkerContext,
    /// The ledger service being watched
    pub environment: Environment,
}

/// Builds the ledger client and starts polling.
///
/// Must be called from within a tokio runtime.
pub fn setup_session(config: &Config, env: Environment) -> Result<SessionData, Box<dyn Error>> {
    let ledger: Arc<dyn Ledger> = Arc::new(LedgerClient::new(env.clone())?);
    Ok(setup_session_with_ledger(
        ledger,
        env,
        &config.poll_schedule(),
        config.submission_timings(),
    ))
}

pub fn setup_session_with_ledger(
    ledger: Arc<dyn Ledger>,
    environment: Environment,
    schedule: &PollSchedule,
    timings: SubmissionTimings,
) -> SessionData {
    let (sender, worker_receiver) = mpsc::channel(EVENT_QUEUE_SIZE);

    // Create shutdown channel - only one shutdown signal needed
    let (shutdown_sender, _) = broadcast::channel(1);

    let join_handles = start_pollers(
        ledger.clone(),
        schedule,
        sender.clone(),
        shutdown_sender.subscribe(),
    );

    SessionData {
        worker_receiver,
        join_handles,
        shutdown_sender,
        context: WorkerContext::new(ledger, sender, timings),
        environment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Feed;
    use crate::workers::poller::tests::CountingLedger;
    use std::collections::HashSet;

    #[tokio::test(start_paused = true)]
    async fn test_session_polls_every_feed_on_start() {
        let ledger = Arc::new(CountingLedger::default());
        let mut session = setup_session_with_ledger(
            ledger.clone(),
            Environment::Local,
            &PollSchedule::default(),
            SubmissionTimings::default(),
        );

        let mut seen = HashSet::new();
        while seen.len() < 5 {
            match session.worker_receiver.recv().await {
                Some(WorkerMessage::Feed(update)) => {
                    assert!(update.result.is_ok());
                    seen.insert(update.feed);
                }
                Some(_) => {}
                None => panic!("worker channel closed"),
            }
        }
        assert!(seen.contains(&Feed::ChainStatus));

        let _ = session.shutdown_sender.send(());
        for handle in session.join_handles {
            handle.await.unwrap();
        }
    }
}
