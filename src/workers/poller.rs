//! Poll scheduler
//!
//! One task per feed, each on its own timer, driven from a declarative table.
//! Tasks share nothing: a slow or failing feed never holds up another one.

use super::core::{EventSender, WorkerMessage};
use crate::consts::cli_consts::polling;
use crate::error_classifier::ErrorClassifier;
use crate::events::EventType;
use crate::ledger::Ledger;
use crate::ledger::error::LedgerError;
use crate::logging::LogLevel;
use crate::store::{Feed, FeedSnapshot, FeedUpdate};
use std::sync::Arc;
use std::time::Duration;
use strum::IntoEnumIterator;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// How often one feed is refreshed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PollTask {
    pub feed: Feed,
    pub interval: Duration,
}

impl PollTask {
    pub fn new(feed: Feed, interval: Duration) -> Self {
        // tokio intervals reject a zero period
        Self {
            feed,
            interval: interval.max(Duration::from_millis(1)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSchedule {
    tasks: Vec<PollTask>,
}

impl PollSchedule {
    pub fn new(tasks: Vec<PollTask>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[PollTask] {
        &self.tasks
    }

    #[cfg(test)]
    pub fn interval_for(&self, feed: Feed) -> Option<Duration> {
        self.tasks
            .iter()
            .find(|task| task.feed == feed)
            .map(|task| task.interval)
    }
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self::new(vec![
            PollTask::new(
                Feed::Tally,
                Duration::from_millis(polling::RESULTS_INTERVAL_MS),
            ),
            PollTask::new(
                Feed::SessionStatus,
                Duration::from_millis(polling::VOTING_STATUS_INTERVAL_MS),
            ),
            PollTask::new(
                Feed::Voters,
                Duration::from_millis(polling::VOTERS_INTERVAL_MS),
            ),
            PollTask::new(
                Feed::Accounts,
                Duration::from_millis(polling::ACCOUNTS_INTERVAL_MS),
            ),
            PollTask::new(
                Feed::ChainStatus,
                Duration::from_millis(polling::BLOCKCHAIN_INTERVAL_MS),
            ),
        ])
    }
}

/// Fetches the current value of one feed.
pub async fn fetch_feed(ledger: &dyn Ledger, feed: Feed) -> Result<FeedSnapshot, LedgerError> {
    Ok(match feed {
        Feed::Accounts => FeedSnapshot::Accounts(ledger.accounts().await?),
        Feed::Tally => FeedSnapshot::Tally(ledger.results().await?),
        Feed::Voters => FeedSnapshot::Voters(ledger.voters().await?),
        Feed::ChainStatus => FeedSnapshot::ChainStatus(ledger.chain_status().await?),
        Feed::SessionStatus => FeedSnapshot::SessionStatus(ledger.voting_status().await?),
    })
}

/// Fetches one feed and logs the outcome.
async fn poll_once(ledger: &dyn Ledger, feed: Feed, events: &EventSender) -> FeedUpdate {
    let result = fetch_feed(ledger, feed).await;
    match &result {
        Ok(_) => {
            events
                .send_poll_event(
                    feed,
                    format!("Refreshed {}", feed),
                    EventType::Refresh,
                    LogLevel::Debug,
                )
                .await;
        }
        Err(e) => {
            let log_level = ErrorClassifier::new().classify_poll_error(e);
            let msg = if feed == Feed::ChainStatus {
                format!("Ledger service unreachable: {}", e)
            } else {
                format!("Failed to refresh {}: {}", feed, e)
            };
            log::warn!("{}", msg);
            events
                .send_poll_event(feed, msg, EventType::Error, log_level)
                .await;
        }
    }
    FeedUpdate::new(feed, result)
}

/// Spawns one refresh task per entry of `schedule`.
///
/// The first tick of each task fires immediately. A shutdown signal stops further
/// ticks; a fetch already in flight runs to completion.
pub fn start_pollers(
    ledger: Arc<dyn Ledger>,
    schedule: &PollSchedule,
    sender: mpsc::Sender<WorkerMessage>,
    shutdown: broadcast::Receiver<()>,
) -> Vec<JoinHandle<()>> {
    schedule
        .tasks()
        .iter()
        .map(|task| {
            let ledger = ledger.clone();
            let events = EventSender::new(sender.clone());
            let shutdown = shutdown.resubscribe();
            let task = *task;
            tokio::spawn(run_poll_task(ledger, task, events, shutdown))
        })
        .collect()
}

async fn run_poll_task(
    ledger: Arc<dyn Ledger>,
    task: PollTask,
    events: EventSender,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(task.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.recv() => break,
            _ = ticker.tick() => {
                let update = poll_once(ledger.as_ref(), task.feed, &events).await;
                if !events.send_message(WorkerMessage::Feed(update)).await {
                    break;
                }
            }
        }
    }
}

/// After `delay`, refreshes every feed once, each in its own task.
pub fn spawn_resync(
    ledger: Arc<dyn Ledger>,
    sender: mpsc::Sender<WorkerMessage>,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let handles: Vec<JoinHandle<()>> = Feed::iter()
            .map(|feed| {
                let ledger = ledger.clone();
                let events = EventSender::new(sender.clone());
                tokio::spawn(async move {
                    let update = poll_once(ledger.as_ref(), feed, &events).await;
                    events.send_message(WorkerMessage::Feed(update)).await;
                })
            })
            .collect();
        for handle in handles {
            let _ = handle.await;
        }
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ledger::MockLedger;
    use crate::model::{Account, ChainStatus, SessionStatus, TallySnapshot, VoterList};
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    /// Ledger that counts calls per feed and can stall the chain status feed.
    #[derive(Default)]
    pub(crate) struct CountingLedger {
        calls: Mutex<HashMap<Feed, usize>>,
        chain_delay: Duration,
    }

    impl CountingLedger {
        fn with_chain_delay(chain_delay: Duration) -> Self {
            Self {
                calls: Mutex::new(HashMap::new()),
                chain_delay,
            }
        }

        pub(crate) fn calls(&self, feed: Feed) -> usize {
            self.calls.lock().unwrap().get(&feed).copied().unwrap_or(0)
        }

        fn record(&self, feed: Feed) {
            *self.calls.lock().unwrap().entry(feed).or_insert(0) += 1;
        }
    }

    #[async_trait::async_trait]
    impl Ledger for CountingLedger {
        async fn accounts(&self) -> Result<Vec<Account>, LedgerError> {
            self.record(Feed::Accounts);
            Ok(vec![Account::new("0xA", 1.0, false)])
        }

        async fn results(&self) -> Result<TallySnapshot, LedgerError> {
            self.record(Feed::Tally);
            Ok(TallySnapshot::default())
        }

        async fn voters(&self) -> Result<VoterList, LedgerError> {
            self.record(Feed::Voters);
            Ok(Vec::new())
        }

        async fn chain_status(&self) -> Result<ChainStatus, LedgerError> {
            self.record(Feed::ChainStatus);
            tokio::time::sleep(self.chain_delay).await;
            Ok(ChainStatus {
                contract_address: "0xC".to_string(),
                block_number: 1,
                connected: true,
            })
        }

        async fn voting_status(&self) -> Result<SessionStatus, LedgerError> {
            self.record(Feed::SessionStatus);
            Ok(SessionStatus {
                all_voted: false,
                voted_count: 0,
                total_accounts: 1,
            })
        }

        async fn cast_vote(&self, _choice: bool, _account: &str) -> Result<String, LedgerError> {
            Ok("0x1".to_string())
        }

        async fn reset(&self) -> Result<String, LedgerError> {
            Ok("0x2".to_string())
        }
    }

    fn drain_feeds(receiver: &mut mpsc::Receiver<WorkerMessage>) -> Vec<FeedUpdate> {
        let mut updates = Vec::new();
        while let Ok(message) = receiver.try_recv() {
            if let WorkerMessage::Feed(update) = message {
                updates.push(update);
            }
        }
        updates
    }

    #[test]
    fn test_default_schedule_ratios() {
        let schedule = PollSchedule::default();
        assert_eq!(schedule.tasks().len(), 5);
        assert_eq!(
            schedule.interval_for(Feed::Tally),
            Some(Duration::from_secs(3))
        );
        assert_eq!(
            schedule.interval_for(Feed::SessionStatus),
            Some(Duration::from_secs(3))
        );
        assert_eq!(
            schedule.interval_for(Feed::Voters),
            Some(Duration::from_secs(5))
        );
        assert_eq!(
            schedule.interval_for(Feed::ChainStatus),
            Some(Duration::from_secs(10))
        );
        let feeds: HashSet<Feed> = schedule.tasks().iter().map(|t| t.feed).collect();
        assert_eq!(feeds, Feed::iter().collect());
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let task = PollTask::new(Feed::Tally, Duration::ZERO);
        assert!(task.interval > Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_feed_ticks_on_its_own_interval() {
        let ledger = Arc::new(CountingLedger::default());
        let (sender, mut receiver) = mpsc::channel(1024);
        let (shutdown_sender, shutdown_receiver) = broadcast::channel(1);

        let handles = start_pollers(
            ledger.clone(),
            &PollSchedule::default(),
            sender,
            shutdown_receiver,
        );

        tokio::time::sleep(Duration::from_millis(10_500)).await;
        let _ = shutdown_sender.send(());
        for handle in handles {
            handle.await.unwrap();
        }

        // Ticks at 0, 3, 6, 9 / 0, 5, 10 / 0, 10
        assert_eq!(ledger.calls(Feed::Tally), 4);
        assert_eq!(ledger.calls(Feed::SessionStatus), 4);
        assert_eq!(ledger.calls(Feed::Voters), 3);
        assert_eq!(ledger.calls(Feed::Accounts), 3);
        assert_eq!(ledger.calls(Feed::ChainStatus), 2);
        assert_eq!(drain_feeds(&mut receiver).len(), 16);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_feed_does_not_delay_others() {
        let ledger = Arc::new(CountingLedger::with_chain_delay(Duration::from_secs(60)));
        let (sender, mut receiver) = mpsc::channel(1024);
        let (shutdown_sender, shutdown_receiver) = broadcast::channel(1);

        let _handles = start_pollers(
            ledger.clone(),
            &PollSchedule::default(),
            sender,
            shutdown_receiver,
        );

        tokio::time::sleep(Duration::from_millis(9_500)).await;
        assert_eq!(ledger.calls(Feed::Tally), 4);
        assert_eq!(ledger.calls(Feed::ChainStatus), 1);
        let updates = drain_feeds(&mut receiver);
        assert!(updates.iter().all(|u| u.feed != Feed::ChainStatus));
        let _ = shutdown_sender.send(());
    }

    #[tokio::test]
    async fn test_failed_poll_reports_error_and_update() {
        let mut ledger = MockLedger::new();
        ledger.expect_voters().returning(|| {
            Err(LedgerError::Http {
                status: 503,
                message: "unavailable".to_string(),
            })
        });
        let (sender, mut receiver) = mpsc::channel(8);
        let events = EventSender::new(sender);

        let update = poll_once(&ledger, Feed::Voters, &events).await;
        assert_eq!(update.feed, Feed::Voters);
        assert!(update.result.is_err());

        match receiver.try_recv() {
            Ok(WorkerMessage::Event(event)) => {
                assert_eq!(event.event_type, EventType::Error);
                assert_eq!(event.log_level, LogLevel::Warn);
                assert!(event.msg.starts_with("Failed to refresh voters"));
            }
            other => panic!("expected an error event, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_resync_refreshes_every_feed_after_delay() {
        let ledger = Arc::new(CountingLedger::default());
        let (sender, mut receiver) = mpsc::channel(64);

        let handle = spawn_resync(ledger.clone(), sender, Duration::from_secs(1));

        tokio::time::sleep(Duration::from_millis(900)).await;
        assert!(drain_feeds(&mut receiver).is_empty());

        handle.await.unwrap();
        let feeds: HashSet<Feed> = drain_feeds(&mut receiver)
            .into_iter()
            .filter(|u| u.result.is_ok())
            .map(|u| u.feed)
            .collect();
        assert_eq!(feeds, Feed::iter().collect());
        for feed in Feed::iter() {
            assert_eq!(ledger.calls(feed), 1);
        }
    }
}
