//! One-shot commands run against the ledger service without the dashboard.
//!
//! They go through the same selector, controller and projection as the
//! dashboard, so a vote cast here obeys the same rules.

use crate::environment::Environment;
use crate::ledger::Ledger;
use crate::session::messages::format_status_report;
use crate::store::{Feed, FeedUpdate};
use crate::submission::{BannerKind, SubmissionAction};
use crate::ui::dashboard::{DashboardState, UserAction};
use crate::view::ViewMode;
use crate::workers::poller::fetch_feed;
use crate::workers::{Effect, WorkerMessage};
use crate::{print_cmd_error, print_cmd_info, print_cmd_success, print_cmd_warn};
use std::error::Error;
use std::time::Instant;
use strum::IntoEnumIterator;

/// Fetches every feed once, concurrently, into a fresh dashboard state.
pub async fn load_state(ledger: &dyn Ledger, environment: Environment) -> DashboardState {
    let mut state = DashboardState::new(environment, Instant::now(), false);
    let results =
        futures::future::join_all(Feed::iter().map(|feed| async move {
            FeedUpdate::new(feed, fetch_feed(ledger, feed).await)
        }))
        .await;
    for update in results {
        if let Err(e) = &update.result {
            log::warn!("Failed to refresh {}: {}", update.feed, e);
        }
        state.handle(WorkerMessage::Feed(update));
    }
    state
}

/// Runs one submission to completion and returns the banner it produced.
async fn submit_once(
    ledger: &dyn Ledger,
    state: &mut DashboardState,
    action: UserAction,
) -> Result<String, Box<dyn Error>> {
    let ticket = match state.apply_action(action).into_iter().next() {
        Some(Effect::Submit(ticket)) => ticket,
        _ => {
            let reason = state
                .view(Instant::now())
                .banner
                .map(|banner| banner.text)
                .unwrap_or_else(|| "Nothing to submit".to_string());
            return Err(reason.into());
        }
    };

    if let Some(banner) = state.view(Instant::now()).banner {
        print_cmd_info!("Submitting", "{}", banner.text);
    }

    let result = match &ticket.action {
        SubmissionAction::Cast { choice, account } => ledger.cast_vote(*choice, account).await,
        SubmissionAction::Reset => ledger.reset().await,
    };
    state.handle(WorkerMessage::Submitted { ticket, result });

    match state.view(Instant::now()).banner {
        Some(banner) if banner.kind == BannerKind::Success => Ok(banner.text),
        Some(banner) => Err(banner.text.into()),
        None => Err("The submission produced no outcome".into()),
    }
}

/// Casts one vote. Without `account`, the first account that has not voted is used.
pub async fn cast_vote(
    ledger: &dyn Ledger,
    environment: Environment,
    choice: bool,
    account: Option<&str>,
) -> Result<String, Box<dyn Error>> {
    let mut state = load_state(ledger, environment).await;

    if let ViewMode::Finished { voted, total } = state.mode() {
        let msg = format!("Voting has finished: {} of {} accounts voted", voted, total);
        print_cmd_warn!("Vote not sent.", "{}", msg);
        return Err(msg.into());
    }

    if let Some(address) = account {
        if let Err(e) = state.select_account(address) {
            print_cmd_error!("Vote not sent.", e.to_string().as_str());
            return Err(e.into());
        }
    }

    match submit_once(ledger, &mut state, UserAction::Cast(choice)).await {
        Ok(text) => {
            print_cmd_success!("Vote recorded.", "{}", text);
            Ok(text)
        }
        Err(e) => {
            print_cmd_error!("Vote failed.", e.to_string().as_str());
            Err(e)
        }
    }
}

/// Resets the session. Returns `Ok(None)` when the reset was not confirmed.
pub async fn reset_votes(
    ledger: &dyn Ledger,
    environment: Environment,
    confirmed: bool,
) -> Result<Option<String>, Box<dyn Error>> {
    if !confirmed {
        print_cmd_info!("Reset cancelled.", "");
        return Ok(None);
    }

    let mut state = DashboardState::new(environment, Instant::now(), false);
    state.apply_action(UserAction::RequestReset);
    match submit_once(ledger, &mut state, UserAction::ConfirmReset(true)).await {
        Ok(text) => {
            print_cmd_success!("Voting reset.", "{}", text);
            Ok(Some(text))
        }
        Err(e) => {
            print_cmd_error!("Reset failed.", e.to_string().as_str());
            Err(e)
        }
    }
}

/// Prints the dashboard as plain text.
pub async fn print_status(ledger: &dyn Ledger, environment: Environment) -> String {
    let state = load_state(ledger, environment).await;
    let report = format_status_report(&state.view(Instant::now()));
    println!("{}", report);
    report
}
