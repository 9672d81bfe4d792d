pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Defaults for polling, submission timing and display, organized by
    //! functional area. Timings can be overridden through the config file.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Capacity of the channel carrying worker messages to the dashboard owner.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // POLLING CONFIGURATION
    // =============================================================================

    /// Refresh intervals per feed. Chain status changes least and is polled least.
    pub mod polling {
        use std::time::Duration;

        pub const RESULTS_INTERVAL_MS: u64 = 3_000;
        pub const VOTING_STATUS_INTERVAL_MS: u64 = 3_000;
        pub const VOTERS_INTERVAL_MS: u64 = 5_000;
        pub const ACCOUNTS_INTERVAL_MS: u64 = 5_000;
        pub const BLOCKCHAIN_INTERVAL_MS: u64 = 10_000;

        /// Redraw cadence of the terminal UI when nothing else wakes it.
        pub const UI_TICK_MS: u64 = 250;

        pub const fn ui_tick() -> Duration {
            Duration::from_millis(UI_TICK_MS)
        }
    }

    // =============================================================================
    // SUBMISSION CONFIGURATION
    // =============================================================================

    pub mod submission {
        use std::time::Duration;

        /// Delay between a successful submission and the full resync.
        pub const RESYNC_DELAY_MS: u64 = 1_000;

        /// Delay between a submission finishing and controls coming back.
        pub const RELEASE_DELAY_MS: u64 = 2_000;

        /// Upper bound on how long a submission may hold the lock.
        /// Kept above the HTTP request timeout.
        pub const MAX_HOLD_MS: u64 = 15_000;

        pub const fn resync_delay() -> Duration {
            Duration::from_millis(RESYNC_DELAY_MS)
        }

        pub const fn release_delay() -> Duration {
            Duration::from_millis(RELEASE_DELAY_MS)
        }

        pub const fn max_hold() -> Duration {
            Duration::from_millis(MAX_HOLD_MS)
        }
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    pub mod network {
        use std::time::Duration;

        pub const CONNECT_TIMEOUT_SECS: u64 = 10;
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // DISPLAY CONFIGURATION
    // =============================================================================

    pub mod display {
        use std::time::Duration;

        /// Bars at or below this percentage get no label.
        pub const LABEL_MIN_PERCENT: f64 = 10.0;

        /// Characters of an account address kept in option labels.
        pub const ACCOUNT_ADDRESS_CHARS: usize = 10;

        /// Characters of a transaction hash kept in banners.
        pub const TX_HASH_CHARS: usize = 20;

        /// Characters of the contract address kept in the header.
        pub const CONTRACT_ADDRESS_CHARS: usize = 20;

        /// How long a banner stays visible.
        pub const BANNER_TTL_SECS: u64 = 5;

        pub const fn banner_ttl() -> Duration {
            Duration::from_secs(BANNER_TTL_SECS)
        }
    }
}
