#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    InvalidWatcherSetting {
        name: String,
        value: String,
        expected: String,
    },
    ConfigModuleServer,
    ConfigModuleWatcher,

    // === WATCHER MESSAGES ===
    WatcherStarted {
        recency_window: f64,
        poll_interval: f64,
        min_duration: f64,
    },
    WatcherStartingForeground,
    WatcherExitedNormally,
    WatcherShuttingDown,
    WatcherError(String),
    WatcherReceivedSigterm,
    WatcherReceivedSigint,
    WatcherReceivedCtrlC,
    WatcherCtrlCListenFailed(String), // error
    WatcherSignalHandlingNotSupported,
    WatcherStateChanged(String), // new state
    DedupMemorySeeded(usize),    // entries

    // === ACTIVITY SERVER MESSAGES ===
    FeedUnavailable(String),   // error message
    BucketsNotResolved(String), // error message
    UsingBuckets {
        afk: String,
        annotations: String,
    },
    CommitFailed(String), // error message

    // === PROMPT MESSAGES ===
    PromptTitle,
    PromptWhatWereYouDoing {
        start: String,
        end: String,
        minutes: f64,
    },
    AnnotationSaved(String), // interval
    PromptDismissed(String), // interval

    // === LOG MESSAGES ===
    AnnotationsHeader(usize), // count
    NoAnnotationsFound,
    OverlapsFound(usize), // pair count
    NoOverlapsFound,

    // === PROMPTS ===
    PromptSelectModules,
    PromptServerApiUrl,
    PromptServerTestingApiUrl,
    PromptRecencyWindow,
    PromptPollInterval,
    PromptMinDuration,
    PromptHeartbeatPulse,
    PromptOverlapThreshold,
    PromptWindowCapacity,
}
