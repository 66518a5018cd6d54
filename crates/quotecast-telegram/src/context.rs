use quotecast_scheduler::SchedulerHandle;

/// Shared state handed to every command handler via the Dispatcher's
/// dependency map.
pub struct BotState {
    /// Job management handle; the engine loop runs elsewhere on the same store.
    pub scheduler: SchedulerHandle,
    /// Corpus file location, re-read on every quote request.
    pub quotes_path: String,
}
