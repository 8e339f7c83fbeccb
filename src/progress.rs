// src/progress.rs
/// Lightweight progress reporting for a batch run.
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called once the keyword list is known.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One keyword fetched with status "ok".
    fn item_done(&mut self, _keyword: &str, _count: u64) {}

    /// One keyword failed; the batch carries on.
    fn item_failed(&mut self, _keyword: &str, _status: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
