//! Debounced auto-save.
//!
//! [`AutoSave`] watches any `tokio::sync::watch` channel and calls a persist
//! callback once the watched value has been quiet for `delay`. Every change
//! inside the window restarts it, so a burst of edits produces one trailing
//! save. After each save the status reports `saving` for a short `grace`
//! period so an indicator has something to show.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

mod indicator;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);
pub const DEFAULT_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoSaveOptions {
    /// Quiet period after the last change before saving.
    pub delay: Duration,
    /// How long `saving` stays set after the callback returns.
    pub grace: Duration,
}

impl Default for AutoSaveOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            grace: DEFAULT_GRACE,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveStatus {
    /// A change arrived and its save has not fired yet.
    pub pending: bool,
    pub saving: bool,
    pub last_saved: Option<DateTime<Utc>>,
}

/// Handle to a running debouncer. Dropping it cancels any pending save.
pub struct AutoSave {
    status: watch::Receiver<SaveStatus>,
    task: JoinHandle<()>,
}

impl AutoSave {
    /// Must be called inside a tokio runtime.
    pub fn spawn<T, F, R>(watched: watch::Receiver<T>, persist: F, options: AutoSaveOptions) -> Self
    where
        T: Send + Sync + 'static,
        F: FnMut() -> R + Send + 'static,
        R: 'static,
    {
        let (status_tx, status) = watch::channel(SaveStatus::default());
        let task = tokio::spawn(run(watched, persist, options, status_tx));
        Self { status, task }
    }

    pub fn status(&self) -> SaveStatus {
        *self.status.borrow()
    }

    /// Cancels the debouncer; a pending save never fires.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for AutoSave {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<T, F, R>(
    mut watched: watch::Receiver<T>,
    mut persist: F,
    options: AutoSaveOptions,
    status: watch::Sender<SaveStatus>,
) where
    F: FnMut() -> R,
{
    let mut pending: Option<Instant> = None;
    let mut idle_at: Option<Instant> = None;

    loop {
        tokio::select! {
            changed = watched.changed() => {
                if changed.is_err() {
                    debug!("Auto-save source closed");
                    return;
                }
                pending = Some(Instant::now() + options.delay);
                status.send_if_modified(|s| !std::mem::replace(&mut s.pending, true));
            }
            _ = sleep_until(pending.unwrap_or_else(Instant::now)), if pending.is_some() => {
                pending = None;
                status.send_modify(|s| {
                    s.pending = false;
                    s.saving = true;
                });
                // Runs inline on this task; the callback logs its own failures.
                let _ = persist();
                let saved_at = Utc::now();
                status.send_modify(|s| s.last_saved = Some(saved_at));
                debug!("Auto-saved at {saved_at}");
                idle_at = Some(Instant::now() + options.grace);
            }
            _ = sleep_until(idle_at.unwrap_or_else(Instant::now)), if idle_at.is_some() => {
                idle_at = None;
                status.send_modify(|s| s.saving = false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tokio::time::sleep;

    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let calls = Arc::clone(&count);
        (count, move || {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn options(delay_ms: u64) -> AutoSaveOptions {
        AutoSaveOptions {
            delay: MS * delay_ms as u32,
            grace: MS * 500,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_into_one_trailing_save() {
        let (tx, rx) = watch::channel(0);
        let (count, persist) = counter();
        let autosave = AutoSave::spawn(rx, persist, options(100));

        for i in 1..=5 {
            if i > 1 {
                sleep(MS * 10).await;
            }
            tx.send_replace(i);
        }
        // Last change at t=40ms; the save is due at t=140ms.
        sleep(MS * 99).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(autosave.status().pending);
        sleep(MS * 2).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!autosave.status().pending);
        sleep(MS * 5000).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_steady_changes_postpone_save() {
        let (tx, rx) = watch::channel(0);
        let (count, persist) = counter();
        let _autosave = AutoSave::spawn(rx, persist, options(100));

        // A change every 50ms for a second never leaves a 100ms gap.
        for i in 0..20 {
            tx.send_replace(i);
            sleep(MS * 50).await;
        }
        assert_eq!(count.load(Ordering::SeqCst), 0);
        sleep(MS * 60).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_save_without_changes() {
        let (_tx, rx) = watch::channel(());
        let (count, persist) = counter();
        let autosave = AutoSave::spawn(rx, persist, options(100));
        sleep(MS * 10_000).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(autosave.status(), SaveStatus::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_reports_saving_during_grace() {
        let (tx, rx) = watch::channel(0);
        let (_count, persist) = counter();
        let autosave = AutoSave::spawn(rx, persist, options(100));

        tx.send_replace(1);
        sleep(MS * 101).await;
        let status = autosave.status();
        assert!(status.saving);
        assert!(status.last_saved.is_some());

        sleep(MS * 500).await;
        let status = autosave.status();
        assert!(!status.saving);
        assert!(status.last_saved.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_cancels_pending_save() {
        let (tx, rx) = watch::channel(0);
        let (count, persist) = counter();
        let autosave = AutoSave::spawn(rx, persist, options(100));

        tx.send_replace(1);
        sleep(MS * 50).await;
        autosave.shutdown();
        tx.send_replace(2);
        sleep(MS * 5000).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_ends_when_source_closes() {
        let (tx, rx) = watch::channel(0);
        let (count, persist) = counter();
        let autosave = AutoSave::spawn(rx, persist, options(100));

        tx.send_replace(1);
        drop(tx);
        sleep(MS * 5000).await;
        // The task returned before its pending save came due.
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(autosave.status().last_saved.is_none());
    }
}
