use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};
use uuid::Uuid;

use crate::types::{FiredJob, Job, JobAction, JobKind};

/// All mutable scheduler state behind one lock.
///
/// A single mutex covers both command mutations and tick evaluation, so a
/// `clear_all` can never interleave with an in-flight tick: once it returns,
/// nothing scheduled before it will fire.
struct JobStore {
    /// Insertion order, not firing order.
    jobs: Vec<Job>,
    /// Nothing fires while this is false. Set by `start()` and implicitly by
    /// every scheduling call.
    running: bool,
}

/// Shared handle for job management (add/toggle/clear) while the engine loop runs.
///
/// Cheap to clone; all clones and the engine see the same store.
#[derive(Clone)]
pub struct SchedulerHandle {
    store: Arc<Mutex<JobStore>>,
}

impl Default for SchedulerHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerHandle {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(JobStore {
                jobs: Vec::new(),
                running: false,
            })),
        }
    }

    /// Create a repeating job firing every `interval`, first at `now + interval`.
    ///
    /// The scheduler trusts `interval` — validation happens at the command
    /// layer via [`crate::TimeSpec`] before this is called. Scheduling
    /// implicitly starts the scheduler.
    pub fn schedule_repeating(&self, interval: Duration, chat_id: i64) -> String {
        self.add_job(JobKind::Repeating, interval, chat_id)
    }

    /// Create a one-shot job firing once at `now + delay`.
    ///
    /// Scheduling implicitly starts the scheduler.
    pub fn schedule_once(&self, delay: Duration, chat_id: i64) -> String {
        self.add_job(JobKind::Once, delay, chat_id)
    }

    fn add_job(&self, kind: JobKind, interval: Duration, chat_id: i64) -> String {
        let mut store = self.store.lock().unwrap();
        store.running = true;
        let id = Uuid::new_v4().to_string();
        store.jobs.push(Job {
            id: id.clone(),
            kind,
            interval,
            action: JobAction::SendQuote { chat_id },
            enabled: true,
            next_fire: Utc::now() + interval,
        });
        info!(job_id = %id, ?kind, interval_secs = interval.num_seconds(), chat_id, "job added");
        id
    }

    /// Remove every job unconditionally, enabled or not, fired or pending.
    ///
    /// Idempotent — clearing an empty scheduler is a no-op. Returns the
    /// number of jobs removed.
    pub fn clear_all(&self) -> usize {
        let mut store = self.store.lock().unwrap();
        let removed = store.jobs.len();
        store.jobs.clear();
        if removed > 0 {
            info!(removed, "all jobs cleared");
        }
        removed
    }

    /// Set `enabled` on every currently-held job. Returns how many were touched.
    ///
    /// Enabling also ensures the scheduler is running, since a job can never
    /// fire otherwise. Disabling pauses timers without resetting them:
    /// `next_fire` is left untouched and no job is removed.
    pub fn set_all_enabled(&self, flag: bool) -> usize {
        let mut store = self.store.lock().unwrap();
        if flag {
            store.running = true;
        }
        for job in &mut store.jobs {
            job.enabled = flag;
        }
        info!(enabled = flag, count = store.jobs.len(), "toggled all jobs");
        store.jobs.len()
    }

    /// Activate the global running flag. Idempotent.
    pub fn start(&self) {
        self.store.lock().unwrap().running = true;
    }

    pub fn is_running(&self) -> bool {
        self.store.lock().unwrap().running
    }

    pub fn job_count(&self) -> usize {
        self.store.lock().unwrap().jobs.len()
    }

    /// Snapshot of all known jobs in insertion order.
    pub fn list_jobs(&self) -> Vec<Job> {
        self.store.lock().unwrap().jobs.clone()
    }
}

/// Core scheduler: drives job firing at ±1 s precision.
///
/// Fired jobs are forwarded over mpsc for delivery routing; the sender is
/// non-blocking (`try_send`) so the tick loop is never stalled by a slow
/// consumer.
pub struct SchedulerEngine {
    store: Arc<Mutex<JobStore>>,
    fired_tx: mpsc::Sender<FiredJob>,
}

impl SchedulerEngine {
    /// Create an engine sharing `handle`'s store. Every fired [`Job`] is
    /// forwarded as a [`FiredJob`] on `fired_tx`.
    pub fn new(handle: &SchedulerHandle, fired_tx: mpsc::Sender<FiredJob>) -> Self {
        Self {
            store: Arc::clone(&handle.store),
            fired_tx,
        }
    }

    /// Main event loop. Ticks every second until `shutdown` broadcasts `true`.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!("scheduler engine started");

        let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.tick(Utc::now());
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("scheduler engine shutting down");
                        break;
                    }
                }
            }
        }
    }

    /// One evaluation pass: fire every enabled job whose `next_fire` has arrived.
    ///
    /// `Once` jobs are removed within the same pass, so a fired one-shot can
    /// never fire again even under re-entrant ticking. `Repeating` jobs
    /// advance fixed-phase (see [`advance_fixed_phase`]). A full or closed
    /// delivery channel loses that firing but leaves the job's future ticks
    /// unaffected.
    fn tick(&self, now: DateTime<Utc>) {
        let mut store = self.store.lock().unwrap();
        if !store.running {
            return;
        }

        let fired_tx = &self.fired_tx;
        // Sends stay under the store lock: a clear_all that returns must
        // suppress every firing collected by a concurrent tick.
        store.jobs.retain_mut(|job| {
            if !job.enabled || job.next_fire > now {
                return true;
            }

            info!(job_id = %job.id, kind = ?job.kind, "job fired");
            let fired = FiredJob {
                id: job.id.clone(),
                action: job.action.clone(),
            };
            if fired_tx.try_send(fired).is_err() {
                warn!(job_id = %job.id, "delivery channel full or closed — firing dropped");
            }

            match job.kind {
                JobKind::Once => false,
                JobKind::Repeating => {
                    job.next_fire = advance_fixed_phase(job.next_fire, job.interval, now);
                    true
                }
            }
        });
    }
}

/// Advance `next` by whole multiples of `interval` until it lands strictly
/// after `now`.
///
/// Keeping the original phase (instead of resetting to `now + interval`)
/// means scheduler latency never accumulates into drift, and a job fires at
/// most once per tick: windows that went by while the job was disabled are
/// skipped, not replayed. A zero interval degenerates to "due again on the
/// next tick".
fn advance_fixed_phase(next: DateTime<Utc>, interval: Duration, now: DateTime<Utc>) -> DateTime<Utc> {
    if interval <= Duration::zero() {
        return now;
    }
    let mut next = next + interval;
    while next <= now {
        next += interval;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: i64) -> Duration {
        Duration::seconds(n)
    }

    /// Handle + engine wired to a channel large enough that try_send never
    /// spuriously fails in tests.
    fn rig() -> (SchedulerHandle, SchedulerEngine, mpsc::Receiver<FiredJob>) {
        let (tx, rx) = mpsc::channel(64);
        let handle = SchedulerHandle::new();
        let engine = SchedulerEngine::new(&handle, tx);
        (handle, engine, rx)
    }

    fn drain(rx: &mut mpsc::Receiver<FiredJob>) -> Vec<FiredJob> {
        let mut out = Vec::new();
        while let Ok(f) = rx.try_recv() {
            out.push(f);
        }
        out
    }

    #[test]
    fn scheduling_implicitly_starts() {
        let (handle, _engine, _rx) = rig();
        assert!(!handle.is_running());
        handle.schedule_once(secs(10), 42);
        assert!(handle.is_running());
    }

    #[test]
    fn start_is_idempotent() {
        let (handle, _engine, _rx) = rig();
        handle.start();
        handle.start();
        assert!(handle.is_running());
    }

    #[test]
    fn tick_without_start_fires_nothing() {
        let (_handle, engine, mut rx) = rig();
        engine.tick(Utc::now() + secs(3600));
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn once_fires_exactly_once_then_is_removed() {
        let (handle, engine, mut rx) = rig();
        handle.schedule_once(secs(60), 7);
        // Captured after scheduling so start + 60 is never earlier than the
        // job's own next_fire stamp.
        let start = Utc::now();

        // Not yet due.
        engine.tick(start + secs(59));
        assert!(drain(&mut rx).is_empty());

        engine.tick(start + secs(61));
        let fired = drain(&mut rx);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].action, JobAction::SendQuote { chat_id: 7 });
        assert_eq!(handle.job_count(), 0);

        // Advancing further never re-fires a consumed one-shot.
        engine.tick(start + secs(3600));
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn repeating_fires_at_every_aligned_tick() {
        let (handle, engine, mut rx) = rig();
        handle.schedule_repeating(secs(5), 11);
        let start = Utc::now();

        engine.tick(start + secs(5));
        assert_eq!(drain(&mut rx).len(), 1);

        // Between windows: nothing.
        engine.tick(start + secs(7));
        assert!(drain(&mut rx).is_empty());

        engine.tick(start + secs(10));
        let fired = drain(&mut rx);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].action, JobAction::SendQuote { chat_id: 11 });
        assert_eq!(handle.job_count(), 1);
    }

    #[test]
    fn fixed_phase_survives_late_ticks() {
        let (handle, engine, mut rx) = rig();
        handle.schedule_repeating(secs(10), 1);
        let start = Utc::now();

        // Tick arrives 3 s late; the next window must stay phase-aligned at
        // start+20, not slip to start+23.
        engine.tick(start + secs(13));
        assert_eq!(drain(&mut rx).len(), 1);

        engine.tick(start + secs(19));
        assert!(drain(&mut rx).is_empty());

        engine.tick(start + secs(20));
        assert_eq!(drain(&mut rx).len(), 1);
    }

    #[test]
    fn disable_pauses_without_resetting() {
        let (handle, engine, mut rx) = rig();
        handle.schedule_repeating(secs(5), 3);
        let start = Utc::now();

        let before = handle.list_jobs()[0].next_fire;
        handle.set_all_enabled(false);
        assert_eq!(handle.list_jobs()[0].next_fire, before);
        assert_eq!(handle.job_count(), 1);

        engine.tick(start + secs(6));
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn reenabling_resumes_the_same_job_without_replaying_missed_windows() {
        let (handle, engine, mut rx) = rig();
        let id = handle.schedule_repeating(secs(5), 9);
        let start = Utc::now();

        handle.set_all_enabled(false);
        engine.tick(start + secs(17));
        assert!(drain(&mut rx).is_empty());

        handle.set_all_enabled(true);
        assert_eq!(handle.list_jobs()[0].id, id);

        // Three windows (5, 10, 15) went by while paused: exactly one firing
        // catches up, then the phase realigns to start+20.
        engine.tick(start + secs(17));
        assert_eq!(drain(&mut rx).len(), 1);
        engine.tick(start + secs(18));
        assert!(drain(&mut rx).is_empty());
        engine.tick(start + secs(20));
        assert_eq!(drain(&mut rx).len(), 1);
    }

    #[test]
    fn past_due_one_shot_fires_once_after_reenable() {
        let (handle, engine, mut rx) = rig();
        handle.schedule_once(secs(5), 2);
        let start = Utc::now();

        handle.set_all_enabled(false);
        engine.tick(start + secs(30));
        assert!(drain(&mut rx).is_empty());

        handle.set_all_enabled(true);
        engine.tick(start + secs(31));
        assert_eq!(drain(&mut rx).len(), 1);
        assert_eq!(handle.job_count(), 0);
    }

    #[test]
    fn clear_all_cancels_mixed_jobs() {
        let (handle, engine, mut rx) = rig();
        handle.schedule_repeating(secs(5), 1);
        let start = Utc::now();
        handle.schedule_once(secs(60), 2);
        handle.set_all_enabled(false);
        handle.schedule_once(secs(10), 3);

        assert_eq!(handle.clear_all(), 3);
        assert_eq!(handle.job_count(), 0);

        engine.tick(start + secs(3600));
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn clear_all_on_empty_is_a_noop() {
        let (handle, _engine, _rx) = rig();
        assert_eq!(handle.clear_all(), 0);
        assert_eq!(handle.clear_all(), 0);
    }

    #[test]
    fn enabling_starts_the_scheduler() {
        let (handle, _engine, _rx) = rig();
        assert!(!handle.is_running());
        handle.set_all_enabled(true);
        assert!(handle.is_running());
    }

    #[test]
    fn zero_interval_repeating_fires_every_tick() {
        let (handle, engine, mut rx) = rig();
        handle.schedule_repeating(secs(0), 5);
        let start = Utc::now();

        engine.tick(start + secs(1));
        assert_eq!(drain(&mut rx).len(), 1);
        engine.tick(start + secs(2));
        assert_eq!(drain(&mut rx).len(), 1);
        assert_eq!(handle.job_count(), 1);
    }

    #[test]
    fn zero_delay_once_fires_on_next_tick() {
        let (handle, engine, mut rx) = rig();
        handle.schedule_once(secs(0), 6);
        engine.tick(Utc::now() + secs(1));
        assert_eq!(drain(&mut rx).len(), 1);
        assert_eq!(handle.job_count(), 0);
    }

    #[test]
    fn independent_jobs_each_respect_their_own_schedule() {
        let (handle, engine, mut rx) = rig();
        handle.schedule_repeating(secs(5), 100);
        handle.schedule_repeating(secs(7), 200);
        let start = Utc::now();

        engine.tick(start + secs(5));
        let fired = drain(&mut rx);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].action, JobAction::SendQuote { chat_id: 100 });

        engine.tick(start + secs(7));
        let fired = drain(&mut rx);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].action, JobAction::SendQuote { chat_id: 200 });
    }

    #[test]
    fn advance_fixed_phase_skips_to_the_future() {
        let now = Utc::now();
        let next = advance_fixed_phase(now - secs(17), secs(5), now);
        assert!(next > now);
        // Phase preserved: (next - origin) is a multiple of the interval.
        let offset = (next - (now - secs(17))).num_seconds();
        assert_eq!(offset % 5, 0);
        assert_eq!(offset, 20);
    }
}
