use crate::services::IMessenger;
use crate::system::ISys;
use pantry_reminder_domain::{JobKey, ReminderJob};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Upper bound for a single sleep of the dispatch loop so that wall clock
/// adjustments are picked up.
const MAX_SLEEP: Duration = Duration::from_secs(60);

struct QueuedJob {
    job: ReminderJob,
    seq: u64,
}

/// Pending jobs by key plus a min-heap of fire times.
///
/// Replacing or cancelling a job leaves its old heap entry behind, an entry
/// is only live while its `seq` matches the job stored under its key.
#[derive(Default)]
struct JobQueue {
    jobs: HashMap<JobKey, QueuedJob>,
    timeline: BinaryHeap<Reverse<(i64, u64, JobKey)>>,
    next_seq: u64,
}

impl JobQueue {
    /// Returns true if a pending job with the same key was replaced
    fn push(&mut self, job: ReminderJob) -> bool {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timeline.push(Reverse((job.fires_at, seq, job.key)));
        self.jobs.insert(job.key, QueuedJob { job, seq }).is_some()
    }

    fn remove(&mut self, key: &JobKey) -> Option<ReminderJob> {
        self.jobs.remove(key).map(|queued| queued.job)
    }

    fn is_live(&self, seq: u64, key: &JobKey) -> bool {
        matches!(self.jobs.get(key), Some(queued) if queued.seq == seq)
    }

    fn next_fire_time(&mut self) -> Option<i64> {
        while let Some(Reverse((fires_at, seq, key))) = self.timeline.peek().copied() {
            if self.is_live(seq, &key) {
                return Some(fires_at);
            }
            self.timeline.pop();
        }
        None
    }

    fn pop_due(&mut self, now: i64) -> Vec<ReminderJob> {
        let mut due = Vec::new();
        while let Some(fires_at) = self.next_fire_time() {
            if fires_at > now {
                break;
            }
            if let Some(Reverse((_, _, key))) = self.timeline.pop() {
                if let Some(job) = self.remove(&key) {
                    due.push(job);
                }
            }
        }
        due
    }
}

struct Inner {
    queue: Mutex<JobQueue>,
    wakeup: Notify,
    sys: Arc<dyn ISys>,
}

/// In memory scheduler of one shot `ReminderJob`s.
///
/// `schedule` never blocks on delivery, jobs are handed to the messenger by
/// the dispatch loop launched with `start`. Nothing here survives a restart,
/// the pending set is rebuilt by replaying the stored products.
#[derive(Clone)]
pub struct ReminderScheduler {
    inner: Arc<Inner>,
}

impl ReminderScheduler {
    pub fn new(sys: Arc<dyn ISys>) -> Self {
        Self {
            inner: Arc::new(Inner {
                queue: Mutex::new(JobQueue::default()),
                wakeup: Notify::new(),
                sys,
            }),
        }
    }

    /// Registers the job, replacing any pending job with the same key.
    /// A job whose fire time has already passed fires at the next opportunity.
    pub fn schedule(&self, job: ReminderJob) {
        let key = job.key;
        let fires_at = job.fires_at;
        let replaced = self.inner.queue.lock().unwrap().push(job);
        debug!(
            "Scheduled reminder {} at {} (replaced existing: {})",
            key, fires_at, replaced
        );
        self.inner.wakeup.notify_one();
    }

    /// Removes a pending job, returns false if there was none
    pub fn cancel(&self, key: &JobKey) -> bool {
        let removed = self.inner.queue.lock().unwrap().remove(key).is_some();
        if removed {
            self.inner.wakeup.notify_one();
        }
        removed
    }

    pub fn find(&self, key: &JobKey) -> Option<ReminderJob> {
        self.inner
            .queue
            .lock()
            .unwrap()
            .jobs
            .get(key)
            .map(|queued| queued.job.clone())
    }

    /// Every pending job ordered by fire time
    pub fn pending(&self) -> Vec<ReminderJob> {
        let mut jobs = self
            .inner
            .queue
            .lock()
            .unwrap()
            .jobs
            .values()
            .map(|queued| queued.job.clone())
            .collect::<Vec<_>>();
        jobs.sort_by_key(|job| (job.fires_at, job.key));
        jobs
    }

    /// Launches the dispatch loop delivering due jobs through `messenger`
    pub fn start(&self, messenger: Arc<dyn IMessenger>) -> JoinHandle<()> {
        let scheduler = self.clone();
        tokio::spawn(async move { scheduler.run(messenger).await })
    }

    async fn run(self, messenger: Arc<dyn IMessenger>) {
        info!("Reminder dispatch loop started");
        loop {
            let now = self.inner.sys.get_timestamp_millis();
            let (due, next_fire_time) = {
                let mut queue = self.inner.queue.lock().unwrap();
                (queue.pop_due(now), queue.next_fire_time())
            };

            for job in due {
                info!("Firing reminder {} for user {}", job.key, job.owner);
                tokio::spawn(deliver(messenger.clone(), job));
            }

            match next_fire_time {
                Some(fires_at) => {
                    let wait = Duration::from_millis((fires_at - now).max(0) as u64).min(MAX_SLEEP);
                    tokio::select! {
                        _ = tokio::time::sleep(wait) => {}
                        _ = self.inner.wakeup.notified() => {}
                    }
                }
                None => self.inner.wakeup.notified().await,
            }
        }
    }
}

/// Best effort, a failed delivery is logged and the job is gone
async fn deliver(messenger: Arc<dyn IMessenger>, job: ReminderJob) {
    if let Err(e) = messenger.send(job.owner, &job.text, None).await {
        error!(
            "Unable to deliver reminder {} to user {}. Err: {:?}",
            job.key, job.owner, e
        );
    }
}
