//! Replay-latest state shared between subscribers.
//!
//! [`SharedState`] runs an upstream task only while someone is watching:
//! - the first subscription starts the upstream task,
//! - the last subscription leaving arms a grace-period timer,
//! - the upstream is aborted when the timer fires with nobody subscribed,
//! - the last published value is kept, so a later subscriber sees it at once
//!   while a fresh upstream task recomputes.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Publisher handed to the upstream task.
pub type StatePublisher<T> = Arc<watch::Sender<Option<T>>>;

type UpstreamFuture = Pin<Box<dyn Future<Output = ()> + Send>>;
type UpstreamFactory<T> = Box<dyn Fn(StatePublisher<T>) -> UpstreamFuture + Send + Sync>;

#[derive(Default)]
struct Lifecycle {
    subscribers: usize,
    upstream: Option<JoinHandle<()>>,
    stop_timer: Option<JoinHandle<()>>,
    /// Bumped on every subscribe/release so a stale stop timer can tell.
    epoch: u64,
}

struct SharedInner<T: Send + Sync + 'static> {
    name: &'static str,
    cache: StatePublisher<T>,
    upstream: UpstreamFactory<T>,
    grace_period: Duration,
    lifecycle: Mutex<Lifecycle>,
}

impl<T: Send + Sync + 'static> SharedInner<T> {
    fn lock(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(|poisoned| {
            warn!("{} lifecycle mutex was poisoned, recovering", self.name);
            poisoned.into_inner()
        })
    }

    fn acquire(&self) {
        let mut lifecycle = self.lock();
        lifecycle.subscribers += 1;
        lifecycle.epoch += 1;

        if let Some(timer) = lifecycle.stop_timer.take() {
            timer.abort();
        }

        if lifecycle.upstream.is_none() {
            debug!("{}: first subscriber, starting upstream", self.name);
            let task = (self.upstream)(self.cache.clone());
            lifecycle.upstream = Some(tokio::spawn(task));
        }
    }

    fn release(self: &Arc<Self>) {
        let mut lifecycle = self.lock();
        lifecycle.subscribers = lifecycle.subscribers.saturating_sub(1);
        lifecycle.epoch += 1;
        if lifecycle.subscribers > 0 {
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let epoch = lifecycle.epoch;
                let grace_period = self.grace_period;
                let weak: Weak<Self> = Arc::downgrade(self);
                lifecycle.stop_timer = Some(runtime.spawn(async move {
                    tokio::time::sleep(grace_period).await;
                    if let Some(inner) = weak.upgrade() {
                        inner.stop_if_idle(epoch);
                    }
                }));
            }
            Err(_) => {
                // No runtime left to run the timer on; stop right away.
                if let Some(upstream) = lifecycle.upstream.take() {
                    upstream.abort();
                }
            }
        }
    }

    fn stop_if_idle(&self, epoch: u64) {
        let mut lifecycle = self.lock();
        if lifecycle.subscribers > 0 || lifecycle.epoch != epoch {
            return;
        }
        lifecycle.stop_timer = None;
        if let Some(upstream) = lifecycle.upstream.take() {
            debug!("{}: no subscribers after grace period, stopping upstream", self.name);
            upstream.abort();
        }
    }
}

impl<T: Send + Sync + 'static> Drop for SharedInner<T> {
    fn drop(&mut self) {
        let lifecycle = self
            .lifecycle
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(upstream) = lifecycle.upstream.take() {
            upstream.abort();
        }
        if let Some(timer) = lifecycle.stop_timer.take() {
            timer.abort();
        }
    }
}

/// Replay-latest value computed by an upstream task that runs while subscribed.
pub struct SharedState<T: Send + Sync + 'static> {
    inner: Arc<SharedInner<T>>,
}

impl<T: Send + Sync + 'static> Clone for SharedState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> SharedState<T> {
    /// Creates the shared state. `upstream` is called each time the state
    /// goes from zero to one subscriber and must publish through the sender
    /// it is given.
    pub fn new<F, Fut>(name: &'static str, grace_period: Duration, upstream: F) -> Self
    where
        F: Fn(StatePublisher<T>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (cache, _) = watch::channel(None);
        let upstream: UpstreamFactory<T> = Box::new(move |publisher| Box::pin(upstream(publisher)));
        Self {
            inner: Arc::new(SharedInner {
                name,
                cache: Arc::new(cache),
                upstream,
                grace_period,
                lifecycle: Mutex::new(Lifecycle::default()),
            }),
        }
    }

    /// Subscribes, starting the upstream task if it is not running.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn subscribe(&self) -> StateSubscription<T> {
        self.inner.acquire();
        StateSubscription {
            rx: self.inner.cache.subscribe(),
            inner: self.inner.clone(),
        }
    }

    /// Last published value, if any.
    pub fn latest(&self) -> Option<T> {
        self.inner.cache.borrow().clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers
    }

    /// Whether the upstream task is currently running.
    pub fn is_active(&self) -> bool {
        self.inner.lock().upstream.is_some()
    }
}

/// A live view of a [`SharedState`]. Dropping it unsubscribes.
pub struct StateSubscription<T: Send + Sync + 'static> {
    rx: watch::Receiver<Option<T>>,
    inner: Arc<SharedInner<T>>,
}

impl<T: Clone + Send + Sync + 'static> StateSubscription<T> {
    /// The replayed latest value.
    pub fn latest(&self) -> Option<T> {
        self.rx.borrow().clone()
    }

    /// Waits for the next published value.
    pub async fn changed(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        self.rx.borrow_and_update().clone()
    }

    /// Waits until a published value satisfies `predicate`, checking the
    /// current value first.
    pub async fn wait_for(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Option<T> {
        let value = self
            .rx
            .wait_for(|value| value.as_ref().is_some_and(&mut predicate))
            .await
            .ok()?;
        value.clone()
    }
}

impl<T: Send + Sync + 'static> Drop for StateSubscription<T> {
    fn drop(&mut self) {
        self.inner.release();
    }
}
