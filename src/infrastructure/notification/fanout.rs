//! Notifier that delivers to several notifiers

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{NotificationError, NotificationIcon, Notifier};

/// Delivers every notification to each inner notifier in order.
///
/// One failing target does not keep the others from being notified; the
/// first error is returned after all have been tried.
#[derive(Default)]
pub struct FanoutNotifier {
    targets: Vec<Box<dyn Notifier>>,
}

impl FanoutNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, target: impl Notifier + 'static) -> Self {
        self.targets.push(Box::new(target));
        self
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[async_trait]
impl Notifier for FanoutNotifier {
    async fn notify(
        &self,
        title: &str,
        message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        let mut first_error = None;
        for target in &self.targets {
            if let Err(e) = target.notify(title, message, icon).await {
                debug!("Notification target failed: {}", e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for Counting {
        async fn notify(
            &self,
            _title: &str,
            _message: &str,
            _icon: NotificationIcon,
        ) -> Result<(), NotificationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(NotificationError::SendFailed("no session bus".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn delivers_to_all_targets_even_after_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let fanout = FanoutNotifier::new()
            .with(Counting {
                calls: Arc::clone(&calls),
                fail: true,
            })
            .with(Counting {
                calls: Arc::clone(&calls),
                fail: false,
            });

        let result = fanout.notify("t", "m", NotificationIcon::Info).await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_fanout_succeeds() {
        let fanout = FanoutNotifier::new();
        assert!(fanout.is_empty());
        assert!(fanout.notify("t", "m", NotificationIcon::Info).await.is_ok());
    }
}
