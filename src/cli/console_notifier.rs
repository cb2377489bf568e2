//! Terminal notification adapter

use async_trait::async_trait;

use crate::application::ports::{NotificationError, NotificationIcon, Notifier};

use super::presenter::Presenter;

/// Shows notifications as presenter lines on stderr
#[derive(Default)]
pub struct ConsoleNotifier {
    presenter: Presenter,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(
        &self,
        _title: &str,
        message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        match icon {
            NotificationIcon::Error => self.presenter.error(message),
            NotificationIcon::Warning => self.presenter.warn(message),
            NotificationIcon::Success | NotificationIcon::Upload => self.presenter.success(message),
            NotificationIcon::Info | NotificationIcon::Recording => self.presenter.info(message),
        }
        Ok(())
    }
}
