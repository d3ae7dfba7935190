use tokio::sync::mpsc;

/// A toast shown to the user after a submission reaches the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    Subscribed,
    AlreadySubscribed,
    Failed,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::Subscribed => "Successfully subscribed!",
            Notice::AlreadySubscribed => "Already subscribed!",
            Notice::Failed => "Subscription failed",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Notice::Subscribed => "You'll receive personalized news updates every 30 minutes.",
            Notice::AlreadySubscribed => {
                "You're already subscribed to this topic. Check your email for updates."
            }
            Notice::Failed => "Please try again. If the problem persists, contact support.",
        }
    }

    /// Whether the notice reports something the user has to act on.
    pub fn is_destructive(&self) -> bool {
        !matches!(self, Notice::Subscribed)
    }
}

pub fn notification_channel() -> (NotificationSender, NotificationReceiver) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (NotificationSender(sender), NotificationReceiver(receiver))
}

#[derive(Clone, Debug)]
pub struct NotificationSender(mpsc::UnboundedSender<Notice>);

impl NotificationSender {
    /// Nobody listening is not an error for the sender.
    pub fn send(&self, notice: Notice) {
        if self.0.send(notice).is_err() {
            tracing::debug!(?notice, "Dropping a notice, the receiver is gone");
        }
    }
}

#[derive(Debug)]
pub struct NotificationReceiver(mpsc::UnboundedReceiver<Notice>);

impl NotificationReceiver {
    /// Takes every notice sent so far without waiting for more.
    pub fn drain(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Ok(notice) = self.0.try_recv() {
            notices.push(notice);
        }
        notices
    }
}
