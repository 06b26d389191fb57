//! Blocking notification surface for transport failures.

use std::cell::RefCell;

use crate::view::View;

/// Shows the most recent `catalog:error` / `order:error` message.
///
/// No gestures: dismissal chrome belongs to the host shell.
#[derive(Debug, Default)]
pub struct NotificationView {
    message: RefCell<Option<String>>,
}

impl NotificationView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> Option<String> {
        self.message.borrow().clone()
    }

    pub fn clear(&self) {
        *self.message.borrow_mut() = None;
    }
}

impl View for NotificationView {
    type Snapshot = String;

    fn update(&self, message: &String) {
        *self.message.borrow_mut() = Some(message.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_the_latest_message_until_cleared() {
        let view = NotificationView::new();
        assert_eq!(view.message(), None);

        view.update(&"first".to_string());
        view.update(&"second".to_string());
        assert_eq!(view.message().as_deref(), Some("second"));

        view.clear();
        assert_eq!(view.message(), None);
    }
}
