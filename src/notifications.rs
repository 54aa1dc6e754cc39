use std::rc::Rc;

use chrono::{DateTime, Utc};
use log::debug;
use serde::Deserialize;
use yew::functional::Reducible;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl NotificationKind {
    pub fn class(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

/// Whether a new toast joins the ones on screen or replaces them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPolicy {
    #[default]
    Stack,
    Replace,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Mounted but not yet shown, so the enter transition has something to animate from.
    Entering,
    Visible,
    /// Fading out; removed after the exit delay.
    Leaving,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
    pub phase: Phase,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ToastAction {
    Show { message: String, kind: NotificationKind },
    Reveal(u64),
    Dismiss(u64),
    Remove(u64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct NotificationCenter {
    policy: NotificationPolicy,
    next_id: u64,
    toasts: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(policy: NotificationPolicy) -> Self {
        Self { policy, next_id: 1, toasts: Vec::new() }
    }

    pub fn toasts(&self) -> &[Notification] {
        &self.toasts
    }

    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        if self.policy == NotificationPolicy::Replace {
            self.toasts.clear();
        }
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Notification {
            id,
            message: message.into(),
            kind,
            created_at: Utc::now(),
            phase: Phase::Entering,
        });
        id
    }

    pub fn reveal(&mut self, id: u64) -> bool {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(t) if t.phase == Phase::Entering => {
                t.phase = Phase::Visible;
                true
            }
            _ => false,
        }
    }

    /// Starts the exit transition. Returns false for unknown or already
    /// leaving toasts, so a late auto-dismiss after a manual one does nothing.
    pub fn dismiss(&mut self, id: u64) -> bool {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(t) if t.phase != Phase::Leaving => {
                t.phase = Phase::Leaving;
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn apply(&mut self, action: ToastAction) -> bool {
        match action {
            ToastAction::Show { message, kind } => {
                let id = self.show(message, kind);
                debug!("toast {} shown ({})", id, kind.class());
                true
            }
            ToastAction::Reveal(id) => self.reveal(id),
            ToastAction::Dismiss(id) => self.dismiss(id),
            ToastAction::Remove(id) => self.remove(id),
        }
    }
}

impl Reducible for NotificationCenter {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        if next.apply(action) {
            Rc::new(next)
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl NotificationCenter {
        fn get(&self, id: u64) -> Option<&Notification> {
            self.toasts.iter().find(|t| t.id == id)
        }
    }

    #[test]
    fn stacking_keeps_earlier_toasts() {
        let mut center = NotificationCenter::new(NotificationPolicy::Stack);
        let a = center.show("first", NotificationKind::Info);
        let b = center.show("second", NotificationKind::Error);
        assert_ne!(a, b);
        assert_eq!(center.toasts().len(), 2);
        assert_eq!(center.get(b).map(|t| t.kind), Some(NotificationKind::Error));
    }

    #[test]
    fn replace_policy_keeps_only_latest() {
        let mut center = NotificationCenter::new(NotificationPolicy::Replace);
        center.show("first", NotificationKind::Info);
        let b = center.show("second", NotificationKind::Success);
        assert_eq!(center.toasts().len(), 1);
        assert_eq!(center.toasts()[0].id, b);
    }

    #[test]
    fn lifecycle_runs_entering_visible_leaving_removed() {
        let mut center = NotificationCenter::new(NotificationPolicy::Stack);
        let id = center.show("hello", NotificationKind::Info);
        assert_eq!(center.get(id).unwrap().phase, Phase::Entering);

        assert!(center.reveal(id));
        assert_eq!(center.get(id).unwrap().phase, Phase::Visible);
        assert!(!center.reveal(id));

        assert!(center.dismiss(id));
        assert_eq!(center.get(id).unwrap().phase, Phase::Leaving);

        assert!(center.remove(id));
        assert!(center.get(id).is_none());
    }

    #[test]
    fn late_auto_dismiss_after_manual_dismiss_is_harmless() {
        let mut center = NotificationCenter::new(NotificationPolicy::Stack);
        let id = center.show("bye", NotificationKind::Success);
        center.reveal(id);

        assert!(center.dismiss(id));
        assert!(center.remove(id));

        // auto-dismiss timer and its removal firing afterwards
        assert!(!center.dismiss(id));
        assert!(!center.remove(id));
        assert!(center.toasts().is_empty());
    }

    #[test]
    fn dismiss_while_entering_skips_reveal() {
        let mut center = NotificationCenter::new(NotificationPolicy::Stack);
        let id = center.show("quick", NotificationKind::Info);
        assert!(center.dismiss(id));
        assert!(!center.reveal(id));
        assert_eq!(center.get(id).unwrap().phase, Phase::Leaving);
    }

    #[test]
    fn reducer_returns_same_state_for_no_ops() {
        let state = Rc::new(NotificationCenter::new(NotificationPolicy::Stack));
        let next = state.clone().reduce(ToastAction::Remove(42));
        assert!(Rc::ptr_eq(&state, &next));

        let next = state.clone().reduce(ToastAction::Show {
            message: "hi".into(),
            kind: NotificationKind::Info,
        });
        assert!(!Rc::ptr_eq(&state, &next));
        assert_eq!(next.toasts().len(), 1);
    }
}
