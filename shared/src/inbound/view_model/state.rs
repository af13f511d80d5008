//! Observable state containers owned by the view-model.

use serde::Serialize;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// Status banner state rendered by every front-end.
///
/// `message` and `error` are independent: both may be set at once until
/// the view-model clears them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    /// An operation is in flight.
    pub is_loading: bool,
    /// Last success text.
    pub message: Option<String>,
    /// Last failure text.
    pub error: Option<String>,
}

/// Single observable value.
///
/// Readers subscribe for a [`watch::Receiver`] or a [`WatchStream`]; new
/// observers see the current value first and every later write after it.
/// Writes are restricted to this crate so only the view-model mutates state.
#[derive(Debug)]
pub struct StateSlot<T> {
    sender: watch::Sender<T>,
}

impl<T> StateSlot<T> {
    /// Create a slot holding `initial`.
    pub fn new(initial: T) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self { sender }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.sender.borrow().clone()
    }

    /// Receiver positioned at the current value.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }

    /// Stream yielding the current value, then each subsequent write.
    #[must_use]
    pub fn stream(&self) -> WatchStream<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        WatchStream::new(self.sender.subscribe())
    }

    /// Replace the value and notify observers.
    pub(crate) fn set(&self, value: T) {
        self.sender.send_replace(value);
    }

    /// Mutate the value in place and notify observers.
    pub(crate) fn update(&self, modify: impl FnOnce(&mut T)) {
        self.sender.send_modify(modify);
    }
}

impl<T: Default> Default for StateSlot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tokio_stream::StreamExt;

    #[rstest]
    fn ui_state_defaults_to_idle() {
        let state = UiState::default();
        assert!(!state.is_loading);
        assert!(state.message.is_none());
        assert!(state.error.is_none());
    }

    #[rstest]
    fn set_is_visible_to_existing_receivers() {
        let slot = StateSlot::new(1_u32);
        let mut receiver = slot.subscribe();
        assert!(!receiver.has_changed().expect("sender alive"));

        slot.set(2);
        assert!(receiver.has_changed().expect("sender alive"));
        assert_eq!(*receiver.borrow_and_update(), 2);
        assert_eq!(slot.get(), 2);
    }

    #[rstest]
    fn writes_without_observers_are_kept() {
        let slot = StateSlot::<Vec<u8>>::default();
        slot.update(|values| values.push(7));
        assert_eq!(slot.get(), vec![7]);
    }

    #[tokio::test]
    async fn stream_yields_current_value_first() {
        let slot = StateSlot::new(String::from("initial"));
        let mut stream = slot.stream();
        assert_eq!(stream.next().await.as_deref(), Some("initial"));

        slot.set(String::from("next"));
        assert_eq!(stream.next().await.as_deref(), Some("next"));
    }

    #[rstest]
    fn ui_state_serialises_camel_case() {
        let state = UiState {
            is_loading: true,
            message: None,
            error: Some("boom".to_owned()),
        };
        let value = serde_json::to_value(state).expect("serialise state");
        assert_eq!(
            value,
            serde_json::json!({ "isLoading": true, "message": null, "error": "boom" })
        );
    }
}
