//! Display-state container with explicit change notification.
//!
//! The last `{ data, length }` window received from the worker lives in an
//! explicitly owned [`Observable`] rather than any process-wide reactive
//! cell: whoever owns the container passes it by reference to components
//! that read or update it, and renderers register a subscription to be
//! notified on every update.

use crate::model::Line;
use serde::Serialize;
use std::fmt;

/// Latest display window received from the worker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    /// Lines of the most recent window.
    pub data: Vec<Line>,
    /// Total length of the flattened sequence those lines came from.
    pub length: usize,
}

impl DisplayState {
    /// Build from a window response's payload.
    pub fn new(data: Vec<Line>, length: usize) -> Self {
        Self { data, length }
    }
}

/// Explicitly owned value with subscription-based change notification.
///
/// Subscribers run synchronously, in registration order, after every
/// [`set`](Observable::set) or [`update`](Observable::update). There is no
/// unsubscribe: containers live as long as the screen they back, matching
/// the lifetime of the render callbacks they notify.
pub struct Observable<T> {
    value: T,
    subscribers: Vec<Box<dyn FnMut(&T) + Send>>,
}

impl<T> Observable<T> {
    /// Wrap an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value,
            subscribers: Vec::new(),
        }
    }

    /// Read the current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and notify all subscribers.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.notify();
    }

    /// Mutate the value in place and notify all subscribers.
    pub fn update(&mut self, mutate: impl FnOnce(&mut T)) {
        mutate(&mut self.value);
        self.notify();
    }

    /// Register a callback invoked after every change.
    pub fn subscribe(&mut self, callback: impl FnMut(&T) + Send + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    fn notify(&mut self) {
        for subscriber in &mut self.subscribers {
            subscriber(&self.value);
        }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn get_returns_initial_value() {
        let observable = Observable::new(7usize);
        assert_eq!(*observable.get(), 7);
    }

    #[test]
    fn set_replaces_value_and_notifies() {
        let (tx, rx) = mpsc::channel();
        let mut observable = Observable::new(0usize);
        observable.subscribe(move |value| tx.send(*value).unwrap());

        observable.set(3);
        observable.set(9);

        assert_eq!(*observable.get(), 9);
        assert_eq!(rx.try_recv(), Ok(3));
        assert_eq!(rx.try_recv(), Ok(9));
    }

    #[test]
    fn update_mutates_in_place_and_notifies() {
        let (tx, rx) = mpsc::channel();
        let mut observable = Observable::new(vec![1, 2]);
        observable.subscribe(move |value: &Vec<i32>| tx.send(value.len()).unwrap());

        observable.update(|value| value.push(3));

        assert_eq!(observable.get(), &vec![1, 2, 3]);
        assert_eq!(rx.try_recv(), Ok(3));
    }

    #[test]
    fn subscribers_run_in_registration_order() {
        let (tx_a, rx) = mpsc::channel();
        let tx_b = tx_a.clone();
        let mut observable = Observable::new(0usize);
        observable.subscribe(move |_| tx_a.send("first").unwrap());
        observable.subscribe(move |_| tx_b.send("second").unwrap());

        observable.set(1);

        assert_eq!(rx.try_recv(), Ok("first"));
        assert_eq!(rx.try_recv(), Ok("second"));
    }

    #[test]
    fn subscribing_does_not_fire_retroactively() {
        let (tx, rx) = mpsc::channel();
        let mut observable = Observable::new(1usize);
        observable.subscribe(move |value| tx.send(*value).unwrap());

        assert!(rx.try_recv().is_err());
        observable.set(2);
        assert_eq!(rx.try_recv(), Ok(2));
    }

    #[test]
    fn display_state_default_is_empty() {
        let state = DisplayState::default();
        assert!(state.data.is_empty());
        assert_eq!(state.length, 0);
    }

    #[test]
    fn display_state_holds_window_payload() {
        let data = vec![Line::scalar("a", "1".to_string(), 0)];
        let state = DisplayState::new(data.clone(), 40);
        assert_eq!(state.data, data);
        assert_eq!(state.length, 40);
    }
}
