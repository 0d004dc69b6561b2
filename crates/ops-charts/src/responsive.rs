//! Container width observation.
//!
//! Charts take a caller-supplied height but derive their width from the element
//! they are mounted in. The width signal starts at 0 and only turns positive once
//! the browser has laid the container out.

use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{ResizeObserver, ResizeObserverEntry};

type ResizeCallback = Closure<dyn FnMut(js_sys::Array)>;

/// Normalise a raw measurement: non-finite or non-positive widths read as 0
pub fn measured_width(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 {
        raw.floor()
    } else {
        0.0
    }
}

/// Observer handle that can stop its callbacks
pub trait Disconnect {
    fn disconnect(&self);
}

impl Disconnect for ResizeObserver {
    fn disconnect(&self) {
        ResizeObserver::disconnect(self);
    }
}

/// Live observer paired with the callback it invokes.
///
/// The callback is dropped only after its observer has been disconnected, so
/// the browser never calls into a freed closure.
pub struct ObserverSlot<O: Disconnect, K> {
    current: Option<(O, K)>,
}

impl<O: Disconnect, K> Default for ObserverSlot<O, K> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<O: Disconnect, K> ObserverSlot<O, K> {
    /// Disconnect the previous observer, if any, and hold the new pair
    pub fn replace(&mut self, observer: O, callback: K) {
        self.clear();
        self.current = Some((observer, callback));
    }

    pub fn clear(&mut self) {
        if let Some((observer, callback)) = self.current.take() {
            observer.disconnect();
            drop(callback);
        }
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}

impl<O: Disconnect, K> Drop for ObserverSlot<O, K> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Track the rendered width of `target` through a `ResizeObserver`.
///
/// The observer is disconnected when the target changes and when the owning
/// component is disposed.
pub fn use_container_width(target: NodeRef<Div>) -> ReadSignal<f64> {
    let (width, set_width) = signal(0.0_f64);
    let slot = StoredValue::new_local(ObserverSlot::<ResizeObserver, ResizeCallback>::default());

    on_cleanup(move || {
        slot.try_update_value(ObserverSlot::clear);
    });

    Effect::new(move |_| {
        slot.update_value(ObserverSlot::clear);

        let Some(element) = target.get() else {
            return;
        };
        set_width.set(measured_width(element.get_bounding_client_rect().width()));

        let callback: ResizeCallback = Closure::new(move |entries: js_sys::Array| {
            if let Ok(entry) = entries.get(0).dyn_into::<ResizeObserverEntry>() {
                let next = measured_width(entry.content_rect().width());
                if next != width.get_untracked() {
                    tracing::debug!(width = next, "chart container resized");
                    set_width.set(next);
                }
            }
        });

        match ResizeObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(&element);
                slot.update_value(|s| s.replace(observer, callback));
            }
            Err(err) => {
                tracing::warn!(?err, "ResizeObserver unavailable, chart width is fixed");
            }
        }
    });

    width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measured_width() {
        assert_eq!(measured_width(640.7), 640.0);
        assert_eq!(measured_width(0.0), 0.0);
        assert_eq!(measured_width(-3.0), 0.0);
        assert_eq!(measured_width(f64::NAN), 0.0);
        assert_eq!(measured_width(f64::INFINITY), 0.0);
    }

    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct FakeObserver(&'static str, Log);

    impl Disconnect for FakeObserver {
        fn disconnect(&self) {
            self.1.borrow_mut().push(format!("disconnect {}", self.0));
        }
    }

    struct FakeCallback(&'static str, Log);

    impl Drop for FakeCallback {
        fn drop(&mut self) {
            self.1.borrow_mut().push(format!("drop {}", self.0));
        }
    }

    fn pair(name: &'static str, log: &Log) -> (FakeObserver, FakeCallback) {
        (FakeObserver(name, log.clone()), FakeCallback(name, log.clone()))
    }

    #[test]
    fn test_replace_disconnects_previous_before_dropping_its_callback() {
        let log = Log::default();
        let mut slot = ObserverSlot::default();

        let (observer, callback) = pair("a", &log);
        slot.replace(observer, callback);
        assert!(slot.is_active());
        assert!(log.borrow().is_empty());

        let (observer, callback) = pair("b", &log);
        slot.replace(observer, callback);
        assert_eq!(*log.borrow(), vec!["disconnect a", "drop a"]);
    }

    #[test]
    fn test_clear_and_drop_disconnect_once() {
        let log = Log::default();
        let mut slot = ObserverSlot::default();
        let (observer, callback) = pair("a", &log);
        slot.replace(observer, callback);

        slot.clear();
        assert!(!slot.is_active());
        slot.clear();
        assert_eq!(*log.borrow(), vec!["disconnect a", "drop a"]);

        let (observer, callback) = pair("b", &log);
        slot.replace(observer, callback);
        drop(slot);
        assert_eq!(
            *log.borrow(),
            vec!["disconnect a", "drop a", "disconnect b", "drop b"]
        );
    }
}
