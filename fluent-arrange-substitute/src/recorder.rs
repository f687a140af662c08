// Call recording for hand-written substitutes

use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// A recorded method call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub method: String,
    pub args: Vec<String>,
}

#[derive(Default)]
struct Journal {
    calls: Vec<Call>,
    returns: HashMap<String, Box<dyn Any + Send>>,
}

/// Shared call log with canned return values.
///
/// Clones share the same log, so a substitute can be cloned into the
/// arrangement while the test keeps a handle for verification.
///
/// ```
/// use fluent_arrange_substitute::CallRecorder;
///
/// let recorder = CallRecorder::new();
/// recorder.returns("find", Some("alice".to_string()));
///
/// recorder.record_with("find", [42]);
/// let found: Option<Option<String>> = recorder.return_for("find");
///
/// assert_eq!(found, Some(Some("alice".to_string())));
/// assert_eq!(recorder.call_count("find"), 1);
/// ```
#[derive(Clone, Default)]
pub struct CallRecorder {
    journal: Arc<Mutex<Journal>>,
}

impl CallRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call without arguments
    pub fn record(&self, method: &str) {
        self.record_with(method, std::iter::empty::<String>());
    }

    /// Record a call with its arguments
    pub fn record_with<I>(&self, method: &str, args: I)
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        let call = Call {
            method: method.to_string(),
            args: args.into_iter().map(|a| a.to_string()).collect(),
        };
        self.journal.lock().calls.push(call);
    }

    /// Number of calls to `method`
    pub fn call_count(&self, method: &str) -> usize {
        self.journal
            .lock()
            .calls
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// Number of calls to any method
    pub fn total_calls(&self) -> usize {
        self.journal.lock().calls.len()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    /// All calls in the order they were made
    pub fn calls(&self) -> Vec<Call> {
        self.journal.lock().calls.clone()
    }

    /// Most recent call to `method`
    pub fn last_call(&self, method: &str) -> Option<Call> {
        self.journal
            .lock()
            .calls
            .iter()
            .rev()
            .find(|c| c.method == method)
            .cloned()
    }

    /// Forget recorded calls. Canned return values are kept.
    pub fn clear(&self) {
        self.journal.lock().calls.clear();
    }

    /// Set the value handed out for `method`, replacing any earlier one.
    pub fn returns<T: Any + Send>(&self, method: &str, value: T) {
        self.journal
            .lock()
            .returns
            .insert(method.to_string(), Box::new(value));
    }

    /// The value set for `method`, if one of type `T` was set.
    pub fn return_for<T: Any + Send + Clone>(&self, method: &str) -> Option<T> {
        self.journal
            .lock()
            .returns
            .get(method)
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
    }
}

impl std::fmt::Debug for CallRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let journal = self.journal.lock();
        f.debug_struct("CallRecorder")
            .field("calls", &journal.calls)
            .field("returns", &journal.returns.keys().collect::<Vec<_>>())
            .finish()
    }
}
