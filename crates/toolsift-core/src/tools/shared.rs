//! Thread-safe handle around a `ToolFilter`

use std::sync::Arc;

use parking_lot::Mutex;

use super::filter::{FilterRequest, FilterResult, ToolFilter};

/// Cloneable handle that serializes `filter` calls on one engine
///
/// The recorded message count is read and written under the same lock, so
/// `only_new_messages` windows never interleave between callers.
#[derive(Clone)]
pub struct SharedToolFilter {
    inner: Arc<Mutex<ToolFilter>>,
}

impl SharedToolFilter {
    pub fn new(filter: ToolFilter) -> Self {
        Self {
            inner: Arc::new(Mutex::new(filter)),
        }
    }

    pub fn filter(&self, request: &FilterRequest) -> FilterResult {
        self.inner.lock().filter(request)
    }

    pub fn last_processed_message_count(&self) -> usize {
        self.inner.lock().last_processed_message_count()
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    /// Run `f` with exclusive access to the engine
    pub fn with<R>(&self, f: impl FnOnce(&mut ToolFilter) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<ToolFilter> for SharedToolFilter {
    fn from(filter: ToolFilter) -> Self {
        Self::new(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChatMessage, Tool, ToolConfig};
    use std::thread;

    #[test]
    fn test_shared_filter_across_threads() {
        let filter = ToolFilter::new(vec![
            Tool::new("git", "Git").with_configuration(ToolConfig::new().with_keywords(["commit"])),
            Tool::new("help", "Help"),
        ])
        .unwrap();
        let shared = SharedToolFilter::from(filter);

        let handles: Vec<_> = (1..=4)
            .map(|n| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let messages = vec![ChatMessage::user("commit"); n];
                    shared.filter(&FilterRequest::new(messages)).filtered_count
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 2);
        }
        assert!((1..=4).contains(&shared.last_processed_message_count()));

        shared.reset();
        assert_eq!(shared.with(|f| f.tools().len()), 2);
        assert_eq!(shared.last_processed_message_count(), 0);
    }
}
