//! Identifiers for lists and tasks.
//!
//! Identifiers are opaque strings. Freshly generated ones are the decimal
//! rendering of a nanosecond timestamp drawn from a process-wide generator
//! that never hands out the same value twice, even when called faster than
//! the system clock advances. Imported data may carry identifiers in any
//! other format, so nothing here parses them back.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// The last value handed out by [`next_id`].
static LAST_ID: AtomicU64 = AtomicU64::new(0);

/// Returns a fresh, strictly increasing identifier value.
///
/// The value is the current Unix time in nanoseconds, bumped past the
/// previously issued value when the clock has not moved (or moved backwards).
fn next_id() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX))
        .unwrap_or(0);

    let mut last = LAST_ID.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last.saturating_add(1));
        match LAST_ID.compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Relaxed)
        {
            Ok(_) => return candidate,
            Err(actual) => last = actual,
        }
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generates a new identifier that is unique within this process.
            #[must_use]
            pub fn generate() -> Self {
                Self(next_id().to_string())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id! {
    /// Identifier of a [`TodoList`](crate::TodoList).
    ///
    /// # Examples
    ///
    /// ```
    /// use lazytodo_model::ListId;
    ///
    /// let a = ListId::generate();
    /// let b = ListId::generate();
    /// assert_ne!(a, b);
    /// assert!(!a.as_str().is_empty());
    /// ```
    ListId
}

string_id! {
    /// Identifier of a [`Task`](crate::Task).
    TaskId
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generated_ids_are_distinct_in_a_tight_loop() {
        let ids: HashSet<TaskId> = (0..1000).map(|_| TaskId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn list_and_task_ids_share_one_sequence() {
        let list = ListId::generate();
        let task = TaskId::generate();
        assert_ne!(list.as_str(), task.as_str());
    }

    #[test]
    fn generated_ids_increase() {
        let first: u64 = TaskId::generate().as_str().parse().unwrap();
        let second: u64 = TaskId::generate().as_str().parse().unwrap();
        assert!(second > first);
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = ListId::from("1700000000000000000");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"1700000000000000000\"");

        let parsed: ListId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn ids_are_unique_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| (0..250).map(|_| TaskId::generate()).collect::<Vec<_>>()))
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id generated");
            }
        }
        assert_eq!(seen.len(), 1000);
    }
}
