//! Scoped environment-variable overrides.
//!
//! Overrides mutate the real process environment, because spawned
//! subprocesses must observe them; the guard confines that mutation to a
//! lexical scope with restoration guaranteed on every exit path.

use std::env;
use std::ffi::OsString;

use log::debug;

/// RAII guard that sets environment variables for the lifetime of a scope.
///
/// Previous values are snapshotted before any mutation and restored
/// verbatim on drop; variables that were absent before the scope are
/// removed again. Drop runs during unwinding too, so the environment is
/// restored even when a panic propagates through the scope. Nested guards
/// each restore only what they themselves changed, and LIFO drop order
/// makes nesting behave as expected.
///
/// ```
/// use prockit_core::ScopedEnv;
///
/// let guard = ScopedEnv::new([("LC_ALL", "C")]);
/// assert_eq!(std::env::var("LC_ALL").unwrap(), "C");
/// drop(guard);
/// ```
#[derive(Debug)]
pub struct ScopedEnv {
    saved: Vec<(String, Option<OsString>)>,
}

impl ScopedEnv {
    /// Sets each `(name, value)` pair, recording the prior state first.
    pub fn new<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut saved = Vec::new();
        for (name, value) in vars {
            let name = name.into();
            saved.push((name.clone(), env::var_os(&name)));
            debug!("setting {}={}", name, value.as_ref());
            env::set_var(&name, value.as_ref());
        }
        ScopedEnv { saved }
    }

    /// Sets a single variable; convenience form of [`ScopedEnv::new`].
    pub fn single<K, V>(name: K, value: V) -> Self
    where
        K: Into<String>,
        V: AsRef<str>,
    {
        Self::new([(name, value)])
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        // Reverse order, so a variable set twice through one guard still
        // ends up with its original value.
        for (name, previous) in self.saved.drain(..).rev() {
            match previous {
                Some(value) => env::set_var(&name, value),
                None => env::remove_var(&name),
            }
        }
    }
}
