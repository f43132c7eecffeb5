use super::env_overrides::OVERRIDE_VARS;
use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Exclusive access to the config override variables for one test.
///
/// Every variable in [`OVERRIDE_VARS`] starts out unset; the values seen on
/// entry are put back on drop, before the lock is released.
pub(super) struct IsolatedEnv {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl IsolatedEnv {
    pub(super) fn new() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = OVERRIDE_VARS
            .iter()
            .map(|&key| (key, std::env::var(key).ok()))
            .collect();
        for key in OVERRIDE_VARS {
            // SAFETY: test-only; ENV_LOCK serializes every env mutation here.
            unsafe {
                std::env::remove_var(key);
            }
        }
        Self { saved, _lock: lock }
    }

    /// Set an override variable for the rest of the test.
    pub(super) fn set(&self, key: &'static str, value: &str) {
        assert!(
            OVERRIDE_VARS.contains(&key),
            "{key} is not a config override variable and would not be restored"
        );
        // SAFETY: test-only; the lock is held by `self`.
        unsafe {
            std::env::set_var(key, value);
        }
    }
}

impl Drop for IsolatedEnv {
    fn drop(&mut self) {
        for (key, previous) in &self.saved {
            // SAFETY: test-only; the lock is still held until `_lock` drops.
            unsafe {
                match previous {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_blank_and_forgets_values_set_inside() {
        {
            let env = IsolatedEnv::new();
            assert!(OVERRIDE_VARS.iter().all(|key| std::env::var(key).is_err()));
            env.set("SKILLPROOF_CHAT_MODEL", "gpt-4o");
            assert_eq!(std::env::var("SKILLPROOF_CHAT_MODEL").as_deref(), Ok("gpt-4o"));
        }
        let _env = IsolatedEnv::new();
        assert!(std::env::var("SKILLPROOF_CHAT_MODEL").is_err());
    }

    #[test]
    #[should_panic(expected = "not a config override variable")]
    fn refuses_unrelated_variables() {
        let env = IsolatedEnv::new();
        env.set("HOME", "/nowhere");
    }
}
