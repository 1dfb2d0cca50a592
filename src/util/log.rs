use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};
use std::time::Instant;

pub static LAST_LOG: LazyLock<Mutex<HashMap<String, Instant>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Returns true (and records the time) if `loc` has not been logged in the last `seconds`.
/// A poisoned lock just means another thread panicked mid-log; logging carries on regardless.
pub fn should_log(loc: String, seconds: u64) -> bool {
    let mut last_log = match LAST_LOG.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if last_log
        .get(&loc)
        .map_or(true, |then| then.elapsed().as_secs() >= seconds)
    {
        last_log.insert(loc, Instant::now());
        true
    } else {
        false
    }
}

#[macro_export]
macro_rules! warn_every_seconds {
    ($seconds:expr, $($args:expr),+) => {
        if $crate::util::log::should_log($crate::util::assert::current_location!(), $seconds) {
            $crate::core::prelude::warn!($($args),+);
        }
    }
}
