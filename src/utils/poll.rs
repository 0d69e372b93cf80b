use std::time::Duration;

/// Outcome of a bounded [poll!] loop.
#[derive(Debug)]
pub enum PollOutcome<T, E> {
    /// The polled condition was met before the deadline.
    Ok(T),
    /// The polled block failed; polling stopped immediately.
    Err(E),
    /// The deadline elapsed without the condition being met.
    TimedOut { waited: Duration },
}

impl<T, E> PollOutcome<T, E> {
    pub fn ok(value: T) -> Self {
        Self::Ok(value)
    }

    pub fn err(error: E) -> Self {
        Self::Err(error)
    }

    pub fn timed_out(waited: Duration) -> Self {
        Self::TimedOut { waited }
    }
}

/// Evaluate an async-context block every `interval` until it yields
/// `Ok(Some(_))`, it yields `Err(_)`, or `deadline` has elapsed.
///
/// The block is always evaluated at least once, and a final time once the
/// deadline is reached, so a short deadline still observes the condition.
#[macro_export]
macro_rules! poll {
    ( $deadline:expr, $interval:expr, $block:block ) => {{
        let started = tokio::time::Instant::now();
        loop {
            let res = $block;
            if let Ok(None) = res {
                if started.elapsed() < $deadline {
                    tokio::time::sleep($interval).await;
                    continue;
                }
            }

            break match res {
                Ok(Some(value)) => $crate::utils::PollOutcome::ok(value),
                Err(error) => $crate::utils::PollOutcome::err(error),
                Ok(None) => $crate::utils::PollOutcome::timed_out(started.elapsed()),
            };
        }
    }};
}
