#[macro_use]
mod poll;

pub use poll::PollOutcome;
