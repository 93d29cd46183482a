//! The Stepline turn loop.
//!
//! One inbound user prompt is handled as a bounded cycle:
//!
//! 1. Reconstruct prior conversation from the activity store
//! 2. Record the prompt as an activity
//! 3. Invoke the model and classify its marker-prefixed reply
//! 4. Record the step (thought, action pair, or terminal reply)
//! 5. Loop on thoughts and actions; stop on a terminal reply or when
//!    the iteration budget runs out
//!
//! Every step lands in the external activity store, which is the sole
//! durable state between invocations.

pub mod classifier;
pub mod controller;
pub mod history;
pub mod params;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use classifier::classify;
pub use controller::{AgentController, TurnEnd, TurnOutcome};
pub use history::load_history;
pub use params::parse_params;
