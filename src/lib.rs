/// Binary control actions
pub mod action;

/// Implemented RL algorithms
pub mod algo;

/// Environment
pub mod env;

/// Recurrent layers
pub mod rnn;

/// Testing environments
#[cfg(feature = "gym")]
pub mod gym;

mod util;
