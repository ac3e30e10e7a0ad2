/// Online recurrent Q-value approximation
pub mod rnn_q;

pub use rnn_q::{ControllerConfig, Episode, RnnQAgent};
