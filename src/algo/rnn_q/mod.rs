use burn::{
    optim::{adaptor::OptimizerAdaptor, AdamW, AdamWConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::{backend::AutodiffBackend, ElementConversion},
};
use log::{debug, trace};
use nn::loss::{MseLoss, Reduction};

use crate::{action::Action, assert_interval, env::Environment, util::l2_norm};

pub mod model;

use model::{Approximator, ApproximatorConfig};

/// Configuration for the [`RnnQAgent`]
#[derive(Config, Debug)]
pub struct ControllerConfig {
    /// Observation dimensionality
    #[config(default = 4)]
    pub input_size: usize,
    /// Width of the recurrent layer
    #[config(default = 10)]
    pub hidden_size: usize,
    /// Width of the approximator output
    #[config(default = 1)]
    pub output_size: usize,
    /// Norm of the previous observation above which it becomes the training input
    #[config(default = 1.5)]
    pub training_threshold: f32,
    /// Decision boundary for actions, also used to pick the training label
    #[config(default = 0.5)]
    pub step_threshold: f32,
    /// The learning rate for the optimizer
    #[config(default = 1e-3)]
    pub lr: f64,
}

type AdamWOptimizer<M, B> = OptimizerAdaptor<AdamW<<B as AutodiffBackend>::InnerBackend>, M, B>;

/// Outcome of one episode run by [`RnnQAgent::go`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Episode {
    pub steps: usize,
    pub reward: f32,
}

/// An agent that trains a recurrent network online as a stand-in for a Q table
///
/// Every call that carries the previous observation and action performs exactly one
/// gradient step, using a heuristic label:
/// - if `‖previous observation‖ < step_threshold`, reinforce the previous action
/// - otherwise, reinforce the opposite action
///
/// This is not a Bellman target. The training input is a persistent buffer that is only
/// overwritten when `‖previous observation‖ > training_threshold`; below that, the last
/// written input (initially zeros) is trained on again. Neither the network nor the buffer
/// is reset between episodes.
///
/// ### Generics
/// - `B`: A burn autodiff backend
pub struct RnnQAgent<B: AutodiffBackend> {
    model: Approximator<B>,
    optimizer: AdamWOptimizer<Approximator<B>, B>,
    loss: MseLoss,
    device: B::Device,
    train_input: Vec<f32>,
    output_size: usize,
    training_threshold: f32,
    step_threshold: f32,
    lr: f64,
    updates: u64,
}

impl<B: AutodiffBackend> RnnQAgent<B> {
    /// Initialize a new `RnnQAgent`
    ///
    /// **Panics** if `step_threshold` is not in the interval `[0,1]`, if `training_threshold`
    /// is negative, if `lr` is not positive, or if any layer size is zero
    pub fn new(config: &ControllerConfig, device: &B::Device) -> Self {
        assert_interval!(config.step_threshold, 0.0, 1.0);
        assert!(
            config.training_threshold >= 0.0,
            "Training threshold must be non-negative."
        );
        assert!(config.lr > 0.0, "Learning rate must be positive.");

        let model = ApproximatorConfig::new(
            config.input_size,
            config.hidden_size,
            config.output_size,
        )
        .init(device);

        Self {
            model,
            optimizer: AdamWConfig::new().init(),
            loss: MseLoss::new(),
            device: device.clone(),
            train_input: vec![0.0; config.input_size],
            output_size: config.output_size,
            training_threshold: config.training_threshold,
            step_threshold: config.step_threshold,
            lr: config.lr,
            updates: 0,
        }
    }

    /// Number of gradient updates performed so far
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Approximator output for an observation, in `[0, 1]`
    ///
    /// **Panics** if the observation length does not match the configured input size
    pub fn predict(&self, observation: &[f32]) -> f32 {
        self.model
            .forward(self.to_input(observation))
            .slice([0..1, 0..1])
            .into_scalar()
            .elem()
    }

    /// Decide an action for `observation`, first training on `previous` if given
    ///
    /// `previous` is the observation and action of the prior step. Without it the call
    /// is a pure prediction and leaves the network untouched.
    ///
    /// **Panics** if an observation length does not match the configured input size
    pub fn act(&mut self, observation: &[f32], previous: Option<(&[f32], Action)>) -> Action {
        if let Some((previous_observation, previous_action)) = previous {
            self.learn(previous_observation, previous_action);
        }

        let prediction = self.predict(observation);
        let action = Action::from_prediction(prediction, self.step_threshold);
        trace!("prediction {prediction:.4} -> {action:?}");

        action
    }

    /// Perform one gradient step with the heuristic label
    fn learn(&mut self, previous_observation: &[f32], previous_action: Action) {
        self.check_len(previous_observation);

        let norm = l2_norm(previous_observation);
        let refreshed = norm > self.training_threshold;
        if refreshed {
            self.train_input.copy_from_slice(previous_observation);
        }
        let label = training_label(norm, previous_action, self.step_threshold);

        let input = self.to_input(&self.train_input);
        let target =
            Tensor::<B, 2>::ones([1, self.output_size], &self.device).mul_scalar(label.label());

        let output = self.model.forward(input);
        let loss = self.loss.forward(output, target, Reduction::Mean);

        let grads = GradientsParams::from_grads(loss.backward(), &self.model);
        self.model = self.optimizer.step(self.lr, self.model.clone(), grads);
        self.updates += 1;

        debug!(
            "update {}: norm {norm:.4}, label {label:?}, refreshed {refreshed}, loss {:.6}",
            self.updates,
            loss.into_scalar().elem::<f32>()
        );
    }

    /// Deploy the `RnnQAgent` into the environment for one episode of at most `max_steps` steps
    pub fn go<E>(&mut self, env: &mut E, max_steps: usize) -> Episode
    where
        E: Environment<Action = Action>,
        E::State: AsRef<[f32]>,
    {
        let mut state = env.reset();
        let mut previous: Option<(E::State, Action)> = None;
        let mut episode = Episode::default();

        while episode.steps < max_steps {
            let action = self.act(
                state.as_ref(),
                previous.as_ref().map(|(s, a)| (s.as_ref(), *a)),
            );
            let (next, reward) = env.step(action);
            episode.steps += 1;
            episode.reward += reward;

            let Some(next) = next else {
                break;
            };
            previous = Some((state, action));
            state = next;
        }

        debug!(
            "episode done after {} steps, reward {}, {} updates total",
            episode.steps, episode.reward, self.updates
        );

        episode
    }

    /// Wrap an observation as a length-1 sequence batch, `[1, 1, input_size]`
    fn to_input(&self, observation: &[f32]) -> Tensor<B, 3> {
        self.check_len(observation);
        let data = TensorData::new(observation.to_vec(), Shape::new([1, 1, observation.len()]));
        Tensor::from_floats(data, &self.device)
    }

    fn check_len(&self, observation: &[f32]) {
        assert_eq!(
            observation.len(),
            self.train_input.len(),
            "Observation has length {}, expected {}.",
            observation.len(),
            self.train_input.len(),
        );
    }
}

/// Reinforce the previous action for small-norm states, the opposite one otherwise
fn training_label(norm: f32, previous_action: Action, step_threshold: f32) -> Action {
    if norm < step_threshold {
        previous_action
    } else {
        previous_action.flipped()
    }
}
