use gym_rs::core::{ActionReward, Env};
use gym_rs::envs::classical_control::cartpole::{CartPoleEnv, CartPoleObservation};
use gym_rs::utils::renderer::RenderMode;

use crate::action::Action;
use crate::env::{Environment, Report};

fn obs2arr(observation: CartPoleObservation) -> [f32; 4] {
    Vec::from(observation)
        .into_iter()
        .map(|x| x as f32)
        .collect::<Vec<_>>()
        .try_into()
        .expect("vec is length 4")
}

/// The classic CartPole reinforcement learning environment
///
/// This implementation is a thin wrapper around [gym_rs](https://github.com/MathisWellmann/gym-rs).
/// States are `[cart position, cart velocity, pole angle, pole angular velocity]`.
#[derive(Debug, Clone)]
pub struct CartPole {
    gym_env: CartPoleEnv,
    seed: Option<u64>,
    pub report: Report,
}

impl CartPole {
    pub fn new(render_mode: RenderMode) -> Self {
        Self {
            gym_env: CartPoleEnv::new(render_mode),
            seed: None,
            report: Report::new(vec!["reward", "steps"]),
        }
    }

    /// Like [`CartPole::new`], with `seed` applied on the first reset only
    pub fn with_seed(render_mode: RenderMode, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::new(render_mode)
        }
    }
}

impl Environment for CartPole {
    type State = [f32; 4];
    type Action = Action;

    fn step(&mut self, action: Self::Action) -> (Option<Self::State>, f32) {
        let ActionReward {
            observation,
            reward,
            done,
            ..
        } = self.gym_env.step(action as usize);

        let next_state = if done {
            None
        } else {
            Some(obs2arr(observation))
        };

        self.report.entry("reward").and_modify(|x| *x += *reward);
        self.report.entry("steps").and_modify(|x| *x += 1.0);

        (next_state, *reward as f32)
    }

    fn reset(&mut self) -> Self::State {
        obs2arr(self.gym_env.reset(self.seed.take(), false, None).0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obs2arr_functional() {
        let obs = CartPoleObservation::new(0.0.into(), 1.0.into(), 2.0.into(), 3.0.into());
        let arr = obs2arr(obs);
        assert_eq!(arr, [0.0, 1.0, 2.0, 3.0], "obs2arr conversion works");
    }

    #[test]
    fn episode_reports_steps() {
        let mut env = CartPole::with_seed(RenderMode::None, 42);
        let state = env.reset();
        assert!(state.iter().all(|x| x.abs() <= 0.05), "initial state is near upright");

        let mut steps = 0.0;
        while let (Some(_), _) = env.step(Action::Right) {
            steps += 1.0;
        }
        steps += 1.0;

        let report = env.report.take();
        assert_eq!(report["steps"], steps);
        assert_eq!(report["reward"], steps, "one unit of reward per step");
    }
}
