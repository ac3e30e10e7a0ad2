use std::time::Instant;

use burn::{
    backend::{ndarray::NdArrayDevice, Autodiff, NdArray},
    prelude::*,
};
use gym_rs::utils::renderer::RenderMode;
use log::{info, warn};
use once_cell::sync::Lazy;
use rnn_q::{
    algo::{ControllerConfig, RnnQAgent},
    gym::CartPole,
};

type RnnQBackend = Autodiff<NdArray>;

static DEVICE: Lazy<NdArrayDevice> = Lazy::new(NdArrayDevice::default);

#[derive(Config, Debug)]
pub struct RunConfig {
    pub controller: ControllerConfig,
    #[config(default = 100)]
    pub episodes: usize,
    #[config(default = 500)]
    pub max_steps: usize,
    #[config(default = 0)]
    pub seed: u64,
    #[config(default = false)]
    pub render: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => RunConfig::load(&path)
            .unwrap_or_else(|e| panic!("Failed to load run config from {path}: {e}")),
        None => {
            warn!("No run config given, using defaults");
            RunConfig::new(ControllerConfig::new())
        }
    };

    RnnQBackend::seed(config.seed);

    let render_mode = if config.render {
        RenderMode::Human
    } else {
        RenderMode::None
    };
    let mut env = CartPole::with_seed(render_mode, config.seed);
    let mut agent = RnnQAgent::<RnnQBackend>::new(&config.controller, &*DEVICE);

    for i in 0..config.episodes {
        let start = Instant::now();
        let episode = agent.go(&mut env, config.max_steps);
        let report = env.report.take();

        info!(
            "Episode {i} finished after {} timesteps, reward {} ({:.2?})",
            episode.steps,
            report["reward"],
            start.elapsed()
        );
    }

    info!("{} updates performed", agent.updates());
}
