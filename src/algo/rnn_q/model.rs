use burn::{prelude::*, tensor::activation::sigmoid};
use nn::{Linear, LinearConfig};

use crate::rnn::{Rnn, RnnConfig};

/// Configuration to create an [`Approximator`]
#[derive(Config, Debug)]
pub struct ApproximatorConfig {
    pub d_input: usize,
    pub d_hidden: usize,
    pub d_output: usize,
}

impl ApproximatorConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Approximator<B> {
        assert!(self.d_output > 0, "Approximator output size must be non-zero");
        Approximator {
            rnn: RnnConfig::new(self.d_input, self.d_hidden).init(device),
            output: LinearConfig::new(self.d_hidden, self.d_output).init(device),
        }
    }
}

/// Sequence-to-scalar regressor standing in for a Q-value table
///
/// A recurrent layer over the input sequence, a dense layer on its final hidden state,
/// and a sigmoid squashing the result to `[0, 1]`.
#[derive(Module, Debug)]
pub struct Approximator<B: Backend> {
    rnn: Rnn<B>,
    output: Linear<B>,
}

impl<B: Backend> Approximator<B> {
    /// - input: `[batch_size, seq_length, d_input]`
    /// - output: `[batch_size, d_output]`
    pub fn forward(&self, input: Tensor<B, 3>) -> Tensor<B, 2> {
        let x = self.rnn.forward(input);
        sigmoid(self.output.forward(x))
    }
}

#[cfg(test)]
mod tests {
    use burn::backend::NdArray;

    use super::*;

    #[test]
    fn output_is_squashed() {
        let device = Default::default();
        let model = ApproximatorConfig::new(4, 10, 1).init::<NdArray>(&device);

        let input = Tensor::<NdArray, 3>::from_floats(
            [[[100.0, -100.0, 50.0, 0.0]], [[0.0; 4]], [[-3.0, 2.0, -1.0, 0.5]]],
            &device,
        );
        let output = model.forward(input);
        assert_eq!(output.dims(), [3, 1]);

        let values = output.into_data().to_vec::<f32>().unwrap();
        assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
    }
}
