use burn::prelude::*;
use nn::{Linear, LinearConfig};

/// Configuration to create a [`Rnn`] layer
#[derive(Config, Debug)]
pub struct RnnConfig {
    /// Size of the input features
    pub d_input: usize,
    /// Size of the hidden state
    pub d_hidden: usize,
    /// Whether the input projection has a bias
    #[config(default = true)]
    pub bias: bool,
}

impl RnnConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Rnn<B> {
        assert!(
            self.d_input > 0 && self.d_hidden > 0,
            "Rnn dimensions must be non-zero"
        );
        Rnn {
            input: LinearConfig::new(self.d_input, self.d_hidden)
                .with_bias(self.bias)
                .init(device),
            recurrent: LinearConfig::new(self.d_hidden, self.d_hidden)
                .with_bias(false)
                .init(device),
        }
    }
}

/// A single-layer Elman recurrent network
///
/// h<sub>t</sub> = tanh(W<sub>x</sub>x<sub>t</sub> + b + W<sub>h</sub>h<sub>t-1</sub>), with h<sub>0</sub> = 0
#[derive(Module, Debug)]
pub struct Rnn<B: Backend> {
    input: Linear<B>,
    recurrent: Linear<B>,
}

impl<B: Backend> Rnn<B> {
    /// Width of the hidden state
    pub fn d_hidden(&self) -> usize {
        self.recurrent.weight.val().dims()[1]
    }

    /// Run the layer over a batch of sequences
    ///
    /// - input: `[batch_size, seq_length, d_input]`
    /// - output: final hidden state, `[batch_size, d_hidden]`
    pub fn forward(&self, input: Tensor<B, 3>) -> Tensor<B, 2> {
        let [batch_size, seq_length, _] = input.dims();
        let mut hidden = Tensor::zeros([batch_size, self.d_hidden()], &input.device());

        for t in 0..seq_length {
            let x_t = input
                .clone()
                .slice([0..batch_size, t..t + 1])
                .squeeze::<2>(1);
            hidden = (self.input.forward(x_t) + self.recurrent.forward(hidden)).tanh();
        }

        hidden
    }
}

#[cfg(test)]
mod tests {
    use burn::backend::NdArray;

    use super::*;

    type TestBackend = NdArray;

    #[test]
    fn forward_shape_and_range() {
        let device = Default::default();
        let rnn = RnnConfig::new(4, 10).init::<TestBackend>(&device);
        assert_eq!(rnn.d_hidden(), 10);

        let input = Tensor::<TestBackend, 3>::from_floats(
            [[[0.1, -0.2, 0.3, 5.0], [1.0, 2.0, 3.0, 4.0]], [[0.0; 4], [-9.0; 4]]],
            &device,
        );
        let output = rnn.forward(input);
        assert_eq!(output.dims(), [2, 10]);

        let values = output.into_data().to_vec::<f32>().unwrap();
        assert!(values.iter().all(|v| (-1.0..=1.0).contains(v)), "tanh range");
    }

    #[test]
    fn zero_input_without_bias_gives_zero_state() {
        let device = Default::default();
        let rnn = RnnConfig::new(4, 3)
            .with_bias(false)
            .init::<TestBackend>(&device);
        let output = rnn.forward(Tensor::zeros([1, 1, 4], &device));
        let values = output.into_data().to_vec::<f32>().unwrap();
        assert_eq!(values, vec![0.0; 3]);
    }
}
