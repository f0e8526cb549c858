use ndarray::{Array1, Array2};
use rand_distr::{Distribution, Normal};

/// A linear (affine) transform between two fixed-size vector spaces
#[derive(Debug, Clone)]
pub struct Linear {
    pub inputs: usize,
    pub neurons: usize,
    pub weights: Array2<f32>,
    pub bias: Array1<f32>,
}

impl Linear {
    /// Constructs a new linear transform with randomly initialized weights
    ///
    /// # Arguments
    ///
    /// * `inputs` - Number of inputs to this transform
    /// * `neurons` - Number of outputs of this transform
    pub fn new(inputs: usize, neurons: usize) -> Self {
        // He normalization
        let std_dev = (2.0 / inputs as f32).sqrt();
        let normal_dist = Normal::new(0.0, std_dev).unwrap();

        // Weights are (neurons × inputs) for correct matrix multiplication
        let weights: Array2<f32> =
            Array2::from_shape_fn((neurons, inputs), |_| normal_dist.sample(&mut rand::rng()));
        let bias: Array1<f32> = Array1::zeros(neurons);

        Linear {
            inputs,
            neurons,
            weights,
            bias,
        }
    }

    /// Forward pass through the transform
    ///
    /// # Arguments
    ///
    /// * `input` - Input vector, length must equal `inputs`
    ///
    /// # Returns
    ///
    /// The affine map `W·x + b`, length `neurons`
    pub fn forward(&self, input: &Array1<f32>) -> Array1<f32> {
        assert_eq!(
            input.len(),
            self.inputs,
            "Input size does not match layer's input size"
        );

        self.weights.dot(input) + &self.bias
    }

    /// Total number of trainable values held by this transform
    pub fn parameter_count(&self) -> usize {
        self.weights.len() + self.bias.len()
    }
}
