use ndarray::{Array1, ArrayViewD};

use crate::activation::{Activation, ActivationSpec};
use crate::error::Error;
use crate::layer::Linear;

/// One stage of an assembled network: a linear transform or an
/// elementwise nonlinearity.
#[derive(Debug, Clone)]
pub enum Step {
    Linear(Linear),
    Activation(Activation),
}

/// A feedforward network: an ordered sequence of alternating linear
/// transforms and hidden activations, terminated by an independent
/// output activation.
///
/// The structure is fixed at build time; only the numeric parameters
/// inside each [`Linear`] are meant to change afterwards.
#[derive(Debug, Clone)]
pub struct Mlp {
    pub steps: Vec<Step>,
    pub output_activation: Activation,
    /// Requested output width. Recorded but unused: no transform in the
    /// assembled sequence emits `output_size`-wide vectors, see
    /// [`build_mlp`].
    pub output_size: usize,
}

impl Mlp {
    /// Runs the network on an input of any shape.
    ///
    /// The input is flattened to one dimension, threaded through the
    /// step sequence, and the output activation is applied last.
    pub fn forward(&self, input: ArrayViewD<'_, f32>) -> Array1<f32> {
        let mut current: Array1<f32> = input.iter().copied().collect();
        for step in &self.steps {
            current = match step {
                Step::Linear(linear) => linear.forward(&current),
                Step::Activation(activation) => activation.forward(&current),
            };
        }
        self.output_activation.forward(&current)
    }

    /// Number of linear transforms in the step sequence
    pub fn linear_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, Step::Linear(_)))
            .count()
    }

    /// Number of hidden activations in the step sequence
    pub fn hidden_activation_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, Step::Activation(_)))
            .count()
    }

    /// Total number of trainable values across all transforms
    pub fn parameter_count(&self) -> usize {
        self.steps
            .iter()
            .map(|s| match s {
                Step::Linear(linear) => linear.parameter_count(),
                Step::Activation(_) => 0,
            })
            .sum()
    }
}

/// Builds a feedforward neural network
///
/// Assembles `n_layers + 1` linear transforms: the first maps
/// `input_size → size`, and each subsequent one is preceded by the hidden
/// activation and maps `size → size`.
///
/// Known quirk, kept on purpose: the sequence never contains a transform
/// emitting `output_size`-wide vectors, so the network's final width is
/// `size` for every `n_layers`, including 0. `output_size` is recorded on
/// the returned [`Mlp`] but does not shape any layer.
///
/// # Arguments
///
/// * `input_size` - width of the input layer
/// * `output_size` - requested output width (see quirk above)
/// * `n_layers` - number of hidden layers
/// * `size` - width of each hidden layer
/// * `activation` - activation of each hidden layer, by name or value
///   (`tanh` in the usual configuration)
/// * `output_activation` - activation of the output, by name or value
///   (`identity` in the usual configuration)
///
/// # Errors
///
/// [`Error::UnknownActivation`] if either activation is named and the
/// name is outside the fixed lookup table.
pub fn build_mlp(
    input_size: usize,
    output_size: usize,
    n_layers: usize,
    size: usize,
    activation: impl Into<ActivationSpec>,
    output_activation: impl Into<ActivationSpec>,
) -> Result<Mlp, Error> {
    let activation = activation.into().resolve()?;
    let output_activation = output_activation.into().resolve()?;

    let mut steps = Vec::new();
    for i in 0..=n_layers {
        if i == 0 {
            steps.push(Step::Linear(Linear::new(input_size, size)));
        } else {
            steps.push(Step::Activation(activation));
            steps.push(Step::Linear(Linear::new(size, size)));
        }
    }

    Ok(Mlp {
        steps,
        output_activation,
        output_size,
    })
}
