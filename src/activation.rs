use ndarray::Array1;

use crate::error::Error;

// Constants from the usual SELU formulation.
const SELU_SCALE: f32 = 1.050_700_98;
const SELU_ALPHA: f32 = 1.673_263_2;

const LEAKY_RELU_SLOPE: f32 = 0.01;

/// Enum representing the supported elementwise nonlinearities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Identity,
    ReLU,
    Tanh,
    LeakyReLU,
    Sigmoid,
    Selu,
    Softplus,
}

impl Activation {
    /// Resolves a symbolic activation name.
    ///
    /// Recognized names: `identity`, `relu`, `tanh`, `leaky_relu`,
    /// `sigmoid`, `selu`, `softplus`. Any other name is an
    /// [`Error::UnknownActivation`].
    pub fn from_name(name: &str) -> Result<Self, Error> {
        match name {
            "identity" => Ok(Activation::Identity),
            "relu" => Ok(Activation::ReLU),
            "tanh" => Ok(Activation::Tanh),
            "leaky_relu" => Ok(Activation::LeakyReLU),
            "sigmoid" => Ok(Activation::Sigmoid),
            "selu" => Ok(Activation::Selu),
            "softplus" => Ok(Activation::Softplus),
            _ => Err(Error::UnknownActivation(name.to_owned())),
        }
    }

    /// Applies the activation function to a single value
    pub fn apply(&self, x: f32) -> f32 {
        match self {
            Activation::Identity => x,
            Activation::ReLU => x.max(0.0),
            Activation::Tanh => x.tanh(),
            Activation::LeakyReLU => {
                if x >= 0.0 {
                    x
                } else {
                    LEAKY_RELU_SLOPE * x
                }
            }
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Selu => {
                if x >= 0.0 {
                    SELU_SCALE * x
                } else {
                    SELU_SCALE * SELU_ALPHA * (x.exp() - 1.0)
                }
            }
            Activation::Softplus => x.exp().ln_1p(),
        }
    }

    /// Applies the activation elementwise to a vector
    pub fn forward(&self, input: &Array1<f32>) -> Array1<f32> {
        input.mapv(|x| self.apply(x))
    }
}

impl std::str::FromStr for Activation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Activation::from_name(s)
    }
}

/// An activation choice: either a symbolic name resolved at build time,
/// or an already-constructed [`Activation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationSpec {
    Named(String),
    Fixed(Activation),
}

impl ActivationSpec {
    /// The usual hidden-layer choice, `tanh`.
    pub fn default_hidden() -> Self {
        ActivationSpec::Fixed(Activation::Tanh)
    }

    /// The usual output choice, `identity`.
    pub fn default_output() -> Self {
        ActivationSpec::Fixed(Activation::Identity)
    }

    pub fn resolve(self) -> Result<Activation, Error> {
        match self {
            ActivationSpec::Named(name) => Activation::from_name(&name),
            ActivationSpec::Fixed(activation) => Ok(activation),
        }
    }
}

impl From<&str> for ActivationSpec {
    fn from(name: &str) -> Self {
        ActivationSpec::Named(name.to_owned())
    }
}

impl From<String> for ActivationSpec {
    fn from(name: String) -> Self {
        ActivationSpec::Named(name)
    }
}

impl From<Activation> for ActivationSpec {
    fn from(activation: Activation) -> Self {
        ActivationSpec::Fixed(activation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::EPSILON;

    #[test]
    fn test_activation_functions() {
        // Sigmoid tests
        assert!((Activation::Sigmoid.apply(0.0) - 0.5).abs() < EPSILON);

        // ReLU tests
        assert_eq!(Activation::ReLU.apply(-1.0), 0.0);
        assert_eq!(Activation::ReLU.apply(2.0), 2.0);

        // Tanh tests
        assert!((Activation::Tanh.apply(0.0)).abs() < EPSILON);

        // Identity tests
        assert_eq!(Activation::Identity.apply(5.0), 5.0);

        // Leaky ReLU keeps a small negative slope
        assert!((Activation::LeakyReLU.apply(-2.0) + 0.02).abs() < 1e-6);
        assert_eq!(Activation::LeakyReLU.apply(3.0), 3.0);

        // SELU is scale * x for positive inputs
        assert!((Activation::Selu.apply(1.0) - SELU_SCALE).abs() < EPSILON);

        // Softplus at zero is ln(2)
        assert!((Activation::Softplus.apply(0.0) - std::f32::consts::LN_2).abs() < 1e-6);
    }

    #[test]
    fn test_name_resolution() {
        for name in [
            "identity",
            "relu",
            "tanh",
            "leaky_relu",
            "sigmoid",
            "selu",
            "softplus",
        ] {
            assert!(Activation::from_name(name).is_ok(), "failed for {name}");
        }

        assert!(matches!(
            Activation::from_name("gelu"),
            Err(Error::UnknownActivation(_))
        ));
    }

    #[test]
    fn test_spec_resolution() {
        let named: ActivationSpec = "relu".into();
        assert_eq!(named.resolve().unwrap(), Activation::ReLU);

        let fixed: ActivationSpec = Activation::Tanh.into();
        assert_eq!(fixed.resolve().unwrap(), Activation::Tanh);

        let bad: ActivationSpec = "swish".into();
        assert!(bad.resolve().is_err());
    }

    #[test]
    fn test_forward_applies_elementwise() {
        let input = Array1::from_vec(vec![-1.0, 0.0, 2.0]);
        let output = Activation::ReLU.forward(&input);
        assert_eq!(output, Array1::from_vec(vec![0.0, 0.0, 2.0]));
    }
}
