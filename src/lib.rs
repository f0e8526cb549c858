mod activation;
mod device;
mod error;
mod layer;
mod model;

pub use activation::Activation;
pub use activation::ActivationSpec;
pub use device::Device;
pub use device::GpuContext;
pub use device::Tensor;
pub use error::Error;
pub use layer::Linear;
pub use model::build_mlp;
pub use model::Mlp;
pub use model::Step;
