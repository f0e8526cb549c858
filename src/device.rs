use log::{info, warn};
use ndarray::{ArrayD, ArrayViewD, IxDyn};

use crate::error::Error;

/// Handle to an accelerator: the wgpu device plus its submission queue.
pub struct GpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
}

/// The compute device data is placed on.
///
/// Passed explicitly to every conversion call; there is no process-wide
/// device state.
pub enum Device {
    Cpu,
    Gpu(GpuContext),
}

/// A device-resident numeric array, always `f32`.
pub enum Tensor {
    Cpu(ArrayD<f32>),
    Gpu { buffer: wgpu::Buffer, shape: Vec<usize> },
}

impl Tensor {
    pub fn shape(&self) -> &[usize] {
        match self {
            Tensor::Cpu(array) => array.shape(),
            Tensor::Gpu { shape, .. } => shape,
        }
    }
}

async fn request_context(accelerator_id: usize) -> Result<GpuContext, Error> {
    let instance = wgpu::Instance::default();
    let mut adapters = instance.enumerate_adapters(wgpu::Backends::PRIMARY);
    if adapters.is_empty() {
        return Err(Error::NoAccelerator);
    }
    if accelerator_id >= adapters.len() {
        return Err(Error::AcceleratorIndex {
            requested: accelerator_id,
            available: adapters.len(),
        });
    }
    let adapter = adapters.swap_remove(accelerator_id);

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Tensor Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: Default::default(),
            },
            None,
        )
        .await
        .map_err(|e| Error::Accelerator(e.to_string()))?;

    Ok(GpuContext { device, queue })
}

impl Device {
    /// Picks the compute device for this context.
    ///
    /// If `use_accelerator` is set and the adapter at `accelerator_id`
    /// hands out a device, the context targets that accelerator;
    /// otherwise it falls back to the host processor. The choice is
    /// reported through the `log` facade.
    pub async fn init(use_accelerator: bool, accelerator_id: usize) -> Device {
        if use_accelerator {
            match request_context(accelerator_id).await {
                Ok(ctx) => {
                    info!("using accelerator id {accelerator_id}");
                    return Device::Gpu(ctx);
                }
                Err(err) => warn!("accelerator not detected ({err}), defaulting to host processor"),
            }
        } else {
            info!("accelerator not requested, using host processor");
        }
        Device::Cpu
    }

    /// Retargets this context at another accelerator index.
    ///
    /// # Errors
    ///
    /// [`Error::NoAccelerator`] when no adapter is present,
    /// [`Error::AcceleratorIndex`] when the index is out of range, and
    /// [`Error::Accelerator`] when the adapter refuses a device.
    pub async fn select(&mut self, accelerator_id: usize) -> Result<(), Error> {
        let ctx = request_context(accelerator_id).await?;
        info!("using accelerator id {accelerator_id}");
        *self = Device::Gpu(ctx);
        Ok(())
    }

    pub fn is_accelerator(&self) -> bool {
        matches!(self, Device::Gpu(_))
    }

    /// Converts a host array into a device-resident tensor, cast to `f32`.
    pub fn to_device(&self, input: ArrayViewD<'_, f64>) -> Tensor {
        match self {
            Device::Cpu => Tensor::Cpu(input.mapv(|x| x as f32)),
            Device::Gpu(ctx) => {
                let host: Vec<f32> = input.iter().map(|&x| x as f32).collect();
                let shape = input.shape().to_vec();

                let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some("Tensor Buffer"),
                    size: (host.len() * std::mem::size_of::<f32>()) as u64,
                    usage: wgpu::BufferUsages::STORAGE
                        | wgpu::BufferUsages::COPY_DST
                        | wgpu::BufferUsages::COPY_SRC,
                    mapped_at_creation: false,
                });
                ctx.queue.write_buffer(&buffer, 0, bytemuck::cast_slice(&host));

                Tensor::Gpu { buffer, shape }
            }
        }
    }

    /// Moves a tensor back to host memory as a plain `ndarray` array.
    ///
    /// For accelerator tensors this copies through a staging buffer and
    /// blocks on the queue, so the returned array is detached from any
    /// in-flight device work.
    pub async fn to_host(&self, tensor: &Tensor) -> ArrayD<f32> {
        match tensor {
            Tensor::Cpu(array) => array.clone(),
            Tensor::Gpu { buffer, shape } => {
                let ctx = match self {
                    Device::Gpu(ctx) => ctx,
                    Device::Cpu => {
                        panic!("Tensor resides on an accelerator but the host device was given")
                    }
                };

                let size = buffer.size();
                let staging_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some("Tensor Staging Buffer"),
                    size,
                    usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });

                let mut encoder =
                    ctx.device
                        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("Tensor Read Encoder"),
                        });
                encoder.copy_buffer_to_buffer(buffer, 0, &staging_buffer, 0, size);
                ctx.queue.submit(Some(encoder.finish()));

                let slice = staging_buffer.slice(..);
                let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
                slice.map_async(wgpu::MapMode::Read, move |result| {
                    tx.send(result).unwrap();
                });
                ctx.device.poll(wgpu::Maintain::Wait);
                rx.receive().await.unwrap().unwrap();

                let data = slice.get_mapped_range();
                let host: Vec<f32> = bytemuck::cast_slice(&data).to_vec();
                drop(data);
                staging_buffer.unmap();

                ArrayD::from_shape_vec(IxDyn(shape), host).unwrap()
            }
        }
    }
}
