use ndarray::{ArrayD, IxDyn};

use mlputil::{Device, Tensor};

#[tokio::test]
async fn test_init_without_accelerator_uses_host() {
    let _ = env_logger::builder().is_test(true).try_init();

    // Host processor must win whenever the accelerator is not requested,
    // regardless of what adapters are present.
    let device = Device::init(false, 0).await;
    assert!(!device.is_accelerator());
}

#[tokio::test]
async fn test_host_round_trip() {
    let device = Device::init(false, 0).await;

    let a = ArrayD::from_shape_vec(
        IxDyn(&[2, 3]),
        vec![1.0, -2.5, 0.0, 3.75, 1e-3, -7.125],
    )
    .unwrap();

    let tensor = device.to_device(a.view());
    assert_eq!(tensor.shape(), &[2, 3]);

    let back = device.to_host(&tensor).await;
    assert_eq!(back.shape(), a.shape());
    for (x, y) in a.iter().zip(back.iter()) {
        assert!((*x as f32 - *y).abs() < 1e-6, "round trip changed {x} into {y}");
    }
}

#[tokio::test]
async fn test_to_device_casts_to_f32() {
    let device = Device::init(false, 0).await;

    // A value not representable in f32 must come back rounded.
    let a = ArrayD::from_shape_vec(IxDyn(&[1]), vec![0.1f64]).unwrap();
    let tensor = device.to_device(a.view());

    match &tensor {
        Tensor::Cpu(data) => assert_eq!(data[0], 0.1f64 as f32),
        Tensor::Gpu { .. } => unreachable!("host device produced an accelerator tensor"),
    }
}

#[tokio::test]
async fn test_select_rejects_out_of_range_index() {
    let mut device = Device::init(false, 0).await;

    // Either no adapter is present or the index is past the last one;
    // both are selection failures.
    assert!(device.select(usize::MAX).await.is_err());
}

#[tokio::test]
async fn test_tensor_shape_is_preserved() {
    let device = Device::init(false, 0).await;

    let a = ArrayD::<f64>::zeros(IxDyn(&[4, 1, 2]));
    let tensor = device.to_device(a.view());
    assert_eq!(tensor.shape(), &[4, 1, 2]);

    let back = device.to_host(&tensor).await;
    assert_eq!(back.shape(), &[4, 1, 2]);
}
