mod common;

use common::assert_all_close;
use neuraconv_core::error::NeuraConvError;
use neuraconv_core::nn::layers::conv2d::{Conv2d, Conv2dConfig};
use neuraconv_core::nn::InitMethod;
use neuraconv_core::optim::{GradientDescent, LayerRegistry, Optimizer};
use neuraconv_core::tensor::{randn, Tensor};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// 0.5 * sum((y - target)^2) and its gradient w.r.t. `y`.
fn mse(y: &Tensor, target: &Tensor) -> Result<(f32, Tensor), NeuraConvError> {
    let diff = y.zip_map(target, "mse", |a, b| a - b)?;
    let loss = 0.5 * diff.data().iter().map(|d| d * d).sum::<f32>();
    Ok((loss, diff))
}

#[test]
fn gradient_descent_reduces_loss() -> Result<(), NeuraConvError> {
    let mut rng = StdRng::seed_from_u64(1234);
    let config = Conv2dConfig::new(2, 3, "conv1")
        .kernel_size(3)
        .stride(1)
        .padding(1)
        .initialize_method(InitMethod::He);
    let mut conv = Conv2d::with_rng(&config, &mut rng)?;

    let mut registry = LayerRegistry::new();
    registry.register(&conv)?;
    let optimizer = GradientDescent::new(registry, 0.002)?;

    let input = randn(&[4, 6, 6, 2], &mut rng)?;
    let target = randn(&[4, 6, 6, 3], &mut rng)?;

    let (initial_loss, _) = mse(&conv.forward(&input)?, &target)?;
    let mut loss = initial_loss;
    for epoch in 0..20 {
        let output = conv.forward(&input)?;
        let (step_loss, output_grad) = mse(&output, &target)?;
        loss = step_loss;
        let (_, grads) = conv.backward(&output_grad, &input)?;
        conv.update_parameters(&optimizer, grads, epoch)?;
    }
    assert!(
        loss < initial_loss,
        "loss did not decrease: {} -> {}",
        initial_loss,
        loss
    );
    Ok(())
}

#[test]
fn optimizer_reads_current_parameters_each_step() -> Result<(), NeuraConvError> {
    let mut conv = Conv2d::new(1, 1, "tracked", 1, 1, 0, "random")?;
    conv.set_parameters(
        Tensor::new(vec![1.0], vec![1, 1, 1, 1])?,
        Tensor::new(vec![0.0], vec![1, 1, 1, 1])?,
    )?;
    let mut registry = LayerRegistry::new();
    registry.register(&conv)?;
    let optimizer = GradientDescent::new(registry, 0.5)?;
    assert_eq!(optimizer.learning_rate(), 0.5);

    let grads = vec![
        Tensor::new(vec![1.0], vec![1, 1, 1, 1])?,
        Tensor::new(vec![-1.0], vec![1, 1, 1, 1])?,
    ];
    for (epoch, expected_kernel) in [0.5_f32, 0.0, -0.5].into_iter().enumerate() {
        let updated = optimizer.update(&grads, "tracked", epoch)?;
        conv.set_parameters(updated[0].clone(), updated[1].clone())?;
        assert_all_close(conv.kernel()?.data(), &[expected_kernel], 1e-6);
    }
    assert_all_close(conv.bias()?.data(), &[1.5], 1e-6);
    Ok(())
}
