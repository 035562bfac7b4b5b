// examples/conv2d_training_step.rs
//!
//! One convolution layer fitted to a random target with plain gradient descent.
//! Shows the full cycle: forward, activation, backward, optimizer update.

use neuraconv_core::{
    error::NeuraConvError,
    nn::layers::conv2d::{Conv2d, Conv2dConfig},
    nn::InitMethod,
    ops::activation::get_activation,
    optim::{GradientDescent, LayerRegistry},
    tensor::create::randn,
};

fn main() -> Result<(), NeuraConvError> {
    let config = Conv2dConfig::new(3, 4, "conv1")
        .kernel_size(3)
        .stride(1)
        .padding(1)
        .initialize_method(InitMethod::Xavier);
    let mut conv = Conv2d::from_config(&config)?;
    let (activation, activation_backward) = get_activation("tanh")?;

    let mut registry = LayerRegistry::new();
    registry.register(&conv)?;
    let optimizer = GradientDescent::new(registry, 0.5)?;

    let mut rng = rand::thread_rng();
    let input = randn(&[8, 12, 12, 3], &mut rng)?;
    let target = randn(&[8, 12, 12, 4], &mut rng)?.map(f32::tanh);

    for epoch in 0..25 {
        let z = conv.forward(&input)?;
        let a = activation.forward(&z);
        let diff = a.zip_map(&target, "loss", |y, t| y - t)?;
        let n = diff.numel() as f32;
        let loss = 0.5 * diff.data().iter().map(|d| d * d).sum::<f32>() / n;

        let dz = activation_backward(&diff.map(|d| d / n), &z)?;
        let (_input_grad, grads) = conv.backward(&dz, &input)?;
        conv.update_parameters(&optimizer, grads, epoch)?;

        if epoch % 5 == 0 {
            println!("epoch {:>2}: loss {:.6}", epoch, loss);
        }
    }
    Ok(())
}
