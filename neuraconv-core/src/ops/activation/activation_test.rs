use super::*;
use crate::utils::testing::check_tensor_near;
use approx::assert_relative_eq;

fn create_test_tensor(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Failed to create test tensor")
}

#[test]
fn test_get_activation_known_names() {
    for (name, expected) in [
        ("sigmoid", Activation::Sigmoid),
        ("relu", Activation::Relu),
        ("tanh", Activation::Tanh),
        ("linear", Activation::Linear),
    ] {
        let (activation, _) = get_activation(name).unwrap();
        assert_eq!(activation, expected);
        assert_eq!(activation.to_string(), name);
    }
}

#[test]
fn test_get_activation_bogus() {
    let result = get_activation("bogus");
    assert!(matches!(result, Err(NeuraConvError::InvalidArgument(_))));
    // Names are case sensitive.
    assert!(get_activation("ReLU").is_err());
}

#[test]
fn test_relu_forward() {
    let z = create_test_tensor(vec![-2.0, -1.0, 0.0, 1.0, 2.0], vec![5]);
    let a = Activation::Relu.forward(&z);
    check_tensor_near(&a, &[5], &[0.0, 0.0, 0.0, 1.0, 2.0], 1e-7);
}

#[test]
fn test_relu_backward_zeroes_non_positive() {
    let z = create_test_tensor(vec![-2.0, -1.0, 0.0, 1e-6, 2.0], vec![5]);
    let da = create_test_tensor(vec![5.0, 5.0, 5.0, 5.0, 5.0], vec![5]);
    let (_, backward) = get_activation("relu").unwrap();
    let dz = backward(&da, &z).unwrap();
    // Z == 0 is treated as inactive.
    check_tensor_near(&dz, &[5], &[0.0, 0.0, 0.0, 5.0, 5.0], 1e-7);
}

#[test]
fn test_linear_backward_is_identity() {
    let z = create_test_tensor(vec![-3.0, 0.0, 7.5, 1.0], vec![2, 2]);
    let da = create_test_tensor(vec![0.25, -1.0, 4.0, 0.0], vec![2, 2]);
    let dz = Activation::Linear.backward(&da, &z).unwrap();
    assert_eq!(dz, da);
    assert_eq!(Activation::Linear.forward(&z), z);
}

#[test]
fn test_sigmoid_forward_backward() {
    let z = create_test_tensor(vec![0.0, 2.0, -2.0], vec![3]);
    let a = Activation::Sigmoid.forward(&z);
    assert_relative_eq!(a.data()[0], 0.5);
    assert_relative_eq!(a.data()[1], 0.880_797, epsilon = 1e-5);
    assert_relative_eq!(a.data()[2], 0.119_203, epsilon = 1e-5);

    let da = create_test_tensor(vec![1.0, 2.0, 1.0], vec![3]);
    let dz = Activation::Sigmoid.backward(&da, &z).unwrap();
    assert_relative_eq!(dz.data()[0], 0.25);
    assert_relative_eq!(dz.data()[1], 2.0 * 0.880_797 * 0.119_203, epsilon = 1e-5);
    assert_relative_eq!(dz.data()[2], 0.119_203 * 0.880_797, epsilon = 1e-5);
}

#[test]
fn test_tanh_forward_backward() {
    let z = create_test_tensor(vec![0.0, 1.0], vec![2]);
    let a = Activation::Tanh.forward(&z);
    assert_relative_eq!(a.data()[0], 0.0);
    assert_relative_eq!(a.data()[1], 0.761_594, epsilon = 1e-5);

    let da = create_test_tensor(vec![3.0, 1.0], vec![2]);
    let dz = Activation::Tanh.backward(&da, &z).unwrap();
    assert_relative_eq!(dz.data()[0], 3.0);
    assert_relative_eq!(dz.data()[1], 1.0 - 0.761_594_f32 * 0.761_594, epsilon = 1e-5);
}

#[test]
fn test_backward_shape_mismatch() {
    let z = create_test_tensor(vec![1.0; 4], vec![4]);
    let da = create_test_tensor(vec![1.0; 4], vec![2, 2]);
    for activation in [
        Activation::Sigmoid,
        Activation::Relu,
        Activation::Tanh,
        Activation::Linear,
    ] {
        assert!(matches!(
            activation.backward(&da, &z),
            Err(NeuraConvError::ShapeMismatch { .. })
        ));
    }
}
