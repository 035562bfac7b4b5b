use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_zeros() {
    let shape = vec![2, 3];
    let t = zeros(&shape).unwrap();
    assert_eq!(t.shape(), shape);
    assert_eq!(t.numel(), 6);
    assert!(t.data().iter().all(|&x| x == 0.0));
}

#[test]
fn test_ones() {
    let t = ones(&[1, 4]).unwrap();
    assert_eq!(t.shape(), vec![1, 4]);
    assert!(t.data().iter().all(|&x| x == 1.0));
}

#[test]
fn test_full() {
    let fill_val = 42.5_f32;
    let t = full(&[3, 1, 2], fill_val).unwrap();
    assert_eq!(t.numel(), 6);
    assert!(t.data().iter().all(|&x| (x - fill_val).abs() < 1e-6));
}

#[test]
fn test_zeros_like() {
    let tensor = Tensor::new(vec![1.0, 2.0, 3.0], vec![1, 3]).unwrap();
    let zeros_t = zeros_like(&tensor).unwrap();
    assert_eq!(zeros_t.shape(), tensor.shape());
    assert!(zeros_t.data().iter().all(|&x| x == 0.0));
}

#[test]
fn test_randn_is_seeded() {
    let a = randn(&[2, 2, 1, 3], &mut StdRng::seed_from_u64(7)).unwrap();
    let b = randn(&[2, 2, 1, 3], &mut StdRng::seed_from_u64(7)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.shape(), vec![2, 2, 1, 3]);
}

#[test]
fn test_rand_uniform_bounds() {
    let mut rng = StdRng::seed_from_u64(11);
    let t = rand_uniform(&[1000], -0.5, 0.5, &mut rng).unwrap();
    assert!(t.data().iter().all(|&x| (-0.5..=0.5).contains(&x)));
}

#[test]
fn test_rand_uniform_rejects_inverted_range() {
    let mut rng = StdRng::seed_from_u64(0);
    let result = rand_uniform(&[4], 1.0, -1.0, &mut rng);
    assert!(matches!(result, Err(NeuraConvError::InvalidArgument(_))));
}

#[test]
fn test_zeros_rejects_overflowing_shape() {
    let err = zeros(&[1 << 40, 1 << 40]).unwrap_err();
    assert!(matches!(err, NeuraConvError::InvalidArgument(_)));
}
