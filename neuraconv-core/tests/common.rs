use neuraconv_core::tensor::Tensor;

// Shared by several integration-test crates; not every crate uses every helper.
#[allow(dead_code)]
pub fn nhwc(data: Vec<f32>, shape: [usize; 4]) -> Tensor {
    Tensor::new(data, shape.to_vec()).expect("Test tensor creation failed")
}

#[allow(dead_code)]
pub fn assert_all_close(actual: &[f32], expected: &[f32], epsilon: f32) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (a, e) in actual.iter().zip(expected.iter()) {
        approx::assert_abs_diff_eq!(*a, *e, epsilon = epsilon);
    }
}
