use crate::error::NeuraConvError;
use crate::nn::parameter::{read_param, write_param, Parameter};
use crate::tensor::{full, zeros};
use std::sync::{Arc, RwLock};

#[test]
fn test_parameter_deref() {
    let param = Parameter::new(zeros(&[2, 3]).unwrap(), Some("kernel".to_string()));
    // Access via Deref
    assert_eq!(param.shape(), vec![2, 3]);
    assert_eq!(param.numel(), 6);
    assert_eq!(param.name(), Some("kernel"));
}

#[test]
fn test_parameter_set_data_same_shape() -> Result<(), NeuraConvError> {
    let mut param = Parameter::new(zeros(&[1, 1, 1, 2])?, None);
    param.set_data(full(&[1, 1, 1, 2], 3.0)?)?;
    assert_eq!(param.data(), &[3.0, 3.0]);
    Ok(())
}

#[test]
fn test_parameter_set_data_rejects_resize() {
    let mut param = Parameter::new(zeros(&[2, 2]).unwrap(), Some("bias".to_string()));
    let err = param.set_data(zeros(&[4]).unwrap()).unwrap_err();
    assert!(matches!(err, NeuraConvError::ShapeMismatch { .. }));
    // Original values survive the failed update.
    assert_eq!(param.shape(), vec![2, 2]);
}

#[test]
fn test_parameter_into_inner() {
    let tensor = full(&[1, 5], 10.0).unwrap();
    let param = Parameter::new(tensor.clone(), None);
    assert_eq!(param.into_inner(), tensor);
}

#[test]
fn test_poisoned_lock_maps_to_lock_error() {
    let shared = Arc::new(RwLock::new(Parameter::new(zeros(&[1]).unwrap(), None)));
    let poisoner = Arc::clone(&shared);
    let _ = std::thread::spawn(move || {
        let _guard = poisoner.write().unwrap();
        panic!("poison the lock");
    })
    .join();

    assert!(matches!(
        read_param(&shared, "test"),
        Err(NeuraConvError::LockError { .. })
    ));
    assert!(matches!(
        write_param(&shared, "test"),
        Err(NeuraConvError::LockError { .. })
    ));
}
