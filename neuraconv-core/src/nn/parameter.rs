use crate::error::NeuraConvError;
use crate::tensor::Tensor;
use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A wrapper around a Tensor indicating it is a learnable parameter of a Module.
///
/// The shape is fixed at creation: [`Parameter::set_data`] only accepts
/// replacements of the same shape.
#[derive(Clone)]
pub struct Parameter {
    tensor: Tensor,
    name: Option<String>,
}

impl Parameter {
    pub fn new(tensor: Tensor, name: Option<String>) -> Self {
        Parameter { tensor, name }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Replaces the stored values.
    ///
    /// # Errors
    /// `ShapeMismatch` if `tensor` does not have the parameter's shape.
    pub fn set_data(&mut self, tensor: Tensor) -> Result<(), NeuraConvError> {
        if tensor.shape() != self.tensor.shape() {
            return Err(NeuraConvError::ShapeMismatch {
                expected: self.tensor.shape(),
                actual: tensor.shape(),
                operation: format!(
                    "Parameter::set_data ({})",
                    self.name.as_deref().unwrap_or("unnamed")
                ),
            });
        }
        self.tensor = tensor;
        Ok(())
    }

    /// Consumes the Parameter and returns the underlying Tensor.
    pub fn into_inner(self) -> Tensor {
        self.tensor
    }
}

// Allow accessing the underlying Tensor immutably via Deref.
impl Deref for Parameter {
    type Target = Tensor;

    fn deref(&self) -> &Self::Target {
        &self.tensor
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Parameter({}, {:?})", name, self.tensor),
            None => write!(f, "Parameter({:?})", self.tensor),
        }
    }
}

/// Acquires a read lock on a shared parameter, mapping poisoning to `LockError`.
pub(crate) fn read_param<'a>(
    param: &'a Arc<RwLock<Parameter>>,
    context: &str,
) -> Result<RwLockReadGuard<'a, Parameter>, NeuraConvError> {
    param.read().map_err(|e| NeuraConvError::LockError {
        lock_type: "read".to_string(),
        reason: format!("{}: {}", context, e),
    })
}

/// Acquires a write lock on a shared parameter, mapping poisoning to `LockError`.
pub(crate) fn write_param<'a>(
    param: &'a Arc<RwLock<Parameter>>,
    context: &str,
) -> Result<RwLockWriteGuard<'a, Parameter>, NeuraConvError> {
    param.write().map_err(|e| NeuraConvError::LockError {
        lock_type: "write".to_string(),
        reason: format!("{}: {}", context, e),
    })
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
