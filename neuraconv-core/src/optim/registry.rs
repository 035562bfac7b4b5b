use crate::error::NeuraConvError;
use crate::nn::module::Module;
use crate::nn::parameter::{read_param, Parameter};
use crate::tensor::Tensor;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// What the registry knows about one layer: handles to its parameters.
///
/// The handles are shared with the layer, so reading them always yields the
/// layer's current values.
#[derive(Debug, Clone)]
pub struct LayerEntry {
    params: Vec<Arc<RwLock<Parameter>>>,
}

impl LayerEntry {
    pub fn parameters(&self) -> &[Arc<RwLock<Parameter>>] {
        &self.params
    }

    /// Copies the current parameter values, in registration order.
    pub fn snapshot(&self) -> Result<Vec<Tensor>, NeuraConvError> {
        self.params
            .iter()
            .map(|p| -> Result<Tensor, NeuraConvError> {
                Ok(read_param(p, "LayerEntry::snapshot")?.clone().into_inner())
            })
            .collect()
    }
}

/// Maps layer names to their parameters for the lifetime of a training session.
///
/// Created by the caller and handed to an optimizer; there is no global registry.
#[derive(Debug, Default, Clone)]
pub struct LayerRegistry {
    layers: HashMap<String, LayerEntry>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `layer` under its name.
    ///
    /// # Errors
    /// `InvalidArgument` if a layer with the same name is already registered.
    pub fn register(&mut self, layer: &dyn Module) -> Result<(), NeuraConvError> {
        let name = layer.name();
        if self.layers.contains_key(name) {
            return Err(NeuraConvError::InvalidArgument(format!(
                "Layer '{}' is already registered",
                name
            )));
        }
        let params = layer.parameters();
        log::debug!("Registered layer '{}' with {} parameters", name, params.len());
        self.layers.insert(name.to_string(), LayerEntry { params });
        Ok(())
    }

    /// Looks up a layer by name.
    ///
    /// # Errors
    /// `NotFound` if nothing was registered under `name`.
    pub fn get(&self, name: &str) -> Result<&LayerEntry, NeuraConvError> {
        self.layers.get(name).ok_or_else(|| NeuraConvError::NotFound {
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.layers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
