use crate::error::NeuraConvError;
use crate::nn::init::{zero_bias, InitMethod};
use crate::nn::module::Module;
use crate::nn::pair::Pair2d;
use crate::nn::parameter::{read_param, write_param, Parameter};
use crate::ops::padding::{crop, pad};
use crate::optim::Optimizer;
use crate::tensor::utils::{calculate_strides, checked_numel, nhwc_dims, padded_extent};
use crate::tensor::{zeros, Tensor};
use rand::Rng;
use std::sync::{Arc, RwLock};

/// Hyper-parameters of a [`Conv2d`] layer.
///
/// Defaults: 1x1 kernel, stride 1, padding 1 and
/// `random` initialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Conv2dConfig {
    pub in_channels: usize,
    pub out_channels: usize,
    pub name: String,
    pub kernel_size: Pair2d,
    pub stride: Pair2d,
    pub padding: Pair2d,
    pub initialize_method: InitMethod,
}

impl Conv2dConfig {
    pub fn new(in_channels: usize, out_channels: usize, name: impl Into<String>) -> Self {
        Conv2dConfig {
            in_channels,
            out_channels,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn kernel_size(mut self, kernel_size: impl Into<Pair2d>) -> Self {
        self.kernel_size = kernel_size.into();
        self
    }

    pub fn stride(mut self, stride: impl Into<Pair2d>) -> Self {
        self.stride = stride.into();
        self
    }

    pub fn padding(mut self, padding: impl Into<Pair2d>) -> Self {
        self.padding = padding.into();
        self
    }

    pub fn initialize_method(mut self, method: InitMethod) -> Self {
        self.initialize_method = method;
        self
    }
}

impl Default for Conv2dConfig {
    fn default() -> Self {
        Conv2dConfig {
            in_channels: 1,
            out_channels: 1,
            name: "conv2d".to_string(),
            kernel_size: Pair2d::square(1),
            stride: Pair2d::square(1),
            padding: Pair2d::square(1),
            initialize_method: InitMethod::Random,
        }
    }
}

/// Gradients of the loss w.r.t. a layer's kernel and bias.
///
/// Produced by one [`Conv2d::backward`] call and moved into exactly one
/// [`Conv2d::update_parameters`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct Conv2dGradients {
    /// Same shape as the kernel: `(kernel_h, kernel_w, in_channels, out_channels)`.
    pub kernel: Tensor,
    /// Same shape as the bias: `(1, 1, 1, out_channels)`.
    pub bias: Tensor,
}

impl Conv2dGradients {
    /// Gradients in parameter order (kernel, bias).
    pub fn into_vec(self) -> Vec<Tensor> {
        vec![self.kernel, self.bias]
    }
}

/// Applies a direct 2-D convolution over NHWC input.
///
/// Input is `(batch, height, width, in_channels)`; the kernel is
/// `(kernel_h, kernel_w, in_channels, out_channels)` and the bias
/// `(1, 1, 1, out_channels)`. The layer keeps both behind shared handles so an
/// optimizer's registry can read their current values.
#[derive(Debug)]
pub struct Conv2d {
    name: String,
    in_channels: usize,
    out_channels: usize,
    kernel_size: (usize, usize),
    stride: (usize, usize),
    padding: (usize, usize),
    kernel: Arc<RwLock<Parameter>>,
    bias: Arc<RwLock<Parameter>>,
}

/// Index arithmetic shared by forward and backward for one input shape.
struct ConvGeometry {
    batch: usize,
    out_h: usize,
    out_w: usize,
    in_c: usize,
    out_c: usize,
    kernel_size: (usize, usize),
    stride: (usize, usize),
    padded_strides: Vec<usize>,
    kernel_strides: Vec<usize>,
    output_strides: Vec<usize>,
}

impl ConvGeometry {
    fn output_offset(&self, i: usize, h: usize, w: usize, c: usize) -> usize {
        let s = &self.output_strides;
        i * s[0] + h * s[1] + w * s[2] + c * s[3]
    }

    /// Calls `f(padded_offset, kernel_offset)` for every tap of the receptive
    /// field feeding output position `(i, h, w)` through output channel `c`.
    fn for_each_tap(
        &self,
        i: usize,
        h: usize,
        w: usize,
        c: usize,
        mut f: impl FnMut(usize, usize),
    ) {
        let (ps, ks) = (&self.padded_strides, &self.kernel_strides);
        let h_start = h * self.stride.0;
        let w_start = w * self.stride.1;
        for kh in 0..self.kernel_size.0 {
            for kw in 0..self.kernel_size.1 {
                let padded_base = i * ps[0] + (h_start + kh) * ps[1] + (w_start + kw) * ps[2];
                let kernel_base = kh * ks[0] + kw * ks[1] + c * ks[3];
                for ci in 0..self.in_c {
                    f(padded_base + ci * ps[3], kernel_base + ci * ks[2]);
                }
            }
        }
    }
}

impl Conv2d {
    /// Creates a new Conv2d layer, drawing the kernel from the thread RNG.
    ///
    /// # Arguments
    ///
    /// * `in_channels` / `out_channels` - channel counts, both > 0.
    /// * `name` - unique key used by the optimizer's registry.
    /// * `kernel_size`, `stride`, `padding` - a scalar or a `(height, width)` pair.
    /// * `initialize_method` - one of `"random"`, `"xavier"`, `"he"`.
    ///
    /// # Errors
    /// `InvalidArgument` for an unknown init method, zero channels, a zero kernel
    /// dimension, a stride below 1 or a negative padding.
    pub fn new(
        in_channels: usize,
        out_channels: usize,
        name: impl Into<String>,
        kernel_size: impl Into<Pair2d>,
        stride: impl Into<Pair2d>,
        padding: impl Into<Pair2d>,
        initialize_method: &str,
    ) -> Result<Self, NeuraConvError> {
        let config = Conv2dConfig::new(in_channels, out_channels, name)
            .kernel_size(kernel_size)
            .stride(stride)
            .padding(padding)
            .initialize_method(initialize_method.parse()?);
        Conv2d::from_config(&config)
    }

    pub fn from_config(config: &Conv2dConfig) -> Result<Self, NeuraConvError> {
        Conv2d::with_rng(config, &mut rand::thread_rng())
    }

    /// Same as [`Conv2d::from_config`] but draws the kernel from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        config: &Conv2dConfig,
        rng: &mut R,
    ) -> Result<Self, NeuraConvError> {
        if config.in_channels == 0 || config.out_channels == 0 {
            return Err(NeuraConvError::InvalidArgument(format!(
                "Conv2d '{}' needs positive channel counts, got in={} out={}",
                config.name, config.in_channels, config.out_channels
            )));
        }
        if config.name.is_empty() {
            return Err(NeuraConvError::InvalidArgument(
                "Conv2d name must not be empty".to_string(),
            ));
        }
        let kernel_size = config.kernel_size.at_least(1, "kernel_size")?;
        let stride = config.stride.at_least(1, "stride")?;
        let padding = config.padding.at_least(0, "padding")?;

        let kernel_shape = [
            kernel_size.0,
            kernel_size.1,
            config.in_channels,
            config.out_channels,
        ];
        if checked_numel(&kernel_shape).is_err() {
            return Err(NeuraConvError::InvalidArgument(format!(
                "Conv2d '{}' kernel {:?} has more elements than fit in usize",
                config.name, kernel_shape
            )));
        }
        let kernel = config.initialize_method.initialize(
            &kernel_shape,
            config.in_channels,
            config.out_channels,
            rng,
        )?;
        let bias = zero_bias(config.out_channels)?;

        log::debug!(
            "Created Conv2d '{}': {} -> {} channels, kernel {:?}, stride {:?}, padding {:?}, \
             init {}",
            config.name,
            config.in_channels,
            config.out_channels,
            kernel_size,
            stride,
            padding,
            config.initialize_method
        );

        Ok(Conv2d {
            name: config.name.clone(),
            in_channels: config.in_channels,
            out_channels: config.out_channels,
            kernel_size,
            stride,
            padding,
            kernel: Arc::new(RwLock::new(Parameter::new(kernel, Some("kernel".to_string())))),
            bias: Arc::new(RwLock::new(Parameter::new(bias, Some("bias".to_string())))),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn in_channels(&self) -> usize {
        self.in_channels
    }

    pub fn out_channels(&self) -> usize {
        self.out_channels
    }

    pub fn kernel_size(&self) -> (usize, usize) {
        self.kernel_size
    }

    pub fn stride(&self) -> (usize, usize) {
        self.stride
    }

    pub fn padding(&self) -> (usize, usize) {
        self.padding
    }

    /// Snapshot of the current kernel.
    pub fn kernel(&self) -> Result<Tensor, NeuraConvError> {
        Ok(read_param(&self.kernel, "Conv2d::kernel")?.clone().into_inner())
    }

    /// Snapshot of the current bias.
    pub fn bias(&self) -> Result<Tensor, NeuraConvError> {
        Ok(read_param(&self.bias, "Conv2d::bias")?.clone().into_inner())
    }

    /// Overwrites kernel and bias, e.g. to load known weights.
    ///
    /// # Errors
    /// `ShapeMismatch` if either tensor differs from the configured shape; in that
    /// case neither parameter is modified.
    pub fn set_parameters(&mut self, kernel: Tensor, bias: Tensor) -> Result<(), NeuraConvError> {
        let kernel_shape = vec![
            self.kernel_size.0,
            self.kernel_size.1,
            self.in_channels,
            self.out_channels,
        ];
        let bias_shape = vec![1, 1, 1, self.out_channels];
        if kernel.shape() != kernel_shape {
            return Err(NeuraConvError::shape_mismatch(
                kernel_shape,
                kernel.shape(),
                "Conv2d::set_parameters (kernel)",
            ));
        }
        if bias.shape() != bias_shape {
            return Err(NeuraConvError::shape_mismatch(
                bias_shape,
                bias.shape(),
                "Conv2d::set_parameters (bias)",
            ));
        }
        write_param(&self.kernel, "Conv2d::set_parameters")?.set_data(kernel)?;
        write_param(&self.bias, "Conv2d::set_parameters")?.set_data(bias)?;
        Ok(())
    }

    /// Output spatial size for an `input_height x input_width` input.
    ///
    /// `out = floor((in + 2*pad - kernel) / stride) + 1` on each axis.
    ///
    /// # Errors
    /// `ShapeMismatch` if the padded input is smaller than the kernel or its size
    /// overflows `usize`.
    pub fn target_shape(
        &self,
        input_height: usize,
        input_width: usize,
    ) -> Result<(usize, usize), NeuraConvError> {
        let padded = padded_extent(input_height, self.padding.0)
            .zip(padded_extent(input_width, self.padding.1));
        let (padded_h, padded_w) = padded.ok_or_else(|| NeuraConvError::ShapeMismatch {
            expected: vec![input_height, input_width],
            actual: vec![self.padding.0, self.padding.1],
            operation: format!(
                "Conv2d::target_shape ('{}': padded input size overflows usize)",
                self.name
            ),
        })?;
        if padded_h < self.kernel_size.0 || padded_w < self.kernel_size.1 {
            return Err(NeuraConvError::ShapeMismatch {
                expected: vec![self.kernel_size.0, self.kernel_size.1],
                actual: vec![padded_h, padded_w],
                operation: format!(
                    "Conv2d::target_shape ('{}': padded input smaller than kernel)",
                    self.name
                ),
            });
        }
        Ok((
            (padded_h - self.kernel_size.0) / self.stride.0 + 1,
            (padded_w - self.kernel_size.1) / self.stride.1 + 1,
        ))
    }

    /// Zero-pads the spatial axes of `tensor` by this layer's padding.
    pub fn pad(&self, tensor: &Tensor) -> Result<Tensor, NeuraConvError> {
        pad(tensor, self.padding)
    }

    fn geometry(
        &self,
        input: &Tensor,
        padded: &Tensor,
        kernel: &Tensor,
        operation: &str,
    ) -> Result<ConvGeometry, NeuraConvError> {
        let (batch, in_h, in_w, in_c) = nhwc_dims(&input.shape(), operation)?;
        if in_c != self.in_channels {
            return Err(NeuraConvError::ShapeMismatch {
                expected: vec![batch, in_h, in_w, self.in_channels],
                actual: input.shape(),
                operation: format!("{} ('{}': input channels)", operation, self.name),
            });
        }
        let (out_h, out_w) = self.target_shape(in_h, in_w)?;
        Ok(ConvGeometry {
            batch,
            out_h,
            out_w,
            in_c,
            out_c: self.out_channels,
            kernel_size: self.kernel_size,
            stride: self.stride,
            padded_strides: padded.strides().to_vec(),
            kernel_strides: kernel.strides().to_vec(),
            output_strides: calculate_strides(&[batch, out_h, out_w, self.out_channels]),
        })
    }

    /// Convolves `input` of shape `(batch, H, W, in_channels)`.
    ///
    /// Returns `(batch, out_h, out_w, out_channels)` with the spatial size from
    /// [`Conv2d::target_shape`].
    ///
    /// # Errors
    /// `ShapeMismatch` if `input` is not rank 4 or its channel count differs from
    /// `in_channels`.
    pub fn forward(&self, input: &Tensor) -> Result<Tensor, NeuraConvError> {
        nhwc_dims(&input.shape(), "Conv2d::forward")?;
        let kernel_guard = read_param(&self.kernel, "Conv2d::forward")?;
        let bias_guard = read_param(&self.bias, "Conv2d::forward")?;
        let kernel: &Tensor = &kernel_guard;
        let bias = bias_guard.data();

        let padded = self.pad(input)?;
        let geo = self.geometry(input, &padded, kernel, "Conv2d::forward")?;
        log::trace!(
            "Conv2d '{}' forward: input {:?} -> output {:?}",
            self.name,
            input.shape(),
            [geo.batch, geo.out_h, geo.out_w, geo.out_c]
        );

        let mut output = zeros(&[geo.batch, geo.out_h, geo.out_w, geo.out_c])?;
        let padded_data = padded.data();
        let kernel_data = kernel.data();
        let output_data = output.data_mut();
        for i in 0..geo.batch {
            for h in 0..geo.out_h {
                for w in 0..geo.out_w {
                    for c in 0..geo.out_c {
                        let mut z = 0.0_f32;
                        geo.for_each_tap(i, h, w, c, |p, k| {
                            z += padded_data[p] * kernel_data[k]
                        });
                        output_data[geo.output_offset(i, h, w, c)] = z + bias[c];
                    }
                }
            }
        }
        Ok(output)
    }

    /// Back-propagates `output_gradient` through the convolution of `input`.
    ///
    /// Returns the gradient w.r.t. `input` (same shape as `input`) and the
    /// kernel/bias gradients. Gradients are summed over the batch, not averaged.
    ///
    /// # Errors
    /// `ShapeMismatch` if `input` fails the same checks as in [`Conv2d::forward`] or
    /// `output_gradient` is not `(batch, out_h, out_w, out_channels)`.
    pub fn backward(
        &self,
        output_gradient: &Tensor,
        input: &Tensor,
    ) -> Result<(Tensor, Conv2dGradients), NeuraConvError> {
        nhwc_dims(&input.shape(), "Conv2d::backward")?;
        let kernel_guard = read_param(&self.kernel, "Conv2d::backward")?;
        let bias_guard = read_param(&self.bias, "Conv2d::backward")?;
        let kernel: &Tensor = &kernel_guard;

        let padded = self.pad(input)?;
        let geo = self.geometry(input, &padded, kernel, "Conv2d::backward")?;
        let expected_grad_shape = vec![geo.batch, geo.out_h, geo.out_w, geo.out_c];
        if output_gradient.shape() != expected_grad_shape {
            return Err(NeuraConvError::ShapeMismatch {
                expected: expected_grad_shape,
                actual: output_gradient.shape(),
                operation: format!("Conv2d::backward ('{}': output gradient)", self.name),
            });
        }
        log::trace!(
            "Conv2d '{}' backward: output gradient {:?}, input {:?}",
            self.name,
            output_gradient.shape(),
            input.shape()
        );

        let mut padded_input_grad = zeros(&padded.shape())?;
        let mut kernel_grad = zeros(&kernel.shape())?;
        let mut bias_grad = zeros(&bias_guard.shape())?;
        {
            let padded_data = padded.data();
            let kernel_data = kernel.data();
            let grad_data = output_gradient.data();
            let d_padded = padded_input_grad.data_mut();
            let d_kernel = kernel_grad.data_mut();
            let d_bias = bias_grad.data_mut();
            for i in 0..geo.batch {
                for h in 0..geo.out_h {
                    for w in 0..geo.out_w {
                        for c in 0..geo.out_c {
                            let g = grad_data[geo.output_offset(i, h, w, c)];
                            geo.for_each_tap(i, h, w, c, |p, k| {
                                d_padded[p] += kernel_data[k] * g;
                                d_kernel[k] += padded_data[p] * g;
                            });
                            d_bias[c] += g;
                        }
                    }
                }
            }
        }

        let input_grad = crop(&padded_input_grad, self.padding)?;
        Ok((
            input_grad,
            Conv2dGradients {
                kernel: kernel_grad,
                bias: bias_grad,
            },
        ))
    }

    /// Hands `gradients` to `optimizer` under this layer's name and stores the
    /// returned kernel and bias.
    ///
    /// # Errors
    /// Whatever the optimizer returns (`NotFound` for an unregistered layer), or
    /// `ShapeMismatch` if it does not return exactly a kernel and a bias of the
    /// configured shapes. Parameters are left untouched on error.
    pub fn update_parameters(
        &mut self,
        optimizer: &dyn Optimizer,
        gradients: Conv2dGradients,
        epoch: usize,
    ) -> Result<(), NeuraConvError> {
        let updated = optimizer.update(&gradients.into_vec(), &self.name, epoch)?;
        let [kernel, bias]: [Tensor; 2] = updated.try_into().map_err(|v: Vec<Tensor>| {
            NeuraConvError::shape_mismatch(
                vec![2],
                vec![v.len()],
                "Conv2d::update_parameters (parameter count)",
            )
        })?;
        self.set_parameters(kernel, bias)?;
        log::debug!("Updated parameters of Conv2d '{}' (epoch {})", self.name, epoch);
        Ok(())
    }
}

impl Module for Conv2d {
    fn forward(&self, input: &Tensor) -> Result<Tensor, NeuraConvError> {
        Conv2d::forward(self, input)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Vec<Arc<RwLock<Parameter>>> {
        vec![Arc::clone(&self.kernel), Arc::clone(&self.bias)]
    }
}

#[cfg(test)]
#[path = "conv2d_test.rs"]
mod tests;
