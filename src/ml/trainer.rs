// ============================================================
// Layer 5 — Training Loop
// ============================================================
// A short full-batch training loop shared by both operator
// families. One epoch here is exactly one optimiser step:
//
//   loss  = loss_fn(model)                forward + loss
//   grads = loss.backward()               backprop
//   model = optim.step(lr, model, grads)  Adam update
//
// The benchmark datasets are a single batch, so there is no
// DataLoader and no shuffling.
//
// Key Burn insight:
//   - optim.step() consumes the model and returns the updated
//     one, so the loop threads ownership through each epoch
//   - reading the loss back with into_scalar() also waits for
//     asynchronous backends (wgpu) to finish the step
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::{ensure, Result};
use burn::{
    module::AutodiffModule,
    optim::{GradientsParams, Optimizer},
    prelude::*,
    tensor::{backend::AutodiffBackend, TensorData},
};

/// Run `epochs` optimiser steps and return the updated model together
/// with the loss seen on the last epoch (before its update).
pub fn fit_epochs<B, M, O, L>(
    model:   M,
    optim:   &mut O,
    lr:      f64,
    epochs:  usize,
    loss_fn: L,
) -> Result<(M, f64)>
where
    B: AutodiffBackend,
    M: AutodiffModule<B>,
    O: Optimizer<M, B>,
    L: Fn(&M) -> Tensor<B, 1>,
{
    let mut model     = model;
    let mut last_loss = f64::NAN;

    for _ in 0..epochs {
        let loss = loss_fn(&model);
        last_loss = loss.clone().into_scalar().elem::<f64>();

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &model);
        model = optim.step(lr, model, grads);
    }

    ensure!(last_loss.is_finite(), "training diverged (loss = {last_loss})");
    Ok((model, last_loss))
}

/// Pull a tensor back to host memory. Used to close a timed region
/// only after the device has actually produced the values.
pub fn read_back<B: Backend, const D: usize>(tensor: Tensor<B, D>) -> TensorData {
    tensor.into_data()
}
