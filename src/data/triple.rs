use burn::{prelude::*, tensor::Distribution};

/// Training and test tensors for a DeepONet.
///
/// Row i pairs input function samples `u[i]` with one query
/// location `y[i]`; the target is the scalar operator output there.
#[derive(Debug, Clone)]
pub struct TripleData<B: Backend> {
    pub u_train:      Tensor<B, 2>,
    pub y_train:      Tensor<B, 2>,
    pub target_train: Tensor<B, 2>,
    pub u_test:       Tensor<B, 2>,
    pub y_test:       Tensor<B, 2>,
    pub target_test:  Tensor<B, 2>,
}

impl<B: Backend> TripleData<B> {
    /// Uniform [0, 1) noise with the given split sizes.
    pub fn random(
        batch_size: usize,
        test_size:  usize,
        sensors:    usize,
        dim_y:      usize,
        device:     &B::Device,
    ) -> Self {
        let rand = |rows: usize, cols: usize| {
            Tensor::<B, 2>::random([rows, cols], Distribution::Default, device)
        };

        Self {
            u_train:      rand(batch_size, sensors),
            y_train:      rand(batch_size, dim_y),
            target_train: rand(batch_size, 1),
            u_test:       rand(test_size, sensors),
            y_test:       rand(test_size, dim_y),
            target_test:  rand(test_size, 1),
        }
    }
}
