mod total_variation;

use crate::tensor::Tensor;

/// 中心差分数值梯度，用来校验各闭式梯度
fn numeric_gradient(loss: impl Fn(&Tensor) -> f64, x: &Tensor, eps: f64) -> Tensor {
    let base = x.to_vec();
    let mut grad = Vec::with_capacity(base.len());
    for k in 0..base.len() {
        let mut plus = base.clone();
        plus[k] += eps;
        let mut minus = base.clone();
        minus[k] -= eps;
        let loss_plus = loss(&Tensor::new(&plus, x.shape()));
        let loss_minus = loss(&Tensor::new(&minus, x.shape()));
        grad.push((loss_plus - loss_minus) / (2.0 * eps));
    }
    Tensor::new(&grad, x.shape())
}
