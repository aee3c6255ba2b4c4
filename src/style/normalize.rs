use crate::tensor::Tensor;

/// 把梯度除以自身的均方根：`g / (sqrt(mean(g²)) + 1e-5)`。
///
/// 原论文配方里各项权重是按归一化梯度标定的，一阶优化路径在合成循环中
/// 每步都会先做这一归一化再交给优化器。常数1e-5防零除。
pub fn normalize_l2(gradient: &Tensor) -> Tensor {
    let rms = (gradient * gradient).mean().sqrt();
    gradient / (rms + 1e-5)
}
