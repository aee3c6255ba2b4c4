use crate::synthesis::SynthesisError;
use crate::tensor::Tensor;

fn check_same_shape(
    target: &Tensor,
    current: &Tensor,
    message: &str,
) -> Result<(), SynthesisError> {
    if target.is_same_shape(current) {
        Ok(())
    } else {
        Err(SynthesisError::shape_mismatch(
            target.shape(),
            current.shape(),
            message,
        ))
    }
}

/// 平方Frobenius距离：`Σ(current - target)²`。
///
/// 风格损失（作用于Gram矩阵）与内容损失（作用于特征图）共用这一个距离。
pub fn frobenius_error(target: &Tensor, current: &Tensor) -> Result<f64, SynthesisError> {
    check_same_shape(target, current, "frobenius_error的两个张量形状须一致")?;
    let diff = current - target;
    Ok((&diff * &diff).sum())
}

/// [`frobenius_error`]对`current`的梯度：`2·(current - target)`
pub fn frobenius_error_backward(
    target: &Tensor,
    current: &Tensor,
) -> Result<Tensor, SynthesisError> {
    check_same_shape(target, current, "frobenius_error的两个张量形状须一致")?;
    Ok((current - target) * 2.0)
}

/// 归一化平方误差：`mean((current - target)² / 2)`
pub fn squared_normalized_error(target: &Tensor, current: &Tensor) -> Result<f64, SynthesisError> {
    check_same_shape(
        target,
        current,
        "squared_normalized_error的两个张量形状须一致",
    )?;
    let diff = current - target;
    Ok((&diff * &diff).mean() / 2.0)
}
