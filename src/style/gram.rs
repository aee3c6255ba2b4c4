/*
 * @Author       : 老董
 * @Date         : 2026-02-12
 * @Description  : Gram统计（风格的二阶统计量）及其闭式梯度
 */

use crate::synthesis::SynthesisError;
use crate::tensor::{DimOrdering, Tensor};
use crate::tensor_slice;

/// 把特征图规整为(b,c,h,w)的通道在前布局
fn to_channels_first(features: &Tensor, ordering: DimOrdering) -> Result<Tensor, SynthesisError> {
    if features.dimension() != 4 {
        return Err(SynthesisError::shape_mismatch(
            &[],
            features.shape(),
            "特征图须是4阶张量",
        ));
    }
    Ok(match ordering {
        DimOrdering::ChannelsFirst => features.clone(),
        // (b,h,w,c) -> (b,c,h,w)
        DimOrdering::ChannelsLast => features.permute(&[0, 3, 1, 2]),
    })
}

/// 计算特征图的Gram矩阵，返回形状(b,c,c)。
///
/// 每个样本的c×(h·w)特征矩阵M给出`M·Mᵀ / (2·c·h·w)`。
/// 归一化常数把Gram的量级与特征图大小解耦，
/// 因此不同分辨率下的风格距离可以直接比较。
///
/// 两种维度次序（[`DimOrdering::ChannelsFirst`]与[`DimOrdering::ChannelsLast`]）
/// 给出完全相同的结果：通道在后的输入会先被规整为通道在前。
pub fn gram(features: &Tensor, ordering: DimOrdering) -> Result<Tensor, SynthesisError> {
    let canonical = to_channels_first(features, ordering)?;
    let shape = canonical.shape().to_vec();
    let (b, c, h, w) = (shape[0], shape[1], shape[2], shape[3]);
    let denominator = (2 * c * h * w) as f64;

    let mut grams = Vec::with_capacity(b);
    for bi in 0..b {
        let sample = tensor_slice!(canonical, bi, .., .., ..).reshape(&[c, h * w]);
        let gram = sample.mat_mul(&sample.transpose()) / denominator;
        grams.push(gram.reshape(&[1, c, c]));
    }
    let refs = grams.iter().collect::<Vec<_>>();
    Ok(Tensor::stack(&refs, false))
}

/// [`gram`]的反向：给定∂损失/∂Gram（形状(b,c,c)的余切），
/// 返回∂损失/∂特征图（与`features`同形状、同维度次序）。
///
/// 对余切C（不要求对称）：`∂L/∂M = (C + Cᵀ)·M / (2·c·h·w)`。
pub fn gram_backward(
    features: &Tensor,
    ordering: DimOrdering,
    cotangent: &Tensor,
) -> Result<Tensor, SynthesisError> {
    let canonical = to_channels_first(features, ordering)?;
    let shape = canonical.shape().to_vec();
    let (b, c, h, w) = (shape[0], shape[1], shape[2], shape[3]);

    let expected = vec![b, c, c];
    if cotangent.shape() != expected.as_slice() {
        return Err(SynthesisError::ShapeMismatch {
            expected,
            got: cotangent.shape().to_vec(),
            message: "Gram余切的形状须为(b,c,c)".to_string(),
        });
    }

    let denominator = (2 * c * h * w) as f64;
    let mut grads = Vec::with_capacity(b);
    for bi in 0..b {
        let m = tensor_slice!(canonical, bi, .., .., ..).reshape(&[c, h * w]);
        let cot = tensor_slice!(cotangent, bi, .., ..).reshape(&[c, c]);
        let symmetrized = &cot + &cot.transpose();
        let grad = symmetrized.mat_mul(&m) / denominator;
        grads.push(grad.reshape(&[1, c, h, w]));
    }
    let refs = grads.iter().collect::<Vec<_>>();
    let gradient = Tensor::stack(&refs, false);

    Ok(match ordering {
        DimOrdering::ChannelsFirst => gradient,
        // (b,c,h,w) -> (b,h,w,c)，回到调用方的布局
        DimOrdering::ChannelsLast => gradient.permute(&[0, 2, 3, 1]),
    })
}
