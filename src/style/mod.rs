//! # 损失原语
//!
//! Gatys风格迁移所需的全部损失函数及其闭式梯度：
//! - [`gram`]/[`gram_backward`]：Gram统计及其对特征图的梯度
//! - [`frobenius_error`]/[`frobenius_error_backward`]：平方Frobenius距离（风格与内容共用）
//! - [`squared_normalized_error`]：归一化平方误差
//! - [`total_variation`]/[`total_variation_backward`]：相邻像素的总变差正则
//! - [`normalize_l2`]：梯度的L2归一化
//!
//! 所有原语都不依赖自动微分：梯度由闭式表达式直接给出，
//! 经由[`crate::features::FeatureExtractor::backward`]传播回图像空间。

mod distance;
mod gram;
mod normalize;
mod total_variation;

#[cfg(test)]
mod tests;

pub use distance::{frobenius_error, frobenius_error_backward, squared_normalized_error};
pub use gram::{gram, gram_backward};
pub use normalize::normalize_l2;
pub use total_variation::{total_variation, total_variation_backward};
