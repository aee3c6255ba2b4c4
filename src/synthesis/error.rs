/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : 合成流程的错误类型与中断时的部分成果
 */

use super::history::LossHistory;
use crate::tensor::Tensor;
use thiserror::Error;

/// 合成中断时随错误一起带出的部分成果。
///
/// 损失变为非有限值或优化器发散时，已经走过的迭代并非一无所获：
/// 调用方可以从这里拿回中断前的最优图像与损失曲线。
#[derive(Debug, Clone, PartialEq)]
pub struct PartialProgress {
    /// 中断前记录到的最优图像（一次评估都没完成时为`None`）
    pub best_image: Option<Tensor>,
    /// 最优图像对应的损失
    pub best_loss: f64,
    /// 中断前的损失曲线
    pub history: LossHistory,
    /// 已完成的迭代数
    pub iterations: usize,
}

/// 合成相关错误
#[derive(Debug, Error, PartialEq)]
pub enum SynthesisError {
    /// 形状不匹配
    #[error("形状不匹配: 期望 {expected:?}, 实际 {got:?}（{message}）")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },

    /// 损失出现NaN/Inf，合成无法继续
    #[error("第{iteration}次迭代出现非有限损失（{value}），合成中止")]
    NonFiniteLoss {
        iteration: usize,
        value: f64,
        partial: PartialProgress,
    },

    /// 优化器自身发散（如线搜索彻底失败）
    #[error("优化器发散: {reason}")]
    OptimizerDivergence {
        reason: String,
        partial: PartialProgress,
    },

    /// 特征提取器报告的错误
    #[error("特征提取器错误: {0}")]
    Extractor(String),

    /// 配置无效
    #[error("配置无效: {0}")]
    InvalidConfig(String),
}

impl SynthesisError {
    /// 构造`ShapeMismatch`的便捷方法
    pub fn shape_mismatch(expected: &[usize], got: &[usize], message: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
            message: message.into(),
        }
    }
}
