use crate::objective::Evaluation;
use crate::tensor::Tensor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 损失曲线：总损失与各命名损失项的逐迭代序列。
///
/// 序列只增不改。`best_so_far`给出单调不增的"迄今最优"导出序列，
/// 便于绘图与断言收敛趋势。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LossHistory {
    total: Vec<f64>,
    terms: BTreeMap<String, Vec<f64>>,
}

impl LossHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次评估的总损失与各命名损失项
    pub fn record(&mut self, evaluation: &Evaluation) {
        self.total.push(evaluation.loss);
        for (name, value) in &evaluation.terms {
            self.terms.entry(name.clone()).or_default().push(*value);
        }
    }

    pub fn len(&self) -> usize {
        self.total.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total.is_empty()
    }

    /// 总损失序列
    pub fn total(&self) -> &[f64] {
        &self.total
    }

    /// 某个命名损失项的序列
    pub fn term(&self, name: &str) -> Option<&[f64]> {
        self.terms.get(name).map(Vec::as_slice)
    }

    /// 所有命名损失项的名字（字典序）
    pub fn term_names(&self) -> Vec<&str> {
        self.terms.keys().map(String::as_str).collect()
    }

    /// 迄今最优序列（单调不增）
    pub fn best_so_far(&self) -> Vec<f64> {
        let mut best = f64::INFINITY;
        self.total
            .iter()
            .map(|&loss| {
                if loss < best {
                    best = loss;
                }
                best
            })
            .collect()
    }
}

/// 合成循环的结束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// 走满了最大迭代数
    MaxIterReached,
    /// 损失长期未刷新最优而提前停止
    Stalled,
    /// 优化器自身判定收敛（仅拟牛顿路径）
    Converged,
}

/// 一次合成的完整汇报
#[derive(Debug, Clone)]
pub struct SynthesisReport {
    /// 全程损失最低的那帧图像
    pub best_image: Tensor,
    pub best_loss: f64,
    /// 逐迭代损失曲线
    pub history: LossHistory,
    pub stop_reason: StopReason,
    /// 实际执行的迭代数（拟牛顿路径下为损失评估次数）
    pub iterations: usize,
}
