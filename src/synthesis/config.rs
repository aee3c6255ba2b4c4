use crate::optim::lbfgs::LbfgsConfig;
use crate::optim::{AdamConfig, FirstOrderAlgorithm};

/// 优化后端
#[derive(Debug, Clone)]
pub enum Backend {
    /// 一阶路径：合成循环自己驱动每一步
    FirstOrder {
        algorithm: FirstOrderAlgorithm,
        /// 每步先把梯度归一化成单位均方根再交给优化器（原论文配方，默认开）
        normalize_gradient: bool,
    },
    /// 拟牛顿路径：整个评估闭包交给L-BFGS。
    /// 其中的`max_iter`不生效，以[`SynthesisConfig::max_iter`]为准
    QuasiNewton(LbfgsConfig),
}

impl Default for Backend {
    fn default() -> Self {
        Self::FirstOrder {
            algorithm: AdamConfig::default().into(),
            normalize_gradient: true,
        }
    }
}

/// 合成循环的配置
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// 最大迭代数
    pub max_iter: usize,
    /// 连续多少次未刷新最优后允许提前停止（还须已过半程，见[`synthesize`](super::synthesize)）
    pub patience: usize,
    pub backend: Backend,
    /// 每多少次迭代打印一行进度，0为全程安静
    pub log_every: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            max_iter: 2000,
            patience: 100,
            backend: Backend::default(),
            log_every: 0,
        }
    }
}
