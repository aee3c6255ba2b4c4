/*
 * @Author       : 老董
 * @Date         : 2026-02-16
 * @Description  : 一阶优化算法（Adam/SGD），配置不可变、状态显式进出
 */

use crate::tensor::Tensor;
use enum_dispatch::enum_dispatch;

/// Adam的超参数。
///
/// 动量等跨步状态不放在这里，而是经由[`FirstOrderState`]显式进出：
/// 同一份配置可以同时驱动多次互不相干的合成。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdamConfig {
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
}

impl Default for AdamConfig {
    fn default() -> Self {
        Self {
            learning_rate: 1.0,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
        }
    }
}

/// 朴素梯度下降的超参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SgdConfig {
    pub learning_rate: f64,
}

impl Default for SgdConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
        }
    }
}

/// 一阶优化器的跨步状态
#[derive(Debug, Clone, PartialEq)]
pub enum FirstOrderState {
    /// Adam的一阶/二阶矩估计与时间步
    Adam { m: Tensor, v: Tensor, t: usize },
    /// 梯度下降无状态
    Sgd,
}

/// 单步更新契约：拿到当前图像、梯度和旧状态，给出新图像和新状态
#[enum_dispatch(FirstOrderAlgorithm)]
pub trait FirstOrderStep {
    /// 为给定形状的图像初始化状态
    fn init_state(&self, shape: &[usize]) -> FirstOrderState;
    /// 执行一步更新
    fn step(
        &self,
        image: &Tensor,
        gradient: &Tensor,
        state: FirstOrderState,
    ) -> (Tensor, FirstOrderState);
}

/// 一阶优化算法（静态分发）
#[enum_dispatch]
#[derive(Debug, Clone, PartialEq)]
pub enum FirstOrderAlgorithm {
    Adam(AdamConfig),
    Sgd(SgdConfig),
}

impl FirstOrderStep for AdamConfig {
    fn init_state(&self, shape: &[usize]) -> FirstOrderState {
        FirstOrderState::Adam {
            m: Tensor::zeros(shape),
            v: Tensor::zeros(shape),
            t: 0,
        }
    }

    fn step(
        &self,
        image: &Tensor,
        gradient: &Tensor,
        state: FirstOrderState,
    ) -> (Tensor, FirstOrderState) {
        let FirstOrderState::Adam { mut m, mut v, t } = state else {
            panic!("Adam的step收到了非Adam的状态");
        };
        let t = t + 1;

        // 预计算缩放后的梯度项
        let scaled_gradient = gradient * (1.0 - self.beta1);
        let gradient_squared = gradient * gradient;
        let scaled_gradient_squared = &gradient_squared * (1.0 - self.beta2);

        // 原地更新一阶矩估计: m = β1 * m + (1 - β1) * g
        m *= self.beta1;
        m += &scaled_gradient;

        // 原地更新二阶矩估计: v = β2 * v + (1 - β2) * g²
        v *= self.beta2;
        v += &scaled_gradient_squared;

        // 偏差修正
        let m_hat = &m / (1.0 - self.beta1.powi(t as i32));
        let v_hat = &v / (1.0 - self.beta2.powi(t as i32));

        // 参数更新: θ = θ - α * m_hat / (√v_hat + ε)
        let denominator = v_hat.sqrt() + self.epsilon;
        let update = &m_hat / &denominator;
        let new_image = image - self.learning_rate * &update;

        (new_image, FirstOrderState::Adam { m, v, t })
    }
}

impl FirstOrderStep for SgdConfig {
    fn init_state(&self, _shape: &[usize]) -> FirstOrderState {
        FirstOrderState::Sgd
    }

    fn step(
        &self,
        image: &Tensor,
        gradient: &Tensor,
        state: FirstOrderState,
    ) -> (Tensor, FirstOrderState) {
        assert!(
            matches!(state, FirstOrderState::Sgd),
            "Sgd的step收到了非Sgd的状态"
        );
        // 梯度下降更新：θ = θ - α * ∇θ
        let new_image = image - self.learning_rate * gradient;
        (new_image, state)
    }
}
