/*
 * @Author       : 老董
 * @Date         : 2026-02-17
 * @Description  : 有限内存BFGS（L-BFGS）多元函数最小化器
 */

//! # L-BFGS最小化器
//!
//! 对扁平`Vec<f64>`参数的一般多元函数最小化：两环递归重建拟牛顿方向，
//! Armijo回溯线搜索定步长。目标函数以闭包形式整个交给[`minimize`]，
//! 每次调用须返回损失和梯度；闭包内部出错可随时以`Err`中断整个最小化。
//!
//! 全程`f64`：拟牛顿的曲率估计对精度极其敏感，单精度下ρ与γ的舍入误差
//! 会直接毁掉Hessian近似。

use crate::synthesis::SynthesisError;
use std::collections::VecDeque;

/// 跳过曲率过小的(s,y)配对的阈值
const CURVATURE_EPS: f64 = 1e-10;

/// Armijo回溯线搜索参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmijoParams {
    /// 充分下降条件的系数c1
    pub c1: f64,
    /// 每次回溯的步长收缩因子
    pub shrink: f64,
    /// 最多回溯次数
    pub max_steps: usize,
    /// 初始步长
    pub initial_step: f64,
}

impl Default for ArmijoParams {
    fn default() -> Self {
        Self {
            c1: 1e-4,
            shrink: 0.5,
            max_steps: 20,
            initial_step: 1.0,
        }
    }
}

/// L-BFGS的超参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LbfgsConfig {
    /// 保留的(s,y)历史配对条数
    pub memory: usize,
    pub max_iter: usize,
    /// 梯度无穷范数降到该值以下即认为收敛
    pub tolerance_grad: f64,
    /// 相邻两次损失变化降到该值以下即认为收敛
    pub tolerance_change: f64,
    pub line_search: ArmijoParams,
}

impl Default for LbfgsConfig {
    fn default() -> Self {
        Self {
            memory: 10,
            max_iter: 100,
            tolerance_grad: 1e-7,
            tolerance_change: 1e-9,
            line_search: ArmijoParams::default(),
        }
    }
}

/// 最小化的终止原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// 梯度范数降到阈值以下
    GradientTolerance,
    /// 相邻两次损失的变化降到阈值以下
    CostTolerance,
    /// 迭代数用尽
    MaxIterations,
    /// 线搜索在所有回溯步内都找不到可接受的下降
    LineSearchFailed,
}

/// 最小化的结果
#[derive(Debug, Clone)]
pub struct LbfgsOutcome {
    pub x: Vec<f64>,
    pub cost: f64,
    pub termination: Termination,
    /// 目标函数被调用的总次数
    pub evaluations: usize,
    /// 完成的外层迭代数
    pub iterations: usize,
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn inf_norm(v: &[f64]) -> f64 {
    v.iter().fold(0.0, |acc: f64, x| acc.max(x.abs()))
}

/// v += a * other
fn axpy_in_place(v: &mut [f64], a: f64, other: &[f64]) {
    for (vi, oi) in v.iter_mut().zip(other) {
        *vi += a * oi;
    }
}

fn validate(config: &LbfgsConfig) -> Result<(), SynthesisError> {
    if config.memory == 0 {
        return Err(SynthesisError::InvalidConfig(
            "L-BFGS的memory须至少为1".to_string(),
        ));
    }
    let ls = &config.line_search;
    if !(ls.shrink > 0.0 && ls.shrink < 1.0) {
        return Err(SynthesisError::InvalidConfig(
            "线搜索的shrink须在(0,1)内".to_string(),
        ));
    }
    if ls.initial_step <= 0.0 {
        return Err(SynthesisError::InvalidConfig(
            "线搜索的initial_step须为正".to_string(),
        ));
    }
    if ls.max_steps == 0 {
        return Err(SynthesisError::InvalidConfig(
            "线搜索的max_steps须至少为1".to_string(),
        ));
    }
    Ok(())
}

/// 从`x0`出发最小化`objective`。
///
/// `objective`每次调用返回`(损失, 梯度)`；返回`Err`会立即中断最小化并原样上抛，
/// 这是调用方（如合成循环）植入自己簿记与熔断逻辑的入口。
pub fn minimize<F>(
    mut objective: F,
    x0: Vec<f64>,
    config: LbfgsConfig,
) -> Result<LbfgsOutcome, SynthesisError>
where
    F: FnMut(&[f64]) -> Result<(f64, Vec<f64>), SynthesisError>,
{
    validate(&config)?;
    if x0.is_empty() {
        return Err(SynthesisError::InvalidConfig(
            "L-BFGS的初始点不能为空".to_string(),
        ));
    }

    let mut x = x0;
    let (mut cost, mut gradient) = objective(&x)?;
    let mut evaluations = 1usize;

    let mut s_history: VecDeque<Vec<f64>> = VecDeque::with_capacity(config.memory);
    let mut y_history: VecDeque<Vec<f64>> = VecDeque::with_capacity(config.memory);
    let mut rho_history: VecDeque<f64> = VecDeque::with_capacity(config.memory);

    let mut iterations = 0usize;
    let termination = loop {
        if inf_norm(&gradient) <= config.tolerance_grad {
            break Termination::GradientTolerance;
        }
        if iterations >= config.max_iter {
            break Termination::MaxIterations;
        }

        // 两环递归：对-g重建拟牛顿方向d = -H·g（递归全程线性，直接在负梯度上做）
        let mut direction: Vec<f64> = gradient.iter().map(|g| -g).collect();
        let pairs = s_history.len();
        if pairs > 0 {
            let mut alphas = vec![0.0; pairs];
            // 第一环：从最新到最旧
            for idx in (0..pairs).rev() {
                let alpha = rho_history[idx] * dot(&s_history[idx], &direction);
                axpy_in_place(&mut direction, -alpha, &y_history[idx]);
                alphas[idx] = alpha;
            }
            // 初始Hessian取γI，γ = sᵀy / yᵀy（最近一对）
            let gamma = dot(&s_history[pairs - 1], &y_history[pairs - 1])
                / dot(&y_history[pairs - 1], &y_history[pairs - 1]);
            for di in &mut direction {
                *di *= gamma;
            }
            // 第二环：从最旧到最新
            for idx in 0..pairs {
                let beta = rho_history[idx] * dot(&y_history[idx], &direction);
                axpy_in_place(&mut direction, alphas[idx] - beta, &s_history[idx]);
            }
        }

        // 确保是下降方向，异常时退回负梯度方向
        let mut dg = dot(&direction, &gradient);
        if !dg.is_finite() || dg >= 0.0 {
            direction = gradient.iter().map(|g| -g).collect();
            dg = -dot(&gradient, &gradient);
        }

        // Armijo回溯线搜索
        let mut step = config.line_search.initial_step;
        let mut accepted = None;
        for _ in 0..config.line_search.max_steps {
            let candidate: Vec<f64> = x
                .iter()
                .zip(&direction)
                .map(|(xi, di)| xi + step * di)
                .collect();
            let (new_cost, new_gradient) = objective(&candidate)?;
            evaluations += 1;
            if new_cost.is_finite() && new_cost <= cost + config.line_search.c1 * step * dg {
                accepted = Some((candidate, new_cost, new_gradient));
                break;
            }
            step *= config.line_search.shrink;
        }
        let Some((new_x, new_cost, new_gradient)) = accepted else {
            break Termination::LineSearchFailed;
        };

        // 曲率条件合格才收录(s,y)配对，避免污染Hessian估计
        let s: Vec<f64> = new_x.iter().zip(&x).map(|(a, b)| a - b).collect();
        let y: Vec<f64> = new_gradient.iter().zip(&gradient).map(|(a, b)| a - b).collect();
        let sy = dot(&s, &y);
        if sy > CURVATURE_EPS {
            if s_history.len() == config.memory {
                s_history.pop_front();
                y_history.pop_front();
                rho_history.pop_front();
            }
            s_history.push_back(s);
            y_history.push_back(y);
            rho_history.push_back(1.0 / sy);
        }

        let change = (cost - new_cost).abs();
        x = new_x;
        cost = new_cost;
        gradient = new_gradient;
        iterations += 1;

        if change <= config.tolerance_change {
            break Termination::CostTolerance;
        }
    };

    Ok(LbfgsOutcome {
        x,
        cost,
        termination,
        evaluations,
        iterations,
    })
}
