/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : 合成循环：从种子图像出发反复“评估→更新”，直到收敛、
 *                 停滞或迭代耗尽。一阶后端由本模块逐步驱动；拟牛顿后端
 *                 则把整个评估闭包交给L-BFGS最小化器，由回调完成簿记。
 */

mod config;
mod error;
mod history;
#[cfg(test)]
mod tests;

pub use config::{Backend, SynthesisConfig};
pub use error::{PartialProgress, SynthesisError};
pub use history::{LossHistory, StopReason, SynthesisReport};

use crate::objective::Evaluation;
use crate::optim::lbfgs::{self, LbfgsConfig, Termination};
use crate::optim::{FirstOrderAlgorithm, FirstOrderStep};
use crate::style::normalize_l2;
use crate::tensor::Tensor;

/// 合成入口：从`seed`出发，反复评估与更新，直到触发停止条件。
///
/// `eval`对给定图像给出总损失、逐项损失与∂损失/∂图像（见[`Evaluation`]）。
/// 一阶后端下，本函数逐次迭代：评估、（可选）梯度归一化、走一步、记录
/// 历史并维护最优快照；拟牛顿后端下，整个`eval`闭包交给
/// [`lbfgs::minimize`]，簿记在回调里完成，迭代数按回调次数计。
///
/// 中断性错误（非有限损失、优化器发散）会携带[`PartialProgress`]返回，
/// 便于调用方抢救已取得的成果。
pub fn synthesize<F>(
    seed: Tensor,
    eval: F,
    config: &SynthesisConfig,
) -> Result<SynthesisReport, SynthesisError>
where
    F: FnMut(&Tensor) -> Result<Evaluation, SynthesisError>,
{
    if config.max_iter == 0 {
        return Err(SynthesisError::InvalidConfig(
            "max_iter须至少为1".to_string(),
        ));
    }
    match &config.backend {
        Backend::FirstOrder {
            algorithm,
            normalize_gradient,
        } => run_first_order(seed, eval, config, algorithm, *normalize_gradient),
        Backend::QuasiNewton(lbfgs_config) => run_quasi_newton(seed, eval, config, *lbfgs_config),
    }
}

fn run_first_order<F>(
    seed: Tensor,
    mut eval: F,
    config: &SynthesisConfig,
    algorithm: &FirstOrderAlgorithm,
    normalize_gradient: bool,
) -> Result<SynthesisReport, SynthesisError>
where
    F: FnMut(&Tensor) -> Result<Evaluation, SynthesisError>,
{
    let mut image = seed;
    let mut state = algorithm.init_state(image.shape());
    let mut history = LossHistory::new();
    let mut best_image: Option<Tensor> = None;
    let mut best_loss = f64::INFINITY;
    let mut wait = 0usize;

    let mut stop_reason = StopReason::MaxIterReached;
    let mut iterations = config.max_iter;

    for i in 0..config.max_iter {
        let evaluation = eval(&image)?;
        if !evaluation.loss.is_finite() || !evaluation.gradient.is_all_finite() {
            return Err(SynthesisError::NonFiniteLoss {
                iteration: i,
                value: evaluation.loss,
                partial: PartialProgress {
                    best_image,
                    best_loss,
                    history,
                    iterations: i,
                },
            });
        }

        let gradient = if normalize_gradient {
            normalize_l2(&evaluation.gradient)
        } else {
            evaluation.gradient.clone()
        };
        let (stepped, next_state) = algorithm.step(&image, &gradient, state);
        image = stepped;
        state = next_state;

        history.record(&evaluation);

        // 注意：判优用的是本次评估（step前）的损失，快照的却是step后的图像
        if evaluation.loss < best_loss {
            best_loss = evaluation.loss;
            best_image = Some(image.clone());
            wait = 0;
        } else {
            if wait >= config.patience && i > config.max_iter / 2 {
                stop_reason = StopReason::Stalled;
                iterations = i + 1;
                break;
            }
            wait += 1;
        }

        if config.log_every > 0 && (i + 1) % config.log_every == 0 {
            println!(
                "迭代 {}/{}：损失 {:.6e}（迄今最优 {:.6e}）",
                i + 1,
                config.max_iter,
                evaluation.loss,
                best_loss
            );
        }
    }

    let Some(best_image) = best_image else {
        unreachable!("首次迭代要么报错要么刷新最优快照");
    };

    Ok(SynthesisReport {
        best_image,
        best_loss,
        history,
        stop_reason,
        iterations,
    })
}

fn run_quasi_newton<F>(
    seed: Tensor,
    mut eval: F,
    config: &SynthesisConfig,
    mut lbfgs_config: LbfgsConfig,
) -> Result<SynthesisReport, SynthesisError>
where
    F: FnMut(&Tensor) -> Result<Evaluation, SynthesisError>,
{
    lbfgs_config.max_iter = config.max_iter;

    let shape = seed.shape().to_vec();
    let mut history = LossHistory::new();
    let mut best_image: Option<Tensor> = None;
    let mut best_loss = f64::INFINITY;
    let mut evaluations = 0usize;

    let outcome = lbfgs::minimize(
        |x: &[f64]| {
            let image = Tensor::new(x, &shape);
            let evaluation = eval(&image)?;
            if !evaluation.loss.is_finite() || !evaluation.gradient.is_all_finite() {
                return Err(SynthesisError::NonFiniteLoss {
                    iteration: evaluations,
                    value: evaluation.loss,
                    partial: PartialProgress {
                        best_image: best_image.clone(),
                        best_loss,
                        history: history.clone(),
                        iterations: evaluations,
                    },
                });
            }
            history.record(&evaluation);
            // 线搜索的试探点也算一次评估，最优快照同样向它们开放
            if evaluation.loss < best_loss {
                best_loss = evaluation.loss;
                best_image = Some(image);
            }
            evaluations += 1;
            if config.log_every > 0 && evaluations % config.log_every == 0 {
                println!(
                    "评估 {}：损失 {:.6e}（迄今最优 {:.6e}）",
                    evaluations, evaluation.loss, best_loss
                );
            }
            Ok((evaluation.loss, evaluation.gradient.to_vec()))
        },
        seed.to_vec(),
        lbfgs_config,
    )?;

    let stop_reason = match outcome.termination {
        Termination::GradientTolerance | Termination::CostTolerance => StopReason::Converged,
        Termination::MaxIterations => StopReason::MaxIterReached,
        Termination::LineSearchFailed => {
            return Err(SynthesisError::OptimizerDivergence {
                reason: "线搜索在所有回溯步内都找不到下降".to_string(),
                partial: PartialProgress {
                    best_image,
                    best_loss,
                    history,
                    iterations: evaluations,
                },
            });
        }
    };

    let Some(best_image) = best_image else {
        unreachable!("最小化器成功返回前至少完成过一次有限评估");
    };

    Ok(SynthesisReport {
        best_image,
        best_loss,
        history,
        stop_reason,
        iterations: evaluations,
    })
}
