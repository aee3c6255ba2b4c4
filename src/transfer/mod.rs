/*
 * @Author       : 老董
 * @Date         : 2026-02-12
 * @Description  : 风格迁移实验的装配层：冻结目标、组装目标函数、发起合成
 */

//! # 风格迁移驱动
//!
//! 把“内容图+风格图+层选择+权重”装配成一次可运行的合成实验：
//! 先用提取器算出风格图各层的Gram与内容图各层的激活并冻结为目标，
//! 再组装[`Objective`]，最后把评估闭包交给[`synthesize`]。
//!
//! 权重约定沿用Gatys一脉的经典驱动：风格总权重`α`平摊到每个风格层
//! （每层计`α / 风格层数`），内容层各计`β`，总变差计`γ`（指数固定为2）。

use crate::features::FeatureExtractor;
use crate::objective::{LossTerm, Objective};
use crate::synthesis::{SynthesisConfig, SynthesisError, SynthesisReport, synthesize};
use crate::tensor::Tensor;
use crate::vision::Vision;

#[cfg(test)]
mod tests;

/// 总变差项的指数
const TV_BETA: f64 = 2.0;

/// 被优化图像的起点
#[derive(Debug, Clone)]
pub enum Seed {
    /// 白噪声起点，尺寸取自内容图（可复现，见[`Vision::create_noise_tensor_seeded`]）
    Noise { seed: u64 },
    /// 从给定图像出发（比如内容图自身）
    Image(Tensor),
}

/// 一次风格迁移实验的全部配置。
///
/// 默认权重沿用经典驱动脚本：`α=1e2`、`β=5e0`、`γ=1e-3`。
#[derive(Debug, Clone)]
pub struct StyleTransfer {
    content_image: Tensor,
    style_image: Tensor,
    style_layers: Vec<String>,
    content_layers: Vec<String>,
    /// 风格总权重（α），平摊到每个风格层
    style_weight: f64,
    /// 每个内容层的权重（β）
    content_weight: f64,
    /// 总变差权重（γ），为0时不挂总变差项
    tv_weight: f64,
    seed: Seed,
    config: SynthesisConfig,
}

impl StyleTransfer {
    pub fn new(content_image: Tensor, style_image: Tensor) -> Self {
        Self {
            content_image,
            style_image,
            style_layers: Vec::new(),
            content_layers: Vec::new(),
            style_weight: 1e2,
            content_weight: 5e0,
            tv_weight: 1e-3,
            seed: Seed::Noise { seed: 0 },
            config: SynthesisConfig::default(),
        }
    }

    /// 参与风格匹配的层
    pub fn with_style_layers(mut self, layers: &[&str]) -> Self {
        self.style_layers = layers.iter().map(|layer| layer.to_string()).collect();
        self
    }

    /// 参与内容重建的层
    pub fn with_content_layers(mut self, layers: &[&str]) -> Self {
        self.content_layers = layers.iter().map(|layer| layer.to_string()).collect();
        self
    }

    /// 三个权重：风格总权重α、内容层权重β、总变差权重γ
    pub fn with_weights(mut self, style_weight: f64, content_weight: f64, tv_weight: f64) -> Self {
        self.style_weight = style_weight;
        self.content_weight = content_weight;
        self.tv_weight = tv_weight;
        self
    }

    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_synthesis_config(mut self, config: SynthesisConfig) -> Self {
        self.config = config;
        self
    }

    /// 运行一次完整实验：冻结目标、组装目标函数、合成。
    ///
    /// 风格Gram与内容激活只在进入循环前各算一次；`run`可重复调用，互不影响。
    pub fn run(&self, extractor: &dyn FeatureExtractor) -> Result<SynthesisReport, SynthesisError> {
        if self.style_layers.is_empty() && self.content_layers.is_empty() {
            return Err(SynthesisError::InvalidConfig(
                "至少需要一个风格层或内容层".to_string(),
            ));
        }

        let mut terms = Vec::new();
        if !self.style_layers.is_empty() {
            let per_layer_weight = self.style_weight / self.style_layers.len() as f64;
            for layer in &self.style_layers {
                terms.push(Objective::style_term(
                    extractor,
                    &self.style_image,
                    layer,
                    per_layer_weight,
                )?);
            }
        }
        for layer in &self.content_layers {
            terms.push(Objective::content_term(
                extractor,
                &self.content_image,
                layer,
                self.content_weight,
            )?);
        }
        if self.tv_weight != 0.0 {
            terms.push(LossTerm::TotalVariation {
                beta: TV_BETA,
                weight: self.tv_weight,
            });
        }
        let objective = Objective::new(terms)?;

        let seed_image = self.seed_image()?;
        synthesize(
            seed_image,
            |image| objective.evaluate(extractor, image),
            &self.config,
        )
    }

    fn seed_image(&self) -> Result<Tensor, SynthesisError> {
        match &self.seed {
            Seed::Image(image) => Ok(image.clone()),
            Seed::Noise { seed } => {
                let shape = self.content_image.shape();
                if shape.len() != 4 {
                    return Err(SynthesisError::InvalidConfig(format!(
                        "噪声种子需要内容图为(批,通道,高,宽)的4阶张量以确定尺寸，实际形状为{:?}",
                        shape
                    )));
                }
                Ok(Vision::create_noise_tensor_seeded(
                    shape[2], shape[3], shape[1], *seed,
                ))
            }
        }
    }
}
