/*
 * @Author       : 老董
 * @Date         : 2026-02-14
 * @Description  : 目标函数的组装与单次评估（损失+梯度）
 */

//! # 目标函数
//!
//! 把若干命名损失项（风格、内容、总变差）组装成一个标量目标，
//! 对给定图像一次性算出总损失、逐项损失与∂损失/∂图像。
//!
//! 目标（风格图的Gram、内容图的特征）在构造损失项时一次算定、此后冻结；
//! 评估阶段对被优化图像只做一次提取器前向和一次反向，
//! 各项在特征空间的余切先累加再统一传播回图像。

use crate::features::{FeatureExtractor, FeatureMap};
use crate::style::{
    frobenius_error, frobenius_error_backward, gram, gram_backward, total_variation,
    total_variation_backward,
};
use crate::synthesis::SynthesisError;
use crate::tensor::{DimOrdering, Tensor};

#[cfg(test)]
mod tests;

/// 目标函数中的一个命名损失项
#[derive(Debug, Clone)]
pub enum LossTerm {
    /// 风格项：被优化图像在某层的Gram须逼近`target_gram`
    Style {
        layer: String,
        target_gram: Tensor,
        weight: f64,
    },
    /// 内容项：被优化图像在某层的激活须逼近`target_features`
    Content {
        layer: String,
        target_features: Tensor,
        weight: f64,
    },
    /// 总变差正则项，直接作用于图像本身
    TotalVariation { beta: f64, weight: f64 },
}

/// 一次评估的产出：总损失、对图像的梯度、各项损失明细
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub loss: f64,
    /// ∂损失/∂图像，与被评估图像同形状
    pub gradient: Tensor,
    /// 逐项损失，名字形如`style_<层名>`、`content_<层名>`、`total_variation`
    pub terms: Vec<(String, f64)>,
}

/// 若干损失项组成的目标函数
#[derive(Debug, Clone)]
pub struct Objective {
    terms: Vec<LossTerm>,
}

fn missing_layer(layer: &str) -> SynthesisError {
    SynthesisError::Extractor(format!("提取器未返回{}层的激活", layer))
}

fn accumulate(cotangents: &mut FeatureMap, layer: &str, cotangent: Tensor) {
    if let Some(existing) = cotangents.get_mut(layer) {
        *existing += cotangent;
    } else {
        cotangents.insert(layer.to_string(), cotangent);
    }
}

impl Objective {
    /// 校验并组装目标函数：至少一个损失项，权重有限，层名非空
    pub fn new(terms: Vec<LossTerm>) -> Result<Self, SynthesisError> {
        if terms.is_empty() {
            return Err(SynthesisError::InvalidConfig(
                "目标函数至少需要一个损失项".to_string(),
            ));
        }
        for term in &terms {
            let weight = match term {
                LossTerm::Style { weight, layer, .. }
                | LossTerm::Content { weight, layer, .. } => {
                    if layer.is_empty() {
                        return Err(SynthesisError::InvalidConfig(
                            "损失项的层名不能为空".to_string(),
                        ));
                    }
                    *weight
                }
                LossTerm::TotalVariation { weight, beta } => {
                    if !beta.is_finite() {
                        return Err(SynthesisError::InvalidConfig(
                            "总变差的beta须为有限值".to_string(),
                        ));
                    }
                    *weight
                }
            };
            if !weight.is_finite() {
                return Err(SynthesisError::InvalidConfig(
                    "损失项的权重须为有限值".to_string(),
                ));
            }
        }
        Ok(Self { terms })
    }

    pub fn terms(&self) -> &[LossTerm] {
        &self.terms
    }

    /// 从风格图构造一个风格项：当场算出该层的目标Gram并冻结
    pub fn style_term(
        extractor: &dyn FeatureExtractor,
        style_image: &Tensor,
        layer: &str,
        weight: f64,
    ) -> Result<LossTerm, SynthesisError> {
        let features = extractor.evaluate(style_image, &[layer.to_string()])?;
        let activation = features.get(layer).ok_or_else(|| missing_layer(layer))?;
        let target_gram = gram(activation, DimOrdering::ChannelsFirst)?;
        Ok(LossTerm::Style {
            layer: layer.to_string(),
            target_gram,
            weight,
        })
    }

    /// 从内容图构造一个内容项：当场取出该层的目标激活并冻结
    pub fn content_term(
        extractor: &dyn FeatureExtractor,
        content_image: &Tensor,
        layer: &str,
        weight: f64,
    ) -> Result<LossTerm, SynthesisError> {
        let mut features = extractor.evaluate(content_image, &[layer.to_string()])?;
        let target_features = features.remove(layer).ok_or_else(|| missing_layer(layer))?;
        Ok(LossTerm::Content {
            layer: layer.to_string(),
            target_features,
            weight,
        })
    }

    /// 对图像做一次完整评估。
    ///
    /// 提取器只被前向一次（所有被引用层的并集）、反向一次（各项余切之和）；
    /// 总变差项不经过提取器，其梯度直接加在图像梯度上。
    pub fn evaluate(
        &self,
        extractor: &dyn FeatureExtractor,
        image: &Tensor,
    ) -> Result<Evaluation, SynthesisError> {
        // 被引用层的并集（保持首次出现的顺序）
        let mut layers: Vec<String> = Vec::new();
        for term in &self.terms {
            if let LossTerm::Style { layer, .. } | LossTerm::Content { layer, .. } = term {
                if !layers.contains(layer) {
                    layers.push(layer.clone());
                }
            }
        }

        let features = if layers.is_empty() {
            FeatureMap::new()
        } else {
            extractor.evaluate(image, &layers)?
        };

        let mut total_loss = 0.0;
        let mut term_losses = Vec::with_capacity(self.terms.len());
        let mut cotangents = FeatureMap::new();
        let mut gradient = Tensor::zeros(image.shape());

        for term in &self.terms {
            match term {
                LossTerm::Style {
                    layer,
                    target_gram,
                    weight,
                } => {
                    let activation = features.get(layer).ok_or_else(|| missing_layer(layer))?;
                    let current_gram = gram(activation, DimOrdering::ChannelsFirst)?;
                    let loss = frobenius_error(target_gram, &current_gram)? * weight;
                    let gram_cotangent =
                        frobenius_error_backward(target_gram, &current_gram)? * *weight;
                    let cotangent =
                        gram_backward(activation, DimOrdering::ChannelsFirst, &gram_cotangent)?;
                    accumulate(&mut cotangents, layer, cotangent);
                    total_loss += loss;
                    term_losses.push((format!("style_{}", layer), loss));
                }
                LossTerm::Content {
                    layer,
                    target_features,
                    weight,
                } => {
                    let activation = features.get(layer).ok_or_else(|| missing_layer(layer))?;
                    let loss = frobenius_error(target_features, activation)? * weight;
                    let cotangent = frobenius_error_backward(target_features, activation)? * *weight;
                    accumulate(&mut cotangents, layer, cotangent);
                    total_loss += loss;
                    term_losses.push((format!("content_{}", layer), loss));
                }
                LossTerm::TotalVariation { beta, weight } => {
                    let loss = total_variation(image, *beta)? * weight;
                    gradient += total_variation_backward(image, *beta)? * *weight;
                    total_loss += loss;
                    term_losses.push(("total_variation".to_string(), loss));
                }
            }
        }

        if !cotangents.is_empty() {
            let feature_gradient = extractor.backward(image, &cotangents)?;
            if !feature_gradient.is_same_shape(image) {
                return Err(SynthesisError::shape_mismatch(
                    image.shape(),
                    feature_gradient.shape(),
                    "提取器反向返回的梯度形状须与图像一致",
                ));
            }
            gradient += feature_gradient;
        }

        Ok(Evaluation {
            loss: total_loss,
            gradient,
            terms: term_losses,
        })
    }
}
