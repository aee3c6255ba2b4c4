//! # Style Torch
//!
//! `style_torch`项目旨在用纯rust实现[Gatys等人](https://arxiv.org/abs/1508.06576)一系的
//! 神经风格迁移（neural style transfer）中的“图像合成”优化核心：
//! 把一张图像张量当作可训练参数，迭代优化它，使其特征逼近内容图的特征、
//! 使其各层Gram统计逼近风格图的Gram统计。
//!
//! 特征提取网络本身（如VGG）不属于本库，由外部实现[`features::FeatureExtractor`]接入；
//! 本库只负责损失原语、优化器与合成循环本身。
//!

pub mod artifacts;
pub mod errors;
pub mod features;
pub mod objective;
pub mod optim;
pub mod style;
pub mod synthesis;
pub mod tensor;
pub mod transfer;
pub mod utils;
pub mod vision;

pub use tensor::{DimOrdering, Tensor};
