//! # 特征提取器接口
//!
//! 特征提取网络（如VGG）不属于本库；本模块只定义它与合成核心之间的契约：
//! 前向取出命名层的激活，反向把各层的余切传播回图像。
//! [`PixelExtractor`]是自带的恒等实现，供像素空间实验与单元测试使用。

use crate::synthesis::SynthesisError;
use crate::tensor::Tensor;
use std::collections::HashMap;


/// 层名到激活张量的映射
pub type FeatureMap = HashMap<String, Tensor>;

/// 特征提取器契约。
///
/// 合成核心把提取器当作黑盒可微函数：`evaluate`做一次确定性前向，
/// 返回所求各层的激活（形状须为(b,c,h,w)）；`backward`接收每层的
/// ∂损失/∂激活，返回∂损失/∂图像（与输入图像同形状）。
pub trait FeatureExtractor {
    /// 前向：返回`layers`中每个名字对应的激活
    fn evaluate(&self, image: &Tensor, layers: &[String]) -> Result<FeatureMap, SynthesisError>;

    /// 反向：把各层的余切传播回图像空间，返回∂损失/∂图像
    fn backward(&self, image: &Tensor, cotangents: &FeatureMap) -> Result<Tensor, SynthesisError>;
}

/// 恒等提取器：只有一个层`"pixel"`，其激活就是图像本身。
///
/// 反向同样是恒等，各层余切逐元素相加后原样返回。
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelExtractor;

impl PixelExtractor {
    /// 唯一的层名
    pub const LAYER: &'static str = "pixel";
}

impl FeatureExtractor for PixelExtractor {
    fn evaluate(&self, image: &Tensor, layers: &[String]) -> Result<FeatureMap, SynthesisError> {
        let mut features = FeatureMap::new();
        for layer in layers {
            if layer != Self::LAYER {
                return Err(SynthesisError::Extractor(format!(
                    "恒等提取器只有{}层，没有{}层",
                    Self::LAYER,
                    layer
                )));
            }
            features.insert(layer.clone(), image.clone());
        }
        Ok(features)
    }

    fn backward(&self, image: &Tensor, cotangents: &FeatureMap) -> Result<Tensor, SynthesisError> {
        let mut gradient = Tensor::zeros(image.shape());
        for (layer, cotangent) in cotangents {
            if layer != Self::LAYER {
                return Err(SynthesisError::Extractor(format!(
                    "恒等提取器只有{}层，没有{}层",
                    Self::LAYER,
                    layer
                )));
            }
            if !cotangent.is_same_shape(image) {
                return Err(SynthesisError::shape_mismatch(
                    image.shape(),
                    cotangent.shape(),
                    "余切的形状须与图像一致",
                ));
            }
            gradient += cotangent;
        }
        Ok(gradient)
    }
}
