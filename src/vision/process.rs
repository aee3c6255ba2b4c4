use super::{Vision, VisionError};
use crate::tensor::Tensor;

/// VGG系模型的像素均值，按BGR通道排列
const VGG_MEAN_BGR: [f64; 3] = [103.939, 116.779, 123.68];

impl Vision {
    fn check_rgb_canonical(
        image: &Tensor,
        operation: &str,
    ) -> Result<(usize, usize, usize), VisionError> {
        let shape = image.shape();
        if shape.len() != 4 || shape[1] != 3 {
            return Err(VisionError::Shape(format!(
                "{}只接受(b,3,h,w)的RGB图像张量，实际形状为{:?}",
                operation, shape
            )));
        }
        Ok((shape[0], shape[2], shape[3]))
    }

    /// 把[0,255]的RGB图像变到VGG系模型的输入域：通道换序为BGR，再逐通道减去均值
    pub fn preprocess(image: &Tensor) -> Result<Tensor, VisionError> {
        let (b, h, w) = Self::check_rgb_canonical(image, "预处理")?;
        let mut output = Tensor::zeros(image.shape());
        let src = image.view();
        let mut dst = output.view_mut();
        for bi in 0..b {
            for y in 0..h {
                for x in 0..w {
                    dst[[bi, 0, y, x]] = src[[bi, 2, y, x]] - VGG_MEAN_BGR[0];
                    dst[[bi, 1, y, x]] = src[[bi, 1, y, x]] - VGG_MEAN_BGR[1];
                    dst[[bi, 2, y, x]] = src[[bi, 0, y, x]] - VGG_MEAN_BGR[2];
                }
            }
        }
        Ok(output)
    }

    /// `preprocess`的逆操作：加回均值、换序回RGB，并截断到[0,255]
    pub fn deprocess(image: &Tensor) -> Result<Tensor, VisionError> {
        let (b, h, w) = Self::check_rgb_canonical(image, "逆预处理")?;
        let mut output = Tensor::zeros(image.shape());
        let src = image.view();
        let mut dst = output.view_mut();
        for bi in 0..b {
            for y in 0..h {
                for x in 0..w {
                    let blue = src[[bi, 0, y, x]] + VGG_MEAN_BGR[0];
                    let green = src[[bi, 1, y, x]] + VGG_MEAN_BGR[1];
                    let red = src[[bi, 2, y, x]] + VGG_MEAN_BGR[2];
                    dst[[bi, 0, y, x]] = red.clamp(0.0, 255.0);
                    dst[[bi, 1, y, x]] = green.clamp(0.0, 255.0);
                    dst[[bi, 2, y, x]] = blue.clamp(0.0, 255.0);
                }
            }
        }
        Ok(output)
    }

    /// 生成白噪声种子图像：`(1, 通道, 高, 宽)`，各元素在[0,255]内均匀采样后减去128
    pub fn create_noise_tensor(height: usize, width: usize, channels: usize) -> Tensor {
        Tensor::uniform(0.0, 255.0, &[1, channels, height, width]) - 128.0
    }

    /// `create_noise_tensor`的可复现版本：相同的`seed`产生相同的噪声
    pub fn create_noise_tensor_seeded(
        height: usize,
        width: usize,
        channels: usize,
        seed: u64,
    ) -> Tensor {
        Tensor::uniform_seeded(0.0, 255.0, &[1, channels, height, width], seed) - 128.0
    }
}
