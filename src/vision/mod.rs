/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-05
 * @Description  : 本模块提供图像与张量互转相关的功能。
 *                 在本模块中，不严谨地说：
 *                 1. 所谓的image/图像是指RGB或灰度格式的图像；
 *                 2. 磁盘上的图像载入后是HWC布局、值域[0,255]的f64张量；
 *                 3. 参与合成的图像统一摆成(批,通道,高,宽)的4阶布局。
 */

use crate::tensor::Tensor;
use image::{DynamicImage, GenericImageView, GrayImage, RgbImage};

mod error;
mod layout;
mod process;
#[cfg(test)]
mod tests;

pub use error::VisionError;

pub struct Vision {
    // ...
}

impl Vision {
    /// 将本地的图像加载到Tensor中。
    /// 灰度图（含带alpha的灰度）得到`(高, 宽)`，彩色图（alpha会被丢弃）得到`(高, 宽, 3)`。
    pub fn load_image(path: &str) -> Result<Tensor, VisionError> {
        let image = image::open(path).map_err(|source| VisionError::Load {
            path: path.to_string(),
            source,
        })?;
        Ok(Self::dynamic_to_tensor(&image))
    }

    /// 加载图像并缩放到指定尺寸（不保留宽高比，三角滤波）
    pub fn load_image_sized(path: &str, height: usize, width: usize) -> Result<Tensor, VisionError> {
        let image = image::open(path).map_err(|source| VisionError::Load {
            path: path.to_string(),
            source,
        })?;
        let resized = image.resize_exact(
            width as u32,
            height as u32,
            image::imageops::FilterType::Triangle,
        );
        Ok(Self::dynamic_to_tensor(&resized))
    }

    /// 保存Tensor为图像到本地。
    /// 接受`(高, 宽)`、`(高, 宽, 1)`或`(高, 宽, 3)`的张量，值会被截断到[0,255]再量化。
    pub fn save_image(tensor: &Tensor, file_path: &str) -> Result<(), VisionError> {
        let image = Self::tensor_to_dynamic(tensor)?;
        image.save(file_path).map_err(|source| VisionError::Save {
            path: file_path.to_string(),
            source,
        })
    }

    /// 调整图像大小（不保留宽高比，三角滤波）
    /// * `image` - 原始图像，HWC布局、值域[0,255]
    /// * `height` - 调整后的高度
    /// * `width` - 调整后的宽度
    ///
    /// 这里特意用`resize`而不是`reshape`，只为强调其只会改变尺寸，而不会改变张量本身的维度。
    pub fn resize_image(image: &Tensor, height: usize, width: usize) -> Result<Tensor, VisionError> {
        let image = Self::tensor_to_dynamic(image)?;
        let resized = image.resize_exact(
            width as u32,
            height as u32,
            image::imageops::FilterType::Triangle,
        );
        Ok(Self::dynamic_to_tensor(&resized))
    }
}

// 私有方法：image库的`DynamicImage`与HWC张量互转
impl Vision {
    fn dynamic_to_tensor(image: &DynamicImage) -> Tensor {
        let (width, height) = image.dimensions();
        let (height, width) = (height as usize, width as usize);

        let single_channel = matches!(
            image.color().channel_count(),
            1 | 2 // 灰度或带alpha的灰度
        );
        if single_channel {
            let gray = image.to_luma8();
            let mut tensor_data = Vec::with_capacity(height * width);
            for y in 0..height {
                for x in 0..width {
                    tensor_data.push(gray.get_pixel(x as u32, y as u32)[0] as f64);
                }
            }
            Tensor::new(&tensor_data, &[height, width])
        } else {
            let rgb = image.to_rgb8();
            let mut tensor_data = Vec::with_capacity(height * width * 3);
            for y in 0..height {
                for x in 0..width {
                    let pixel = rgb.get_pixel(x as u32, y as u32);
                    tensor_data.push(pixel[0] as f64);
                    tensor_data.push(pixel[1] as f64);
                    tensor_data.push(pixel[2] as f64);
                }
            }
            Tensor::new(&tensor_data, &[height, width, 3])
        }
    }

    fn tensor_to_dynamic(tensor: &Tensor) -> Result<DynamicImage, VisionError> {
        let shape = tensor.shape();
        let channels = match shape {
            [_, _] => 1,
            [_, _, c @ (1 | 3)] => *c,
            _ => {
                return Err(VisionError::Unsupported(format!(
                    "只支持单通道或RGB的HWC图像张量，实际形状为{:?}",
                    shape
                )));
            }
        };
        let (height, width) = (shape[0], shape[1]);
        let view = tensor.view();

        let quantize = |value: f64| value.clamp(0.0, 255.0).round() as u8;
        if channels == 1 {
            let mut imgbuf = GrayImage::new(width as u32, height as u32);
            for y in 0..height {
                for x in 0..width {
                    let value = if shape.len() == 2 {
                        view[[y, x]]
                    } else {
                        view[[y, x, 0]]
                    };
                    imgbuf.put_pixel(x as u32, y as u32, image::Luma([quantize(value)]));
                }
            }
            Ok(DynamicImage::ImageLuma8(imgbuf))
        } else {
            let mut imgbuf = RgbImage::new(width as u32, height as u32);
            for y in 0..height {
                for x in 0..width {
                    let r = quantize(view[[y, x, 0]]);
                    let g = quantize(view[[y, x, 1]]);
                    let b = quantize(view[[y, x, 2]]);
                    imgbuf.put_pixel(x as u32, y as u32, image::Rgb([r, g, b]));
                }
            }
            Ok(DynamicImage::ImageRgb8(imgbuf))
        }
    }
}
