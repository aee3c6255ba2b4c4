//! 图像读写与预处理的错误类型定义

use thiserror::Error;

/// 图像相关错误
#[derive(Debug, Error)]
pub enum VisionError {
    /// 读取图像失败
    #[error("读取图像{path}失败: {source}")]
    Load {
        path: String,
        source: image::ImageError,
    },

    /// 保存图像失败
    #[error("保存图像{path}失败: {source}")]
    Save {
        path: String,
        source: image::ImageError,
    },

    /// 布局或形状不符合要求
    #[error("形状不匹配: {0}")]
    Shape(String),

    /// 不支持的通道数或颜色类型
    #[error("不支持的图像类型: {0}")]
    Unsupported(String),
}
