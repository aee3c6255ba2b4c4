//! 产物写盘错误类型定义

use crate::vision::VisionError;
use ndarray_npy::WriteNpyError;
use std::path::PathBuf;
use thiserror::Error;

/// 产物写盘相关错误
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// 创建产物目录失败
    #[error("创建产物目录{path}失败: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// 写文件失败
    #[error("写入{path}失败: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// 图像转换或保存失败
    #[error("保存图像{path}失败: {source}")]
    Image {
        path: PathBuf,
        source: VisionError,
    },

    /// 以npy格式导出张量失败
    #[error("以npy格式导出{path}失败: {source}")]
    Npy {
        path: PathBuf,
        source: WriteNpyError,
    },

    /// 损失曲线序列化失败
    #[error("序列化损失曲线到{path}失败: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}
