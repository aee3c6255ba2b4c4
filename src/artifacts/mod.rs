/*
 * @Author       : 老董
 * @Date         : 2026-02-13
 * @Description  : 合成产物的落盘：图像PNG、张量npy、损失曲线JSON
 */

//! # 产物写入器
//!
//! 一次合成实验通常要留下三样东西：最优图像（PNG）、原始张量
//! （`.npy`，方便NumPy系工具直接分析）、损失曲线（JSON，绘图自理）。
//! [`ArtifactWriter`]把它们统一写到同一个产物目录下，
//! 每个失败都带上具体路径，方便排查。

use crate::synthesis::LossHistory;
use crate::tensor::Tensor;
use crate::vision::Vision;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

mod error;
#[cfg(test)]
mod tests;

pub use error::ArtifactError;

/// 把合成产物统一写进一个目录的写入器
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    results_dir: PathBuf,
}

impl ArtifactWriter {
    /// 创建写入器，产物目录不存在时会连同父目录一起创建
    pub fn create(results_dir: impl Into<PathBuf>) -> Result<Self, ArtifactError> {
        let results_dir = results_dir.into();
        std::fs::create_dir_all(&results_dir).map_err(|source| ArtifactError::CreateDir {
            path: results_dir.clone(),
            source,
        })?;
        Ok(Self { results_dir })
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// 把`(1, 通道, 高, 宽)`布局、像素域（[0,255]）的图像存成`<name>.png`。
    /// 若图像还处于模型输入域，记得先用[`Vision::deprocess`]还原。
    pub fn save_image(&self, name: &str, image: &Tensor) -> Result<PathBuf, ArtifactError> {
        let path = self.results_dir.join(format!("{}.png", name));
        let hwc = Vision::from_synthesis_layout(image).map_err(|source| ArtifactError::Image {
            path: path.clone(),
            source,
        })?;
        Vision::save_image(&hwc, path.to_string_lossy().as_ref()).map_err(|source| {
            ArtifactError::Image {
                path: path.clone(),
                source,
            }
        })?;
        Ok(path)
    }

    /// 把张量原始数据导出为`<name>.npy`
    pub fn dump_tensor(&self, name: &str, tensor: &Tensor) -> Result<PathBuf, ArtifactError> {
        let path = self.results_dir.join(format!("{}.npy", name));
        let file = File::create(&path).map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;
        tensor
            .save_npy(BufWriter::new(file))
            .map_err(|source| ArtifactError::Npy {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }

    /// 把损失曲线存成`<name>.json`（带缩进，画图脚本可直接读）
    pub fn save_history(&self, name: &str, history: &LossHistory) -> Result<PathBuf, ArtifactError> {
        let path = self.results_dir.join(format!("{}.json", name));
        let json =
            serde_json::to_string_pretty(history).map_err(|source| ArtifactError::Json {
                path: path.clone(),
                source,
            })?;
        std::fs::write(&path, json).map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
