use super::{Vision, VisionError};
use crate::tensor::{DimOrdering, Tensor};

impl Vision {
    /// 把图像张量摆成合成用的`(批, 通道, 高, 宽)`4阶布局。
    ///
    /// * 2阶`(高, 宽)` - 视作单通道，变为`(1, 1, 高, 宽)`；
    /// * 3阶 - 按`ordering`解释为`(高, 宽, 通道)`或`(通道, 高, 宽)`，补上批维；
    /// * 4阶 - `ChannelsLast`会被转置到`ChannelsFirst`，后者原样返回。
    pub fn to_synthesis_layout(
        image: &Tensor,
        ordering: DimOrdering,
    ) -> Result<Tensor, VisionError> {
        let shape = image.shape();
        match shape.len() {
            2 => Ok(image.reshape(&[1, 1, shape[0], shape[1]])),
            3 => match ordering {
                DimOrdering::ChannelsLast => {
                    let (h, w, c) = (shape[0], shape[1], shape[2]);
                    Ok(image.permute(&[2, 0, 1]).reshape(&[1, c, h, w]))
                }
                DimOrdering::ChannelsFirst => {
                    let (c, h, w) = (shape[0], shape[1], shape[2]);
                    Ok(image.reshape(&[1, c, h, w]))
                }
            },
            4 => match ordering {
                DimOrdering::ChannelsFirst => Ok(image.clone()),
                DimOrdering::ChannelsLast => Ok(image.permute(&[0, 3, 1, 2])),
            },
            rank => Err(VisionError::Shape(format!(
                "无法把{}阶张量摆成(批,通道,高,宽)的合成布局",
                rank
            ))),
        }
    }

    /// `to_synthesis_layout`的逆操作：`(1, 通道, 高, 宽)` → HWC。
    /// 单通道回到`(高, 宽)`，多通道回到`(高, 宽, 通道)`，供`save_image`直接使用。
    pub fn from_synthesis_layout(image: &Tensor) -> Result<Tensor, VisionError> {
        let shape = image.shape();
        if shape.len() != 4 {
            return Err(VisionError::Shape(format!(
                "从合成布局还原要求(1,通道,高,宽)的4阶张量，实际形状为{:?}",
                shape
            )));
        }
        let (b, c, h, w) = (shape[0], shape[1], shape[2], shape[3]);
        if b != 1 {
            return Err(VisionError::Shape(format!(
                "从合成布局还原只支持批大小为1，实际为{}",
                b
            )));
        }
        if c == 1 {
            Ok(image.reshape(&[h, w]))
        } else {
            Ok(image.reshape(&[c, h, w]).permute(&[1, 2, 0]))
        }
    }
}
