use crate::synthesis::SynthesisError;
use crate::tensor::Tensor;
use crate::tensor_slice;

fn check_image_shape(image: &Tensor) -> Result<(usize, usize, usize, usize), SynthesisError> {
    if image.dimension() != 4 {
        return Err(SynthesisError::shape_mismatch(
            &[],
            image.shape(),
            "总变差只接受(b,c,h,w)的4阶张量",
        ));
    }
    let shape = image.shape();
    let (b, c, h, w) = (shape[0], shape[1], shape[2], shape[3]);
    if h < 2 || w < 2 {
        return Err(SynthesisError::shape_mismatch(
            &[],
            shape,
            "总变差要求高和宽都至少为2",
        ));
    }
    Ok((b, c, h, w))
}

/// 总变差：`Σ (dy² + dx²)^(beta/2)`。
///
/// 差分在(h-1)×(w-1)的左上角网格上计算：dy是向下差分、dx是向右差分，
/// 二者都以`[.., .., :h-1, :w-1]`角块为基准；最后一行/列的像素不被罚及。
/// `beta = 2`时退化为普通的平方差分和。
pub fn total_variation(image: &Tensor, beta: f64) -> Result<f64, SynthesisError> {
    let (_, _, h, w) = check_image_shape(image)?;

    let corner = tensor_slice!(image, .., .., 0..h - 1, 0..w - 1);
    let down = tensor_slice!(image, .., .., 1..h, 0..w - 1);
    let right = tensor_slice!(image, .., .., 0..h - 1, 1..w);

    let dy = &corner - &down;
    let dx = &corner - &right;
    let energy = &dy * &dy + &dx * &dx;
    Ok(energy.powf(beta / 2.0).sum())
}

/// [`total_variation`]对图像的闭式梯度。
///
/// 记p = beta/2、e = dy² + dx²，则每个网格单元向三个像素散布贡献：
/// 基准点得`2p·e^(p-1)·(dy+dx)`，下邻减`2p·e^(p-1)·dy`，右邻减`2p·e^(p-1)·dx`。
/// e为零的单元取次梯度0（beta < 2时e^(p-1)在零处无定义）。
pub fn total_variation_backward(image: &Tensor, beta: f64) -> Result<Tensor, SynthesisError> {
    let (b, c, h, w) = check_image_shape(image)?;

    let p = beta / 2.0;
    let mut gradient = Tensor::zeros(image.shape());
    {
        let image_view = image.view();
        let mut grad_view = gradient.view_mut();
        for bi in 0..b {
            for ci in 0..c {
                for i in 0..h - 1 {
                    for j in 0..w - 1 {
                        let center = image_view[[bi, ci, i, j]];
                        let dy = center - image_view[[bi, ci, i + 1, j]];
                        let dx = center - image_view[[bi, ci, i, j + 1]];
                        let energy = dy * dy + dx * dx;
                        if energy == 0.0 {
                            continue;
                        }
                        let scale = 2.0 * p * energy.powf(p - 1.0);
                        grad_view[[bi, ci, i, j]] += scale * (dy + dx);
                        grad_view[[bi, ci, i + 1, j]] -= scale * dy;
                        grad_view[[bi, ci, i, j + 1]] -= scale * dx;
                    }
                }
            }
        }
    }
    Ok(gradient)
}
