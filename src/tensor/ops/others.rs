use crate::tensor::Tensor;
use ndarray::Zip;
use std::cmp::PartialEq;

impl From<f64> for Tensor {
    /// 实现 From<f64> trait 用于将`f64`类型转换为形状为`[1]`的张量
    fn from(scalar: f64) -> Self {
        Tensor::new(&[scalar], &[1])
    }
}

impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Tensor {
    /// 对张量中的所有元素求和，返回纯数
    pub fn sum(&self) -> f64 {
        let mut value = 0.0;
        Zip::from(&self.data).for_each(|a| value += a);
        value
    }

    /// 张量所有元素的算术平均值，返回纯数。空张量会触发panic。
    pub fn mean(&self) -> f64 {
        assert!(self.size() > 0, "空张量没有均值");
        self.sum() / self.size() as f64
    }

    /// 逐元素开平方，返回新张量
    pub fn sqrt(&self) -> Tensor {
        Tensor {
            data: self.data.mapv(f64::sqrt),
        }
    }

    /// 逐元素的`p`次幂，返回新张量
    pub fn powf(&self, p: f64) -> Tensor {
        Tensor {
            data: self.data.mapv(|x| x.powf(p)),
        }
    }

    /// 逐元素取绝对值，返回新张量
    pub fn abs(&self) -> Tensor {
        Tensor {
            data: self.data.mapv(f64::abs),
        }
    }

    /// 逐元素钳位到[min, max]区间，返回新张量
    pub fn clamp(&self, min: f64, max: f64) -> Tensor {
        Tensor {
            data: self.data.mapv(|x| x.clamp(min, max)),
        }
    }

    /// 所有元素绝对值的最大值。空张量返回0。
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0, |acc, &x| acc.max(x.abs()))
    }
}
