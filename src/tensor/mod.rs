/*
 * @Author       : 老董
 * @Date         : 2025-11-03 09:41:12
 * @LastEditors  : 老董
 * @LastEditTime : 2026-07-30 15:22:08
 * @Description  : 动态阶（rank）的f64张量。图像合成把图像本身当作被优化的参数，
 *                 而拟牛顿族优化器要求全程双精度，所以本库的张量元素类型固定为f64，
 *                 不提供运行时切换精度的开关。
 */

use ndarray::{Array, ArrayViewD, IxDyn};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod ops {
    pub mod add;
    pub mod add_assign;
    pub mod div;
    pub mod div_assign;
    pub mod mat_mul;
    pub mod mul;
    pub mod mul_assign;
    pub mod others;
    pub mod sub;
    pub mod sub_assign;
}

mod print;
mod property;
mod save_load;
mod shape;
pub mod slice;


/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 注：只要通Tensor初始化的都是张量（即使标量也是张量）；
/// 而通常意义上的数字（类型为usize、i32、f64等）就只是纯数（number），在这里不被认为是张量。
///
/// 不变量：内部数据始终保持标准（行主序）内存布局——`permute`等变换会物化新数组，
/// 因此`as_slice`/`to_vec`总是可用的。
#[derive(Debug, Clone)]
pub struct Tensor {
    data: Array<f64, IxDyn>,
}

/// 4阶图像张量的轴序约定。
///
/// 本库内部一律使用`ChannelsFirst`，即`(批, 通道, 高, 宽)`；
/// 接受外部数据的入口若收到`ChannelsLast`（`(批, 高, 宽, 通道)`），
/// 会先转置到`ChannelsFirst`再参与运算，两种轴序的计算结果因此完全一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DimOrdering {
    #[default]
    ChannelsFirst,
    ChannelsLast,
}

impl Tensor {
    /// 创建一个张量，若为标量，`shape`可以是[]、[1]、[1,1]、[1,1,1]...
    /// 若为向量，`shape`可以是[n]、[1,n]、[n,1]；
    /// 若为矩阵，`shape`可以是[n,m]；
    /// 若为更高维度的数组，`shape`可以是[c,n,m,...]；
    /// 注：除了`data`长度为1且shape为`[]`的情况（标量），`data`的长度必须和`shape`中所有元素的乘积相等。
    pub fn new(data: &[f64], shape: &[usize]) -> Tensor {
        let data = Array::from_shape_vec(IxDyn(shape), data.to_vec()).unwrap();
        Tensor { data }
    }

    /// 创建一个所有元素均为0的张量
    pub fn zeros(shape: &[usize]) -> Tensor {
        Tensor {
            data: Array::zeros(IxDyn(shape)),
        }
    }

    /// 创建一个所有元素均为1的张量
    pub fn ones(shape: &[usize]) -> Tensor {
        Tensor {
            data: Array::ones(IxDyn(shape)),
        }
    }

    /// 创建一个所有元素均为`value`的张量
    pub fn filled(value: f64, shape: &[usize]) -> Tensor {
        Tensor {
            data: Array::from_elem(IxDyn(shape), value),
        }
    }

    /// 从（ndarray的）视图创建张量，数据会被拷贝为行主序
    pub fn from_view(view: ArrayViewD<'_, f64>) -> Tensor {
        Tensor {
            data: view.to_owned(),
        }
    }

    /// 创建一个随机张量，其值在[min, max]的闭区间内均匀分布
    pub fn uniform(min: f64, max: f64, shape: &[usize]) -> Tensor {
        let mut rng = rand::thread_rng();
        Self::uniform_with_rng(min, max, shape, &mut rng)
    }

    /// `uniform`的可复现版本：相同的`seed`产生相同的张量
    pub fn uniform_seeded(min: f64, max: f64, shape: &[usize], seed: u64) -> Tensor {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::uniform_with_rng(min, max, shape, &mut rng)
    }

    /// 创建一个服从正态分布的随机张量（Box–Muller变换）
    pub fn normal(mean: f64, std_dev: f64, shape: &[usize]) -> Tensor {
        let mut rng = rand::thread_rng();
        Self::normal_with_rng(mean, std_dev, shape, &mut rng)
    }

    /// `normal`的可复现版本：相同的`seed`产生相同的张量
    pub fn normal_seeded(mean: f64, std_dev: f64, shape: &[usize], seed: u64) -> Tensor {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::normal_with_rng(mean, std_dev, shape, &mut rng)
    }
}

// 私有方法
impl Tensor {
    fn uniform_with_rng<R: Rng>(min: f64, max: f64, shape: &[usize], rng: &mut R) -> Tensor {
        let uniform = Uniform::from(min..=max);
        let data = (0..shape.iter().product::<usize>())
            .map(|_| uniform.sample(rng))
            .collect::<Vec<_>>();
        Tensor::new(&data, shape)
    }

    fn normal_with_rng<R: Rng>(mean: f64, std_dev: f64, shape: &[usize], rng: &mut R) -> Tensor {
        let uniform = Uniform::from(0.0..1.0);
        let data_len = shape.iter().product::<usize>();
        let mut data = Vec::with_capacity(data_len);

        while data.len() < data_len {
            let u1: f64 = uniform.sample(rng);
            let u2: f64 = uniform.sample(rng);
            let r = (-2.0 * u1.ln()).sqrt();
            let theta = 2.0 * std::f64::consts::PI * u2;
            let z0 = mean + std_dev * r * theta.cos();
            let z1 = mean + std_dev * r * theta.sin();

            if z0.is_finite() {
                data.push(z0);
            }
            if data.len() < data_len && z1.is_finite() {
                data.push(z1);
            }
        }

        Tensor::new(&data, shape)
    }

    fn has_zero_value(&self) -> bool {
        self.data.iter().any(|&x| x == 0.)
    }

    fn generate_index_array(&self, shape: &[usize]) -> Vec<usize> {
        shape.iter().map(|_| 0).collect()
    }
}
