//! # 优化器
//!
//! 两类互补的优化后端：
//! - 一阶算法[`FirstOrderAlgorithm`]（Adam、SGD）：单步契约，
//!   配置不可变、状态显式进出，由合成循环逐步驱动；
//! - 拟牛顿[`lbfgs`]：反过来把整个目标函数闭包接管进去，
//!   步进与收敛判定都由它自己做主。

mod first_order;
pub mod lbfgs;


pub use first_order::{
    AdamConfig, FirstOrderAlgorithm, FirstOrderState, FirstOrderStep, SgdConfig,
};
