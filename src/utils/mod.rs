//! # 常用接口模块
//!
//! 本模块提供一些单元测试中常用的断言宏
