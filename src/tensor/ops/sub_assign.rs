use crate::tensor::Tensor;
use std::ops::SubAssign;

impl SubAssign for Tensor {
    fn sub_assign(&mut self, other: Self) {
        // 使用`Sub` trait的`sub`方法来执行减法，并更新当前张量
        *self = self.clone() - other;
    }
}

impl<'a> SubAssign<&'a Self> for Tensor {
    fn sub_assign(&mut self, other: &'a Self) {
        // 使用`Sub` trait的`sub`方法来执行减法，并更新当前张量
        *self = self.clone() - other;
    }
}

impl SubAssign<f64> for Tensor {
    fn sub_assign(&mut self, scalar: f64) {
        // 使用`Sub` trait的`sub`方法来执行减法，并更新当前张量
        *self = self.clone() - scalar;
    }
}

impl SubAssign<f64> for &mut Tensor {
    fn sub_assign(&mut self, scalar: f64) {
        // 使用`Sub` trait的`sub`方法来执行减法，并更新当前张量
        **self = (*self).clone() - scalar;
    }
}
