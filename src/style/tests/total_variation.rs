use super::numeric_gradient;
use crate::assert_err;
use crate::style::{total_variation, total_variation_backward};
use crate::synthesis::SynthesisError;
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

#[test]
fn test_total_variation_of_constant_image_is_zero() {
    let image = Tensor::filled(3.7, &[1, 1, 4, 4]);
    assert_eq!(total_variation(&image, 2.).unwrap(), 0.);
    assert_eq!(total_variation(&image, 1.).unwrap(), 0.);
}

#[test]
fn test_total_variation_on_known_values() {
    // 2×2图像[[1,2],[3,4]]的角网格只有一个单元：dy = 1-3 = -2，dx = 1-2 = -1，e = 5
    let image = Tensor::new(&[1., 2., 3., 4.], &[1, 1, 2, 2]);
    assert_eq!(total_variation(&image, 2.).unwrap(), 5.);
    assert_abs_diff_eq!(
        total_variation(&image, 1.).unwrap(),
        5_f64.sqrt(),
        epsilon = 1e-12
    );
}

#[test]
fn test_total_variation_is_nonnegative() {
    let image = Tensor::uniform_seeded(-1., 1., &[1, 2, 5, 5], 9);
    assert!(total_variation(&image, 2.).unwrap() >= 0.);
    assert!(total_variation(&image, 1.).unwrap() >= 0.);
}

#[test]
fn test_total_variation_ignores_bottom_right_corner() {
    // 右下角像素既不是任何单元的基准点，也不是任何基准点的下/右邻居
    let base = Tensor::new(&[1., 2., 3., 4., 5., 6., 7., 8., 9.], &[1, 1, 3, 3]);
    let mut modified = base.clone();
    modified.view_mut()[[0, 0, 2, 2]] = 100.;

    assert_eq!(
        total_variation(&base, 2.).unwrap(),
        total_variation(&modified, 2.).unwrap()
    );
}

#[test]
fn test_total_variation_backward_matches_numeric_gradient() {
    // 取值彼此拉开距离，保证每个单元的e都远离零
    let image = Tensor::new(&[1., 3., 6., 10., 2., 8., 4., 9., 5.], &[1, 1, 3, 3]);
    for beta in [2.0, 1.0] {
        let loss = |x: &Tensor| total_variation(x, beta).unwrap();
        let analytic = total_variation_backward(&image, beta).unwrap();
        let numeric = numeric_gradient(loss, &image, 1e-5);

        for (a, n) in analytic.as_slice().iter().zip(numeric.as_slice()) {
            assert_abs_diff_eq!(*a, *n, epsilon = 1e-6);
        }
    }
}

#[test]
fn test_total_variation_backward_of_constant_image_is_zero() {
    let image = Tensor::filled(2.0, &[1, 1, 4, 4]);
    // e为零的单元取次梯度0，beta=1也不会出现除零
    assert_eq!(
        total_variation_backward(&image, 1.).unwrap(),
        Tensor::zeros(&[1, 1, 4, 4])
    );
    assert_eq!(
        total_variation_backward(&image, 2.).unwrap(),
        Tensor::zeros(&[1, 1, 4, 4])
    );
}

#[test]
fn test_total_variation_with_bad_shape() {
    assert_err!(
        total_variation(&Tensor::ones(&[3, 3]), 2.),
        SynthesisError::ShapeMismatch { .. }
    );
    assert_err!(
        total_variation(&Tensor::ones(&[1, 1, 1, 5]), 2.),
        SynthesisError::ShapeMismatch { .. }
    );
    assert_err!(
        total_variation_backward(&Tensor::ones(&[1, 1, 5, 1]), 2.),
        SynthesisError::ShapeMismatch { .. }
    );
}
