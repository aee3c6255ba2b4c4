use crate::assert_err;
use crate::tensor::Tensor;
use crate::vision::{Vision, VisionError};

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓保存与加载↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
#[test]
fn test_save_then_load_rgb_round_trip() {
    let original = Tensor::new(
        &[
            10., 20., 30., 40., 50., 60., //
            70., 80., 90., 100., 110., 120.,
        ],
        &[2, 2, 3],
    );
    let path = std::env::temp_dir().join("test_vision_rgb_round_trip.png");
    let path_str = path.to_str().unwrap();

    Vision::save_image(&original, path_str).unwrap();
    let loaded = Vision::load_image(path_str).unwrap();
    assert_eq!(loaded, original);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_save_then_load_gray_round_trip() {
    let original = Tensor::new(&[0., 85., 170., 255.], &[2, 2]);
    let path = std::env::temp_dir().join("test_vision_gray_round_trip.png");
    let path_str = path.to_str().unwrap();

    Vision::save_image(&original, path_str).unwrap();
    let loaded = Vision::load_image(path_str).unwrap();
    assert_eq!(loaded, original);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_save_clamps_out_of_range_values() {
    let original = Tensor::new(&[-5., 300., 128., 0.], &[2, 2]);
    let path = std::env::temp_dir().join("test_vision_clamp.png");
    let path_str = path.to_str().unwrap();

    Vision::save_image(&original, path_str).unwrap();
    let loaded = Vision::load_image(path_str).unwrap();
    assert_eq!(loaded, Tensor::new(&[0., 255., 128., 0.], &[2, 2]));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_save_rejects_unsupported_shape() {
    let not_an_image = Tensor::new(&[1., 2., 3.], &[3]);
    let result = Vision::save_image(&not_an_image, "/tmp/should_not_exist.png");
    assert_err!(result, VisionError::Unsupported(_));
}

#[test]
fn test_load_missing_file() {
    let result = Vision::load_image("./assets/no_such_image.png");
    assert_err!(result, VisionError::Load { .. });
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑保存与加载↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓改变图像尺寸↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
#[test]
fn test_resize_gray_image() {
    let image = Tensor::new(&[0., 100., 100., 200.], &[2, 2]);
    let resized = Vision::resize_image(&image, 4, 4).unwrap();
    assert_eq!(resized.shape(), &[4, 4]);
    for value in resized.as_slice() {
        assert!((0.0..=255.0).contains(value));
    }
}

#[test]
fn test_resize_color_image() {
    let image = Tensor::new(
        &[
            10., 20., 30., 40., 50., 60., //
            70., 80., 90., 100., 110., 120.,
        ],
        &[2, 2, 3],
    );
    let resized = Vision::resize_image(&image, 3, 5).unwrap();
    assert_eq!(resized.shape(), &[3, 5, 3]);
}

#[test]
fn test_load_image_sized() {
    let original = Tensor::new(
        &[
            10., 20., 30., 40., 50., 60., //
            70., 80., 90., 100., 110., 120.,
        ],
        &[2, 2, 3],
    );
    let path = std::env::temp_dir().join("test_vision_load_sized.png");
    let path_str = path.to_str().unwrap();
    Vision::save_image(&original, path_str).unwrap();

    let loaded = Vision::load_image_sized(path_str, 4, 6).unwrap();
    assert_eq!(loaded.shape(), &[4, 6, 3]);

    std::fs::remove_file(&path).unwrap();
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑改变图像尺寸↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
