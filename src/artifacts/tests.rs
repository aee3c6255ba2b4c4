use super::{ArtifactError, ArtifactWriter};
use crate::assert_err;
use crate::objective::Evaluation;
use crate::synthesis::LossHistory;
use crate::tensor::Tensor;
use crate::vision::Vision;
use ndarray::ArrayD;
use ndarray_npy::ReadNpyExt;

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓目录创建↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
#[test]
fn test_create_builds_nested_results_dir() {
    let root = std::env::temp_dir().join("test_artifacts_create");
    let nested = root.join("runs").join("gatys_01");

    let writer = ArtifactWriter::create(&nested).unwrap();
    assert_eq!(writer.results_dir(), nested.as_path());
    assert!(nested.is_dir());

    // 目录已存在时再建一次也应当成功
    ArtifactWriter::create(&nested).unwrap();

    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_create_failure_carries_dir_path() {
    let blocked = std::env::temp_dir().join("test_artifacts_blocked.txt");
    std::fs::write(&blocked, "占位文件").unwrap();

    let result = ArtifactWriter::create(&blocked);
    assert_err!(
        result,
        ArtifactError::CreateDir { path, .. } if path.ends_with("test_artifacts_blocked.txt")
    );

    std::fs::remove_file(&blocked).unwrap();
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑目录创建↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓图像落盘↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
#[test]
fn test_save_image_writes_readable_rgb_png() {
    let dir = std::env::temp_dir().join("test_artifacts_save_rgb");
    let writer = ArtifactWriter::create(&dir).unwrap();

    // (1, 3, 2, 2)的合成布局，像素值取整数以便PNG往返后逐位相等
    let image = Tensor::new(
        &[
            10., 20., 30., 40., // 通道0
            50., 60., 70., 80., // 通道1
            90., 100., 110., 120., // 通道2
        ],
        &[1, 3, 2, 2],
    );
    let path = writer.save_image("stylized", &image).unwrap();
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("stylized.png"));

    let loaded = Vision::load_image(path.to_str().unwrap()).unwrap();
    let expected_hwc = Tensor::new(
        &[
            10., 50., 90., 20., 60., 100., //
            30., 70., 110., 40., 80., 120.,
        ],
        &[2, 2, 3],
    );
    assert_eq!(loaded, expected_hwc);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_save_image_writes_gray_png() {
    let dir = std::env::temp_dir().join("test_artifacts_save_gray");
    let writer = ArtifactWriter::create(&dir).unwrap();

    let image = Tensor::new(&[0., 85., 170., 255.], &[1, 1, 2, 2]);
    let path = writer.save_image("draft", &image).unwrap();

    let loaded = Vision::load_image(path.to_str().unwrap()).unwrap();
    assert_eq!(loaded, Tensor::new(&[0., 85., 170., 255.], &[2, 2]));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_save_image_rejects_batched_tensor() {
    let dir = std::env::temp_dir().join("test_artifacts_save_batched");
    let writer = ArtifactWriter::create(&dir).unwrap();

    let batched = Tensor::zeros(&[2, 3, 2, 2]);
    let result = writer.save_image("bad", &batched);
    assert_err!(result, ArtifactError::Image { .. });

    std::fs::remove_dir_all(&dir).unwrap();
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑图像落盘↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓张量导出↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
#[test]
fn test_dump_tensor_round_trips_via_npy() {
    let dir = std::env::temp_dir().join("test_artifacts_dump_npy");
    let writer = ArtifactWriter::create(&dir).unwrap();

    let original = Tensor::new(&[0.5, -1.25, 3.75, 128.0, -0.0, 255.5], &[1, 2, 3]);
    let path = writer.dump_tensor("final_image", &original).unwrap();
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("final_image.npy")
    );

    let file = std::fs::File::open(&path).unwrap();
    let loaded = ArrayD::<f64>::read_npy(file).unwrap();
    assert_eq!(Tensor::from_view(loaded.view()), original);

    std::fs::remove_dir_all(&dir).unwrap();
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑张量导出↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓损失曲线↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
#[test]
fn test_save_history_round_trips_via_json() {
    let dir = std::env::temp_dir().join("test_artifacts_save_history");
    let writer = ArtifactWriter::create(&dir).unwrap();

    let mut history = LossHistory::new();
    for (total, style, content) in [(9.0, 6.0, 3.0), (4.5, 3.0, 1.5)] {
        history.record(&Evaluation {
            loss: total,
            gradient: Tensor::zeros(&[1]),
            terms: vec![
                ("style_pixel".to_string(), style),
                ("content_pixel".to_string(), content),
            ],
        });
    }

    let path = writer.save_history("loss_curve", &history).unwrap();
    let json = std::fs::read_to_string(&path).unwrap();
    // 带缩进的多行JSON，画图脚本不必先格式化
    assert!(json.starts_with("{\n"));

    let loaded: LossHistory = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, history);

    std::fs::remove_dir_all(&dir).unwrap();
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑损失曲线↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
