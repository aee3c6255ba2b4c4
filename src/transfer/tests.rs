use super::{Seed, StyleTransfer};
use crate::assert_err;
use crate::features::{FeatureExtractor, FeatureMap, PixelExtractor};
use crate::optim::AdamConfig;
use crate::style::{frobenius_error, gram};
use crate::synthesis::{Backend, StopReason, SynthesisConfig, SynthesisError};
use crate::tensor::{DimOrdering, Tensor};

/// 两个同为恒等映射的命名层，用来观察风格权重的平摊
struct TwoBandExtractor;

impl FeatureExtractor for TwoBandExtractor {
    fn evaluate(&self, image: &Tensor, layers: &[String]) -> Result<FeatureMap, SynthesisError> {
        let mut features = FeatureMap::new();
        for layer in layers {
            if layer != "a" && layer != "b" {
                return Err(SynthesisError::Extractor(format!("没有{}层", layer)));
            }
            features.insert(layer.clone(), image.clone());
        }
        Ok(features)
    }

    fn backward(&self, image: &Tensor, cotangents: &FeatureMap) -> Result<Tensor, SynthesisError> {
        let mut gradient = Tensor::zeros(image.shape());
        for cotangent in cotangents.values() {
            gradient += cotangent.clone();
        }
        Ok(gradient)
    }
}

fn fast_adam(max_iter: usize) -> SynthesisConfig {
    SynthesisConfig {
        max_iter,
        backend: Backend::FirstOrder {
            algorithm: AdamConfig {
                learning_rate: 0.5,
                ..AdamConfig::default()
            }
            .into(),
            normalize_gradient: true,
        },
        ..SynthesisConfig::default()
    }
}

#[test]
fn test_builder_defaults() {
    let transfer = StyleTransfer::new(Tensor::zeros(&[1, 1, 4, 4]), Tensor::ones(&[1, 1, 4, 4]));
    assert_eq!(transfer.style_weight, 1e2);
    assert_eq!(transfer.content_weight, 5e0);
    assert_eq!(transfer.tv_weight, 1e-3);
    assert!(transfer.style_layers.is_empty());
    assert!(transfer.content_layers.is_empty());
}

#[test]
fn test_run_with_pixel_extractor_reduces_loss() {
    let content = Tensor::zeros(&[1, 1, 4, 4]);
    let style = Tensor::filled(0.5, &[1, 1, 4, 4]);

    let report = StyleTransfer::new(content, style)
        .with_style_layers(&[PixelExtractor::LAYER])
        .with_content_layers(&[PixelExtractor::LAYER])
        .with_weights(1e2, 5e0, 0.0)
        .with_seed(Seed::Noise { seed: 7 })
        .with_synthesis_config(fast_adam(50))
        .run(&PixelExtractor)
        .unwrap();

    assert_eq!(report.stop_reason, StopReason::MaxIterReached);
    assert_eq!(report.history.len(), 50);
    assert_eq!(
        report.history.term_names(),
        vec!["content_pixel", "style_pixel"]
    );
    let best = report.history.best_so_far();
    assert!(best.last().unwrap() < &report.history.total()[0]);
    assert_eq!(report.best_loss, *best.last().unwrap());
}

#[test]
fn test_style_weight_is_split_across_layers() {
    let content = Tensor::zeros(&[1, 2, 2, 2]);
    let style = Tensor::ones(&[1, 2, 2, 2]);

    let report = StyleTransfer::new(content.clone(), style.clone())
        .with_style_layers(&["a", "b"])
        .with_content_layers(&[])
        .with_weights(10.0, 0.0, 0.0)
        .with_seed(Seed::Image(content.clone()))
        .with_synthesis_config(fast_adam(1))
        .run(&TwoBandExtractor)
        .unwrap();

    // 两个恒等层各分到α/2=5的权重
    let expected = frobenius_error(
        &gram(&style, DimOrdering::ChannelsFirst).unwrap(),
        &gram(&content, DimOrdering::ChannelsFirst).unwrap(),
    )
    .unwrap()
        * 5.0;
    assert_eq!(report.history.term("style_a"), Some(&[expected][..]));
    assert_eq!(report.history.term("style_b"), Some(&[expected][..]));
    assert_eq!(report.history.total(), &[expected * 2.0][..]);
}

#[test]
fn test_identical_images_yield_zero_loss() {
    let image = Tensor::uniform_seeded(0., 255., &[1, 2, 3, 3], 11);

    let report = StyleTransfer::new(image.clone(), image.clone())
        .with_style_layers(&["a"])
        .with_content_layers(&["b"])
        .with_weights(1e2, 5e0, 0.0)
        .with_seed(Seed::Image(image.clone()))
        .with_synthesis_config(fast_adam(3))
        .run(&TwoBandExtractor)
        .unwrap();

    // 种子即目标：所有损失精确为0，且首轮即最优
    assert_eq!(report.best_loss, 0.0);
    assert_eq!(report.history.total(), &[0.0, 0.0, 0.0][..]);
}

#[test]
fn test_run_requires_some_layer() {
    let result = StyleTransfer::new(Tensor::zeros(&[1, 1, 4, 4]), Tensor::ones(&[1, 1, 4, 4]))
        .run(&PixelExtractor);
    assert_err!(result, SynthesisError::InvalidConfig("至少需要一个风格层或内容层"));
}

#[test]
fn test_noise_seed_requires_canonical_content() {
    let result = StyleTransfer::new(Tensor::zeros(&[4, 4]), Tensor::ones(&[4, 4]))
        .with_style_layers(&[PixelExtractor::LAYER])
        .with_seed(Seed::Noise { seed: 1 })
        .run(&PixelExtractor);
    assert_err!(
        result,
        SynthesisError::InvalidConfig(reason) if reason.contains("噪声种子")
    );
}

#[test]
fn test_unknown_layer_surfaces_extractor_error() {
    let result = StyleTransfer::new(Tensor::zeros(&[1, 1, 4, 4]), Tensor::ones(&[1, 1, 4, 4]))
        .with_style_layers(&["conv_9_9"])
        .run(&PixelExtractor);
    assert_err!(
        result,
        SynthesisError::Extractor(reason) if reason.contains("conv_9_9")
    );
}

#[test]
fn test_repeated_runs_are_deterministic() {
    let content = Tensor::zeros(&[1, 1, 3, 3]);
    let style = Tensor::filled(2.0, &[1, 1, 3, 3]);
    let transfer = StyleTransfer::new(content, style)
        .with_style_layers(&[PixelExtractor::LAYER])
        .with_weights(1e2, 5e0, 0.0)
        .with_seed(Seed::Noise { seed: 3 })
        .with_synthesis_config(fast_adam(10));

    let first = transfer.run(&PixelExtractor).unwrap();
    let second = transfer.run(&PixelExtractor).unwrap();
    assert_eq!(first.best_image, second.best_image);
    assert_eq!(first.history, second.history);
}
