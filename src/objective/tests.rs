use super::{Evaluation, LossTerm, Objective};
use crate::assert_err;
use crate::features::{FeatureExtractor, FeatureMap, PixelExtractor};
use crate::style::gram;
use crate::synthesis::SynthesisError;
use crate::tensor::{DimOrdering, Tensor};
use approx::assert_abs_diff_eq;

/// 声称有某层、实际什么都不返回的提取器，用来触发缺层错误
struct SilentExtractor;

impl FeatureExtractor for SilentExtractor {
    fn evaluate(&self, _image: &Tensor, _layers: &[String]) -> Result<FeatureMap, SynthesisError> {
        Ok(FeatureMap::new())
    }

    fn backward(&self, image: &Tensor, _cotangents: &FeatureMap) -> Result<Tensor, SynthesisError> {
        Ok(Tensor::zeros(image.shape()))
    }
}

/// 反向返回错误形状梯度的提取器
struct MisshapenExtractor;

impl FeatureExtractor for MisshapenExtractor {
    fn evaluate(&self, image: &Tensor, layers: &[String]) -> Result<FeatureMap, SynthesisError> {
        PixelExtractor.evaluate(image, layers)
    }

    fn backward(
        &self,
        _image: &Tensor,
        _cotangents: &FeatureMap,
    ) -> Result<Tensor, SynthesisError> {
        Ok(Tensor::zeros(&[1, 1, 1, 1]))
    }
}

fn numeric_gradient(loss: impl Fn(&Tensor) -> f64, x: &Tensor, eps: f64) -> Tensor {
    let base = x.to_vec();
    let mut grad = Vec::with_capacity(base.len());
    for k in 0..base.len() {
        let mut plus = base.clone();
        plus[k] += eps;
        let mut minus = base.clone();
        minus[k] -= eps;
        grad.push((loss(&Tensor::new(&plus, x.shape())) - loss(&Tensor::new(&minus, x.shape())))
            / (2.0 * eps));
    }
    Tensor::new(&grad, x.shape())
}

#[test]
fn test_content_only_objective() {
    let extractor = PixelExtractor;
    let target = Tensor::new(&[1., 2., 3., 4.], &[1, 1, 2, 2]);
    let term =
        Objective::content_term(&extractor, &target, PixelExtractor::LAYER, 0.5).unwrap();
    let objective = Objective::new(vec![term]).unwrap();

    let image = Tensor::new(&[2., 2., 3., 6.], &[1, 1, 2, 2]);
    let Evaluation {
        loss,
        gradient,
        terms,
    } = objective.evaluate(&extractor, &image).unwrap();

    // 0.5 · (1 + 0 + 0 + 4)
    assert_eq!(loss, 2.5);
    // 0.5 · 2 · (image - target)
    assert_eq!(gradient, Tensor::new(&[1., 0., 0., 2.], &[1, 1, 2, 2]));
    assert_eq!(terms, vec![("content_pixel".to_string(), 2.5)]);
}

#[test]
fn test_style_term_freezes_target_gram() {
    let extractor = PixelExtractor;
    let style_image = Tensor::uniform_seeded(-1., 1., &[1, 2, 3, 3], 13);
    let term =
        Objective::style_term(&extractor, &style_image, PixelExtractor::LAYER, 1.0).unwrap();

    let LossTerm::Style { layer, target_gram, weight } = &term else {
        panic!("style_term应构造Style项");
    };
    assert_eq!(layer, PixelExtractor::LAYER);
    assert_eq!(*weight, 1.0);
    assert_eq!(
        *target_gram,
        gram(&style_image, DimOrdering::ChannelsFirst).unwrap()
    );

    // 风格图自己评估自己：风格损失为零
    let objective = Objective::new(vec![term]).unwrap();
    let evaluation = objective.evaluate(&extractor, &style_image).unwrap();
    assert_eq!(evaluation.loss, 0.);
    assert_eq!(evaluation.gradient, Tensor::zeros(&[1, 2, 3, 3]));
}

#[test]
fn test_total_variation_term() {
    let extractor = PixelExtractor;
    let objective = Objective::new(vec![LossTerm::TotalVariation {
        beta: 2.0,
        weight: 3.0,
    }])
    .unwrap();

    // [[1,2],[3,4]]的总变差（beta=2）为5
    let image = Tensor::new(&[1., 2., 3., 4.], &[1, 1, 2, 2]);
    let evaluation = objective.evaluate(&extractor, &image).unwrap();
    assert_eq!(evaluation.loss, 15.);
    assert_eq!(evaluation.terms, vec![("total_variation".to_string(), 15.)]);
}

#[test]
fn test_combined_objective_gradient_matches_numeric() {
    let extractor = PixelExtractor;
    let style_image = Tensor::new(&[2., -1., 0.5, 1.5, -0.5, 1., 2.5, -2.], &[1, 2, 2, 2]);
    let content_image = Tensor::new(&[1., 1., -1., -1., 0.5, -0.5, 2., -2.], &[1, 2, 2, 2]);

    let objective = Objective::new(vec![
        Objective::style_term(&extractor, &style_image, PixelExtractor::LAYER, 2.0).unwrap(),
        Objective::content_term(&extractor, &content_image, PixelExtractor::LAYER, 0.7).unwrap(),
        LossTerm::TotalVariation {
            beta: 2.0,
            weight: 0.3,
        },
    ])
    .unwrap();

    let image = Tensor::new(&[0.3, -0.8, 1.2, 0.1, -1.1, 0.9, -0.2, 0.6], &[1, 2, 2, 2]);
    let evaluation = objective.evaluate(&extractor, &image).unwrap();
    assert_eq!(evaluation.terms.len(), 3);
    assert_eq!(evaluation.gradient.shape(), image.shape());

    let loss_fn = |x: &Tensor| objective.evaluate(&extractor, x).unwrap().loss;
    let numeric = numeric_gradient(loss_fn, &image, 1e-5);
    for (a, n) in evaluation.gradient.as_slice().iter().zip(numeric.as_slice()) {
        assert_abs_diff_eq!(*a, *n, epsilon = 1e-6);
    }
}

#[test]
fn test_total_loss_is_sum_of_terms() {
    let extractor = PixelExtractor;
    let target = Tensor::uniform_seeded(-1., 1., &[1, 1, 3, 3], 23);
    let objective = Objective::new(vec![
        Objective::content_term(&extractor, &target, PixelExtractor::LAYER, 1.0).unwrap(),
        LossTerm::TotalVariation {
            beta: 2.0,
            weight: 1e-3,
        },
    ])
    .unwrap();

    let image = Tensor::uniform_seeded(-1., 1., &[1, 1, 3, 3], 24);
    let evaluation = objective.evaluate(&extractor, &image).unwrap();
    let sum: f64 = evaluation.terms.iter().map(|(_, v)| v).sum();
    assert_abs_diff_eq!(evaluation.loss, sum, epsilon = 1e-12);
}

#[test]
fn test_objective_with_missing_layer() {
    let target = Tensor::zeros(&[1, 1, 2, 2]);
    let objective = Objective::new(vec![LossTerm::Content {
        layer: "pixel".to_string(),
        target_features: target,
        weight: 1.0,
    }])
    .unwrap();

    let image = Tensor::zeros(&[1, 1, 2, 2]);
    let result = objective.evaluate(&SilentExtractor, &image);
    assert_err!(result, SynthesisError::Extractor(msg) if msg.contains("pixel"));
}

#[test]
fn test_objective_with_misshapen_extractor_gradient() {
    let extractor = MisshapenExtractor;
    let target = Tensor::zeros(&[1, 1, 2, 2]);
    let objective = Objective::new(vec![LossTerm::Content {
        layer: "pixel".to_string(),
        target_features: target,
        weight: 1.0,
    }])
    .unwrap();

    let image = Tensor::ones(&[1, 1, 2, 2]);
    let result = objective.evaluate(&extractor, &image);
    assert_err!(result, SynthesisError::ShapeMismatch { .. });
}

#[test]
fn test_objective_validation() {
    assert_err!(
        Objective::new(vec![]),
        SynthesisError::InvalidConfig("目标函数至少需要一个损失项")
    );

    assert_err!(
        Objective::new(vec![LossTerm::Content {
            layer: String::new(),
            target_features: Tensor::zeros(&[1, 1, 2, 2]),
            weight: 1.0,
        }]),
        SynthesisError::InvalidConfig("损失项的层名不能为空")
    );

    assert_err!(
        Objective::new(vec![LossTerm::TotalVariation {
            beta: 2.0,
            weight: f64::NAN,
        }]),
        SynthesisError::InvalidConfig("损失项的权重须为有限值")
    );

    assert_err!(
        Objective::new(vec![LossTerm::TotalVariation {
            beta: f64::INFINITY,
            weight: 1.0,
        }]),
        SynthesisError::InvalidConfig("总变差的beta须为有限值")
    );
}
