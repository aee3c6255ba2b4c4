
use crate::objective::Evaluation;
use crate::synthesis::SynthesisError;
use crate::tensor::Tensor;

/// 目标为`Σ(x−t)²`的简易评估闭包，梯度用闭式`2(x−t)`给出
fn quadratic_eval(target: Tensor) -> impl FnMut(&Tensor) -> Result<Evaluation, SynthesisError> {
    move |image: &Tensor| {
        let diff = image - &target;
        let loss = (&diff * &diff).sum();
        Ok(Evaluation {
            loss,
            gradient: diff * 2.0,
            terms: vec![("quadratic".to_string(), loss)],
        })
    }
}
