//! # 像素空间风格迁移示例
//!
//! 不依赖任何外部特征网络，用自带的恒等提取器在像素空间演示完整流程：
//! - `StyleTransfer` 构建器（风格/内容层、三项权重、噪声种子）
//! - `Adam` 一阶后端驱动的合成循环
//! - `ArtifactWriter` 落盘（PNG图像、npy张量、JSON损失曲线）
//!
//! ## 运行
//! ```bash
//! cargo run --example pixel_transfer
//! ```

use style_torch::artifacts::ArtifactWriter;
use style_torch::features::PixelExtractor;
use style_torch::optim::AdamConfig;
use style_torch::synthesis::{Backend, SynthesisConfig};
use style_torch::transfer::{Seed, StyleTransfer};
use style_torch::Tensor;

/// 内容图：从上到下的灰度渐变
fn make_content(height: usize, width: usize) -> Tensor {
    let mut data = Vec::with_capacity(height * width);
    for row in 0..height {
        let value = 255.0 * row as f64 / (height - 1) as f64;
        for _ in 0..width {
            data.push(value);
        }
    }
    Tensor::new(&data, &[1, 1, height, width])
}

/// 风格图：明暗相间的棋盘格
fn make_style(height: usize, width: usize) -> Tensor {
    let mut data = Vec::with_capacity(height * width);
    for row in 0..height {
        for col in 0..width {
            let bright = (row / 8 + col / 8) % 2 == 1;
            data.push(if bright { 200.0 } else { 40.0 });
        }
    }
    Tensor::new(&data, &[1, 1, height, width])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== 像素空间风格迁移示例 ===\n");
    let start_time = std::time::Instant::now();

    // 1. 素材：渐变当内容，棋盘格当风格
    let content = make_content(32, 32);
    let style = make_style(32, 32);

    // 2. 合成配置：Adam一阶后端，梯度归一化
    let config = SynthesisConfig {
        max_iter: 300,
        patience: 100,
        backend: Backend::FirstOrder {
            algorithm: AdamConfig::default().into(),
            normalize_gradient: true,
        },
        log_every: 50,
    };

    // 3. 从带种子的噪声出发合成
    println!("图像: 32x32 单通道，提取器: 像素恒等\n");
    let report = StyleTransfer::new(content, style)
        .with_style_layers(&[PixelExtractor::LAYER])
        .with_content_layers(&[PixelExtractor::LAYER])
        .with_weights(1e2, 5e0, 1e-3)
        .with_seed(Seed::Noise { seed: 42 })
        .with_synthesis_config(config)
        .run(&PixelExtractor)?;

    // 4. 三样产物统一落盘
    let writer = ArtifactWriter::create("results/pixel_transfer")?;
    let image_path = writer.save_image("best", &report.best_image)?;
    let tensor_path = writer.dump_tensor("best", &report.best_image)?;
    let history_path = writer.save_history("loss_curve", &report.history)?;

    // 5. 总结
    println!("\n=== 合成结果 ===");
    println!("终止原因: {:?}，迭代数: {}", report.stop_reason, report.iterations);
    println!("最优损失: {:.6e}", report.best_loss);
    println!("图像: {}", image_path.display());
    println!("张量: {}", tensor_path.display());
    println!("曲线: {}", history_path.display());
    println!("总耗时: {:.2?}", start_time.elapsed());

    println!("\n✅ 合成完成！");
    Ok(())
}
