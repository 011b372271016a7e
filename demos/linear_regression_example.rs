use linreg_gd::{Dataset, GradientDescent, Regressor, RegressorConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linreg_gd=debug".into()),
        )
        .init();

    // Synthetic data: price = 50 + 3 * area - 8 * age + small deterministic wobble
    let area: Vec<f64> = (0..60).map(|i| 40.0 + (i * 7 % 53) as f64).collect();
    let age: Vec<f64> = (0..60).map(|i| (i * 11 % 31) as f64).collect();
    let price: Vec<f64> = area
        .iter()
        .zip(age.iter())
        .enumerate()
        .map(|(i, (a, g))| 50.0 + 3.0 * a - 8.0 * g + ((i % 5) as f64 - 2.0) * 0.5)
        .collect();

    let dataset = Dataset::from_columns(vec![("area", area), ("age", age), ("price", price)])?;
    println!("Dataset: {} samples, {} columns", dataset.n_samples(), dataset.n_columns());

    let config = RegressorConfig::default().test_fraction(0.3).random_seed(69);
    let mut model = Regressor::new(&dataset, &["area", "age"], &["price"], config)?;
    println!(
        "Split: {} train rows, {} test rows",
        model.split().train_indices.len(),
        model.split().test_indices.len()
    );

    let descent = GradientDescent::new().num_iterations(10_000).learning_rate(0.01);
    let (beta, history) = model.fit(&descent)?;

    println!("\nCost history:");
    for i in [0, 10, 100, 1_000, history.len() - 1] {
        println!("  iteration {:>5}: {:.6}", i, history[i]);
    }

    println!("\nCoefficients (normalized features):");
    println!("  intercept: {:.4}", beta[(0, 0)]);
    for (name, b) in ["area", "age"].iter().zip(beta.column(0).iter().skip(1)) {
        println!("  {}: {:.4}", name, b);
    }
    println!("  means: {:?}", model.params().means);
    println!("  stds:  {:?}", model.params().stds);

    let score = model.score()?;
    println!("\nResults on held-out rows:");
    println!("  R² score: {:.4}", score.r2);
    println!("  MSE: {:.4}", score.mse);
    println!("  MAPE: {:.2}%", score.mape * 100.0);

    let new_x = ndarray::array![[75.0, 3.0], [120.0, 25.0]];
    let predictions = model.predict(&new_x)?;
    println!("\nPredictions on new data:");
    for (row, pred) in new_x.rows().into_iter().zip(predictions.column(0).iter()) {
        println!("  area={:.0}, age={:.0}: predicted price={:.2}", row[0], row[1], pred);
    }

    Ok(())
}
