use tracing::{info, warn};

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::predictor::Target;
use crate::processors::{ModelTrainer, ObservationPivot};
use crate::readers::DatasetReader;
use crate::server::{self, ServeConfig};
use crate::utils::progress::ProgressReporter;
use crate::writers::ModelStore;

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Train {
            dataset,
            models_dir,
            neighbours,
            max_points,
            max_workers,
            validate_only,
        } => {
            println!("Training air-quality models...");
            println!("Dataset: {}", dataset.display());
            println!("Models directory: {}", models_dir.display());
            println!(
                "Neighbours: {}, max points: {}, workers: {}",
                neighbours, max_points, max_workers
            );

            let spinner = ProgressReporter::new_spinner("Reading observations...", false);
            let observations = DatasetReader::new().read_observations(&dataset)?;
            spinner.finish_with_message(&format!(
                "Read {} usable observations",
                observations.len()
            ));

            let samples = ObservationPivot::new().pivot(&observations)?;
            println!("Pivoted into {} samples", samples.len());

            let trainer = ModelTrainer::with_workers(neighbours, max_points, max_workers);

            if validate_only {
                let mut samples = samples;
                trainer.label_samples(&mut samples);
                let (train, holdout) = trainer.split(&samples);
                println!(
                    "Validation complete - {} training samples, {} holdout samples, nothing written",
                    train.len(),
                    holdout.len()
                );
                return Ok(());
            }

            let progress =
                ProgressReporter::new(Target::ALL.len() as u64, "Fitting models...", false);
            let outcome = trainer.train(samples, Some(&progress))?;

            println!("\nHoldout metrics:");
            for report in &outcome.reports {
                let rmse = report
                    .rmse
                    .map(|value| format!("{:.3}", value))
                    .unwrap_or_else(|| "n/a".to_string());
                let r2 = report
                    .r2
                    .map(|value| format!("{:.3}", value))
                    .unwrap_or_else(|| "n/a".to_string());
                println!(
                    "  {:>5}: RMSE {:>10}, R² {:>7} (train {}, holdout {})",
                    report.target, rmse, r2, report.train_count, report.test_count
                );
            }

            let store = ModelStore::new(&models_dir);
            for (target, model) in &outcome.models {
                let path = store.save(*target, model)?;
                println!("Saved {}", path.display());
            }

            println!("Training complete!");
        }

        Commands::Serve {
            models_dir,
            host,
            port,
            config,
        } => {
            let mut serve_config = ServeConfig::load(config.as_deref())?;
            serve_config.apply_overrides(host, port, models_dir);

            println!(
                "Loading models from {}...",
                serve_config.models_dir.display()
            );
            let store = ModelStore::new(&serve_config.models_dir);
            let registry = store.load_registry()?;

            for target in registry.loaded_targets() {
                info!(model = %target, "model loaded");
            }
            for target in registry.missing_targets() {
                warn!(model = %target, "no artifact found; target will be absent from responses");
            }
            if registry.is_empty() {
                warn!("no models loaded; responses will carry empty predictions");
            }

            println!("Serving on http://{}", serve_config.bind_address());
            server::serve(&serve_config, registry).await?;
        }

        Commands::Info { models_dir } => {
            println!("Artifacts in {}:", models_dir.display());

            let store = ModelStore::new(&models_dir);
            let artifacts = store.list()?;

            if artifacts.is_empty() {
                println!("  (none)");
                return Ok(());
            }

            for artifact in artifacts {
                println!(
                    "  {:>5}: {} points, k={}, {} bytes ({})",
                    artifact.target,
                    artifact.point_count,
                    artifact.neighbours,
                    artifact.size_bytes,
                    artifact.path.display()
                );
            }
        }
    }

    Ok(())
}
