// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, hands a config to Layer 2 and
// prints what comes back. Nothing here touches arrays.
//
// Commands:
//   1. `stats`  — prepare the splits and describe them
//   2. `sample` — draw pair batches and record them
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use std::fmt::Write;
use commands::{Commands, SampleArgs, StatsArgs};

use crate::application::{sample_use_case::SampleConfig, stats_use_case::DatasetStats};
use crate::infra::config_store::ConfigStore;

#[derive(Parser, Debug)]
#[command(
    name = "cifar-siamese",
    version,
    about = "Load CIFAR-10 and sample anchor/partner pair batches for siamese training."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Stats(args)  => run_stats(args),
            Commands::Sample(args) => run_sample(args),
        }
    }
}

fn run_stats(args: StatsArgs) -> Result<()> {
    use crate::application::stats_use_case::StatsUseCase;

    tracing::info!("Reading CIFAR-10 from: {}", args.data.data_dir);
    let stats = StatsUseCase::new(args.data.into()).execute()?;
    print!("{}", render_stats(&stats));
    Ok(())
}

/// Format dataset statistics as a plain-text report.
fn render_stats(stats: &DatasetStats) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(
        out,
        "Images: {}x{}x{}, {} classes ({} labels)",
        stats.geometry.height,
        stats.geometry.width,
        stats.geometry.channels,
        stats.num_classes,
        if stats.one_hot { "one-hot" } else { "dense" },
    );
    for split in &stats.splits {
        let _ = writeln!(out, "\n{}: {} samples", split.name, split.samples);
        for (class, count) in split.class_counts.iter().enumerate() {
            let name = stats.label_names.get(class).map(String::as_str).unwrap_or("?");
            let _ = writeln!(out, "  {class:>2} {name:<12} {count}");
        }
    }
    let _ = writeln!(out, "\nMax |train mean| after centring: {:.6}", stats.train_mean_residual);
    out
}

/// A saved config given with `--config` wins over every other flag.
fn resolve_sample_config(args: SampleArgs) -> Result<SampleConfig> {
    match args.config.clone() {
        Some(path) => {
            tracing::info!("Replaying config from: {}", path);
            ConfigStore::load_file(&path)
        }
        None => Ok(args.into()),
    }
}

fn run_sample(args: SampleArgs) -> Result<()> {
    use crate::application::sample_use_case::SampleUseCase;

    let config  = resolve_sample_config(args)?;
    let summary = SampleUseCase::new(config).execute()?;

    println!(
        "Sampled {} batches ({} same-class / {} other-class pairs, {} epochs), seed {}",
        summary.batches,
        summary.positives,
        summary.negatives,
        summary.epochs_completed,
        summary.seed
    );
    if let Some(dims) = summary.tensor_dims {
        println!("Batch tensor shape: {:?}", dims);
    }
    println!("Log:    {}", summary.csv_path.display());
    println!("Config: {}", summary.config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::prepare_use_case::PrepareConfig;
    use crate::application::sample_use_case::DatasetSplit;
    use crate::application::stats_use_case::SplitStats;
    use crate::domain::geometry::ImageGeometry;

    fn sample_args(argv: &[&str]) -> SampleArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        let Commands::Sample(args) = cli.command else {
            panic!("expected sample command");
        };
        args
    }

    #[test]
    fn test_config_flag_replays_saved_file() {
        let dir   = tempfile::tempdir().unwrap();
        let saved = SampleConfig {
            prepare: PrepareConfig {
                data_dir:        "/data/cifar".into(),
                one_hot:         false,
                validation_size: 5000,
            },
            split:         DatasetSplit::Test,
            num_tuples:    7,
            batch_size:    32,
            fraction_same: 0.5,
            seed:          Some(99),
            out_dir:       "replay".into(),
        };
        let path = ConfigStore::new(dir.path()).unwrap().save(&saved).unwrap();
        let path = path.display().to_string();

        // Flags given next to --config do not leak into the replayed run
        let args = sample_args(&["cifar-siamese", "sample", "--config", &path, "--batch-size", "8"]);
        assert_eq!(resolve_sample_config(args).unwrap(), saved);
    }

    #[test]
    fn test_without_config_flags_are_used() {
        let args = sample_args(&["cifar-siamese", "sample", "--seed", "4"]);
        let cfg  = resolve_sample_config(args).unwrap();
        assert_eq!(cfg, SampleConfig { seed: Some(4), ..SampleConfig::default() });
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = sample_args(&["cifar-siamese", "sample", "--config", "/nonexistent/sample_config.json"]);
        assert!(resolve_sample_config(args).is_err());
    }

    #[test]
    fn test_render_stats_lists_every_split() {
        let stats = DatasetStats {
            geometry:    ImageGeometry::CIFAR10,
            num_classes: 2,
            label_names: vec!["airplane".into()],
            one_hot:     true,
            splits: vec![
                SplitStats { name: "train".into(), samples: 5, class_counts: vec![3, 2] },
                SplitStats { name: "validation".into(), samples: 0, class_counts: vec![] },
                SplitStats { name: "test".into(), samples: 2, class_counts: vec![1, 1] },
            ],
            train_mean_residual: 0.25,
        };

        let text = render_stats(&stats);
        assert!(text.starts_with("Images: 32x32x3, 2 classes (one-hot labels)"));
        assert!(text.contains("train: 5 samples"));
        assert!(text.contains("validation: 0 samples"));
        assert!(text.contains("   0 airplane     3"));
        // Classes without a name fall back to "?"
        assert!(text.contains("   1 ?            2"));
        assert!(text.contains("Max |train mean| after centring: 0.250000"));
    }
}
