// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `stats` and `sample`, and all
// their flags. Each argument struct converts into the
// application-layer config via `From`.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::{
    prepare_use_case::{PrepareConfig, DEFAULT_DATA_DIR},
    sample_use_case::{DatasetSplit, SampleConfig},
};
use crate::data::sampler::{DEFAULT_BATCH_SIZE, DEFAULT_FRACTION_SAME, DEFAULT_NUM_TUPLES};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load and preprocess CIFAR-10, then report split sizes and class balance
    Stats(StatsArgs),

    /// Sample anchor/partner pair batches and write them to a CSV log
    Sample(SampleArgs),
}

/// Flags shared by every command that prepares the dataset.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Directory containing data_batch_{1..5}.bin and test_batch.bin
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: String,

    /// Number of training samples moved into the validation split
    #[arg(long, default_value_t = 0)]
    pub validation_size: usize,

    /// Keep labels as class indices instead of one-hot rows
    #[arg(long)]
    pub dense_labels: bool,
}

impl From<DataArgs> for PrepareConfig {
    fn from(a: DataArgs) -> Self {
        PrepareConfig {
            data_dir:        a.data_dir,
            one_hot:         !a.dense_labels,
            validation_size: a.validation_size,
        }
    }
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub data: DataArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum SplitArg {
    Train,
    Validation,
    Test,
}

impl From<SplitArg> for DatasetSplit {
    fn from(s: SplitArg) -> Self {
        match s {
            SplitArg::Train      => DatasetSplit::Train,
            SplitArg::Validation => DatasetSplit::Validation,
            SplitArg::Test       => DatasetSplit::Test,
        }
    }
}

#[derive(Args, Debug)]
pub struct SampleArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Split to draw pairs from
    #[arg(long, value_enum, default_value_t = SplitArg::Train)]
    pub split: SplitArg,

    /// Number of pair batches to draw
    #[arg(long, default_value_t = DEFAULT_NUM_TUPLES)]
    pub num_tuples: usize,

    /// Rows per pair batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Share of same-class rows per batch, in [0, 1]
    #[arg(long, default_value_t = DEFAULT_FRACTION_SAME)]
    pub fraction_same: f64,

    /// RNG seed; a random one is drawn and recorded when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory for pairs.csv and sample_config.json
    #[arg(long, default_value = "pairs")]
    pub out_dir: String,

    /// Replay a saved sample_config.json; other flags are ignored
    #[arg(long)]
    pub config: Option<String>,
}

impl From<SampleArgs> for SampleConfig {
    fn from(a: SampleArgs) -> Self {
        SampleConfig {
            prepare:       a.data.into(),
            split:         a.split.into(),
            num_tuples:    a.num_tuples,
            batch_size:    a.batch_size,
            fraction_same: a.fraction_same,
            seed:          a.seed,
            out_dir:       a.out_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_sample_defaults() {
        let cli = Cli::try_parse_from(["cifar-siamese", "sample"]).unwrap();
        let Commands::Sample(args) = cli.command else {
            panic!("expected sample command");
        };
        let cfg: SampleConfig = args.into();
        assert_eq!(cfg, SampleConfig::default());
    }

    #[test]
    fn test_sample_flags() {
        let cli = Cli::try_parse_from([
            "cifar-siamese", "sample",
            "--data-dir", "/data/cifar",
            "--validation-size", "5000",
            "--dense-labels",
            "--split", "validation",
            "--batch-size", "64",
            "--fraction-same", "0.5",
            "--seed", "3",
        ])
        .unwrap();
        let Commands::Sample(args) = cli.command else {
            panic!("expected sample command");
        };
        let cfg: SampleConfig = args.into();
        assert_eq!(cfg.prepare.data_dir, "/data/cifar");
        assert_eq!(cfg.prepare.validation_size, 5000);
        assert!(!cfg.prepare.one_hot);
        assert_eq!(cfg.split, DatasetSplit::Validation);
        assert_eq!(cfg.batch_size, 64);
        assert_eq!(cfg.fraction_same, 0.5);
        assert_eq!(cfg.seed, Some(3));
    }
}
