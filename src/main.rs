use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use clap::{Args, Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use issue_templater::{
    dataset::{self, split_examples},
    Backend, ModelConfig, Result, TemplateModel, TemplaterError,
};

#[derive(Parser)]
#[command(name = "issue-templater", version, about = "Format raw issue text as Markdown using the nearest known example")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fit a model on a JSON corpus and save it
    Train(TrainArgs),
    /// Format raw text (arguments, or stdin when none are given)
    Predict(QueryArgs),
    /// Show the ranked training matches for raw text
    Neighbors(QueryArgs),
}

#[derive(Args)]
struct TrainArgs {
    /// JSON array of {"input", "output"} records
    #[arg(long)]
    corpus: PathBuf,
    /// Where to write the model
    #[arg(long, default_value = "models/issue-templater.cbor")]
    model: PathBuf,
    /// Share of the corpus held back at the tail for evaluation
    #[arg(long, default_value_t = 0.1)]
    val_ratio: f64,
    /// TOML file with model settings
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    n_neighbors: Option<usize>,
    #[arg(long)]
    max_features: Option<usize>,
    /// Spread row-wise work over all cores
    #[arg(long)]
    accelerated: bool,
}

#[derive(Args)]
struct QueryArgs {
    #[arg(long, default_value = "models/issue-templater.cbor")]
    model: PathBuf,
    #[arg(long)]
    accelerated: bool,
    text: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Train(args) => train(args),
        Command::Predict(args) => predict(args),
        Command::Neighbors(args) => neighbors(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn backend(accelerated: bool) -> Backend {
    if accelerated {
        Backend::Accelerated
    } else {
        Backend::Default
    }
}

fn train(args: TrainArgs) -> Result<()> {
    let start = Instant::now();
    if !(0.0..=1.0).contains(&args.val_ratio) {
        return Err(TemplaterError::InvalidConfig(format!(
            "val ratio must be within [0, 1], got {}",
            args.val_ratio
        )));
    }
    let mut config = match &args.config {
        Some(path) => ModelConfig::from_toml_str(&fs::read_to_string(path)?)?,
        None => ModelConfig::default(),
    };
    if let Some(n) = args.n_neighbors {
        config = config.with_n_neighbors(n);
    }
    if let Some(n) = args.max_features {
        config = config.with_max_features(n);
    }
    if args.accelerated {
        config = config.with_backend(Backend::Accelerated);
    }

    let examples = dataset::read_examples(BufReader::new(File::open(&args.corpus)?))?;
    info!(path = %args.corpus.display(), examples = examples.len(), "corpus loaded");
    let (train_set, validation) = split_examples(examples, 1.0 - args.val_ratio);

    let mut model: TemplateModel = TemplateModel::new(config)?;
    let report = model.train_examples(&train_set)?;
    println!("trained: {report}");

    if validation.is_empty() {
        warn!("no validation examples, skipping evaluation");
    } else {
        let (inputs, outputs) = dataset::into_pairs(validation);
        let eval = model.evaluate(&inputs, &outputs)?;
        println!(
            "structural accuracy: {:.2}%, section coverage: {:.2}%",
            eval.structural_accuracy * 100.0,
            eval.avg_section_coverage * 100.0
        );
    }

    write_model(&model, &args.model)?;
    println!(
        "saved to {} ({:.2} MB in memory, {:.2}s)",
        args.model.display(),
        model.approx_size_bytes() as f64 / (1024.0 * 1024.0),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn write_model(model: &TemplateModel, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    model.save(&mut writer)?;
    writer.flush()?;
    Ok(())
}

fn read_model(path: &Path, accelerated: bool) -> Result<TemplateModel> {
    TemplateModel::load(BufReader::new(File::open(path)?), backend(accelerated))
}

fn query_text(text: Vec<String>) -> Result<String> {
    if text.is_empty() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf.trim_end_matches('\n').to_string())
    } else {
        Ok(text.join(" "))
    }
}

fn predict(args: QueryArgs) -> Result<()> {
    let model = read_model(&args.model, args.accelerated)?;
    let raw = query_text(args.text)?;
    let start = Instant::now();
    let doc = model.predict(&raw)?;
    info!(elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, "predicted");
    println!("{doc}");
    Ok(())
}

fn neighbors(args: QueryArgs) -> Result<()> {
    let model = read_model(&args.model, args.accelerated)?;
    let raw = query_text(args.text)?;
    let hits = model.neighbors(&raw)?;
    let Some(index) = model.index() else {
        return Ok(());
    };
    for (rank, hit) in hits.iter().enumerate() {
        println!("{rank}\t{:.6}\t{}", hit.score, index.input(hit.index).unwrap_or_default());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn train_args(argv: &[&str]) -> TrainArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Train(args) => args,
            _ => panic!("expected train"),
        }
    }

    #[test]
    fn val_ratio_flag() {
        let args = train_args(&["issue-templater", "train", "--corpus", "c.json", "--val-ratio", "0.25"]);
        assert_eq!(args.val_ratio, 0.25);
        let args = train_args(&["issue-templater", "train", "--corpus", "c.json"]);
        assert_eq!(args.val_ratio, 0.1);
        assert!(Cli::try_parse_from(["issue-templater", "train", "--corpus", "c.json", "--train-ratio", "0.9"]).is_err());
    }

    #[test]
    fn out_of_range_val_ratio_is_rejected() {
        let mut args = train_args(&["issue-templater", "train", "--corpus", "missing.json"]);
        args.val_ratio = 1.5;
        assert!(matches!(train(args), Err(TemplaterError::InvalidConfig(_))));
    }
}
