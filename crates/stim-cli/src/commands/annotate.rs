use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use stim_annotate::{preprocess_file, process_batch, AnnotateConfig, AnnotationReport};

#[derive(Args, Debug)]
pub struct AnnotateArgs {
    /// Stimuli CSV to annotate. Without it the well-known batch files are processed.
    pub input: Option<PathBuf>,
    /// Write here instead of overwriting the input.
    pub output: Option<PathBuf>,
    /// YAML file with column names and batch settings.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub target_column: Option<String>,
    /// Directory holding the batch files.
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
    /// Prefix of the sublist files included in the batch.
    #[arg(long)]
    pub prefix: Option<String>,
}

impl AnnotateArgs {
    fn resolve_config(&self) -> Result<AnnotateConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => AnnotateConfig::load(path)?,
            None => AnnotateConfig::default(),
        };
        if let Some(target) = &self.target_column {
            config.target_column = target.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.batch_prefix = prefix.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn run(args: &AnnotateArgs) -> Result<(), Box<dyn Error>> {
    let config = args.resolve_config()?;
    match &args.input {
        Some(input) => {
            let report = preprocess_file(input, args.output.as_deref(), &config)?;
            print_report(&input.display().to_string(), &report);
        }
        None => {
            let outcome = process_batch(&config.batch_files(&args.dir), &config);
            for (path, report) in &outcome.processed {
                print_report(&path.display().to_string(), report);
            }
            for path in &outcome.skipped {
                println!("Skipped {} (file not found)", path.display());
            }
            for (path, err) in &outcome.failed {
                println!("Error processing {}: {err}", path.display());
            }
            println!("Successfully processed {} file(s)", outcome.processed_count());
        }
    }
    Ok(())
}

fn print_report(label: &str, report: &AnnotationReport) {
    println!("{label}");
    print!("{}", report.render());
}
