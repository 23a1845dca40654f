use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Args;
use stim_sublist::{generate_file, write_report, SublistConfig};

#[derive(Args, Debug)]
pub struct SublistsArgs {
    /// Trial list CSV. Prompted for on stdin when omitted.
    pub input: Option<PathBuf>,
    /// YAML file with generation settings; flags below override it.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Column identifying the seed passage (auto-detected when omitted).
    #[arg(long)]
    pub seed_column: Option<String>,
    #[arg(long)]
    pub entropy_column: Option<String>,
    #[arg(long)]
    pub target_column: Option<String>,
    /// Seeds with fewer variants are left out of every sublist.
    #[arg(long)]
    pub min_variants: Option<usize>,
    /// Output files are named `<prefix>_1.csv` .. `<prefix>_4.csv`.
    #[arg(long)]
    pub prefix: Option<String>,
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
    /// Also write a JSON run report to this path.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl SublistsArgs {
    fn resolve_config(&self) -> Result<SublistConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => SublistConfig::load(path)?,
            None => SublistConfig::default(),
        };
        if let Some(seed) = &self.seed_column {
            config.seed_column = Some(seed.clone());
        }
        if let Some(entropy) = &self.entropy_column {
            config.entropy_column = entropy.clone();
        }
        if let Some(target) = &self.target_column {
            config.target_column = target.clone();
        }
        if let Some(min) = self.min_variants {
            config.min_variants = min;
        }
        if let Some(prefix) = &self.prefix {
            config.output_prefix = prefix.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn run(args: &SublistsArgs) -> Result<(), Box<dyn Error>> {
    let config = args.resolve_config()?;
    let input = match &args.input {
        Some(path) => path.clone(),
        None => prompt_for_input()?,
    };

    let run = generate_file(&input, &config, &args.out_dir)?;
    if let Some(path) = &args.report {
        write_report(&run.report, path)?;
    }

    println!("COUNTERBALANCING VERIFICATION");
    println!("Entropy values by seed (rows) and sublist (columns):");
    print!("{}", run.generation.pivot.render());
    println!(
        "{} of {} seeds have non-decreasing entropy from sublist 1 to {}",
        run.generation.pivot.non_decreasing_count(),
        run.generation.pivot.rows.len(),
        run.generation.sublists.len()
    );
    println!("Generated:");
    for path in &run.outputs {
        println!("  - {}", path.display());
    }
    Ok(())
}

fn prompt_for_input() -> Result<PathBuf, Box<dyn Error>> {
    print!("Enter CSV filename: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err("no input file given".into());
    }
    Ok(PathBuf::from(trimmed))
}
