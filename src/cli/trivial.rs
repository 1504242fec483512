use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::utils::similarity::is_trivial_change_in;

#[derive(Args)]
pub struct TrivialArgs {
    /// File before the change
    #[arg(required = true)]
    pub before: PathBuf,

    /// File after the change
    #[arg(required = true)]
    pub after: PathBuf,
}

pub fn run(args: TrivialArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let open = |path: &PathBuf| {
        File::open(path)
            .map(BufReader::new)
            .with_context(|| format!("Failed to open {}", path.display()))
    };
    let trivial = is_trivial_change_in(open(&args.before)?, open(&args.after)?)?;

    if verbose {
        eprintln!(
            "Compared {} with {}",
            args.before.display(),
            args.after.display()
        );
    }

    match format {
        OutputFormat::Text => {
            if trivial {
                println!("Trivial change: files differ only in comments, imports or blank lines");
            } else {
                println!("Substantive change");
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "before": args.before.display().to_string(),
                "after": args.after.display().to_string(),
                "trivial": trivial,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("before\tafter\ttrivial");
            println!(
                "{}\t{}\t{}",
                args.before.display(),
                args.after.display(),
                trivial
            );
        }
    }

    Ok(())
}
