//! Demo renderer: depiction JSON in, HTML out.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use kennel::{Kennel, RenderOptions};

#[derive(Parser)]
#[command(name = "kennel", about = "Render a native depiction document to HTML")]
struct Args {
    /// Path to the depiction JSON file
    input: PathBuf,

    /// Write the HTML here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to a RenderOptions JSON file
    #[arg(long)]
    options: Option<PathBuf>,

    /// Render through the DOM back end and serialize, instead of string mode
    #[arg(long)]
    dom: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let depiction: serde_json::Value =
        serde_json::from_str(&raw).context("depiction is not valid JSON")?;

    let mut options = match &args.options {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str::<RenderOptions>(&raw).context("options are not valid JSON")?
        }
        None => RenderOptions::default(),
    };
    options.ssr = !args.dom;

    let kennel = Kennel::new(&depiction, options).context("depiction failed validation")?;
    let html = kennel.render().await?.into_html();

    match &args.output {
        Some(path) => {
            fs::write(path, &html).with_context(|| format!("failed to write {}", path.display()))?
        }
        None => println!("{html}"),
    }
    Ok(())
}
