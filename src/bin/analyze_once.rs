//! One-shot terminal form: analyze a single text and print the rendered result.
//!
//! ```text
//! analyze_once "Scientists confirm the moon is made of cheese"
//! echo "some text" | analyze_once --endpoint http://127.0.0.1:8000/analyze_text
//! ```

use std::io::Read;

use anyhow::{bail, Context, Result};
use clap::Parser;

use truthguard::view::{render_text, FormView};
use truthguard::{build_form, logging, AnalysisOutcome, AppConfig};

#[derive(Debug, Parser)]
#[command(name = "analyze_once", about = "Send text for fake-news analysis and print the scores")]
struct Args {
    /// Text to analyze; read from stdin when omitted.
    text: Vec<String>,

    /// Classification endpoint (overrides config).
    #[arg(long, env = "TRUTHGUARD_ENDPOINT")]
    endpoint: Option<String>,

    /// Request deadline in seconds; 0 waits forever (overrides config).
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    // stderr only, so stdout carries just the rendered form
    logging::init("truthguard=warn");
    let args = Args::parse();

    let mut cfg = AppConfig::load_default()?;
    if let Some(ep) = args.endpoint {
        cfg = cfg.with_endpoint(ep)?;
    }
    if let Some(t) = args.timeout_secs {
        cfg.timeout_secs = t;
    }

    let text = if args.text.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading text from stdin")?;
        buf.trim_end_matches(['\r', '\n']).to_string()
    } else {
        args.text.join(" ")
    };

    let form = build_form(&cfg)?;
    let outcome = form.submit(text).await;

    // The failure reason goes out once, on stderr through the returned error.
    print!("{}", render_text(&FormView::new(&form.snapshot(), false)));
    if let AnalysisOutcome::Failed(reason) = outcome {
        bail!(reason);
    }
    Ok(())
}
