// src/main.rs
// =============================================================================
// Entry point of the site-mirror CLI.
//
// What happens here:
// 1. Set up logging (env_logger, RUST_LOG, default "info")
// 2. Parse command-line arguments using clap
// 3. Build the HTTP transport and run the mirror
// 4. Print a summary and exit (0 = mirror completed, 2 = fatal error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use site_mirror::{HttpTransport, Mirror, MirrorError, MirrorSummary};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let exit_code = match run().await {
        Ok(summary) => {
            print_summary(&summary);
            0
        }
        Err(e) => {
            report_failure(&e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<MirrorSummary> {
    let cli = Cli::parse();
    let options = cli.to_options();

    println!("🔍 Mirroring {} into {}", options.seed_url, options.folder.display());
    println!("📊 Max level: {}", options.max_level);

    let transport = HttpTransport::new().context("failed to build the HTTP client")?;
    let mut mirror = Mirror::new(options, transport)?;

    let summary = mirror
        .run()
        .await
        .with_context(|| format!("mirroring {} failed", cli.seed_url))?;

    Ok(summary)
}

// Fatal mirror errors are logged with what they mean for the output
// folder; anything else (bad arguments, client setup) is printed as is
fn report_failure(e: &anyhow::Error) {
    match e.downcast_ref::<MirrorError>() {
        Some(MirrorError::SeedUnreachable { url, .. }) => {
            ::log::error!("Could not reach the seed page {}; nothing was mirrored", url);
        }
        Some(err) if err.is_fatal() => {
            ::log::error!("Mirror aborted, the output folder may be incomplete: {}", err);
        }
        _ => {}
    }
    eprintln!("Error: {:#}", e);
}

fn print_summary(summary: &MirrorSummary) {
    println!();
    println!("📊 Summary:");
    println!("   🌐 Pages fetched: {}", summary.pages_fetched);
    println!("   📄 Pages saved: {}", summary.pages_saved);
    println!("   🖼️  Resources downloaded: {}", summary.resources_saved);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_error_survives_context() {
        let err = anyhow::Error::new(MirrorError::InvalidOptions("max level".to_string()))
            .context("mirroring http://site.test/ failed");

        let mirror_error = err.downcast_ref::<MirrorError>().unwrap();
        assert!(mirror_error.is_fatal());
        report_failure(&err);
    }
}
