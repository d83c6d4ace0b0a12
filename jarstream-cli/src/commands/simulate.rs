//! Simulate command - dry-run a descriptor through the loader.

use std::sync::Arc;

use jarstream::config::LoaderConfig;
use jarstream::descriptor::ApplicationDescriptor;
use jarstream::loader::ApplicationLoader;
use jarstream::provider::DryRunJarProvider;
use jarstream::scope::Extension;

use crate::error::CliError;

use super::load_descriptor;

/// Run the simulate command.
///
/// Constructs a loader over the descriptor with a dry-run provider, so the
/// eager pre-pass and every resolution decision happen exactly as with a
/// real backend, then reports per-part download states and the tracker
/// metrics.
pub fn run(path: &str, classes: &[String], downloads: &[String]) -> Result<(), CliError> {
    let descriptor = load_descriptor(path)?;

    let runtime = tokio::runtime::Runtime::new().expect("failed to start tokio runtime");
    runtime.block_on(simulate(descriptor, classes, downloads))
}

async fn simulate(
    descriptor: ApplicationDescriptor,
    classes: &[String],
    downloads: &[String],
) -> Result<(), CliError> {
    println!("Jarstream Simulation v{}", jarstream::VERSION);
    println!("=====================");
    println!();

    let report_descriptor = descriptor.clone();
    let loader = ApplicationLoader::start(
        descriptor,
        Arc::new(DryRunJarProvider::new()),
        LoaderConfig::default(),
    )
    .await?;
    println!("Loader constructed (eager pre-pass complete)");

    for part in downloads {
        loader.download_part(part).await?;
        println!("Downloaded part {} on request", part);
    }

    for class in classes {
        match loader.resolve(class).await {
            Ok(resolved) => println!(
                "{} -> part {} in {} ({} jars)",
                class,
                resolved.part,
                resolved.scope,
                resolved.jars.len()
            ),
            Err(err) => println!("{} -> {}", class, err),
        }
    }

    println!();
    println!("Download states");
    println!("---------------");
    for part in &report_descriptor.parts {
        println!("  {} [main]: {}", part.name, loader.part_state(&part.name));
    }
    for extension in &report_descriptor.extensions {
        let handle = Extension::new(extension.url.clone());
        for part in &extension.parts {
            println!(
                "  {} [{}]: {}",
                part.name,
                extension.url,
                loader.part_state_in(&part.name, &handle)
            );
        }
    }

    println!();
    println!("Metrics: {}", loader.metrics());
    Ok(())
}
