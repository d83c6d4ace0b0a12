//! Inspect command - print the scopes and parts of a descriptor.

use jarstream::descriptor::{ApplicationDescriptor, PartDefinition};

use crate::error::CliError;

use super::load_descriptor;

/// Run the inspect command.
pub fn run(path: &str) -> Result<(), CliError> {
    let descriptor = load_descriptor(path)?;
    print_report(&descriptor);
    Ok(())
}

fn print_report(descriptor: &ApplicationDescriptor) {
    println!("Jarstream Descriptor Report v{}", jarstream::VERSION);
    println!("==============================");
    println!();

    println!("Main scope ({} parts)", descriptor.parts.len());
    for part in &descriptor.parts {
        print_part(part);
    }

    for extension in &descriptor.extensions {
        println!();
        match &extension.parent {
            Some(parent) => println!(
                "Extension {} (parent {}, {} parts)",
                extension.url,
                parent,
                extension.parts.len()
            ),
            None => println!("Extension {} ({} parts)", extension.url, extension.parts.len()),
        }
        for part in &extension.parts {
            print_part(part);
        }
    }

    println!();
    println!("Total: {} parts", descriptor.part_count());
}

fn print_part(part: &PartDefinition) {
    println!(
        "  {} [{}] - {} jars, {} class rules",
        part.name,
        if part.eager { "eager" } else { "lazy" },
        part.jars.len(),
        part.classes.len()
    );
}
