use clap::Parser;

use std::error::Error;
use std::fs;
use std::process;

use course_tools::redact::clear_solutions;

/// Strip solution content from a Quarto course document, leaving blank
/// placeholders for students.
#[derive(Parser, Debug)]
struct Args {
    /// Path to the input .qmd file
    input_file: String,
    /// Path to save the modified .qmd file
    output_file: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::try_parse().unwrap_or_else(|e| {
        use clap::error::ErrorKind;
        if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
            e.exit();
        }
        // Wrong usage exits with code 1
        let _ = e.print();
        process::exit(1);
    });

    // Read/transform/write in one pass; I/O failures propagate as-is
    let input = fs::read_to_string(&args.input_file)?;
    let output = clear_solutions(&input);
    fs::write(&args.output_file, output)?;

    println!(
        "Processing complete. Modified file saved as '{}'.",
        args.output_file
    );

    Ok(())
}
