use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use slate_compiler::driver;

#[derive(Parser)]
#[command(name = "slatec", version, about = "Slate compiler front end")]
struct Cli {
    /// Source file to tokenize
    file: PathBuf,

    /// Write the token listing next to the source instead of stdout
    #[arg(short, long)]
    write: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let tokens = driver::tokenize_file(&cli.file)
        .with_context(|| format!("failed to tokenize {}", cli.file.display()))?;
    let listing = driver::format_tokens(&tokens);

    if cli.write {
        let path = driver::write_token_listing(&cli.file, &listing)?;
        println!("Wrote {}", path.display());
    } else {
        print!("{listing}");
    }
    Ok(())
}
