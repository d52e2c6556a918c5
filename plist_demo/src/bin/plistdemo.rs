use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

/// Writes and reads back XML property lists.
#[derive(Parser)]
#[command(name = "plistdemo")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the sample record, write it to a file and read it back
    Run {
        /// Property-list file to write
        #[arg(default_value = "cftest.plist")]
        path: PathBuf,
    },

    /// Print the contents of a property-list file ("-" for stdin)
    Dump {
        /// Property-list file to read
        path: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { path } => run(&path),
        Commands::Dump { path } => dump(path),
    }
}

fn run(path: &Path) -> Result<(), Box<dyn Error>> {
    println!("Creating Property List...");
    let record = plist_demo::sample_record();
    println!("Done!");

    println!("Converting Property List to XML...");
    let data = plist_xml::to_vec(&record)?;
    println!("Done!");

    println!("Writing XML Property List to {}...", path.display());
    fs::write(path, &data)?;
    println!("Done!");

    println!("Reading XML Property List...");
    let parsed = plist_xml::read_file(path)?;
    println!("Done!");

    if parsed != record {
        return Err(format!("{} does not hold the record that was written", path.display()).into());
    }
    println!("{}", plist_demo::to_ascii(&parsed));
    Ok(())
}

fn dump(path: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let data = match path {
        Some(path) if path.as_os_str() != "-" => fs::read(path)?,
        _ => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            buffer
        }
    };

    let ascii = plist_demo::plist2ascii(&data)?;
    println!("{}", ascii);
    Ok(())
}
