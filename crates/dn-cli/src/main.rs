use clap::Parser;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::path::PathBuf;

use dn_core::navigator::Navigator;
use dn_core::path::Address;
use dn_core::{Outcome, commands, fs, pretty, smart_cast};

#[derive(Parser, Debug)]
#[command(
    name = "dn",
    about = "Browse and edit JSON/YAML documents through a filesystem-like path model",
    version
)]
struct Cli {
    /// Document to open (.json, .yaml or .yml)
    filename: PathBuf,

    /// One-shot: write this value at --path, save, and exit without a REPL
    #[arg(short = 'n', long = "new-value")]
    new_value: Option<String>,

    /// Address to edit or start at, `/`-separated (default: document root)
    #[arg(short, long, default_value = "")]
    path: String,

    /// Smart-cast typed values instead of storing them as strings
    #[arg(short, long)]
    literal: bool,

    /// Create the file if it does not exist
    #[arg(short = 'm', long)]
    make: bool,

    /// Zip the source file before editing
    #[arg(long)]
    backup: bool,
}

fn main() {
    let cli = Cli::parse();

    if !cli.filename.is_file() {
        if cli.make {
            fs::save(&cli.filename, &serde_json::Value::Null).unwrap_or_else(|e| {
                eprintln!("error: {e}");
                std::process::exit(2);
            });
        } else {
            eprintln!(
                "error: file `{}` does not exist (use --make to create it)",
                cli.filename.display()
            );
            std::process::exit(2);
        }
    }

    let doc = fs::load(&cli.filename).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(2);
    });

    if cli.backup {
        match fs::backup_file(&cli.filename) {
            Ok(dest) => eprintln!("backup written to {}", dest.display()),
            Err(e) => {
                eprintln!("error: backup failed: {e}");
                std::process::exit(2);
            }
        }
    }

    let addr = Address::parse(&cli.path);

    // One-shot edit: exactly one mutation, persist, no REPL.
    if let Some(raw) = cli.new_value {
        let value = if cli.literal {
            smart_cast(&raw)
        } else {
            serde_json::Value::String(raw)
        };
        let next = dn_core::replace(&doc, &addr, value).unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(3);
        });
        fs::save(&cli.filename, &next).unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(4);
        });
        return;
    }

    let mut nav = Navigator::new(doc, cli.filename, cli.literal);
    if !addr.is_root() {
        if let Err(e) = nav.enter(&addr) {
            eprintln!("error: {e}");
        }
    }
    repl(nav);
}

fn repl(mut nav: Navigator) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if let Ok(v) = nav.current() {
        println!("{}", pretty(v));
    }

    loop {
        match rl.readline(">>> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                if commands::dispatch(&mut nav, &line) == Outcome::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    }
}
