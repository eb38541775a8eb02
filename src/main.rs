use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use zora::kernel::{render, split_sentences, Session};
use zora::Config;

/// Console front end: type sentences, read back the robot action codes.
#[derive(Parser, Debug)]
#[command(name = "zora", version, about)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, default_value = "zora.json")]
    config: PathBuf,

    /// Ontology file, overrides the configured one
    #[arg(short, long)]
    ontology: Option<PathBuf>,

    /// Analyze these sentences and exit
    #[arg(short, long)]
    sentence: Option<String>,
}

fn print_instructions() {
    println!("\n\tINSTRUCTIONS:");
    println!("Enter input sentences separated by \". \" (e.g. Zora stand up. mode HOLD. Zora raise your right arm.)");
    println!("Enter \"mode x\" to change the robot operating mode, where x is HOLD or SEQUENTIAL.");
    println!("Enter \"*<code>\" to pick one of the actions offered by an ERR-MA answer.");
    println!("Enter \"status\" to show the robot pose, \"stop\" to quit.");
}

fn run_line(session: &mut Session, line: &str) {
    for sentence in split_sentences(line) {
        match session.handle(&sentence) {
            Ok(tokens) => {
                println!("\n>>> List of actions in: {} <<<", sentence);
                for token in render(&tokens) {
                    println!("{}", token);
                }
            }
            Err(e) => {
                tracing::warn!("Sentence could not be analyzed: {}", e);
                println!("\n>>> {} could not be analyzed: {} <<<", sentence, e);
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    if let Some(ontology) = cli.ontology {
        config.ontology_path = ontology;
    }

    // 1. Setup Logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    // 2. Session
    let mut session = config.open_session().context("opening session")?;
    tracing::info!("Zora reasoner ready (session {})", session.id);

    if let Some(sentence) = cli.sentence {
        run_line(&mut session, &sentence);
        return Ok(());
    }

    // 3. Console loop
    print_instructions();
    let stdin = io::stdin();
    loop {
        print!("\nInput: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if line.eq_ignore_ascii_case("stop") {
            break;
        }
        if line.eq_ignore_ascii_case("status") {
            println!("{}", session.state().pose());
            println!("Mode:\t\t{}", session.state().mode());
            continue;
        }
        run_line(&mut session, line);
    }

    tracing::info!("Stopping");
    Ok(())
}
