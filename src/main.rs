use clap::Parser;
use legal_docx::{DocType, DocumentRecord, Error, StyleConfig};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "legal-docx",
    about = "Extract structured records from DOCX judgments, fatwas and statutes"
)]
struct Args {
    /// DOCX file, or a directory of DOCX files
    input: PathBuf,
    /// Document type: judgment, fatwa or law
    #[arg(short = 't', long = "type")]
    doc_type: DocType,
    /// Write JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Single-line JSON
    #[arg(long)]
    compact: bool,
    /// Print each paragraph's style and assigned role instead of records
    #[arg(long)]
    signals: bool,
    /// Header font size in half-points
    #[arg(long, env = "LEGAL_DOCX_HEADER_SIZE")]
    header_size: Option<u32>,
    /// Subheader font size in half-points
    #[arg(long, env = "LEGAL_DOCX_SUBHEADER_SIZE")]
    subheader_size: Option<u32>,
}

impl Args {
    fn style_config(&self) -> StyleConfig {
        let mut config = StyleConfig::default();
        if let Some(size) = self.header_size {
            config.header_size = size;
        }
        if let Some(size) = self.subheader_size {
            config.subheader_size = size;
        }
        config
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if !args.input.exists() {
        eprintln!("Error: file not found: {}", args.input.display());
        std::process::exit(1);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let config = args.style_config();

    if args.signals {
        return print_signals(&args.input, args.doc_type, &config);
    }

    let records: Vec<DocumentRecord> = if args.input.is_dir() {
        let outcome = legal_docx::parse_directory(&args.input, args.doc_type, &config)?;
        for (path, e) in &outcome.failures {
            eprintln!("Warning: skipped {}: {e}", path.display());
        }
        outcome.records
    } else {
        vec![legal_docx::parse_file(&args.input, args.doc_type, &config)?]
    };

    let json = if args.compact {
        serde_json::to_string(&records)?
    } else {
        serde_json::to_string_pretty(&records)?
    };

    match &args.output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

fn print_signals(input: &Path, doc_type: DocType, config: &StyleConfig) -> Result<(), Error> {
    let files = if input.is_dir() {
        legal_docx::discover(input)?
    } else {
        vec![input.to_path_buf()]
    };

    let mut out = std::io::stdout().lock();
    for file in files {
        writeln!(out, "== {}", file.display())?;
        let paragraphs = legal_docx::read_paragraphs(&file)?;
        for (signal, role) in legal_docx::classify_paragraphs(&paragraphs, doc_type, config) {
            let align = signal
                .alignment
                .map(|a| format!("{a:?}"))
                .unwrap_or_else(|| "-".into());
            let size = signal.size.map(|s| s.to_string()).unwrap_or_else(|| "-".into());
            let color = signal.color.map(|c| c.to_string()).unwrap_or_else(|| "auto".into());
            writeln!(
                out,
                "{:<8} {:>4} {:<6}  {:<40}  {}",
                align,
                size,
                color,
                format!("{role:?}"),
                signal.text.replace('\n', " ")
            )?;
        }
    }
    Ok(())
}
