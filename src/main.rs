use std::{fs::read_to_string, path::PathBuf, process::ExitCode, rc::Rc, time::Instant};

use annotator::{
    annotator::{
        annotator::annotate,
        config::{AnnotatorConfig, MangleStrategy},
        symbol_table::SymbolTable,
    },
    display_error,
    errors::diagnostics::Diagnostics,
    lexer::lexer::tokenize,
    parser::parser::parse,
};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "annotator", bin_name = "annotator")]
#[command(about = "Resolve, rename and type-annotate a typed Lox program")]
struct Cli {
    /// Source file to check
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Mint names with random letters instead of a counter
    #[arg(long)]
    random: bool,

    /// Seed for --random, for reproducible names
    #[arg(long, value_name = "N", requires = "random")]
    seed: Option<u64>,

    /// Character placed between a name and its suffix
    #[arg(long, value_name = "C", default_value_t = '_')]
    separator: char,

    /// Print the annotated tree
    #[arg(long)]
    dump: bool,

    /// Print the symbol table
    #[arg(long)]
    symbols: bool,
}

impl Cli {
    fn config(&self) -> AnnotatorConfig {
        let strategy = if self.random {
            MangleStrategy::Random { seed: self.seed }
        } else {
            MangleStrategy::Counter
        };

        AnnotatorConfig {
            strategy,
            separator: self.separator,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let file_name = match cli.file.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => cli.file.to_string_lossy().into_owned(),
    };

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(err) => {
            error!(path = %cli.file.display(), "Failed to read file: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();

    let tokens = match tokenize(source.clone(), Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(err) => {
            display_error(&err, &source, &file_name);
            return ExitCode::FAILURE;
        }
    };

    info!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let mut statements = match parse(tokens, Rc::new(file_name.clone())) {
        Ok(statements) => statements,
        Err(err) => {
            display_error(&err, &source, &file_name);
            return ExitCode::FAILURE;
        }
    };

    info!("Parsed in {:?}", parse_start.elapsed());

    let annotate_start = Instant::now();
    let mut diagnostics = Diagnostics::new();
    let symbols = annotate(&mut statements, &cli.config(), &mut diagnostics);

    info!(
        symbols = symbols.len(),
        diagnostics = diagnostics.len(),
        "Annotated in {:?}",
        annotate_start.elapsed()
    );

    if cli.dump {
        for stmt in statements.iter() {
            println!("{}", stmt);
        }
    }

    if cli.symbols {
        print_symbols(&symbols);
    }

    for err in diagnostics.iter() {
        display_error(err, &source, &file_name);
    }

    info!("Total time: {:?}", start.elapsed());

    if diagnostics.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_symbols(symbols: &SymbolTable) {
    for info in symbols.iter() {
        println!(
            "{:<20} {:<10} {:<8} arity {:<3} {} ({}:{})",
            info.name, info.kind, info.ty, info.arity, info.surface, info.position.line, info.position.column
        );
    }
}
