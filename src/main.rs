use clap::Parser as ClapParser;
use lucene_dsl::cli::{self, CliError, CompileOptions};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "lucene-dsl")]
#[command(about = "Compile Lucene query strings into Elasticsearch query DSL")]
#[command(version)]
struct Cli {
    /// The Lucene query (reads from stdin if not provided)
    query: Option<String>,

    /// Join fields as JSON, e.g. '{"answer.author": "answer"}'
    joins: Option<String>,

    /// Read join fields from a JSON file
    #[arg(long)]
    joins_file: Option<String>,

    /// Print the document on a single line
    #[arg(short, long)]
    compact: bool,

    /// Do not print the parse trace to stderr
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run_compile(cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run_compile(cli: Cli) -> Result<(), CliError> {
    let query = match cli.query {
        Some(q) => q,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer.trim_end().to_string()
        }
        None => return Err(CliError::NoInput),
    };

    let options = CompileOptions {
        query,
        joins: cli.joins,
        joins_file: cli.joins_file,
        pretty: !cli.compact,
    };

    let output = cli::execute_compile(&options)?;
    if !cli.quiet {
        eprintln!("parsed input: {}", output.parsed);
        eprintln!("verbose: {}", output.verbose);
        eprintln!("ast json: {}", output.ast_json);
    }
    println!("{}", output.json);
    Ok(())
}
