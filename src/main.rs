use std::path::Path;
use std::process::ExitCode;

use sample_converter::{batch, docs, fetch, package};

const DEFAULT_LIBRARY: &str = "@azure/ai-agents";
const DEFAULT_DOCS_URL: &str =
    "https://learn.microsoft.com/en-us/javascript/api/@azure/ai-agents/?view=azure-node-preview";
const DEFAULT_OUTPUT: &str = "js-samples.zip";

struct Args {
    source: String,
    library: String,
    docs_url: String,
    output: String,
    verbose: bool,
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("Error: {msg}");
            print_usage();
            return ExitCode::from(1);
        }
    };

    let filter = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Repository: {}", args.source);
    eprintln!("JavaScript library: {}", args.library);

    let api_methods = docs::fetch_api_methods(&args.docs_url);

    let is_remote = args.source.starts_with("http://") || args.source.starts_with("https://");
    let samples = if is_remote {
        fetch::GithubFetcher::new().fetch_python_samples(&args.source)?
    } else {
        fetch::collect_local_samples(Path::new(&args.source))?
    };

    if samples.is_empty() {
        return Err("no Python samples found".into());
    }

    let converted = batch::convert_documents(&samples, &args.library, &args.docs_url, &api_methods);

    if args.output.ends_with(".zip") {
        package::save_to_zip(&converted, Path::new(&args.output))?;
    } else {
        package::save_to_directory(&converted, Path::new(&args.output))?;
    }

    eprintln!("Converted {} Python samples to JavaScript", converted.len());
    eprintln!("Output location: {}", args.output);
    Ok(())
}

fn parse_args() -> Result<Args, String> {
    let mut argv = std::env::args().skip(1);
    let mut source: Option<String> = None;
    let mut library = DEFAULT_LIBRARY.to_string();
    let mut docs_url = DEFAULT_DOCS_URL.to_string();
    let mut output = DEFAULT_OUTPUT.to_string();
    let mut verbose = false;

    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--library" | "-l" => {
                library = argv.next().ok_or("--library needs a value")?;
            }
            "--docs" | "-d" => {
                docs_url = argv.next().ok_or("--docs needs a value")?;
            }
            "--output" | "-o" => {
                output = argv.next().ok_or("--output needs a value")?;
            }
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown option: {other}"));
            }
            other => {
                if source.replace(other.to_string()).is_some() {
                    return Err("more than one source given".to_string());
                }
            }
        }
    }

    let source = source.ok_or("missing repository URL or sample directory")?;
    Ok(Args {
        source,
        library,
        docs_url,
        output,
        verbose,
    })
}

fn print_usage() {
    eprintln!("Usage: sample-converter <repo-url-or-dir> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -l, --library <name>   JavaScript library (default: {DEFAULT_LIBRARY})");
    eprintln!("  -d, --docs <url>       API reference documentation URL");
    eprintln!("  -o, --output <path>    Output .zip file or directory (default: {DEFAULT_OUTPUT})");
    eprintln!("  -v, --verbose          Verbose progress output");
    eprintln!("  -h, --help             Show this help");
}
