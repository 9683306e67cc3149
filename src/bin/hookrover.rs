//! The `hookrover` CLI: drives the resolution pipeline against the real
//! filesystem for ad-hoc debugging and CI sanity checks (§6.1).

use std::{path::PathBuf, process::ExitCode, sync::Arc};

use clap::Parser;
use hookrover::{
    fs::OsFileSystem,
    options::ResolverConfigFile,
    ResolveContext, ResolveResult, Resolver, ResolverOptions,
};

#[derive(Parser, Debug)]
#[command(name = "hookrover", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Resolve a module request the way a bundler would.
    Resolve {
        /// Directory the request is resolved from.
        context: PathBuf,

        /// The request to resolve, e.g. `./foo` or `lodash/fp`.
        request: String,

        /// JSON/JSONC file of `ResolverConfigFile` overrides.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the dispatch trace on failure.
        #[arg(long)]
        trace: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Command::Resolve { context, request, config, trace } = Cli::parse().command;

    let mut options = ResolverOptions::new(Arc::new(OsFileSystem));
    if let Some(config_path) = &config {
        match load_config(config_path).await {
            Ok(file) => options.apply_config(file),
            Err(err) => {
                eprintln!("failed to load config '{}': {err}", config_path.display());
                return ExitCode::FAILURE;
            }
        }
    }

    let resolver = Resolver::new(options);
    let mut ctx = ResolveContext::default();
    if trace {
        ctx = ctx.with_trace();
    }

    match resolver.resolve_with_context(&context, &request, &mut ctx).await {
        Ok(ResolveResult::Resource(resource)) => {
            println!("{}{}{}", resource.path.display(), resource.query, resource.fragment);
            ExitCode::SUCCESS
        }
        Ok(ResolveResult::Ignored) => {
            println!("(ignored)");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            if trace {
                for line in err.trace() {
                    eprintln!("{line}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn load_config(path: &PathBuf) -> Result<ResolverConfigFile, String> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| e.to_string())?;
    let value = jsonc_parser::parse_to_serde_value(&contents, &jsonc_parser::ParseOptions::default())
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "empty config file".to_string())?;
    serde_json::from_value(value).map_err(|e| e.to_string())
}
