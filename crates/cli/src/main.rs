use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use filter_engine::{CompilerOptions, FilterCompiler, MethodRegistry, Predicate};
use model::{EntityType, Record};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod env;
mod error;
mod input;

#[derive(Parser)]
#[command(name = "filterc", version = "0.1.0", about = "Filter predicate compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Logs go to stderr so stdout stays machine readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let compiler = FilterCompiler::new(CompilerOptions::from_env(|key| std::env::var(key).ok())?);

    match cli.command {
        Commands::Check {
            filter,
            schema,
            tokens,
            env_file,
        } => {
            let entity_type = input::read_schema(&schema)?;
            let predicate = compile(&compiler, &filter, &entity_type, tokens, env_file)?;
            println!("{predicate}");
        }
        Commands::Eval {
            filter,
            schema,
            data,
            tokens,
            env_file,
            count,
        } => {
            let entity_type = input::read_schema(&schema)?;
            let predicate = compile(&compiler, &filter, &entity_type, tokens, env_file)?;
            let records = input::read_records(&data, &entity_type)?;

            let matches: Vec<&Record> = records.iter().filter(|r| predicate.evaluate(r)).collect();
            info!("{} of {} records matched", matches.len(), records.len());

            if count {
                println!("{}", matches.len());
            } else {
                let rows = matches.iter().map(|r| r.to_json()).collect::<Vec<_>>();
                let json = serde_json::to_string_pretty(&rows).map_err(CliError::JsonSerialize)?;
                println!("{json}");
            }
        }
    }

    Ok(())
}

fn compile(
    compiler: &FilterCompiler,
    filter: &str,
    entity_type: &EntityType,
    tokens: Option<String>,
    env_file: Option<String>,
) -> Result<Predicate<Record>, CliError> {
    let filter = input::read_filter(filter)?;
    let tokens = input::read_tokens(tokens.as_deref(), env_file.as_deref())?;
    let predicate = compiler.compile_for(&filter, entity_type, &tokens, &MethodRegistry::new())?;
    Ok(predicate)
}
