use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a filter against a schema and print the resulting predicate
    Check {
        #[arg(long, help = "Filter document (JSON)")]
        filter: String,

        #[arg(long, help = "Entity schema (JSON)")]
        schema: String,

        #[arg(long, help = "JSON object of token names to scalar values")]
        tokens: Option<String>,

        #[arg(long, help = "KEY=VALUE file whose entries are registered as string tokens")]
        env_file: Option<String>,
    },
    /// Evaluate a filter over a JSON array of records
    Eval {
        #[arg(long, help = "Filter document (JSON)")]
        filter: String,

        #[arg(long, help = "Entity schema (JSON)")]
        schema: String,

        #[arg(long, help = "JSON array of records to filter")]
        data: String,

        #[arg(long, help = "JSON object of token names to scalar values")]
        tokens: Option<String>,

        #[arg(long, help = "KEY=VALUE file whose entries are registered as string tokens")]
        env_file: Option<String>,

        #[arg(long, help = "Print only the number of matching records")]
        count: bool,
    },
}
