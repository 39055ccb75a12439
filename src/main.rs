use anyhow::Context;
use clap::{Parser, Subcommand};
use sweep_report::Sweep;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "sweep-report")]
#[command(about = "Summarize the state files of a parameter sweep", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print selected values for every state as JSON rows.
    Summary {
        /// State directory or the sweep's parameter file.
        source: String,

        /// Path expressions, e.g. thermo.fHelmholtz or param.Interaction.chi[0][1].
        #[arg(required = true)]
        paths: Vec<String>,

        /// Prefix each row with the state index.
        #[arg(long)]
        index: bool,

        #[arg(long)]
        pretty: bool,
    },

    /// Print selected values for every state as a fixed-width table.
    Table {
        source: String,

        #[arg(required = true)]
        paths: Vec<String>,

        /// Write the table to a file instead of stdout.
        #[arg(short = 'o', long)]
        out: Option<String>,
    },

    /// Print the number of states in the sweep.
    Count { source: String },

    /// Print one value (or sub-tree) of one state as JSON.
    Get {
        source: String,
        state: usize,
        path: String,
    },
}

fn open(source: &str) -> Result<Sweep> {
    Sweep::open(source).with_context(|| format!("load sweep from {}", source))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Summary {
            source,
            paths,
            index,
            pretty,
        } => {
            let sweep = open(&source)?;
            let table = sweep.summary(paths.as_slice(), index)?;
            let json = if pretty {
                serde_json::to_string_pretty(&table.rows)?
            } else {
                serde_json::to_string(&table.rows)?
            };
            println!("{}", json);
        }
        Commands::Table { source, paths, out } => {
            let sweep = open(&source)?;
            let text = sweep.summary_string(paths.as_slice())?;
            match out {
                Some(out) => {
                    std::fs::write(&out, text).with_context(|| format!("write {}", out))?;
                    println!("Wrote {}", out);
                }
                None => print!("{}", text),
            }
        }
        Commands::Count { source } => {
            println!("{}", open(&source)?.len());
        }
        Commands::Get {
            source,
            state,
            path,
        } => {
            let sweep = open(&source)?;
            let value = sweep
                .get(state)?
                .lookup(&path)
                .with_context(|| format!("state {}", state))?;
            println!("{}", serde_json::to_string_pretty(value)?);
        }
    }

    Ok(())
}
