use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use series_query::{
    config::AppConfig,
    db::{connection, migrate},
    ingest,
    query::CustomQuery,
    store::{DatapointStore, SqliteStore, known},
    Freq,
};

#[derive(Parser)]
#[command(version, about = "Time-series datapoint query CLI")]
struct Cli {
    /// Optional TOML config file; DATABASE_URL overrides its database_url
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Apply pending schema migrations
    Migrate,
    /// Upsert datapoints from a JSON array file
    Ingest {
        #[arg(long, value_name = "FILE")]
        file: PathBuf,
    },
    /// Run a custom path query, e.g. `query oil BRENT m eop/2015/2017`
    Query {
        domain: String,
        varname: String,
        freq: String,
        /// Optional suffix: unit, rate|aggregator, start year, end year, finaliser
        #[arg(default_value = "")]
        inner_path: String,
    },
    /// List series names, for one frequency or `all`
    Names {
        #[arg(default_value = "all")]
        freq: String,
    },
    /// Show first and last dates of a series
    Info { name: String, freq: String },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "series_query=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = AppConfig::load(cli.config.as_deref())?;

    let open = || connection::connect_sqlite_with_timeout(&cfg.database_url, cfg.busy_timeout_ms);
    let store = SqliteStore::new();

    match cli.cmd {
        Cmd::Migrate => {
            let n = migrate::run_sqlite(&cfg.database_url)?;
            info!(applied = n, "migrations done");
        }
        Cmd::Ingest { file } => {
            let mut conn = open()?;
            let n = ingest::ingest_path(&store, &mut conn, &file)?;
            known::shared().reload(&mut conn)?;
            println!("{n}");
        }
        Cmd::Query {
            domain,
            varname,
            freq,
            inner_path,
        } => {
            let q = CustomQuery::parse(&domain, &varname, &freq, &inner_path)
                .context("invalid query path")?;

            let mut conn = open()?;
            let known = known::shared();
            if known.is_empty() {
                known.reload(&mut conn)?;
            }

            for point in q.fetch(&store, &mut conn, known)? {
                println!("{}", serde_json::to_string(&point)?);
            }
        }
        Cmd::Names { freq } => {
            let freq = match freq.as_str() {
                "all" => None,
                code => Some(code.parse::<Freq>()?),
            };
            let mut conn = open()?;
            for name in store.names(&mut conn, freq)? {
                println!("{name}");
            }
        }
        Cmd::Info { name, freq } => {
            let freq: Freq = freq.parse()?;
            let mut conn = open()?;
            match store.date_span(&mut conn, &name, freq)? {
                Some((first, last)) => println!("{first}\t{last}"),
                None => anyhow::bail!("no datapoints for {name} at frequency {freq}"),
            }
        }
    }

    Ok(())
}
