use std::process::ExitCode;
use std::sync::Arc;
use std::{env, path};

use statgate::AppBuilder;
use statgate::prelude::*;
use statgate_adapter_sqlite::SqliteAdapter;

pub struct Config {
	pub listen: String,
	pub db_dir: path::PathBuf,
}

impl Config {
	fn from_env() -> Self {
		Config {
			listen: env::var("LISTEN").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
			db_dir: path::PathBuf::from(env::var("DB_DIR").unwrap_or_else(|_| "./data".to_string())),
		}
	}
}

async fn run(config: Config) -> SgResult<()> {
	let mut builder = AppBuilder::new();

	tokio::fs::create_dir_all(&config.db_dir).await?;
	let adapter = Arc::new(SqliteAdapter::new(config.db_dir.join("statgate.db")).await?);

	builder
		.listen(config.listen)
		.auth_adapter(adapter.clone())
		.meta_adapter(adapter.clone())
		.rate_limit_store(adapter);
	builder.run().await
}

#[tokio::main]
async fn main() -> ExitCode {
	match run(Config::from_env()).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			error!("FATAL: {}", err);
			ExitCode::FAILURE
		}
	}
}

// vim: ts=4
