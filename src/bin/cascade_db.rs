// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0
//! # Database migration tool
use clap::{Parser, Subcommand};
use color_eyre::Report;
use secrecy::ExposeSecret;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    prelude::*,
};

use sea_orm::ConnectOptions;
use sea_orm::Database;

use sea_orm_migration::prelude::*;

use openstack_cascade::config::Config;
use openstack_cascade::db_migration::Migrator;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Path to the cascade config file.
    #[arg(short, long, default_value = "/etc/cascade/cascade.conf")]
    config: PathBuf,

    /// Verbosity level. Repeat to increase level.
    #[arg(short, long, global=true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending migrations.
    Up {
        /// Number of pending migrations to apply.
        #[arg(short('n'))]
        steps: Option<u32>,
    },
    /// Rollback applied migrations.
    Down {
        /// Number of migrations to rollback.
        #[arg(short('n'))]
        steps: Option<u32>,
    },
    /// Check the status of all migrations.
    Status,
    /// Drop all tables from the database, then reapply all migrations.
    Fresh,
    /// Rollback all applied migrations, then reapply all migrations.
    Refresh,
    /// Rollback all applied migrations.
    Reset,
}

#[allow(clippy::print_stdout)]
#[tokio::main]
async fn main() -> Result<(), Report> {
    let cli = Cli::parse();

    let filter = Targets::new().with_default(match cli.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    });

    let log_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(log_layer).init();

    let config = Config::new(cli.config)?;

    let connect_options = ConnectOptions::new(
        config
            .database
            .get_connection()
            .expose_secret()
            .to_string(),
    )
    .sqlx_logging(true)
    .to_owned();
    let db = Database::connect(connect_options).await?;

    match cli.command {
        Commands::Up { steps } => Migrator::up(&db, steps).await?,
        Commands::Down { steps } => Migrator::down(&db, steps).await?,
        Commands::Status => Migrator::status(&db).await?,
        Commands::Fresh => Migrator::fresh(&db).await?,
        Commands::Refresh => Migrator::refresh(&db).await?,
        Commands::Reset => Migrator::reset(&db).await?,
    }

    Ok(())
}
