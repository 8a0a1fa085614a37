use clap::{Args, Subcommand};
use promocodes_app::{
    database::{self, Db},
    domain::codes::DefaultPromoCodesService,
};

mod create;
mod import;
mod normalize;

#[derive(Debug, Args)]
pub(crate) struct CodesCommand {
    #[command(subcommand)]
    command: CodesSubcommand,
}

#[derive(Debug, Subcommand)]
enum CodesSubcommand {
    Create(create::CreateCodeArgs),
    Import(import::ImportCodesArgs),
    Normalize(normalize::NormalizeCodeArgs),
}

/// Database settings shared by the subcommands that touch storage.
#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Apply pending migrations before running
    #[arg(long, env = "DATABASE_MIGRATE", default_value_t = false)]
    migrate: bool,
}

impl DatabaseArgs {
    async fn service(&self) -> Result<DefaultPromoCodesService, String> {
        let pool = database::connect(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        let db = Db::new(pool);

        if self.migrate {
            db.migrate()
                .await
                .map_err(|error| format!("failed to apply migrations: {error}"))?;
        }

        Ok(DefaultPromoCodesService::postgres(db))
    }
}

pub(crate) async fn run(command: CodesCommand) -> Result<(), String> {
    match command.command {
        CodesSubcommand::Create(args) => create::run(args).await,
        CodesSubcommand::Import(args) => import::run(args).await,
        CodesSubcommand::Normalize(args) => {
            normalize::run(&args);

            Ok(())
        }
    }
}
