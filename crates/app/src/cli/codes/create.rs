use clap::Args;
use promocodes_app::domain::codes::{PromoCodesService, PromoCodesServiceError};

use super::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateCodeArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Raw promo code, as entered
    code: String,
}

pub(crate) async fn run(args: CreateCodeArgs) -> Result<(), String> {
    let service = args.database.service().await?;

    match service.create_code(args.code).await {
        Ok(record) => {
            println!("uuid: {}", record.uuid);
            println!("code: {}", record.code);
            println!("family: {}", record.family);

            Ok(())
        }
        Err(error @ PromoCodesServiceError::Storage(_)) => {
            Err(format!("failed to create promo code: {error}"))
        }
        Err(error) => match error.existing() {
            Some(existing) => Err(format!(
                "rejected: {error} (existing {} {})",
                existing.uuid, existing.family
            )),
            None => Err(format!("rejected: {error}")),
        },
    }
}
