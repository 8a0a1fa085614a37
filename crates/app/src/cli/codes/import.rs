use std::{fs, path::PathBuf};

use clap::Args;
use promocodes_app::domain::codes::PromoCodesService;

use super::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ImportCodesArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// File with one raw promo code per line
    file: PathBuf,

    /// Print every skipped row with its reason
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

pub(crate) async fn run(args: ImportCodesArgs) -> Result<(), String> {
    let contents = fs::read_to_string(&args.file)
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let rows: Vec<String> = contents.lines().map(str::to_string).collect();

    let service = args.database.service().await?;

    let report = service
        .import_codes(rows)
        .await
        .map_err(|error| format!("import aborted: {error}"))?;

    println!("records_processed: {}", report.processed);
    println!("records_inserted: {}", report.inserted);
    println!("records_blank: {}", report.blank);
    println!("records_rejected: {}", report.rejections.len());

    if args.verbose {
        for rejected in &report.rejections {
            println!("skipped {:?}: {:?}", rejected.input, rejected.reason);
        }
    }

    Ok(())
}
