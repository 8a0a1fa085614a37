use clap::Args;
use promocodes_app::domain::codes::normalize::NormalizedCode;

#[derive(Debug, Args)]
pub(crate) struct NormalizeCodeArgs {
    /// Raw promo code, as entered
    code: String,
}

pub(crate) fn run(args: &NormalizeCodeArgs) {
    match NormalizedCode::parse(&args.code) {
        Some(normalized) => {
            println!("code: {}", normalized.code);
            println!("family: {}", normalized.family);

            match normalized.fingerprint {
                Some(fingerprint) => println!("fingerprint: {fingerprint}"),
                None => println!("fingerprint: none"),
            }
        }
        None => println!("not a promo code"),
    }
}
