//! Currency Converter CLI
//!
//! Command-line interface for the Currency Converter API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use convert_client::ConverterClient;
use convert_types::{Amount, CurrencyCode};

#[derive(Parser)]
#[command(name = "fxconv")]
#[command(author, version, about = "Currency Converter API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Currency Converter API
    #[arg(
        long,
        env = "CONVERTER_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,
    /// List supported currencies
    Currencies,
    /// Quote a rate and optionally convert an amount
    Convert {
        /// Source currency (e.g. USD)
        from: CurrencyCode,
        /// Target currency (e.g. EUR)
        to: CurrencyCode,
        /// Amount in the source currency
        #[arg(long)]
        amount: Option<Amount>,
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = ConverterClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => match client.health().await {
            Ok(health) => println!("✓ API is healthy ({})", health.timestamp),
            Err(e) => {
                eprintln!("✗ API is not healthy: {e}");
                std::process::exit(1);
            }
        },

        Commands::Currencies => {
            let catalogue = client.currencies().await?;
            for currency in catalogue.currencies {
                println!("{}  {}", currency.code, currency.name);
            }
        }

        Commands::Convert {
            from,
            to,
            amount,
            json,
        } => {
            let quote = client.convert(from, to, amount).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
            } else {
                match (amount, quote.converted_amount) {
                    (Some(amount), Some(converted)) => println!(
                        "{} {} = {} {} (rate {}, updated {})",
                        amount,
                        quote.from,
                        converted.normalize(),
                        quote.to,
                        quote.rate,
                        quote.last_updated
                    ),
                    _ => println!(
                        "1 {} = {} {} (updated {})",
                        quote.from, quote.rate, quote.to, quote.last_updated
                    ),
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_args_are_parsed_into_domain_types() {
        let cli = Cli::try_parse_from(["fxconv", "convert", " usd", "eur", "--amount", "1.50"])
            .unwrap();
        match cli.command {
            Commands::Convert {
                from, to, amount, ..
            } => {
                assert_eq!(from, CurrencyCode::USD);
                assert_eq!(to, CurrencyCode::EUR);
                assert_eq!(amount.unwrap().to_string(), "1.50");
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_unsupported_currency_is_refused_locally() {
        let err = Cli::try_parse_from(["fxconv", "convert", "XXX", "EUR"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("Unsupported currency: XXX"));
    }

    #[test]
    fn test_invalid_amount_is_refused_locally() {
        for bad in ["1e5", "-3", "0.123456789"] {
            assert!(
                Cli::try_parse_from(["fxconv", "convert", "USD", "EUR", "--amount", bad]).is_err(),
                "{bad}"
            );
        }
    }
}
