// src/bin/insight_cli.rs
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use snm_insight_ticker::symbols::RegionExchanges;
use snm_insight_ticker::{
    Candidate, InsightClient, InsightConfig, InsightOutcome, Language, Region, RequestContext,
    ResolvedTicker,
};

#[derive(Parser)]
#[command(name = "insight-cli")]
#[command(about = "Find ticker symbols mentioned in a market insight", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract candidates and resolve them in one go
    Submit {
        text: String,
        #[arg(short, long, default_value = "sc")]
        language: String,
        #[arg(short, long, default_value = "global")]
        region: Region,
    },
    /// Only run the language-model extraction
    Extract {
        text: String,
        #[arg(short, long, default_value = "sc")]
        language: String,
    },
    /// Resolve a single ticker/company pair
    Resolve {
        #[arg(short, long, default_value = "")]
        ticker: String,
        #[arg(short, long, default_value = "")]
        company: String,
        #[arg(short, long, default_value = "global")]
        region: Region,
    },
    /// Show region exchange allow-sets
    Regions,
    /// Show supported insight languages
    Languages,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Regions => {
            print_regions(&RegionExchanges::from_env()?);
        }
        Commands::Languages => {
            for lang in Language::ALL {
                println!("{:<4} {}", lang.key(), lang.label());
            }
        }
        Commands::Submit { text, language, region } => {
            let client = build_client()?;
            let outcome = client
                .submit_insight(&text, &Language::hint_for(&language), region)
                .await;
            print_outcome(&outcome);
        }
        Commands::Extract { text, language } => {
            let client = build_client()?;
            let ctx = RequestContext::new();
            match client.extract(&ctx, &Language::hint_for(&language), &text).await {
                Ok(candidates) if candidates.is_empty() => println!("No candidates found"),
                Ok(candidates) => {
                    println!("{:<12} {}", "TICKER", "COMPANY");
                    for c in candidates {
                        println!("{:<12} {}", c.ticker, c.company);
                    }
                }
                Err(e) => {
                    eprintln!("❌ Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Resolve { ticker, company, region } => {
            if ticker.trim().is_empty() && company.trim().is_empty() {
                anyhow::bail!("provide --ticker and/or --company");
            }
            let client = build_client()?;
            let ctx = RequestContext::new();
            let candidate = Candidate::new(ticker, company);
            let outcome = InsightOutcome::from_tickers(
                client.resolve(&ctx, &candidate, region).await.into_iter().collect(),
            );
            print_outcome(&outcome);
        }
    }

    Ok(())
}

fn build_client() -> anyhow::Result<InsightClient> {
    let config = InsightConfig::from_env()?;
    Ok(InsightClient::from_config(&config)?)
}

fn print_regions(table: &RegionExchanges) {
    for region in Region::ALL {
        let codes: Vec<&str> = table.allowed(region).iter().map(String::as_str).collect();
        println!("{:<7} {:<18} {}", region.key(), region.label(), codes.join(", "));
    }
}

fn print_outcome(outcome: &InsightOutcome) {
    match outcome {
        InsightOutcome::Empty => println!("No ticker symbols found"),
        InsightOutcome::Found(tickers) => {
            println!(
                "{:<12} {:<40} {:<8} {:<10} {}",
                "SYMBOL", "NAME", "CURRENCY", "EXCHANGE", "STOCK EXCHANGE"
            );
            for t in tickers {
                print_ticker(t);
            }
        }
    }
}

fn print_ticker(t: &ResolvedTicker) {
    println!(
        "{:<12} {:<40} {:<8} {:<10} {}",
        t.symbol,
        t.name,
        t.currency.as_deref().unwrap_or("-"),
        t.exchange_short_name,
        t.stock_exchange.as_deref().unwrap_or("-")
    );
}
