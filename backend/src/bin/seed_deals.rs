//! Seed the deal catalogue with partner offers.
//!
//! Catalogue writes are not exposed over HTTP; this tool inserts deals
//! through the repository port for local development and demo environments.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;

use clap::Parser;
use tokio::runtime::Builder;

use benefits_backend::domain::deal::{AccessLevel, DealCategory};
use benefits_backend::domain::ports::{DealRepository, NewDeal};
use benefits_backend::outbound::persistence::{DbPool, DieselDealRepository, PoolConfig};

/// `seed-deals` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed-deals",
    about = "Insert sample partner deals into the catalogue",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;

    let database_url = resolve_database_url(args.database_url)?;
    // Inserts run sequentially; one connection is enough.
    let pool = DbPool::new(PoolConfig::new(&database_url).with_max_size(1))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
    let repo = DieselDealRepository::new(pool);

    let deals = sample_deals();
    let total = deals.len();
    for new_deal in deals {
        let title = new_deal.title.clone();
        let deal = repo
            .insert(new_deal)
            .await
            .map_err(|error| io::Error::other(format!("insert deal '{title}': {error}")))?;
        println!("inserted {} ({})", deal.title, deal.id);
    }
    println!("seeded {total} deals");

    Ok(())
}

fn resolve_database_url(flag: Option<String>) -> io::Result<String> {
    match flag {
        Some(url) => Ok(url),
        None => env::var("DATABASE_URL").map_err(|_| {
            io::Error::other("database URL missing: pass --database-url or set DATABASE_URL")
        }),
    }
}

fn sample_deals() -> Vec<NewDeal> {
    vec![
        NewDeal {
            title: "50% off Figma Professional".to_owned(),
            description: "Half price on the Professional plan for the first year.".to_owned(),
            category: DealCategory::Design,
            discount: "50% off for 12 months".to_owned(),
            partner_name: "Figma".to_owned(),
            logo_url: "https://cdn.example.com/logos/figma.png".to_owned(),
            redemption_link: Some("https://figma.com/redeem/startups".to_owned()),
            access_level: AccessLevel::Public,
            eligibility_conditions: "Open to all registered startups.".to_owned(),
            featured: true,
        },
        NewDeal {
            title: "$5,000 in AWS credits".to_owned(),
            description: "Infrastructure credits for early-stage teams.".to_owned(),
            category: DealCategory::Development,
            discount: "$5,000 in credits".to_owned(),
            partner_name: "Amazon Web Services".to_owned(),
            logo_url: "https://cdn.example.com/logos/aws.png".to_owned(),
            redemption_link: Some("https://aws.amazon.com/activate".to_owned()),
            access_level: AccessLevel::Restricted,
            eligibility_conditions: "Verified companies under two years old.".to_owned(),
            featured: true,
        },
        NewDeal {
            title: "3 months of HubSpot free".to_owned(),
            description: "Full marketing suite, free for one quarter.".to_owned(),
            category: DealCategory::Marketing,
            discount: "100% off for 3 months".to_owned(),
            partner_name: "HubSpot".to_owned(),
            logo_url: "https://cdn.example.com/logos/hubspot.png".to_owned(),
            redemption_link: None,
            access_level: AccessLevel::Public,
            eligibility_conditions: "New HubSpot customers only.".to_owned(),
            featured: false,
        },
        NewDeal {
            title: "Notion Plus for a year".to_owned(),
            description: "Team workspace on the Plus plan, free for 12 months.".to_owned(),
            category: DealCategory::Productivity,
            discount: "Free Plus plan for 12 months".to_owned(),
            partner_name: "Notion".to_owned(),
            logo_url: "https://cdn.example.com/logos/notion.png".to_owned(),
            redemption_link: Some("https://notion.so/startups".to_owned()),
            access_level: AccessLevel::Public,
            eligibility_conditions: "Teams of up to 50 people.".to_owned(),
            featured: false,
        },
        NewDeal {
            title: "Stripe fee rebate".to_owned(),
            description: "Waived processing fees on the first $100,000 in volume.".to_owned(),
            category: DealCategory::Finance,
            discount: "No fees on first $100k".to_owned(),
            partner_name: "Stripe".to_owned(),
            logo_url: "https://cdn.example.com/logos/stripe.png".to_owned(),
            redemption_link: None,
            access_level: AccessLevel::Restricted,
            eligibility_conditions: "Verified companies incorporated within 18 months.".to_owned(),
            featured: false,
        },
    ]
}
