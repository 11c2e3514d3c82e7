use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use svwiki_core::config;
use svwiki_core::recipe::RecipeBook;
use svwiki_core::report::{self, ProduceCategory};
use svwiki_core::shop::{self, Goods, ShopSet};
use svwiki_core::store::{GameData, Namespace};
use svwiki_core::xref::{self, HarvestSource, SeedGrowth};

#[derive(Debug, Parser)]
#[command(
    name = "svwiki",
    version,
    about = "Resolve Stardew Valley data dumps into wiki-ready report records"
)]
struct Cli {
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[arg(long, global = true, value_name = "NAME", help = "Content namespace (vanilla|sve)")]
    namespace: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone)]
struct RuntimeOptions {
    data_dir: Option<PathBuf>,
    config: Option<PathBuf>,
    namespace: Option<String>,
}

impl RuntimeOptions {
    fn from_cli(cli: &Cli) -> Self {
        Self {
            data_dir: cli.data_dir.clone(),
            config: cli.config.clone(),
            namespace: cli.namespace.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Seed reports: crop, growth, and shop availability per seed item")]
    Seed,
    #[command(about = "Fish reports: habits joined from the fish table")]
    Fish,
    #[command(about = "Crafting reports: ingredient break-downs per recipe")]
    Craft,
    #[command(about = "Produce reports for one grown-item category")]
    Produce(ProduceArgs),
    #[command(about = "Resolved goods lists for every declared shop")]
    Shops,
    #[command(about = "Inspect one item by bare or qualified code")]
    Item(ItemArgs),
}

#[derive(Debug, Args)]
struct ProduceArgs {
    #[arg(short = 'c', long, value_name = "NAME", help = "vegetable|fruit|flower|forage")]
    category: String,
}

#[derive(Debug, Args)]
struct ItemArgs {
    code: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let runtime = RuntimeOptions::from_cli(&cli);

    match cli.command {
        Commands::Seed => run_seed(&runtime),
        Commands::Fish => run_fish(&runtime),
        Commands::Craft => run_craft(&runtime),
        Commands::Produce(args) => run_produce(&runtime, args),
        Commands::Shops => run_shops(&runtime),
        Commands::Item(ItemArgs { code }) => run_item(&runtime, &code),
    }
}

/// Flag > env > config file > default, per option.
fn load_data(runtime: &RuntimeOptions) -> Result<GameData> {
    let config_path = runtime
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("svwiki.toml"));
    let config = config::load_config(&config_path)?;

    let namespace = match &runtime.namespace {
        Some(value) => Namespace::parse(value)?,
        None => config.namespace()?,
    };
    let data_dir = runtime
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data_dir());

    GameData::load(&data_dir, namespace)
        .with_context(|| format!("failed to load game data from {}", data_dir.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_diagnostics(lines: &[String]) {
    for line in lines {
        eprintln!("warning: {line}");
    }
}

fn run_seed(runtime: &RuntimeOptions) -> Result<()> {
    let data = load_data(runtime)?;
    let shops = ShopSet::load(&data)?;
    let book = RecipeBook::parse_all(&data)?;
    for name in &book.skipped {
        eprintln!("warning: skipped recipe with unresolved items: {name}");
    }

    let generated = report::seed_reports(&data, &shops, &book);
    print_diagnostics(&generated.diagnostics);
    print_json(&generated.records)
}

fn run_fish(runtime: &RuntimeOptions) -> Result<()> {
    let data = load_data(runtime)?;
    let generated = report::fish_reports(&data);
    print_diagnostics(&generated.diagnostics);
    print_json(&generated.records)
}

fn run_craft(runtime: &RuntimeOptions) -> Result<()> {
    let data = load_data(runtime)?;
    let book = RecipeBook::parse_all(&data)?;
    for name in &book.skipped {
        eprintln!("warning: skipped recipe with unresolved items: {name}");
    }
    print_json(&report::craft_reports(&data, &book))
}

fn run_produce(runtime: &RuntimeOptions, args: ProduceArgs) -> Result<()> {
    let category = ProduceCategory::parse(&args.category)?;
    let data = load_data(runtime)?;
    let generated = report::produce_reports(&data, category);
    print_diagnostics(&generated.diagnostics);
    print_json(&generated.records)
}

#[derive(Debug, Serialize)]
struct ShopDump {
    name: String,
    goods: Vec<Goods>,
}

fn run_shops(runtime: &RuntimeOptions) -> Result<()> {
    let data = load_data(runtime)?;
    let dumps: Vec<ShopDump> = shop::build_all(&data)?
        .into_iter()
        .map(|(name, inventory)| ShopDump {
            name,
            goods: inventory.goods,
        })
        .collect();
    print_json(&dumps)
}

fn run_item(runtime: &RuntimeOptions, code: &str) -> Result<()> {
    let data = load_data(runtime)?;
    let Some(object) = data.try_get_object(code) else {
        anyhow::bail!("no object with code {code}");
    };
    let id = svwiki_core::ident::trim(code);

    println!("id: {id}");
    println!("name: {}", object.name);
    println!(
        "display_name: {}",
        data.display_name(id).unwrap_or_else(|| "n/a".to_string())
    );
    println!("price: {}", object.price);
    println!("edibility: {}", object.edibility);
    println!("category: {}", object.category);
    let color = object.color();
    if !color.is_empty() {
        println!("color: {color}");
    }

    match xref::harvest_source(&data, id) {
        Some(HarvestSource::Crop { seed_id, crop }) => {
            println!("grown_from: {seed_id}");
            println!("growth_days: {}", crop.growth_days());
        }
        Some(HarvestSource::FruitTree { sapling_id, .. }) => {
            println!("grown_from: {sapling_id}");
            println!("growth_days: {}", xref::FRUIT_TREE_GROWTH_DAYS);
        }
        None => {}
    }
    match xref::growth_of_seed(&data, id) {
        Some(SeedGrowth::Crop(crop)) => {
            println!("grows_into: {}", crop.harvest_item_id);
        }
        Some(SeedGrowth::FruitTree(tree)) => {
            if let Some(harvest) = tree.harvest() {
                println!("grows_into: {harvest}");
            }
        }
        None => {}
    }
    if let Some(raw) = data.fish_entry(id) {
        println!("fish_entry: {raw}");
    }

    Ok(())
}
