use chrono::Utc;
use idlegacha::core::constants::{MAX_ITEM_LEVEL, PRESTIGE_REQUIRED_LEVEL};
use idlegacha::core::game_loop::{LoopConfig, Ticker};
use idlegacha::core::idle::{format_number, format_time};
use idlegacha::items::inventory::{
    find_item, query_inventory, total_power, upgradeable_items, InventoryFilter, SortBy,
};
use idlegacha::items::types::Item;
use idlegacha::progression::leveling::xp_for_next_level;
use idlegacha::progression::prestige::prestige_bonus;
use idlegacha::progression::upgrade::{calculate_upgrade_cost, star_upgrade_cost};
use idlegacha::save_manager::{export_to, read_export, SaveManager};
use idlegacha::{build_info, GameStore, StoreError};
use rand::thread_rng;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// How many items `status` lists.
const STATUS_ITEM_LIMIT: usize = 10;

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let mut save_path = None;
    if args.first().map(String::as_str) == Some("--save") {
        if args.len() < 2 {
            eprintln!("--save needs a path");
            return ExitCode::FAILURE;
        }
        save_path = Some(args.remove(1));
        args.remove(0);
    }

    match args.first().map(String::as_str) {
        Some("--version") | Some("-V") => {
            println!("idlegacha {}", build_info::version_string());
            return ExitCode::SUCCESS;
        }
        Some("--help") | Some("-h") | None => {
            print_help();
            return ExitCode::SUCCESS;
        }
        _ => {}
    }

    let saver = match save_path {
        Some(path) => SaveManager::with_path(path),
        None => match SaveManager::new() {
            Ok(saver) => saver,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    match run(&saver, &args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load (with offline catch-up), run one command, save.
fn run(saver: &SaveManager, args: &[String]) -> Result<ExitCode, StoreError> {
    let mut store = match saver.load()? {
        Some(state) => GameStore::from_state(state),
        None => {
            println!("Starting a new game.");
            GameStore::new(now_ms())
        }
    };

    let report = store.catch_up(now_ms());
    if report.show_welcome_back {
        println!("Welcome back! {}", report.summary());
    }

    let command = args[0].as_str();
    let rest = &args[1..];
    let code = match command {
        "status" => {
            print_status(&store);
            ExitCode::SUCCESS
        }
        "pools" => {
            print_pools(&store);
            ExitCode::SUCCESS
        }
        "inventory" => cmd_inventory(&store, rest),
        "summon" => cmd_summon(&mut store, rest),
        "upgrade" => cmd_upgrade(&mut store, rest, false),
        "star" => cmd_upgrade(&mut store, rest, true),
        "prestige" => cmd_prestige(&mut store),
        "idle" => {
            let Some(seconds) = rest.first().and_then(|s| s.parse::<u64>().ok()) else {
                eprintln!("Usage: idlegacha idle <seconds>");
                return Ok(ExitCode::FAILURE);
            };
            store = run_idle(store, saver, seconds);
            ExitCode::SUCCESS
        }
        "export" => {
            let Some(path) = rest.first() else {
                eprintln!("Usage: idlegacha export <path>");
                return Ok(ExitCode::FAILURE);
            };
            export_to(Path::new(path), store.state())?;
            println!("Exported to {}", path);
            ExitCode::SUCCESS
        }
        "import" => {
            let Some(path) = rest.first() else {
                eprintln!("Usage: idlegacha import <path>");
                return Ok(ExitCode::FAILURE);
            };
            let text = read_export(Path::new(path))?;
            store.import_json(&text, now_ms())?;
            println!("Imported {} items from {}", store.state().inventory.len(), path);
            ExitCode::SUCCESS
        }
        "reset" => {
            store.reset(now_ms());
            println!("Game reset.");
            ExitCode::SUCCESS
        }
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Run 'idlegacha --help' for usage.");
            return Ok(ExitCode::FAILURE);
        }
    };

    saver.save(&store.snapshot_for_save(now_ms()))?;
    Ok(code)
}

/// `inventory [--sort KEY] [--upgradeable] [RARITY|FAMILY ...]`
fn cmd_inventory(store: &GameStore, rest: &[String]) -> ExitCode {
    let mut sort = SortBy::default();
    let mut upgradeable_only = false;
    let mut terms = Vec::new();

    let mut i = 0;
    while i < rest.len() {
        match rest[i].as_str() {
            "--sort" => {
                let Some(key) = rest.get(i + 1).and_then(|k| SortBy::parse(k)) else {
                    eprintln!("--sort takes power, rarity or recent");
                    return ExitCode::FAILURE;
                };
                sort = key;
                i += 1;
            }
            "--upgradeable" => upgradeable_only = true,
            term => terms.push(term),
        }
        i += 1;
    }

    let filter = match InventoryFilter::from_terms(&terms) {
        Ok(filter) => filter,
        Err(term) => {
            eprintln!("Unknown rarity or family: {}", term);
            return ExitCode::FAILURE;
        }
    };

    let inventory = &store.state().inventory;
    let mut items = query_inventory(inventory, filter, sort);
    if upgradeable_only {
        let open: Vec<&str> = upgradeable_items(inventory).iter().map(|i| i.id.as_str()).collect();
        items.retain(|item| open.contains(&item.id.as_str()));
    }

    if items.is_empty() {
        println!("No matching items.");
    }
    for item in &items {
        println!("  {}", describe_item(item));
    }
    ExitCode::SUCCESS
}

fn cmd_summon(store: &mut GameStore, rest: &[String]) -> ExitCode {
    let Some(pool_id) = rest.first() else {
        eprintln!("Usage: idlegacha summon <pool> [count]");
        return ExitCode::FAILURE;
    };
    let count = match rest.get(1) {
        Some(n) => match n.parse::<u32>() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("Invalid count: {}", n);
                return ExitCode::FAILURE;
            }
        },
        None => 1,
    };

    let Some(pool) = store.pool(pool_id).cloned() else {
        eprintln!("Unknown pool '{}'. Try 'idlegacha pools'.", pool_id);
        return ExitCode::FAILURE;
    };

    match store.summon(pool_id, count, &mut thread_rng(), now_ms()) {
        Some(outcome) => {
            println!(
                "Spent {} {} on {} draw(s) from {}:",
                format_number(outcome.cost),
                outcome.currency.name(),
                count,
                pool.name
            );
            for item in &outcome.items {
                match item {
                    Some(item) => println!("  {}", describe_item(item)),
                    None => println!("  (nothing)"),
                }
            }
            ExitCode::SUCCESS
        }
        None => {
            println!(
                "Not enough {} ({} needed).",
                pool.currency.name(),
                pool.cost.saturating_mul(count as u64)
            );
            ExitCode::FAILURE
        }
    }
}

fn cmd_upgrade(store: &mut GameStore, rest: &[String], stars: bool) -> ExitCode {
    let Some(prefix) = rest.first() else {
        eprintln!("Usage: idlegacha {} <item-id>", if stars { "star" } else { "upgrade" });
        return ExitCode::FAILURE;
    };
    let Some(item) = resolve_item(store, prefix) else {
        return ExitCode::FAILURE;
    };

    let result = if stars {
        store.star_upgrade_item(&item.id)
    } else {
        store.upgrade_item(&item.id)
    };
    match result {
        Some(upgraded) => {
            println!("Upgraded: {}", describe_item(&upgraded));
            ExitCode::SUCCESS
        }
        None => {
            if stars {
                match star_upgrade_cost(&item) {
                    Some(cost) => println!("Not enough gems ({} needed).", cost),
                    None => println!("{} is already at max stars.", item.name),
                }
            } else if item.level >= MAX_ITEM_LEVEL {
                println!("{} is already at max level.", item.name);
            } else {
                println!(
                    "Not enough coins ({} needed).",
                    format_number(calculate_upgrade_cost(&item))
                );
            }
            ExitCode::FAILURE
        }
    }
}

fn cmd_prestige(store: &mut GameStore) -> ExitCode {
    let cost = store.prestige_cost();
    if store.prestige() {
        println!(
            "Prestiged to level {}! Next prestige costs {} coins.",
            store.state().stats.prestige_level,
            format_number(store.prestige_cost())
        );
        return ExitCode::SUCCESS;
    }
    let r = &store.state().resources;
    if r.level < PRESTIGE_REQUIRED_LEVEL {
        println!(
            "Prestige requires level {} (you are level {}).",
            PRESTIGE_REQUIRED_LEVEL, r.level
        );
    } else {
        println!(
            "Prestige costs {} coins (you have {}).",
            format_number(cost),
            format_number(r.coins)
        );
    }
    ExitCode::FAILURE
}

/// Runs the live ticker for `seconds`, then hands the store back.
fn run_idle(store: GameStore, saver: &SaveManager, seconds: u64) -> GameStore {
    let before = store.state().resources;
    let shared = store.into_shared();

    println!("Idling for {}...", format_time(seconds));
    let mut ticker = Ticker::spawn(shared.clone(), Some(saver.clone()), LoopConfig::default());
    std::thread::sleep(Duration::from_secs(seconds));
    ticker.stop();

    let store = shared.lock().clone();
    let after = store.state().resources;
    println!(
        "Earned {} coins and {} gems.",
        after.coins.saturating_sub(before.coins),
        after.gems.saturating_sub(before.gems)
    );
    store
}

/// Finds the item with id `prefix`, or the one item whose id starts with it.
fn resolve_item(store: &GameStore, prefix: &str) -> Option<Item> {
    if let Some(item) = find_item(&store.state().inventory, prefix) {
        return Some(item.clone());
    }
    let matches: Vec<&Item> = store
        .state()
        .inventory
        .iter()
        .filter(|i| i.id.starts_with(prefix))
        .collect();
    match matches.as_slice() {
        [item] => Some((*item).clone()),
        [] => {
            eprintln!("No item with id {}", prefix);
            None
        }
        _ => {
            eprintln!("Id {} is ambiguous ({} items)", prefix, matches.len());
            None
        }
    }
}

fn describe_item(item: &Item) -> String {
    format!(
        "{} {} [{}] Lv{} {}★ power {} ({})",
        item.icon,
        item.name,
        item.rarity.name(),
        item.level,
        item.stars,
        item.power,
        &item.id[..item.id.len().min(8)]
    )
}

fn print_status(store: &GameStore) {
    let state = store.state();
    let r = &state.resources;
    let s = &state.stats;

    println!("── RESOURCES ──");
    println!("  Coins:   {}", format_number(r.coins));
    println!("  Gems:    {}", format_number(r.gems));
    println!("  Energy:  {}/{}", r.energy, r.max_energy);
    println!("  Level:   {} ({}/{} exp)", r.level, r.exp, xp_for_next_level(r.level));
    println!();
    println!("── STATS ──");
    println!("  Summons:        {}", s.total_summons);
    println!("  Upgrades:       {}", s.total_upgrades);
    println!("  Playtime:       {}", format_time(s.playtime));
    println!("  Highest rarity: {}", s.highest_rarity.name());
    println!(
        "  Prestige:       {} (next: {} coins, +{:.0}% bonus{})",
        s.prestige_level,
        format_number(store.prestige_cost()),
        prestige_bonus(s.prestige_level) * 100.0,
        if store.can_prestige() { ", ready" } else { "" }
    );
    println!();
    println!(
        "── INVENTORY ({} items, {} total power) ──",
        state.inventory.len(),
        format_number(total_power(&state.inventory))
    );
    for item in query_inventory(&state.inventory, InventoryFilter::default(), SortBy::Power)
        .into_iter()
        .take(STATUS_ITEM_LIMIT)
    {
        println!("  {}", describe_item(item));
    }
}

fn print_pools(store: &GameStore) {
    for pool in store.pools() {
        println!("{} ({}): {} {} per draw", pool.name, pool.id, pool.cost, pool.currency.name());
        for (rarity, rate) in pool.rates.iter().filter(|(_, rate)| *rate > 0.0) {
            println!("  {:<12} {:>6.2}%", rarity.name(), rate * 100.0);
        }
        println!("  {:<12} {:>6.2}%", "no drop", pool.rates.no_drop_chance() * 100.0);
        for problem in pool.validate() {
            println!("  note: {}", problem);
        }
    }
}

fn print_help() {
    println!("idlegacha - idle gacha economy\n");
    println!("Usage: idlegacha [--save PATH] <command>\n");
    println!("Commands:");
    println!("  status                 Show resources, stats and top items");
    println!("  pools                  List summon pools and their rates");
    println!("  inventory [filters]    List items; filters are rarities, families,");
    println!("                         --sort power|rarity|recent and --upgradeable");
    println!("  summon <pool> [count]  Summon from a pool");
    println!("  upgrade <id>           Level up an item (coins)");
    println!("  star <id>              Add a star to an item (gems)");
    println!("  prestige               Reset progress for a permanent bonus");
    println!("  idle <seconds>         Run the idle ticker for a while");
    println!("  export <path>          Write the game state as JSON");
    println!("  import <path>          Replace the game state from JSON");
    println!("  reset                  Start over");
    println!("  --version              Show version information");
    println!("  --help                 Show this help message");
    println!("\nItem ids may be shortened to any unique prefix.");
}
