// Copyright 2025 Stockyard Contributors
//
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

//! Stockyard CLI - Interactive inventory management shell
//!

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};
use std::str::SplitWhitespace;
use std::time::Instant;

use clap::Parser;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, DefaultEditor, EditMode, Editor};

use stockyard::common::version::{MAJOR, MINOR, PATCH};
use stockyard::{Color, Inventory, StockItem, MAX_STOCK};

/// Version string constant
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION_MAJOR"),
    ".",
    env!("CARGO_PKG_VERSION_MINOR"),
    ".",
    env!("CARGO_PKG_VERSION_PATCH")
);

/// Stockyard inventory CLI
#[derive(Parser, Debug)]
#[command(name = "stockyard")]
#[command(author = "Stockyard Contributors")]
#[command(version = VERSION)]
#[command(about = "Inventory catalogue and cash ledger on an arena-backed red-black tree")]
#[command(
    long_about = "Stockyard keeps a SKU-keyed catalogue in an arena-backed red-black tree and\n\
tracks a cash balance across restocking and sales. Each session manages one\n\
in-memory store.\n\n\
EXAMPLES:\n\
  stockyard                      Interactive shell\n\
  stockyard -e 'balance'         Run one command and exit\n\
  stockyard -f seed.txt          Run a command script\n\
  stockyard -q -f seed.txt       Script without the banner"
)]
struct Args {
    /// Suppress banner and timing output
    #[arg(short = 'q', long = "quiet", default_value = "false")]
    quiet: bool,

    /// Execute a single command and exit
    #[arg(short = 'e', long = "execute")]
    execute: Option<String>,

    /// Execute commands from a file
    #[arg(short = 'f', long = "file")]
    file: Option<String>,
}

/// CLI state for interactive mode
struct Cli {
    store: Inventory,
    quiet: bool,
    editor: Editor<(), DefaultHistory>,
}

impl Cli {
    fn new(store: Inventory, quiet: bool) -> io::Result<Self> {
        let config = Config::builder()
            .history_ignore_space(true)
            .edit_mode(EditMode::Emacs)
            .build();

        let mut editor =
            DefaultEditor::with_config(config).map_err(|e| io::Error::other(e.to_string()))?;

        // Load history from file
        if let Some(home) = dirs::home_dir() {
            let history_file = home.join(".stockyard_history");
            let _ = editor.load_history(&history_file);
        }

        Ok(Self {
            store,
            quiet,
            editor,
        })
    }

    fn run(&mut self) -> io::Result<()> {
        println!("Stockyard v{}.{}.{}", MAJOR, MINOR, PATCH);
        println!("Enter commands, 'help' for assistance, or 'exit' to quit.");
        println!("Use Up/Down arrows for history, Ctrl+R to search history.");
        println!();

        loop {
            match self.editor.readline("\x1b[1;36mstockyard>\x1b[0m ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    // Handle special commands
                    match line.to_lowercase().as_str() {
                        "exit" | "quit" | "\\q" => break,
                        "help" | "\\h" | "\\?" => {
                            print_help();
                            continue;
                        }
                        _ => {}
                    }

                    let _ = self.editor.add_history_entry(line);

                    let start = Instant::now();
                    match run_command(&mut self.store, line) {
                        Ok(()) => {
                            if !self.quiet {
                                println!("\x1b[1;32mExecuted in {:?}\x1b[0m", start.elapsed());
                            }
                        }
                        Err(e) => eprintln!("\x1b[1;31mError:\x1b[0m {}", e),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    break;
                }
            }
        }

        // Save history
        if let Some(home) = dirs::home_dir() {
            let history_file = home.join(".stockyard_history");
            let _ = self.editor.save_history(&history_file);
        }

        Ok(())
    }
}

/// Parse and run one command line against the store
fn run_command(store: &mut Inventory, line: &str) -> Result<(), String> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(());
    };

    match command.to_lowercase().as_str() {
        "add" => {
            let sku = parse_sku(parts.next())?;
            let price = parse_price(parts.next())?;
            let description = rest_of_line(parts, "<description>")?;
            store
                .add_item(sku, description, price)
                .map_err(|e| e.to_string())?;
            println!("\x1b[1;32mAdded sku {:05}\x1b[0m", sku);
            Ok(())
        }
        "desc" => {
            let sku = parse_sku(parts.next())?;
            let description = rest_of_line(parts, "<description>")?;
            store
                .set_description(sku, description)
                .map_err(|e| e.to_string())?;
            println!("\x1b[1;32mUpdated description of sku {:05}\x1b[0m", sku);
            Ok(())
        }
        "price" => {
            let sku = parse_sku(parts.next())?;
            let price = parse_price(parts.next())?;
            store.set_price(sku, price).map_err(|e| e.to_string())?;
            println!("\x1b[1;32mUpdated price of sku {:05}\x1b[0m", sku);
            Ok(())
        }
        "restock" => {
            let sku = parse_sku(parts.next())?;
            let quantity = parse_quantity(parts.next())?;
            let unit_price = parse_price(parts.next())?;
            let bought = store
                .restock(sku, quantity, unit_price)
                .map_err(|e| e.to_string())?;
            if bought < quantity {
                println!(
                    "\x1b[1;32mRestocked {} {} of sku {:05} (shelf holds at most {})\x1b[0m",
                    bought,
                    unit_word(bought),
                    sku,
                    MAX_STOCK
                );
            } else {
                println!(
                    "\x1b[1;32mRestocked {} {} of sku {:05}\x1b[0m",
                    bought,
                    unit_word(bought),
                    sku
                );
            }
            Ok(())
        }
        "sell" => {
            let sku = parse_sku(parts.next())?;
            let quantity = parse_quantity(parts.next())?;
            let before = store.balance();
            let sold = store.sell(sku, quantity).map_err(|e| e.to_string())?;
            if sold == 0 && quantity > 0 {
                println!("\x1b[1;33msku {:05} is out of stock\x1b[0m", sku);
            } else {
                println!(
                    "\x1b[1;32mSold {} {} of sku {:05} for ${:.2}\x1b[0m",
                    sold,
                    unit_word(sold),
                    sku,
                    store.balance() - before
                );
            }
            Ok(())
        }
        "remove" => {
            let sku = parse_sku(parts.next())?;
            store.remove_item(sku).map_err(|e| e.to_string())?;
            println!("\x1b[1;32mRemoved sku {:05}\x1b[0m", sku);
            Ok(())
        }
        "find" => {
            let sku = parse_sku(parts.next())?;
            match store.item(sku) {
                Some(item) => {
                    println!("{}", items_table(std::iter::once((sku, item))));
                    Ok(())
                }
                None => Err(format!("sku {:05} not found", sku)),
            }
        }
        "list" | "catalogue" => {
            println!("{}", items_table(store.items()));
            let count = store.len();
            let noun = if count == 1 { "item" } else { "items" };
            println!("\x1b[1;32m{} {} in catalogue\x1b[0m", count, noun);
            Ok(())
        }
        "balance" => {
            println!("Balance: ${:.2}", store.balance());
            Ok(())
        }
        "stats" => {
            println!("Items:       {}", store.len());
            println!("Tree height: {}", store.height());
            println!(
                "Invariants:  {}",
                if store.is_valid() { "ok" } else { "VIOLATED" }
            );
            println!("Balance:     ${:.2}", store.balance());
            Ok(())
        }
        "tree" => {
            print_tree(store);
            Ok(())
        }
        "help" => {
            print_help();
            Ok(())
        }
        other => Err(format!(
            "unknown command '{}'. Type 'help' for the command list.",
            other
        )),
    }
}

fn parse_sku(token: Option<&str>) -> Result<u32, String> {
    let token = token.ok_or("missing <sku> argument")?;
    token
        .parse::<u32>()
        .map_err(|_| format!("invalid sku '{}'", token))
}

fn parse_quantity(token: Option<&str>) -> Result<u32, String> {
    let token = token.ok_or("missing <qty> argument")?;
    token
        .parse::<u32>()
        .map_err(|_| format!("invalid quantity '{}'", token))
}

fn parse_price(token: Option<&str>) -> Result<f64, String> {
    let token = token.ok_or("missing <price> argument")?;
    let price = token
        .parse::<f64>()
        .map_err(|_| format!("invalid price '{}'", token))?;
    if !price.is_finite() || price < 0.0 {
        return Err(format!("invalid price '{}'", token));
    }
    Ok(price)
}

/// Join the remaining tokens into a free-text argument
fn rest_of_line(parts: SplitWhitespace<'_>, what: &str) -> Result<String, String> {
    let words: Vec<&str> = parts.collect();
    if words.is_empty() {
        return Err(format!("missing {} argument", what));
    }
    Ok(words.join(" "))
}

fn unit_word(count: u32) -> &'static str {
    if count == 1 {
        "unit"
    } else {
        "units"
    }
}

/// Render catalogue rows the same way everywhere: five-digit SKUs and
/// two-decimal prices
fn items_table<'a>(rows: impl Iterator<Item = (u32, &'a StockItem)>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(["SKU", "DESCRIPTION", "PRICE", "STOCK"].iter().map(Cell::new));

    for (sku, item) in rows {
        table.add_row(vec![
            Cell::new(format!("{:05}", sku)),
            Cell::new(item.description()),
            Cell::new(format!("{:.2}", item.price())),
            Cell::new(item.stock()),
        ]);
    }

    table
}

/// Level-order dump of the catalogue tree, red nodes highlighted
fn print_tree(store: &Inventory) {
    let snapshot = store.level_order();
    if snapshot.is_empty() {
        println!("(empty catalogue)");
        return;
    }

    let mut depth = usize::MAX;
    for entry in &snapshot {
        if entry.depth != depth {
            if depth != usize::MAX {
                println!();
            }
            depth = entry.depth;
            print!("level {}:", depth);
        }
        match entry.color {
            Color::Red => print!(" \x1b[1;31m{:05}R\x1b[0m", entry.key),
            Color::Black => print!(" {:05}B", entry.key),
        }
    }
    println!();
}

fn print_help() {
    println!("\x1b[1mStockyard Commands:\x1b[0m");
    println!();
    println!("  \x1b[1;33mCatalogue:\x1b[0m");
    println!("    add <sku> <price> <description>   Add a new item (stock starts at 0)");
    println!("    desc <sku> <description>          Rewrite an item's description");
    println!("    price <sku> <price>               Change an item's sale price");
    println!("    remove <sku>                      Drop an item from the catalogue");
    println!("    find <sku>                        Show one item");
    println!("    list                              Show the full catalogue");
    println!();
    println!("  \x1b[1;33mLedger:\x1b[0m");
    println!(
        "    restock <sku> <qty> <unit-price>  Buy stock (shelf capped at {} units)",
        MAX_STOCK
    );
    println!("    sell <sku> <qty>                  Sell stock at the catalogue price");
    println!("    balance                           Show cash on hand");
    println!();
    println!("  \x1b[1;33mInspection:\x1b[0m");
    println!("    stats                             Item count, tree height, invariant check");
    println!("    tree                              Level-order tree dump with node colors");
    println!();
    println!("  \x1b[1;33mSpecial Commands:\x1b[0m");
    println!("    exit, quit, \\q                    Exit the CLI");
    println!("    help, \\h, \\?                      Show this help message");
    println!();
    println!("  \x1b[1;33mKeyboard Shortcuts:\x1b[0m");
    println!("    Up/Down arrow keys                Navigate command history");
    println!("    Ctrl+R                            Search command history");
    println!("    Ctrl+L                            Clear screen");
    println!();
}

fn main() {
    let args = Args::parse();
    let mut store = Inventory::new();

    if !args.quiet {
        println!("Opened store with balance ${:.2}", store.balance());
    }

    // Handle execute flag - run a single command and exit
    if let Some(ref command) = args.execute {
        if let Err(e) = run_command(&mut store, command) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // Handle file flag - run commands from a file
    if let Some(ref filename) = args.file {
        if let Err(e) = run_file(&mut store, filename, args.quiet) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // Check if we're getting input from a pipe
    let is_pipe = !std::io::stdin().is_terminal();

    if is_pipe {
        if let Err(e) = run_piped(&mut store, args.quiet) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // Interactive mode
    let mut cli = match Cli::new(store, args.quiet) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error initializing CLI: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = cli.run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_file(store: &mut Inventory, filename: &str, quiet: bool) -> Result<(), String> {
    let file =
        File::open(filename).map_err(|e| format!("Error opening file {}: {}", filename, e))?;
    let reader = BufReader::new(file);

    for line_result in reader.lines() {
        let line = line_result.map_err(|e| format!("Error reading file: {}", e))?;

        // Skip blank and comment lines
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let start = Instant::now();
        if let Err(e) = run_command(store, trimmed) {
            eprintln!("\x1b[1;31mError:\x1b[0m {}", e);
        } else if !quiet {
            println!("Executed in {:?}", start.elapsed());
        }
    }

    Ok(())
}

fn run_piped(store: &mut Inventory, quiet: bool) -> Result<(), String> {
    let stdin = io::stdin();
    let reader = stdin.lock();

    for line_result in reader.lines() {
        let line = line_result.map_err(|e| format!("Error reading input: {}", e))?;

        // Skip blank and comment lines
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let start = Instant::now();
        if let Err(e) = run_command(store, trimmed) {
            eprintln!("\x1b[1;31mError:\x1b[0m {}", e);
        } else if !quiet {
            println!("Executed in {:?}", start.elapsed());
        }
    }

    Ok(())
}
