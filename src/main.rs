//! Marina Ledger CLI
//!
//! Loads a boat roster, runs an interactive menu over it and saves the
//! roster back to the same file on exit. A missing roster starts empty; a
//! roster that exists but cannot be read is never overwritten.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- BoatData.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use marina_ledger::{MarinaError, Money, Registry, Result};
use std::env;
use std::io::{self, BufRead, Write};
use std::process;
use std::str::FromStr;

const MENU: &str = "(I)nventory, (A)dd, (R)emove, (P)ayment, (M)onth, e(X)it : ";

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(MarinaError::MissingArgument);
    }

    let path = &args[1];
    let mut registry = match Registry::load_path(path) {
        Ok(registry) => registry,
        Err(MarinaError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            println!("Error: Cannot open file {}: {}", path, e);
            Registry::new()
        }
        Err(e) => return Err(e),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    menu_loop(&mut registry, stdin.lock(), stdout.lock())?;

    registry.save_path(path)?;
    println!("Exiting the Boat Management System");
    Ok(())
}

/// Runs menu commands until `x` or end of input.
fn menu_loop<R: BufRead, W: Write>(
    registry: &mut Registry,
    mut input: R,
    mut out: W,
) -> Result<()> {
    writeln!(out, "Welcome to the Boat Management System")?;
    writeln!(out, "-------------------------------------")?;

    loop {
        write!(out, "\n{}", MENU)?;
        out.flush()?;

        let Some(line) = read_line(&mut input)? else {
            return Ok(());
        };
        let Some(option) = line.chars().next().map(|c| c.to_ascii_lowercase()) else {
            continue;
        };

        match option {
            'i' => {
                for boat in registry.list_sorted_by_name() {
                    writeln!(out, "{}", boat)?;
                }
            }
            'a' => {
                let label = "Please enter the boat data in CSV format";
                let Some(record) = prompt(&mut input, &mut out, label)? else {
                    return Ok(());
                };
                if let Err(e) = registry.add_from_record(&record) {
                    writeln!(out, "Error: {}. Boat not added.", e)?;
                }
            }
            'r' => {
                let label = "Please enter the boat name";
                let Some(name) = prompt(&mut input, &mut out, label)? else {
                    return Ok(());
                };
                match registry.remove_by_name(&name) {
                    Ok(_) => {}
                    Err(MarinaError::NotFound { .. }) => {
                        writeln!(out, "No boat with that name.")?
                    }
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
            }
            'p' => {
                if !take_payment(registry, &mut input, &mut out)? {
                    return Ok(());
                }
            }
            'm' => match registry.advance_month() {
                Ok(updates) => {
                    for update in updates {
                        writeln!(
                            out,
                            "Updated charges for '{}'. New amount owed: ${}",
                            update.name, update.balance
                        )?;
                    }
                }
                Err(e) => writeln!(out, "Error: {}. No charges applied.", e)?,
            },
            'x' => return Ok(()),
            other => writeln!(out, "Invalid option {}", other)?,
        }
    }
}

/// Handles the payment command. Returns `false` if input ran out.
fn take_payment<R: BufRead, W: Write>(
    registry: &mut Registry,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    let Some(name) = prompt(input, out, "Please enter the boat name")? else {
        return Ok(false);
    };
    if registry.find_by_name(&name).is_err() {
        writeln!(out, "No boat with that name.")?;
        return Ok(true);
    }

    let Some(amount) = prompt(input, out, "Please enter the amount to be paid")? else {
        return Ok(false);
    };
    let amount = match Money::from_str(&amount) {
        Ok(amount) => amount,
        Err(_) => {
            writeln!(out, "Invalid amount '{}'", amount)?;
            return Ok(true);
        }
    };

    match registry.accept_payment(&name, amount) {
        Ok(balance) => writeln!(out, "Payment accepted. New balance: ${}", balance)?,
        Err(MarinaError::PaymentExceedsBalance { owed, .. }) => {
            writeln!(out, "That is more than the amount owed, ${}", owed)?
        }
        Err(e) => writeln!(out, "Error: {}", e)?,
    }
    Ok(true)
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> Result<Option<String>> {
    write!(out, "{:<57}: ", label)?;
    out.flush()?;
    read_line(input)
}

/// Reads one trimmed line, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
