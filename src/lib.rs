//! # Marina Ledger
//!
//! Tracks marina customers ("boats"), where each one is kept and what they
//! owe, persisting the roster to a plain comma-separated file between runs.
//!
//! ## Design Principles
//!
//! - **Tagged placement**: a boat's location detail is an enum, so its
//!   payload always matches its placement category
//! - **Exact money**: two-decimal amounts via `rust_decimal`
//! - **Non-fatal loading**: bad roster lines are logged and skipped
//! - **Non-mutating queries**: the sorted listing never reorders the roster
//!
//! ## Example
//!
//! ```
//! use marina_ledger::{billing, Registry};
//! use std::io::Cursor;
//!
//! let csv = "Alice,20,slip,5,100.00\nBob,30,land,B,0.00\n";
//! let registry = Registry::load(Cursor::new(csv)).unwrap();
//!
//! let alice = registry.find_by_name("alice").unwrap();
//! assert_eq!(billing::monthly_charge(alice).to_string(), "250.00");
//! ```

pub mod billing;
pub mod boat;
pub mod codec;
pub mod error;
pub mod money;
pub mod registry;

pub use boat::{Boat, LocationDetail, PlacementCategory};
pub use codec::{decode, encode};
pub use error::{MarinaError, Result};
pub use money::Money;
pub use registry::{MonthlyCharge, Registry};
