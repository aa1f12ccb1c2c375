//! The in-memory roster of boats.
//!
//! Boats are kept in insertion order. The roster is replaced wholesale by
//! [`Registry::load`] and written wholesale by [`Registry::save`].

use crate::billing;
use crate::boat::Boat;
use crate::codec::{self, BoatRecord, BoatRow};
use crate::error::{MarinaError, Result};
use crate::money::Money;
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// The outcome of billing one boat for a month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyCharge {
    pub name: String,
    pub charge: Money,
    pub balance: Money,
}

/// An ordered, capacity-bounded collection of boats with unique names.
///
/// Names are compared ignoring ASCII case everywhere: lookups, removal,
/// duplicate detection and sorted listing.
#[derive(Debug, Clone)]
pub struct Registry {
    boats: Vec<Boat>,
    capacity: usize,
}

impl Registry {
    /// Number of boats the marina holds unless configured otherwise.
    pub const DEFAULT_CAPACITY: usize = 120;

    /// Creates an empty registry with [`Registry::DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates an empty registry that holds at most `capacity` boats.
    pub fn with_capacity(capacity: usize) -> Self {
        Registry {
            boats: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.boats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boats.is_empty()
    }

    /// Boats in stored (insertion) order.
    pub fn iter(&self) -> impl Iterator<Item = &Boat> {
        self.boats.iter()
    }

    /// Reads roster lines into a new registry with default capacity.
    pub fn load<R: Read>(reader: R) -> Result<Self> {
        let mut registry = Self::new();
        registry.load_into(reader)?;
        Ok(registry)
    }

    /// Opens and loads the roster file at `path`.
    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let registry = Self::load(BufReader::new(file))?;
        info!("Loaded {} boats from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Replaces the current roster with the records read from `reader`.
    ///
    /// Records that fail to decode, duplicates and records beyond capacity
    /// are logged at warn level and skipped. A failure of the reader itself
    /// is returned as [`MarinaError::Io`] and leaves the roster as it was.
    pub fn load_into<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut loaded = Registry::with_capacity(self.capacity);

        for (row_idx, result) in csv_reader.records().enumerate() {
            let line = row_idx + 1;

            let record = match result {
                Ok(record) => record,
                Err(e) => match e.into_kind() {
                    csv::ErrorKind::Io(io_err) => return Err(io_err.into()),
                    kind => {
                        warn!(
                            "Line {}: CSV read error: {:?}. Skipping this entry.",
                            line, kind
                        );
                        continue;
                    }
                },
            };

            let boat = match BoatRecord::from_fields(record.iter()).and_then(|r| r.parse()) {
                Ok(boat) => boat,
                Err(e) => {
                    warn!("Line {}: {}. Skipping this entry.", line, e);
                    continue;
                }
            };

            if let Err(e) = loaded.add(boat) {
                warn!("Line {}: {}. Skipping this entry.", line, e);
            }
        }

        self.boats = loaded.boats;
        Ok(())
    }

    /// Writes every boat, in stored order, to `writer`.
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(writer);

        for boat in &self.boats {
            csv_writer.serialize(BoatRow::from(boat))?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Writes the roster to `path`, overwriting what was there.
    pub fn save_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.save(BufWriter::new(file))?;
        info!("Saved {} boats to {}", self.len(), path.display());
        Ok(())
    }

    /// Appends a boat.
    ///
    /// Fails with [`MarinaError::RegistryFull`] at capacity and with
    /// [`MarinaError::DuplicateName`] if the name is already taken.
    pub fn add(&mut self, boat: Boat) -> Result<()> {
        if self.boats.len() >= self.capacity {
            return Err(MarinaError::RegistryFull {
                capacity: self.capacity,
            });
        }

        if self.position(boat.name()).is_some() {
            return Err(MarinaError::DuplicateName {
                name: boat.name().to_string(),
            });
        }

        debug!("Added boat '{}'", boat.name());
        self.boats.push(boat);
        Ok(())
    }

    /// Decodes a roster line and appends the boat.
    ///
    /// Capacity is checked before the line is decoded.
    pub fn add_from_record(&mut self, line: &str) -> Result<()> {
        if self.boats.len() >= self.capacity {
            return Err(MarinaError::RegistryFull {
                capacity: self.capacity,
            });
        }

        let boat = codec::decode(line)?;
        self.add(boat)
    }

    /// Removes and returns the first boat named `name`.
    ///
    /// Remaining boats keep their relative order.
    pub fn remove_by_name(&mut self, name: &str) -> Result<Boat> {
        let index = self.position(name).ok_or_else(|| not_found(name))?;
        let boat = self.boats.remove(index);
        debug!("Removed boat '{}'", boat.name());
        Ok(boat)
    }

    /// Looks up a boat by name, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Result<&Boat> {
        self.boats
            .iter()
            .find(|b| b.is_named(name))
            .ok_or_else(|| not_found(name))
    }

    fn find_by_name_mut(&mut self, name: &str) -> Result<&mut Boat> {
        self.boats
            .iter_mut()
            .find(|b| b.is_named(name))
            .ok_or_else(|| not_found(name))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.boats.iter().position(|b| b.is_named(name))
    }

    /// Boats sorted by name, ignoring case.
    ///
    /// The sort is stable and leaves the stored order untouched.
    pub fn list_sorted_by_name(&self) -> Vec<&Boat> {
        let mut boats: Vec<&Boat> = self.boats.iter().collect();
        boats.sort_by_cached_key(|b| b.name().to_ascii_lowercase());
        boats
    }

    /// Takes a payment from the named boat and returns its new balance.
    pub fn accept_payment(&mut self, name: &str, amount: Money) -> Result<Money> {
        let boat = self.find_by_name_mut(name)?;
        let balance = billing::accept_payment(boat, amount)?;
        debug!(
            "Payment of {} accepted for '{}', balance {}",
            amount,
            boat.name(),
            balance
        );
        Ok(balance)
    }

    /// Bills every boat for one month, in stored order.
    ///
    /// Either every boat is billed or none is: if any balance would
    /// overflow, [`MarinaError::BalanceOverflow`] is returned before any
    /// balance changes.
    pub fn advance_month(&mut self) -> Result<Vec<MonthlyCharge>> {
        for boat in &self.boats {
            boat.balance_after(billing::monthly_charge(boat))?;
        }

        let mut charges = Vec::with_capacity(self.boats.len());
        for boat in &mut self.boats {
            let charge = billing::apply_monthly_charge(boat)?;
            debug!(
                "Charged '{}' {}, balance {}",
                boat.name(),
                charge,
                boat.amount_owed()
            );
            charges.push(MonthlyCharge {
                name: boat.name().to_string(),
                charge,
                balance: boat.amount_owed(),
            });
        }
        Ok(charges)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(name: &str) -> MarinaError {
    MarinaError::NotFound {
        name: name.trim().to_string(),
    }
}
