//! Roster line codec.
//!
//! One boat per line, five comma-separated fields with no quoting:
//!
//! ```text
//! name,lengthFeet,category,locationToken,amountOwed
//! ```
//!
//! A name or tag containing a comma cannot be represented; such a line
//! decodes as a malformed record.

use crate::boat::{Boat, LocationDetail, PlacementCategory};
use crate::error::{MarinaError, Result};
use crate::money::Money;
use serde::Serialize;
use std::str::FromStr;

/// Number of fields in a roster line.
pub const FIELD_COUNT: usize = 5;

/// Raw roster fields, split but not yet interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoatRecord<'a> {
    pub name: &'a str,
    pub length: &'a str,
    pub category: &'a str,
    pub location: &'a str,
    pub amount_owed: &'a str,
}

impl<'a> BoatRecord<'a> {
    /// Collects exactly [`FIELD_COUNT`] fields, trimming surrounding whitespace.
    pub fn from_fields<I>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields: Vec<&str> = fields.into_iter().map(str::trim).collect();
        match *fields.as_slice() {
            [name, length, category, location, amount_owed] => Ok(BoatRecord {
                name,
                length,
                category,
                location,
                amount_owed,
            }),
            _ => Err(MarinaError::malformed(format!(
                "expected {} fields, found {}",
                FIELD_COUNT,
                fields.len()
            ))),
        }
    }

    /// Interprets the fields as a boat.
    ///
    /// The category is resolved first; the location token is then read
    /// according to it.
    pub fn parse(&self) -> Result<Boat> {
        let category = PlacementCategory::from_name(self.category);
        if category == PlacementCategory::None {
            return Err(MarinaError::InvalidPlacement {
                token: self.category.to_string(),
            });
        }

        let length_feet = self.length.parse::<u32>().map_err(|_| {
            MarinaError::malformed(format!("length '{}' is not a whole number", self.length))
        })?;
        let location = self.parse_location(category)?;
        let amount_owed = Money::from_str(self.amount_owed).map_err(|_| {
            MarinaError::malformed(format!("amount owed '{}' is not a number", self.amount_owed))
        })?;

        Boat::new(self.name, length_feet, location, amount_owed).map_err(|e| match e {
            MarinaError::InvalidBoat { message } => MarinaError::MalformedRecord { message },
            other => other,
        })
    }

    fn parse_location(&self, category: PlacementCategory) -> Result<LocationDetail> {
        let token = self.location;
        let number = || {
            token.parse::<u32>().map_err(|_| {
                MarinaError::malformed(format!("location '{}' is not a whole number", token))
            })
        };

        match category {
            PlacementCategory::Slip => Ok(LocationDetail::Slip(number()?)),
            PlacementCategory::Storage => Ok(LocationDetail::Storage(number()?)),
            PlacementCategory::Land => token
                .chars()
                .next()
                .map(LocationDetail::Land)
                .ok_or_else(|| MarinaError::malformed("bay letter is empty")),
            PlacementCategory::Trailer => LocationDetail::trailer(token),
            PlacementCategory::None => Err(MarinaError::InvalidPlacement {
                token: self.category.to_string(),
            }),
        }
    }
}

/// Decodes one roster line into a boat.
pub fn decode(line: &str) -> Result<Boat> {
    let line = line.trim_end_matches(['\r', '\n']);
    BoatRecord::from_fields(line.split(','))?.parse()
}

/// A boat laid out as one roster row, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoatRow<'a> {
    pub name: &'a str,
    pub length_feet: u32,
    pub category: &'static str,
    pub location: String,
    pub amount_owed: Money,
}

impl<'a> From<&'a Boat> for BoatRow<'a> {
    fn from(boat: &'a Boat) -> Self {
        let location = match boat.location() {
            LocationDetail::Slip(number) | LocationDetail::Storage(number) => number.to_string(),
            LocationDetail::Land(bay) => bay.to_string(),
            LocationDetail::Trailer(tag) => tag.clone(),
        };

        BoatRow {
            name: boat.name(),
            length_feet: boat.length_feet(),
            category: boat.placement().as_str(),
            location,
            amount_owed: boat.amount_owed(),
        }
    }
}

/// Encodes a boat as one roster line, without a line terminator.
pub fn encode(boat: &Boat) -> String {
    let row = BoatRow::from(boat);
    format!(
        "{},{},{},{},{}",
        row.name, row.length_feet, row.category, row.location, row.amount_owed
    )
}
