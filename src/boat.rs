//! Boat record model.
//!
//! A boat's placement and its location detail live in one enum, so a slip
//! number can never be attached to a boat kept on a trailer.

use crate::error::{MarinaError, Result};
use crate::money::Money;
use std::fmt;

/// Longest boat name accepted, in characters.
pub const MAX_NAME_LEN: usize = 127;

/// Longest trailer tag accepted, in characters.
pub const MAX_TAG_LEN: usize = 19;

/// Kind of storage a boat occupies.
///
/// `None` is the sentinel returned for an unrecognised name; it is never
/// stored on a [`Boat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementCategory {
    Slip,
    Land,
    Trailer,
    Storage,
    None,
}

impl PlacementCategory {
    /// Parses a category name, ignoring ASCII case.
    ///
    /// Both `trailor` (the canonical spelling) and `trailer` are accepted.
    /// Anything else maps to [`PlacementCategory::None`].
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if name.eq_ignore_ascii_case("slip") {
            PlacementCategory::Slip
        } else if name.eq_ignore_ascii_case("land") {
            PlacementCategory::Land
        } else if name.eq_ignore_ascii_case("trailor") || name.eq_ignore_ascii_case("trailer") {
            PlacementCategory::Trailer
        } else if name.eq_ignore_ascii_case("storage") {
            PlacementCategory::Storage
        } else {
            PlacementCategory::None
        }
    }

    /// Canonical lowercase name, as written to the roster file.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlacementCategory::Slip => "slip",
            PlacementCategory::Land => "land",
            PlacementCategory::Trailer => "trailor",
            PlacementCategory::Storage => "storage",
            PlacementCategory::None => "no_place",
        }
    }
}

impl fmt::Display for PlacementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where within its placement a boat sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationDetail {
    /// Slip number.
    Slip(u32),

    /// Bay letter on land.
    Land(char),

    /// Trailer licence tag.
    Trailer(String),

    /// Storage space number.
    Storage(u32),
}

impl LocationDetail {
    /// Builds a trailer location from a tag, trimming surrounding whitespace.
    pub fn trailer(tag: &str) -> Result<Self> {
        let location = LocationDetail::Trailer(tag.trim().to_string());
        location.validate()?;
        Ok(location)
    }

    /// Checks that the payload can be written to a roster line and read back.
    ///
    /// A trailer tag must be non-empty, at most [`MAX_TAG_LEN`] characters,
    /// free of commas and without surrounding whitespace. A bay letter must
    /// be visible and not a comma.
    pub fn validate(&self) -> Result<()> {
        match self {
            LocationDetail::Slip(_) | LocationDetail::Storage(_) => Ok(()),
            LocationDetail::Land(bay) => {
                if bay.is_whitespace() || bay.is_control() || *bay == ',' {
                    return Err(MarinaError::malformed(format!(
                        "bay letter {:?} cannot be stored",
                        bay
                    )));
                }
                Ok(())
            }
            LocationDetail::Trailer(tag) => {
                if tag.is_empty() {
                    return Err(MarinaError::malformed("trailer tag is empty"));
                }
                if tag.chars().count() > MAX_TAG_LEN {
                    return Err(MarinaError::malformed(format!(
                        "trailer tag '{}' is longer than {} characters",
                        tag, MAX_TAG_LEN
                    )));
                }
                if tag.trim() != tag || tag.contains(',') || tag.chars().any(char::is_control) {
                    return Err(MarinaError::malformed(format!(
                        "trailer tag {:?} cannot be stored",
                        tag
                    )));
                }
                Ok(())
            }
        }
    }

    /// The placement category this detail belongs to.
    pub fn category(&self) -> PlacementCategory {
        match self {
            LocationDetail::Slip(_) => PlacementCategory::Slip,
            LocationDetail::Land(_) => PlacementCategory::Land,
            LocationDetail::Trailer(_) => PlacementCategory::Trailer,
            LocationDetail::Storage(_) => PlacementCategory::Storage,
        }
    }
}

/// A marina customer.
///
/// # Invariants
///
/// - `name` is non-empty and at most [`MAX_NAME_LEN`] characters
/// - `length_feet > 0`
/// - `location` passes [`LocationDetail::validate`]
/// - `amount_owed` never goes negative
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boat {
    name: String,
    length_feet: u32,
    location: LocationDetail,
    amount_owed: Money,
}

impl Boat {
    /// Creates a boat, validating the name, length and starting balance.
    pub fn new(
        name: &str,
        length_feet: u32,
        location: LocationDetail,
        amount_owed: Money,
    ) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MarinaError::InvalidBoat {
                message: "name is empty".to_string(),
            });
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(MarinaError::InvalidBoat {
                message: format!("name is longer than {} characters", MAX_NAME_LEN),
            });
        }
        if length_feet == 0 {
            return Err(MarinaError::InvalidBoat {
                message: format!("length of '{}' must be positive", name),
            });
        }
        location.validate()?;
        if amount_owed.is_negative() {
            return Err(MarinaError::InvalidBoat {
                message: format!("amount owed by '{}' is negative", name),
            });
        }

        Ok(Boat {
            name: name.to_string(),
            length_feet,
            location,
            amount_owed,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length_feet(&self) -> u32 {
        self.length_feet
    }

    pub fn location(&self) -> &LocationDetail {
        &self.location
    }

    /// Placement category, derived from the location detail.
    pub fn placement(&self) -> PlacementCategory {
        self.location.category()
    }

    pub fn amount_owed(&self) -> Money {
        self.amount_owed
    }

    /// Returns `true` if `name` matches this boat's name, ignoring ASCII case.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Adds `amount` to the balance.
    ///
    /// Fails with [`MarinaError::BalanceOverflow`], leaving the balance
    /// untouched, if the sum cannot be represented.
    pub(crate) fn charge(&mut self, amount: Money) -> Result<Money> {
        self.amount_owed = self.balance_after(amount)?;
        Ok(self.amount_owed)
    }

    /// The balance `amount` more would produce, without applying it.
    pub(crate) fn balance_after(&self, amount: Money) -> Result<Money> {
        self.amount_owed
            .checked_add(amount)
            .ok_or_else(|| MarinaError::BalanceOverflow {
                name: self.name.clone(),
            })
    }

    /// Subtracts `amount` from the balance.
    ///
    /// Returns `false`, leaving the balance untouched, if `amount` is more
    /// than what is owed.
    pub(crate) fn pay(&mut self, amount: Money) -> bool {
        if amount > self.amount_owed {
            return false;
        }

        self.amount_owed -= amount;
        true
    }
}

/// One inventory line: name, length, placement, location and balance.
impl fmt::Display for Boat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<20} {:>3}' {} ",
            self.name,
            self.length_feet,
            self.placement()
        )?;
        match &self.location {
            LocationDetail::Slip(number) | LocationDetail::Storage(number) => {
                write!(f, "# {:>2}   ", number)?
            }
            LocationDetail::Land(bay) => write!(f, "    {}   ", bay)?,
            LocationDetail::Trailer(tag) => write!(f, "{}   ", tag)?,
        }
        write!(f, "Owes ${}", self.amount_owed)
    }
}
