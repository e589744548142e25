//! Country pools served by the SMS-Activate API.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// Error when converting a raw country id.
#[derive(Debug, Clone, Error)]
#[error("Unknown SMS-Activate country id {id}")]
pub struct UnknownCountryId {
    pub id: u8,
}

/// Number pool identified by the provider's numeric country id.
///
/// The discriminants are the ids sent on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Country {
    #[default]
    Russia = 0,
    Indonesia = 6,
    Ukraine = 1,
    Kazakhstan = 2,
}

impl Country {
    /// Every country, in the order the fallback search probes them.
    pub const ALL: [Country; 4] = [
        Country::Russia,
        Country::Indonesia,
        Country::Ukraine,
        Country::Kazakhstan,
    ];

    /// Numeric id for the API.
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Country::Russia => "Russia",
            Country::Indonesia => "Indonesia",
            Country::Ukraine => "Ukraine",
            Country::Kazakhstan => "Kazakhstan",
        }
    }
}

impl TryFrom<u8> for Country {
    type Error = UnknownCountryId;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Country::ALL
            .into_iter()
            .find(|country| country.code() == id)
            .ok_or(UnknownCountryId { id })
    }
}

impl Display for Country {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.code())
    }
}

impl Serialize for Country {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Country {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let id = u8::deserialize(d)?;
        Country::try_from(id).map_err(de::Error::custom)
    }
}
