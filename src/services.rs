//! Service definitions for the SMS-Activate API.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Number variant, encoded as a suffix on availability keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NumberKind {
    /// Regular number that receives SMS for polling (`_0`).
    #[default]
    Regular,
    /// Number that forwards SMS to another number (`_1`).
    Forwarding,
}

impl NumberKind {
    pub fn suffix(self) -> &'static str {
        match self {
            NumberKind::Regular => "_0",
            NumberKind::Forwarding => "_1",
        }
    }
}

/// Platform the rented number is used to verify.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Service {
    /// Discord (code: "ds").
    Discord,
    /// Telegram (code: "tg").
    Telegram,
    /// WhatsApp (code: "wa").
    Whatsapp,
    /// Instagram/Threads (code: "ig").
    InstagramThreads,
    /// Facebook (code: "fb").
    Facebook,
    /// VKontakte (code: "vk").
    Vkontakte,
    /// Odnoklassniki (code: "ok").
    Odnoklassniki,
    /// Google/YouTube/Gmail (code: "go").
    Google,
    /// Other/custom service.
    Other { code: String },
}

impl Service {
    /// Service code as sent to `getNumber`.
    pub fn code(&self) -> &str {
        match self {
            Service::Discord => "ds",
            Service::Telegram => "tg",
            Service::Whatsapp => "wa",
            Service::InstagramThreads => "ig",
            Service::Facebook => "fb",
            Service::Vkontakte => "vk",
            Service::Odnoklassniki => "ok",
            Service::Google => "go",
            Service::Other { code } => code.as_str(),
        }
    }

    pub fn from_code<S: AsRef<str>>(code: S) -> Self {
        match code.as_ref() {
            "ds" => Service::Discord,
            "tg" => Service::Telegram,
            "wa" => Service::Whatsapp,
            "ig" => Service::InstagramThreads,
            "fb" => Service::Facebook,
            "vk" => Service::Vkontakte,
            "ok" => Service::Odnoklassniki,
            "go" => Service::Google,
            other => Service::Other {
                code: other.to_string(),
            },
        }
    }

    /// Key under which `getNumbersStatus` reports this service, e.g. `ds_0`.
    ///
    /// Only the availability lookup uses the suffixed form; `getNumber`
    /// expects the bare [`Service::code`].
    pub fn availability_key(&self, kind: NumberKind) -> String {
        format!("{}{}", self.code(), kind.suffix())
    }
}

impl Display for Service {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<&str> for Service {
    fn from(code: &str) -> Self {
        Service::from_code(code)
    }
}

impl FromStr for Service {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Service::from_code(s))
    }
}

impl Serialize for Service {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Service {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Service::from_code(s))
    }
}
