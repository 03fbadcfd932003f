//! Localized messages for validation error tags.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ErrorTag;

/// User interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Fi,
    Sv,
    En,
}

/// Message shown next to an input that failed with `tag`.
pub fn message(tag: ErrorTag, lang: Lang) -> &'static str {
    match (tag, lang) {
        (ErrorTag::Required, Lang::Fi) => "Pakollinen tieto",
        (ErrorTag::Required, Lang::Sv) => "Obligatorisk uppgift",
        (ErrorTag::Required, Lang::En) => "Required",

        (ErrorTag::TimeFormat, Lang::Fi) => "Tarkista aika tai aikaväli",
        (ErrorTag::TimeFormat, Lang::Sv) => "Kontrollera tiden eller tidsintervallet",
        (ErrorTag::TimeFormat, Lang::En) => "Check the time or time range",

        (ErrorTag::InvalidOption, Lang::Fi) => "Valitse jokin vaihtoehdoista",
        (ErrorTag::InvalidOption, Lang::Sv) => "Välj ett av alternativen",
        (ErrorTag::InvalidOption, Lang::En) => "Choose one of the options",

        (ErrorTag::Shape, Lang::Fi) => "Virheellinen arvo",
        (ErrorTag::Shape, Lang::Sv) => "Ogiltigt värde",
        (ErrorTag::Shape, Lang::En) => "Invalid value",
    }
}
