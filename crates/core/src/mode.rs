//! Output modes and their capability table.
//!
//! A mode is a fixed output policy: which decoration keys the finalize step
//! adds, whether the result is split into two channels, and whether link
//! hints are exposed instead of in-document decoration. Capabilities are a
//! pure function of the mode value.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three fixed output modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mode {
    /// Embed alias, version, and identifier decoration keys in the document.
    #[default]
    StrictSeo,
    /// Duplicate the document into a primary and an alternate channel.
    SplitChannels,
    /// Keep the document undecorated and expose rel/Link header hints.
    StandardsHeader,
}

/// What a mode is allowed to do to the finalized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeCapabilities {
    /// Adds the `additionalType` decoration key.
    pub uses_alias: bool,
    /// Adds the `schemaVersion` decoration key.
    pub uses_version: bool,
    /// Adds the `identifier` decoration key.
    pub uses_identifier: bool,
    /// Adds the PropertyValue-shaped `additionalProperty` block.
    pub uses_property_value: bool,
    /// Output becomes a `{primary, alternate}` pair.
    pub splits_channels: bool,
    /// The alternate channel carries profile metadata in its context key.
    pub includes_profile_metadata: bool,
    /// An HTML rel hint and an HTTP Link header hint accompany the output.
    pub exposes_link_hints: bool,
}

impl Mode {
    /// The capability tuple for this mode. Pure lookup, no hidden state.
    pub const fn capabilities(self) -> ModeCapabilities {
        match self {
            Mode::StrictSeo => ModeCapabilities {
                uses_alias: true,
                uses_version: true,
                uses_identifier: true,
                uses_property_value: false,
                splits_channels: false,
                includes_profile_metadata: false,
                exposes_link_hints: false,
            },
            Mode::SplitChannels => ModeCapabilities {
                uses_alias: false,
                uses_version: false,
                uses_identifier: false,
                uses_property_value: true,
                splits_channels: true,
                includes_profile_metadata: true,
                exposes_link_hints: false,
            },
            Mode::StandardsHeader => ModeCapabilities {
                uses_alias: false,
                uses_version: false,
                uses_identifier: false,
                uses_property_value: false,
                splits_channels: false,
                includes_profile_metadata: false,
                exposes_link_hints: true,
            },
        }
    }

    /// All modes, for iteration in diagnostics and CLI help.
    pub const ALL: [Mode; 3] = [Mode::StrictSeo, Mode::SplitChannels, Mode::StandardsHeader];

    /// The canonical string name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::StrictSeo => "strict-seo",
            Mode::SplitChannels => "split-channels",
            Mode::StandardsHeader => "standards-header",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict-seo" => Ok(Mode::StrictSeo),
            "split-channels" => Ok(Mode::SplitChannels),
            "standards-header" => Ok(Mode::StandardsHeader),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}

impl TryFrom<String> for Mode {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_round_trips_through_strings() {
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn unknown_mode_is_an_error() {
        let err = "loose-seo".parse::<Mode>().unwrap_err();
        assert!(err.to_string().contains("loose-seo"));
    }

    #[test]
    fn only_split_channels_splits() {
        assert!(Mode::SplitChannels.capabilities().splits_channels);
        assert!(!Mode::StrictSeo.capabilities().splits_channels);
        assert!(!Mode::StandardsHeader.capabilities().splits_channels);
    }

    #[test]
    fn only_standards_header_exposes_hints() {
        assert!(Mode::StandardsHeader.capabilities().exposes_link_hints);
        assert!(!Mode::StrictSeo.capabilities().exposes_link_hints);
        assert!(!Mode::SplitChannels.capabilities().exposes_link_hints);
    }

    #[test]
    fn strict_seo_embeds_all_three_decoration_keys() {
        let caps = Mode::StrictSeo.capabilities();
        assert!(caps.uses_alias && caps.uses_version && caps.uses_identifier);
        assert!(!caps.uses_property_value);
    }

    #[test]
    fn serde_uses_kebab_names() {
        let json = serde_json::to_string(&Mode::SplitChannels).unwrap();
        assert_eq!(json, "\"split-channels\"");
        let back: Mode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Mode::SplitChannels);
    }
}
