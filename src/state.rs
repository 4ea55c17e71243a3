//! Per-connection session state.
//!
//! [`SessionState`] holds what the server has told us so far: the ISUPPORT
//! table and the set of enabled capabilities. It starts from fixed defaults
//! and is updated by the [`Parser`](crate::message::Parser) as a side effect
//! of decoding 005 and `CAP ACK` lines. It does no I/O and has no internal
//! locking; share it across threads only behind your own synchronization.
//!
//! # Example
//!
//! ```
//! use slirc_support::state::SessionState;
//!
//! let state = SessionState::default();
//! assert!(state.is_channel("#rust"));
//! assert!(!state.is_channel("&local"));
//! assert_eq!(state.prefix_display('o'), Some('@'));
//! ```

use std::collections::{BTreeMap, BTreeSet};

use crate::caps::CapModifier;
use crate::casemap::CaseMapping;
use crate::isupport::{default_isupport, ISupportUpdate, ISupportValue, Limit};
use crate::mode::ChanModes;

/// The ISUPPORT table and enabled capabilities of one connection.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    isupport: BTreeMap<String, ISupportValue>,
    capabilities: BTreeSet<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            isupport: default_isupport(),
            capabilities: BTreeSet::new(),
        }
    }
}

impl SessionState {
    /// Fresh state with the default ISUPPORT table and no capabilities.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current ISUPPORT table.
    pub fn isupport(&self) -> &BTreeMap<String, ISupportValue> {
        &self.isupport
    }

    /// The enabled capabilities.
    pub fn capabilities(&self) -> &BTreeSet<String> {
        &self.capabilities
    }

    /// Look up one ISUPPORT value.
    pub fn get(&self, name: &str) -> Option<&ISupportValue> {
        self.isupport.get(name)
    }

    /// True if `capability` is enabled. Case-sensitive.
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }

    /// Merge a 005 reply into the table.
    ///
    /// Keys in `update.values` overwrite existing entries, keys in
    /// `update.removed` are dropped, and everything else is left alone.
    pub fn merge_isupport(&mut self, update: &ISupportUpdate) {
        for name in &update.removed {
            self.isupport.remove(name);
        }
        for (name, value) in &update.values {
            self.isupport.insert(name.clone(), value.clone());
        }
        tracing::trace!(
            set = update.values.len(),
            removed = update.removed.len(),
            "merged ISUPPORT"
        );
    }

    /// Apply the modifiers of a `CAP ACK` reply to the enabled set.
    ///
    /// Modifiers are applied in order, so `-=foo` followed by `~foo` in the
    /// same list both take effect and the last one wins.
    pub fn apply_cap_ack(&mut self, capabilities: &BTreeMap<String, Vec<CapModifier>>) {
        for (name, modifiers) in capabilities {
            for modifier in modifiers {
                match modifier {
                    CapModifier::Disable => {
                        self.capabilities.remove(name);
                    }
                    CapModifier::Enable => {
                        self.capabilities.insert(name.clone());
                    }
                    CapModifier::Sticky => {}
                }
            }
        }
    }

    /// The channel-type characters (`CHANTYPES`).
    pub fn chantypes(&self) -> BTreeSet<char> {
        self.isupport
            .get("CHANTYPES")
            .and_then(ISupportValue::as_chars)
            .cloned()
            .unwrap_or_default()
    }

    /// True if `target` starts with a channel-type character.
    pub fn is_channel(&self, target: &str) -> bool {
        match (target.chars().next(), self.isupport.get("CHANTYPES")) {
            (Some(first), Some(ISupportValue::Chars(types))) => types.contains(&first),
            _ => false,
        }
    }

    /// The `PREFIX` table as ordered `(mode, display)` pairs.
    pub fn prefixes(&self) -> &[(char, char)] {
        match self.isupport.get("PREFIX") {
            Some(ISupportValue::Prefix(pairs)) => pairs,
            _ => &[],
        }
    }

    /// The display character for a membership mode, e.g. `o` → `@`.
    pub fn prefix_display(&self, mode: char) -> Option<char> {
        self.prefixes()
            .iter()
            .find(|(m, _)| *m == mode)
            .map(|(_, d)| *d)
    }

    /// The membership mode letters from `PREFIX`.
    pub fn prefix_modes(&self) -> Vec<char> {
        self.prefixes().iter().map(|(m, _)| *m).collect()
    }

    /// The `CHANMODES` classification, or the default when unset.
    pub fn chanmodes(&self) -> ChanModes {
        match self.isupport.get("CHANMODES") {
            Some(ISupportValue::ChanModes(modes)) => modes.clone(),
            _ => ChanModes::default(),
        }
    }

    /// The server's casemapping.
    ///
    /// An unrecognized `CASEMAPPING` value falls back to `rfc1459`.
    pub fn casemapping(&self) -> CaseMapping {
        let Some(name) = self.isupport.get("CASEMAPPING").and_then(ISupportValue::as_str) else {
            return CaseMapping::default();
        };
        name.parse().unwrap_or_else(|_| {
            tracing::debug!(casemapping = name, "unsupported CASEMAPPING, using rfc1459");
            CaseMapping::default()
        })
    }

    /// A numeric limit such as `NICKLEN`. Absent keys are unbounded.
    pub fn limit(&self, name: &str) -> Limit {
        self.isupport
            .get(name)
            .and_then(ISupportValue::as_limit)
            .unwrap_or(Limit::Unbounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::parse_cap_reply;
    use crate::isupport::parse_isupport;

    #[test]
    fn test_defaults() {
        let state = SessionState::new();
        assert!(state.capabilities().is_empty());
        assert_eq!(state.chantypes(), BTreeSet::from(['#']));
        assert_eq!(state.prefix_modes(), vec!['o', 'v']);
        assert_eq!(state.chanmodes(), ChanModes::default());
        assert_eq!(state.casemapping(), CaseMapping::Rfc1459);
        assert_eq!(state.limit("NICKLEN"), Limit::Unbounded);
        assert_eq!(state.limit("MODES"), Limit::Bounded(1));
    }

    #[test]
    fn test_merge_only_touches_given_keys() {
        let mut state = SessionState::new();
        state.merge_isupport(&parse_isupport([
            "nick",
            "CHANTYPES=#&",
            "NICKLEN=16",
            "CASEMAPPING=ascii",
            "are supported by this server",
        ]));
        assert!(state.is_channel("&local"));
        assert_eq!(state.limit("NICKLEN"), Limit::Bounded(16));
        assert_eq!(state.casemapping(), CaseMapping::Ascii);
        assert_eq!(state.limit("MODES"), Limit::Bounded(1));
        assert_eq!(state.prefix_display('v'), Some('+'));
    }

    #[test]
    fn test_merge_removal() {
        let mut state = SessionState::new();
        state.merge_isupport(&parse_isupport(["nick", "-MONITOR"]));
        assert!(state.get("MONITOR").is_none());
    }

    #[test]
    fn test_unknown_casemapping_falls_back() {
        let mut state = SessionState::new();
        state.merge_isupport(&parse_isupport(["nick", "CASEMAPPING=rfc7613"]));
        assert_eq!(state.casemapping(), CaseMapping::Rfc1459);
    }

    #[test]
    fn test_cap_ack() {
        let mut state = SessionState::new();
        state.apply_cap_ack(&parse_cap_reply("multi-prefix identify-msg"));
        assert!(state.has_capability("multi-prefix"));
        assert!(state.has_capability("identify-msg"));
        assert!(!state.has_capability("Multi-Prefix"));

        state.apply_cap_ack(&parse_cap_reply("-identify-msg =sasl"));
        assert!(!state.has_capability("identify-msg"));
        assert!(!state.has_capability("sasl"));
        assert!(state.has_capability("multi-prefix"));
    }

    #[test]
    fn test_is_channel_empty_target() {
        assert!(!SessionState::new().is_channel(""));
    }
}
