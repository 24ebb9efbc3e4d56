//! Readable key names for the settings, events and stats blocks.
//!
//! This is a one-way display transform: keys without a table entry keep
//! their numeric form, and a translated tree is not meant to be encoded
//! back into a save.

use std::borrow::Cow;

use crate::node::Dict;
use crate::tables::RenameTables;

/// Settings and unlocked icons.
pub const SETTINGS_BLOCK: &str = "valueKeeper";

/// Game events.
pub const EVENTS_BLOCK: &str = "unlockValueKeeper";

/// Player statistics.
pub const STATS_BLOCK: &str = "GS_value";

/// Number of keys renamed in each block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslateSummary {
    pub settings: usize,
    pub events: usize,
    pub stats: usize,
}

impl TranslateSummary {
    pub fn total(&self) -> usize {
        self.settings + self.events + self.stats
    }
}

/// Applies [`RenameTables`] to the known blocks of a parsed save.
#[derive(Debug, Clone, Copy)]
pub struct KeyTranslator {
    tables: &'static RenameTables,
}

impl Default for KeyTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyTranslator {
    pub fn new() -> Self {
        Self {
            tables: RenameTables::get(),
        }
    }

    /// Rename keys in place in the settings, events and stats blocks of
    /// `root`.
    ///
    /// Blocks are found under their technical name or, if the tree was parsed
    /// with reserved-key renaming, under their readable name. Missing blocks
    /// are skipped.
    pub fn translate(&self, root: &mut Dict) -> TranslateSummary {
        let summary = TranslateSummary {
            settings: self.translate_block(root, SETTINGS_BLOCK, |k| self.settings_key(k)),
            events: self.translate_block(root, EVENTS_BLOCK, |k| self.event_key(k)),
            stats: self.translate_block(root, STATS_BLOCK, |k| self.stat_key(k)),
        };

        log::debug!(
            "translated {} settings, {} event and {} stat keys",
            summary.settings,
            summary.events,
            summary.stats
        );

        summary
    }

    fn translate_block<F>(&self, root: &mut Dict, block: &str, rename: F) -> usize
    where
        F: Fn(&str) -> Cow<'_, str>,
    {
        let name = if root.contains_key(block) {
            block
        } else {
            match self.tables.reserved_key(block) {
                Some(readable) => readable,
                None => return 0,
            }
        };

        match root.get_mut(name).and_then(|node| node.as_dict_mut()) {
            Some(dict) => dict.rename_keys(|key| match rename(key) {
                Cow::Owned(new_key) => Some(new_key),
                Cow::Borrowed(_) => None,
            }),
            None => {
                log::debug!("no {} block to translate", block);
                0
            }
        }
    }

    /// Readable name for a settings-block key.
    ///
    /// `gv_NNNN` becomes its game variable name; icon and color keys such as
    /// `bird_12` become `ufo_12`.
    pub fn settings_key<'k>(&self, key: &'k str) -> Cow<'k, str> {
        let Some((prefix, index)) = split_numeric_suffix(key) else {
            return Cow::Borrowed(key);
        };

        if prefix == "gv" {
            if index.len() == 4 {
                if let Some(name) = index.parse().ok().and_then(|n| self.tables.game_variable(n)) {
                    return Cow::Owned(name.to_string());
                }
            }
            log::trace!("no game variable name for {}", key);
            return Cow::Borrowed(key);
        }

        match self.tables.icon_prefix(prefix) {
            Some(readable) if readable != prefix => Cow::Owned(format!("{readable}_{index}")),
            _ => Cow::Borrowed(key),
        }
    }

    /// Readable name for an events-block key (`ugv_N`).
    pub fn event_key<'k>(&self, key: &'k str) -> Cow<'k, str> {
        match split_numeric_suffix(key) {
            Some(("ugv", index)) => index
                .parse()
                .ok()
                .and_then(|n| self.tables.game_event(n))
                .map_or(Cow::Borrowed(key), |name| Cow::Owned(name.to_string())),
            _ => Cow::Borrowed(key),
        }
    }

    /// Readable name for a stats-block key.
    ///
    /// Numeric keys map to stat names. Coin keys (`unique_<level>` or
    /// `unique_<level>_<coin>`) become `<Level-Name>-coin<coin>`, where the
    /// coin number defaults to the level index.
    pub fn stat_key<'k>(&self, key: &'k str) -> Cow<'k, str> {
        if let Some(name) = key.parse().ok().and_then(|n| self.tables.stat_key(n)) {
            return Cow::Owned(name.to_string());
        }

        if key.contains("unique") {
            let mut parts = key.split('_').skip(1);
            let level = parts.next().and_then(|p| p.parse::<u32>().ok());
            let coin = parts.next().filter(|p| is_numeric(p));

            if let Some((index, name)) = level.and_then(|n| Some((n, self.tables.level_name(n)?))) {
                let coin = coin.map_or_else(|| index.to_string(), str::to_string);
                return Cow::Owned(format!("{}-coin{}", name.replace(' ', "-"), coin));
            }
        }

        Cow::Borrowed(key)
    }
}

/// Split `prefix_123` into `("prefix", "123")`.
fn split_numeric_suffix(key: &str) -> Option<(&str, &str)> {
    let (prefix, index) = key.rsplit_once('_')?;
    (!prefix.is_empty() && is_numeric(index)).then_some((prefix, index))
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, Scalar};

    fn block(keys: &[&str]) -> Dict {
        keys.iter()
            .map(|k| (k.to_string(), Node::Leaf(Scalar::text("1"))))
            .collect()
    }

    #[test]
    fn test_settings_keys() {
        let translator = KeyTranslator::new();
        assert_eq!(translator.settings_key("gv_0001"), "editor.followPlayer");
        assert_eq!(translator.settings_key("gv_9999"), "gv_9999");
        assert_eq!(translator.settings_key("gv_1"), "gv_1");
        assert_eq!(translator.settings_key("c0_3"), "primarycolor_3");
        assert_eq!(translator.settings_key("c1_12"), "secondarycolor_12");
        assert_eq!(translator.settings_key("i_5"), "cube_5");
        assert_eq!(translator.settings_key("bird_7"), "ufo_7");
        assert_eq!(translator.settings_key("dart_2"), "wave_2");
        assert_eq!(translator.settings_key("special_4"), "trail_4");
        assert_eq!(translator.settings_key("death_9"), "deatheffect_9");
        assert_eq!(translator.settings_key("ship_3"), "ship_3");
        assert_eq!(translator.settings_key("unknown_3"), "unknown_3");
        assert_eq!(translator.settings_key("plain"), "plain");
    }

    #[test]
    fn test_event_keys() {
        let translator = KeyTranslator::new();
        assert_eq!(translator.event_key("ugv_1"), "unlockedSecretVault");
        assert_eq!(translator.event_key("ugv_4000"), "ugv_4000");
        assert_eq!(translator.event_key("gv_0001"), "gv_0001");
    }

    #[test]
    fn test_stat_keys() {
        let translator = KeyTranslator::new();
        assert_eq!(translator.stat_key("6"), "stars");
        assert_eq!(translator.stat_key("999"), "999");
        assert_eq!(translator.stat_key("unique_1_2"), "Stereo-Madness-coin2");
        assert_eq!(translator.stat_key("unique_3"), "Polargeist-coin3");
        assert_eq!(translator.stat_key("unique_500_1"), "unique_500_1");
        assert_eq!(translator.stat_key("unique_secretB03"), "unique_secretB03");
    }

    #[test]
    fn test_translate_tree() {
        let mut root = Dict::new();
        root.insert("playerName", Scalar::text("RobTop"));
        root.insert(SETTINGS_BLOCK, block(&["gv_0001", "gv_9999", "bird_2"]));
        root.insert(EVENTS_BLOCK, block(&["ugv_2"]));
        root.insert(STATS_BLOCK, block(&["1", "unique_22_1"]));

        let summary = KeyTranslator::new().translate(&mut root);
        assert_eq!(
            summary,
            TranslateSummary {
                settings: 2,
                events: 1,
                stats: 2
            }
        );
        assert_eq!(summary.total(), 5);

        let settings = root.get(SETTINGS_BLOCK).and_then(Node::as_dict).unwrap();
        assert_eq!(
            settings.keys().collect::<Vec<_>>(),
            vec!["editor.followPlayer", "gv_9999", "ufo_2"]
        );

        let stats = root.get(STATS_BLOCK).and_then(Node::as_dict).unwrap();
        assert_eq!(stats.keys().collect::<Vec<_>>(), vec!["jumps", "Dash-coin1"]);

        // Keys outside the blocks are untouched.
        assert!(root.contains_key("playerName"));
    }

    #[test]
    fn test_translate_readable_block_names() {
        let mut root = Dict::new();
        root.insert("gameVariables", block(&["gv_0026"]));
        root.insert("stats", block(&["2"]));

        let summary = KeyTranslator::new().translate(&mut root);
        assert_eq!(summary.total(), 2);

        let variables = root.get("gameVariables").and_then(Node::as_dict).unwrap();
        assert!(variables.contains_key("autoRetry"));
    }

    #[test]
    fn test_translate_missing_blocks() {
        let mut root = Dict::new();
        root.insert(SETTINGS_BLOCK, Scalar::integer(1));
        assert_eq!(KeyTranslator::new().translate(&mut root).total(), 0);
    }
}
