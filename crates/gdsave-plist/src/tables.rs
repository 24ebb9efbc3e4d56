//! Static rename tables.
//!
//! Save files name most entries by numeric suffix (`gv_0026`, `ugv_3`, stat
//! `"6"`). These tables map the suffixes to readable names. They are
//! incomplete by nature; unknown suffixes stay as they are.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

/// Reserved-key target meaning "drop this entry".
pub const UNUSED_KEY: &str = "[unused]";

/// Top-level technical keys and their readable names.
const RESERVED_KEYS: &[(&str, &str)] = &[
    ("valueKeeper", "gameVariables"),
    ("unlockValueKeeper", "unlocks"),
    ("customObjectDict", "customObjects"),
    ("bgVolume", "musicVolume"),
    ("sfxVolume", "sfxVolume"),
    ("playerUDID", "udid"),
    ("playerName", "username"),
    ("playerUserID", "userID"),
    ("playerFrame", "cube"),
    ("playerShip", "ship"),
    ("playerBall", "ball"),
    ("playerBird", "ufo"),
    ("playerDart", "wave"),
    ("playerRobot", "robot"),
    ("playerSpider", "spider"),
    ("playerColor", "primaryColor"),
    ("playerColor2", "secondaryColor"),
    ("playerStreak", "trail"),
    ("playerDeathEffect", "deathEffect"),
    ("playerIconType", "iconType"),
    ("playerGlow", "glow"),
    ("secretNumber", UNUSED_KEY),
    ("hasRP", "moderator"),
    ("GS_value", "stats"),
    ("GS_completed", "completedLevels"),
    ("GS_3", "userCoins"),
    ("GS_4", "bronzeUserCoins"),
    ("GS_5", "mapPackStars"),
    ("GS_6", "shopPurchases"),
    ("GS_7", "levelProgress"),
    ("GS_8", UNUSED_KEY),
    ("GS_9", "levelStars"),
    ("GS_10", "officialLevelProgress"),
    ("GS_11", "dailyRewards"),
    ("GS_12", "quests"),
    ("GS_14", UNUSED_KEY),
    ("GS_15", "questRewards"),
    ("GS_16", "queuedQuests"),
    ("GS_17", "dailyProgress"),
    ("GS_18", "dailyStars"),
    ("GS_19", "gauntletProgress"),
    ("GS_20", "treasureRoomRewards"),
    ("GS_21", "demonKeys"),
    ("GS_22", "rewards"),
    ("GS_23", "gdwQuestRewards"),
    ("GLM_01", "officialLevels"),
    ("GLM_03", "onlineLevels"),
    ("GLM_06", "followedCreators"),
    ("GLM_07", "recentSearches"),
    ("GLM_08", "searchFilters"),
    ("GLM_09", "availableFilters"),
    ("GLM_10", "timelyLevels"),
    ("GLM_12", "likedLevels"),
    ("GLM_13", "ratedLevels"),
    ("GLM_14", "reportedLevels"),
    ("GLM_16", "ratedDemons"),
    ("GLM_18", "savedLevelFolders"),
    ("GLM_19", "createdLevelFolders"),
    ("GJA_001", "accountName"),
    ("GJA_002", "accountPassword"),
    ("GJA_003", "accountID"),
    ("LLM_01", "localLevels"),
    ("LLM_02", "binaryVersion"),
    ("binaryVersion", "binaryVersion"),
    ("reportedAchievements", "achievements"),
    ("bootups", "launches"),
];

/// `gv_NNNN` settings in the `valueKeeper` block.
const GAME_VARIABLES: &[(u32, &str)] = &[
    (1, "editor.followPlayer"),
    (2, "editor.playMusic"),
    (3, "editor.swipe"),
    (4, "editor.freeMove"),
    (5, "editor.deleteFilter"),
    (6, "editor.deleteObjectID"),
    (7, "editor.rotateToggled"),
    (8, "editor.snapToggled"),
    (9, "editor.ignoreDamage"),
    (10, "flipTwoPlayerControls"),
    (11, "alwaysLimitControls"),
    (12, "showedCommentRules"),
    (13, "increaseMaxUndo"),
    (14, "disableExplosionShake"),
    (15, "flipPauseButton"),
    (16, "showedSongTerms"),
    (18, "noSongLimit"),
    (19, "loadSongsToMemory"),
    (22, "higherAudioQuality"),
    (23, "smoothFix"),
    (24, "showCursorInGame"),
    (25, "fullscreen"),
    (26, "autoRetry"),
    (27, "autoCheckpoints"),
    (28, "disableThumbstick"),
    (29, "showedOptions"),
    (30, "vsync"),
    (33, "changeCustomSongsLocation"),
    (34, "gameCenter"),
    (36, "editor.previewMode"),
    (37, "editor.showGround"),
    (38, "editor.showGrid"),
    (39, "editor.gridOnTop"),
    (40, "showPercentage"),
    (41, "editor.showObjectInfo"),
    (42, "increaseMaxLevels"),
    (43, "editor.showEffectLines"),
    (44, "editor.showTriggerBoxes"),
    (45, "editor.debugDraw"),
    (46, "editor.hideUIOnTest"),
    (47, "showedProfileInfo"),
    (48, "viewedOwnProfile"),
    (49, "editor.buttonsPerRow"),
    (50, "editor.buttonRows"),
    (51, "showedNewgroundsMessage"),
    (52, "fastPracticeReset"),
    (53, "freeGames"),
    (55, "checkServerOnline"),
    (56, "editor.disableHighObjectAlert"),
    (57, "editor.holdToSwipe"),
    (58, "editor.showDurationLines"),
    (59, "editor.swipeCycle"),
    (60, "defaultMiniIcon"),
    (61, "switchSpiderTeleportColor"),
    (62, "switchDashFireColor"),
    (63, "showedUnverifiedCoinsMessage"),
    (64, "editor.selectFilter"),
    (65, "editor.enableMoveOptimization"),
    (66, "highCapacityMode"),
    (67, "highStartPosAccuracy"),
    (68, "quickCheckpointMode"),
    (69, "commentMode"),
    (70, "showedUnlistedLevelMessage"),
    (72, "disableGravityEffect"),
    (73, "newCompletedFilter"),
    (74, "showRestartButton"),
    (75, "disableLevelComments"),
    (76, "disableAccountComments"),
    (77, "featuredLevelsOnly"),
    (78, "hideBackground"),
    (79, "editor.hideGridOnPlay"),
    (80, "disableShake"),
    (81, "disableHighDetailAlert"),
    (82, "disableSongAlert"),
    (83, "manualLevelOrder"),
    (84, "smallComments"),
    (85, "extendedLevelInfo"),
    (86, "autoLoadComments"),
    (87, "createdListFilter"),
    (88, "disablePulseShake"),
    (89, "hidePlaytestText"),
    (90, "showPercentageDecimals"),
];

/// `ugv_N` events in the `unlockValueKeeper` block.
const GAME_EVENTS: &[(u32, &str)] = &[
    (1, "unlockedSecretVault"),
    (2, "unlockedTheChallenge"),
    (3, "unlockedShopkeeper"),
    (4, "unlockedVaultOfSecrets"),
    (5, "unlockedChamberOfTime"),
    (6, "usedSecretCode"),
    (7, "openedBasement"),
    (8, "freedDemonGuardian"),
    (9, "unlockedCommunityShop"),
    (10, "unlockedMechanicShop"),
    (11, "unlockedDiamondShop"),
    (12, "metScratch"),
    (13, "metPotbor"),
    (14, "metDiamondShopkeeper"),
    (15, "unlockedTreasureRoom"),
    (16, "openedFirstChest"),
    (17, "clickedMasterEmblem"),
    (18, "unlockedWraith"),
];

/// Numeric keys of the `GS_value` stats block.
const STAT_KEYS: &[(u32, &str)] = &[
    (1, "jumps"),
    (2, "attempts"),
    (3, "completedOfficialLevels"),
    (4, "completedOnlineLevels"),
    (5, "demons"),
    (6, "stars"),
    (7, "completedMapPacks"),
    (8, "goldCoins"),
    (9, "destroyedPlayers"),
    (10, "likedLevels"),
    (11, "ratedLevels"),
    (12, "userCoins"),
    (13, "diamonds"),
    (14, "orbs"),
    (15, "completedDailies"),
    (16, "fireShards"),
    (17, "iceShards"),
    (18, "poisonShards"),
    (19, "shadowShards"),
    (20, "lavaShards"),
    (21, "bonusShards"),
    (22, "totalOrbs"),
    (23, "earthShards"),
    (24, "bloodShards"),
    (25, "metalShards"),
    (26, "lightShards"),
    (27, "soulShards"),
    (28, "moons"),
];

/// Official level names by level index.
const LEVEL_NAMES: &[(u32, &str)] = &[
    (1, "Stereo Madness"),
    (2, "Back On Track"),
    (3, "Polargeist"),
    (4, "Dry Out"),
    (5, "Base After Base"),
    (6, "Cant Let Go"),
    (7, "Jumper"),
    (8, "Time Machine"),
    (9, "Cycles"),
    (10, "xStep"),
    (11, "Clutterfunk"),
    (12, "Theory of Everything"),
    (13, "Electroman Adventures"),
    (14, "Clubstep"),
    (15, "Electrodynamix"),
    (16, "Hexagon Force"),
    (17, "Blast Processing"),
    (18, "Theory of Everything 2"),
    (19, "Geometrical Dominator"),
    (20, "Deadlocked"),
    (21, "Fingerdash"),
    (22, "Dash"),
];

/// Icon and color prefixes in the settings block and their readable forms.
pub const ICON_PREFIXES: &[(&str, &str)] = &[
    ("c0", "primarycolor"),
    ("c1", "secondarycolor"),
    ("i", "cube"),
    ("ship", "ship"),
    ("ball", "ball"),
    ("bird", "ufo"),
    ("dart", "wave"),
    ("robot", "robot"),
    ("spider", "spider"),
    ("special", "trail"),
    ("death", "deatheffect"),
];

/// Immutable lookup tables, built once per process.
#[derive(Debug)]
pub struct RenameTables {
    reserved_keys: FxHashMap<&'static str, &'static str>,
    game_variables: FxHashMap<u32, &'static str>,
    game_events: FxHashMap<u32, &'static str>,
    stat_keys: FxHashMap<u32, &'static str>,
    level_names: FxHashMap<u32, &'static str>,
}

impl RenameTables {
    /// The process-wide tables.
    pub fn get() -> &'static RenameTables {
        static TABLES: OnceLock<RenameTables> = OnceLock::new();
        TABLES.get_or_init(|| RenameTables {
            reserved_keys: RESERVED_KEYS.iter().copied().collect(),
            game_variables: GAME_VARIABLES.iter().copied().collect(),
            game_events: GAME_EVENTS.iter().copied().collect(),
            stat_keys: STAT_KEYS.iter().copied().collect(),
            level_names: LEVEL_NAMES.iter().copied().collect(),
        })
    }

    /// Readable name for a top-level technical key.
    pub fn reserved_key(&self, key: &str) -> Option<&'static str> {
        self.reserved_keys.get(key).copied()
    }

    pub fn game_variable(&self, index: u32) -> Option<&'static str> {
        self.game_variables.get(&index).copied()
    }

    pub fn game_event(&self, index: u32) -> Option<&'static str> {
        self.game_events.get(&index).copied()
    }

    pub fn stat_key(&self, index: u32) -> Option<&'static str> {
        self.stat_keys.get(&index).copied()
    }

    pub fn level_name(&self, index: u32) -> Option<&'static str> {
        self.level_names.get(&index).copied()
    }

    /// Whether `key` is the readable name of a renamed technical key.
    pub fn is_readable_alias(&self, key: &str) -> bool {
        !self.reserved_keys.contains_key(key)
            && key != UNUSED_KEY
            && self.reserved_keys.values().any(|&readable| readable == key)
    }

    /// Readable prefix for an icon/color key prefix.
    pub fn icon_prefix(&self, prefix: &str) -> Option<&'static str> {
        ICON_PREFIXES
            .iter()
            .find(|(raw, _)| *raw == prefix)
            .map(|(_, readable)| *readable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups() {
        let tables = RenameTables::get();
        assert_eq!(tables.game_variable(1), Some("editor.followPlayer"));
        assert_eq!(tables.game_variable(9999), None);
        assert_eq!(tables.stat_key(6), Some("stars"));
        assert_eq!(tables.level_name(22), Some("Dash"));
        assert_eq!(tables.reserved_key("valueKeeper"), Some("gameVariables"));
        assert_eq!(tables.reserved_key("secretNumber"), Some(UNUSED_KEY));
        assert_eq!(tables.icon_prefix("bird"), Some("ufo"));
        assert_eq!(tables.icon_prefix("gv"), None);
        assert!(tables.is_readable_alias("gameVariables"));
        assert!(!tables.is_readable_alias("sfxVolume"));
        assert!(!tables.is_readable_alias("valueKeeper"));
    }

    #[test]
    fn test_tables_have_unique_keys() {
        fn unique<K: std::hash::Hash + Eq + Copy, V>(table: &[(K, V)]) -> bool {
            let keys: rustc_hash::FxHashSet<K> = table.iter().map(|(k, _)| *k).collect();
            keys.len() == table.len()
        }

        assert!(unique(RESERVED_KEYS));
        assert!(unique(GAME_VARIABLES));
        assert!(unique(GAME_EVENTS));
        assert!(unique(STAT_KEYS));
        assert!(unique(LEVEL_NAMES));
        assert!(unique(ICON_PREFIXES));
    }
}
