// src/maps.rs
use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    ///
    /// Display names keyed by the last path segment of the Keeper
    /// `currentMap` value:
    ///   "currentMap": "XP4/Levels/XP4_SubBase/XP4_SubBase"
    ///
    static ref BATTLEFIELD_4_MAPS: HashMap<&'static str, &'static str> = {
        let mut maps = HashMap::new();
        maps.insert("MP_Abandoned", "Zavod 311");
        maps.insert("MP_Damage", "Lancang Dam");
        maps.insert("MP_Flooded", "Flood Zone");
        maps.insert("MP_Journey", "Golmud Railway");
        maps.insert("MP_Naval", "Paracel Storm");
        maps.insert("MP_Prison", "Operation Locker");
        maps.insert("MP_Resort", "Hainan Resort");
        maps.insert("MP_Siege", "Siege Of Shanghai");
        maps.insert("MP_TheDish", "Rogue Transmission");
        maps.insert("MP_Tremors", "Dawnbreaker");
        maps.insert("XP0_Caspian", "Caspian Border 2014");
        maps.insert("XP0_Firestorm", "Operation Firestorm 2014");
        maps.insert("XP0_Metro", "Operation Metro 2014");
        maps.insert("XP0_Oman", "Gulf Of Oman 2014");
        maps.insert("XP1_001", "Silk Road");
        maps.insert("XP1_002", "Altai Range");
        maps.insert("XP1_003", "Guilin Peaks");
        maps.insert("XP1_004", "Dragon Pass");
        maps.insert("XP2_001", "Lost Islands");
        maps.insert("XP2_002", "Nansha Strike");
        maps.insert("XP2_003", "Wave Breaker");
        maps.insert("XP2_004", "Operation Mortar");
        maps.insert("XP3_MarketPl", "Pearl Market");
        maps.insert("XP3_Prpganda", "Propaganda");
        maps.insert("XP3_UrbanGdn", "Lumphini Garden");
        maps.insert("XP3_WtrFront", "Sunken Dragon");
        maps.insert("XP4_Arctic", "Operation Whiteout");
        maps.insert("XP4_SubBase", "Hammerhead");
        maps.insert("XP4_Titan", "Hangar 21");
        maps.insert("XP4_WlkrFtry", "Giants Of Karelia");
        maps.insert("XP5_Night_01", "Zavod: Graveyard Shift");
        maps
    };
}

/// Resolve a raw map path to its display name. Codes missing from the
/// table come back as "Unknown" rather than an error.
pub fn resolve(current_map: &str) -> &'static str {
    let key = current_map.rsplit('/').next().unwrap_or(current_map);
    BATTLEFIELD_4_MAPS.get(key).copied().unwrap_or("Unknown")
}
