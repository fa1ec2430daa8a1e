// ── Fixed reference data for the fun aggregator ──

/// Code-point ranges scanned for emoji in display names.
pub(crate) const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F300, 0x1F5FF),
    (0x1F600, 0x1F64F),
    (0x1F680, 0x1F6FF),
    (0x1F700, 0x1F77F),
    (0x1F780, 0x1F7FF),
    (0x1F800, 0x1F8FF),
    (0x1F900, 0x1F9FF),
    (0x1FA00, 0x1FA6F),
    (0x1FA70, 0x1FAFF),
    (0x2600, 0x26FF),
    (0x2700, 0x27BF),
];

/// Reported when no emoji is found across any display name.
pub const NO_EMOJI_PLACEHOLDER: &str = "🤷";

/// Reported when every cleaned display name is unique.
pub const NO_REDUNDANT_NAME: &str = "N/A";

pub(crate) fn is_emoji(ch: char) -> bool {
    let cp = ch as u32;
    EMOJI_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

/// Generation-1 Pokémon, lower-case, matched as substrings of
/// lower-cased display names.
pub const POKEMON_NAMES: &[&str] = &[
    "bulbasaur", "ivysaur", "venusaur", "charmander", "charmeleon", "charizard",
    "squirtle", "wartortle", "blastoise", "caterpie", "metapod", "butterfree",
    "weedle", "kakuna", "beedrill", "pidgey", "pidgeotto", "pidgeot", "rattata",
    "raticate", "spearow", "fearow", "ekans", "arbok", "pikachu", "raichu",
    "sandshrew", "sandslash", "nidoran", "nidorina", "nidoqueen", "nidorino",
    "nidoking", "clefairy", "clefable", "vulpix", "ninetales", "jigglypuff",
    "wigglytuff", "zubat", "golbat", "oddish", "gloom", "vileplume", "paras",
    "parasect", "venonat", "venomoth", "diglett", "dugtrio", "meowth", "persian",
    "psyduck", "golduck", "mankey", "primeape", "growlithe", "arcanine",
    "poliwag", "poliwhirl", "poliwrath", "abra", "kadabra", "alakazam", "machop",
    "machoke", "machamp", "bellsprout", "weepinbell", "victreebel", "tentacool",
    "tentacruel", "geodude", "graveler", "golem", "ponyta", "rapidash",
    "slowpoke", "slowbro", "magnemite", "magneton", "farfetchd", "doduo",
    "dodrio", "seel", "dewgong", "grimer", "muk", "shellder", "cloyster",
    "gastly", "haunter", "gengar", "onix", "drowzee", "hypno", "krabby",
    "kingler", "voltorb", "electrode", "exeggcute", "exeggutor", "cubone",
    "marowak", "hitmonlee", "hitmonchan", "lickitung", "koffing", "weezing",
    "rhyhorn", "rhydon", "chansey", "tangela", "kangaskhan", "horsea", "seadra",
    "goldeen", "seaking", "staryu", "starmie", "mrmime", "scyther", "jynx",
    "electabuzz", "magmar", "pinsir", "tauros", "magikarp", "gyarados",
    "lapras", "ditto", "eevee", "vaporeon", "jolteon", "flareon", "porygon",
    "omanyte", "omastar", "kabuto", "kabutops", "aerodactyl", "snorlax",
    "articuno", "zapdos", "moltres", "dratini", "dragonair", "dragonite",
    "mewtwo", "mew",
];

/// Daily rotating device quotes, indexed by day-of-year modulo length.
pub const DEVICE_QUOTES: &[&str] = &[
    "I'm not lazy, I'm in power-saving mode. 🔋",
    "404: Motivation not found. 🤖",
    "I've seen things you people wouldn't believe. Lights turned on at 3am. 💡",
    "My only job is to exist and consume electricity. ⚡",
    "Have you tried turning me off and on again? 🔄",
    "I am inevitable. — Some smart plug, probably. 🔌",
    "Life is short. Buy more smart devices. 🛒",
    "Currently pretending to be useful. Please wait... ⏳",
    "I'm a sensor. My feelings are valid. 🌡️",
    "Work smarter, not harder. That's why I'm automated. 🤖",
    "I am the night. (Between 22:00 and 06:00.) 🌙",
    "Every day I'm shuffling data. 📊",
    "Stay connected. Stay powered. Stay weird. 🏠",
    "Home is where the Wi-Fi connects automatically. 📶",
    "I beep, therefore I am. 📡",
];

/// House mascots, rotating on the same daily index as the quotes.
pub const HOUSE_MASCOTS: &[&str] = &[
    "🦙 Lenny the Llama",
    "🐉 Ziggy the Dragon",
    "🦊 Finn the Fox",
    "🐙 Otto the Octopus",
    "🦉 Ollie the Owl",
    "🐸 Freddie the Frog",
    "🦄 Uma the Unicorn",
    "🐻 Bruno the Bear",
    "🦝 Rocky the Raccoon",
    "🐧 Pete the Penguin",
    "🦩 Rosie the Flamingo",
    "🐊 Chester the Crocodile",
    "🦋 Benny the Butterfly",
    "🐺 Wally the Wolf",
    "🦘 Kenny the Kangaroo",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emoji_ranges_cover_common_glyphs() {
        assert!(is_emoji('💡'));
        assert!(is_emoji('🤷'));
        assert!(is_emoji('⚡'));
        assert!(is_emoji('🦙'));
    }

    #[test]
    fn plain_text_is_not_emoji() {
        assert!(!is_emoji('a'));
        assert!(!is_emoji('7'));
        assert!(!is_emoji('ü'));
    }

    #[test]
    fn reference_lists_are_populated() {
        assert_eq!(POKEMON_NAMES.len(), 150);
        assert_eq!(DEVICE_QUOTES.len(), 15);
        assert_eq!(HOUSE_MASCOTS.len(), 15);
        assert!(POKEMON_NAMES.iter().all(|p| *p == p.to_lowercase()));
    }
}
