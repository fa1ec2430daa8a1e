// ── Fun aggregator ──
//
// Whimsical display-name metrics. Pure: the snapshot, the precomputed
// everything-off flag, and the day-of-year all come in as arguments, so
// the whole pass is safe to run on a blocking worker and deterministic
// under test. Every metric has a documented empty-input default; none
// of them can fail.

use indexmap::IndexMap;

use crate::model::{EntityRecord, FunStats};
use crate::stats::catalog::{
    DEVICE_QUOTES, HOUSE_MASCOTS, NO_EMOJI_PLACEHOLDER, NO_REDUNDANT_NAME, POKEMON_NAMES, is_emoji,
};
use crate::stats::round2;

/// Reduce the snapshot to a [`FunStats`].
///
/// `everything_off` is computed by the core tally and passed through so
/// this pass never touches anything but the snapshot. `day_of_year` is
/// 1-based; the rotating picks wrap by modulo.
pub fn aggregate_fun(
    entities: &[EntityRecord],
    everything_off: bool,
    day_of_year: u32,
) -> FunStats {
    let names: Vec<&str> = entities
        .iter()
        .filter_map(|e| e.friendly_name.as_deref())
        .filter(|name| !name.is_empty())
        .collect();

    // ── Entity-id lengths ───────────────────────────────────────────
    let avg_entity_id_length = if entities.is_empty() {
        0.0
    } else {
        let total: usize = entities.iter().map(|e| e.id.char_len()).sum();
        round2(total as f64 / entities.len() as f64)
    };

    // First-encountered wins ties, so replace only on strict compare.
    let mut longest: Option<&EntityRecord> = None;
    let mut shortest: Option<&EntityRecord> = None;
    for entity in entities {
        if longest.is_none_or(|best| entity.id.char_len() > best.id.char_len()) {
            longest = Some(entity);
        }
        if shortest.is_none_or(|best| entity.id.char_len() < best.id.char_len()) {
            shortest = Some(entity);
        }
    }

    // ── Emoji frequency & density ───────────────────────────────────
    let mut emoji_counts: IndexMap<char, u64> = IndexMap::new();
    let mut total_chars: u64 = 0;
    let mut emoji_chars: u64 = 0;
    for name in &names {
        for ch in name.chars() {
            total_chars += 1;
            if is_emoji(ch) {
                emoji_chars += 1;
                *emoji_counts.entry(ch).or_insert(0) += 1;
            }
        }
    }

    let mut most_used: Option<(char, u64)> = None;
    for (&ch, &count) in &emoji_counts {
        if most_used.is_none_or(|(_, best)| count > best) {
            most_used = Some((ch, count));
        }
    }

    let emoji_density = if total_chars > 0 {
        round2(emoji_chars as f64 / total_chars as f64 * 100.0)
    } else {
        0.0
    };

    // ── Names matched against the reference list ────────────────────
    let devices_named_after_pokemon = names
        .iter()
        .filter(|name| {
            let lower = name.to_lowercase();
            POKEMON_NAMES.iter().any(|pokemon| lower.contains(pokemon))
        })
        .count() as u64;

    // ── Most redundant cleaned name ─────────────────────────────────
    let mut name_freq: IndexMap<String, u64> = IndexMap::new();
    for name in &names {
        let clean = name.trim().to_lowercase();
        if !clean.is_empty() {
            *name_freq.entry(clean).or_insert(0) += 1;
        }
    }

    // Highest frequency wins; equal frequency falls to the shorter
    // name; a full tie keeps the first-inserted entry.
    let mut redundant: Option<(&str, u64)> = None;
    for (name, &count) in &name_freq {
        let better = match redundant {
            None => true,
            Some((best_name, best_count)) => {
                count > best_count
                    || (count == best_count
                        && name.chars().count() < best_name.chars().count())
            }
        };
        if better {
            redundant = Some((name.as_str(), count));
        }
    }

    let most_redundant_name = match redundant {
        Some((name, count)) if count > 1 => format!("'{name}' (×{count})"),
        _ => NO_REDUNDANT_NAME.to_owned(),
    };

    // ── Digits in names ─────────────────────────────────────────────
    let names_with_numbers = names
        .iter()
        .filter(|name| name.chars().any(|ch| ch.is_ascii_digit()))
        .count() as u64;

    // ── Daily rotation ──────────────────────────────────────────────
    let random_daily_quote = DEVICE_QUOTES[day_of_year as usize % DEVICE_QUOTES.len()].to_owned();
    let house_mascot = HOUSE_MASCOTS[day_of_year as usize % HOUSE_MASCOTS.len()].to_owned();

    FunStats {
        avg_entity_id_length,
        longest_entity_id: longest.map(|e| e.id.to_string()).unwrap_or_default(),
        shortest_entity_id: shortest.map(|e| e.id.to_string()).unwrap_or_default(),
        most_used_emoji: most_used
            .map(|(ch, _)| ch.to_string())
            .unwrap_or_else(|| NO_EMOJI_PLACEHOLDER.to_owned()),
        emoji_density,
        devices_named_after_pokemon,
        most_redundant_name,
        names_with_numbers,
        random_daily_quote,
        house_mascot,
        everything_off,
    }
}
