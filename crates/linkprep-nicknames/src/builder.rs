//! Derivation of a one-step nickname lookup from raw alias pairings.
//!
//! The collection links many names to many aliases with a probability each.
//! Linkage needs the opposite shape: every variant points at exactly one
//! group, and no group is itself a variant of another group. The stages
//! below narrow the pairings until that holds.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, info};

use crate::checks::sanity_check;
use crate::error::Result;
use crate::source::AliasRow;

/// Thresholds controlling how specific a name/group link must be.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupOptions {
    /// Minimum probability that the group denotes the name.
    pub min_cond_prob: f64,
    /// Minimum number of pairings a group needs to be kept.
    pub min_group_count: usize,
    /// Minimum group length; shorter groups ("De", "Ki") are usually
    /// fragments of a compound name.
    pub min_group_len: usize,
    /// Passes allowed for collapsing chains.
    pub max_chain_passes: usize,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            min_cond_prob: 0.3,
            min_group_count: 5,
            min_group_len: 3,
            max_chain_passes: 10,
        }
    }
}

/// One row of the finished lookup (lowercase).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct LookupEntry {
    pub raw_name: String,
    pub name_group: String,
}

/// Row counts removed or rewritten by each stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LookupReport {
    pub input_rows: usize,
    pub multi_word_names: usize,
    pub short_groups: usize,
    pub rare_groups: usize,
    pub improbable_pairs: usize,
    pub not_top_ranked: usize,
    pub loops_resolved: usize,
    pub identities_dropped: usize,
    pub chain_passes: usize,
    pub entries: usize,
}

/// The finished lookup plus its stage report.
#[derive(Debug, Clone)]
pub struct LookupTable {
    pub entries: Vec<LookupEntry>,
    pub report: LookupReport,
}

#[derive(Debug, Clone)]
struct Pair {
    name: String,
    group: String,
    cond_prob: f64,
}

/// A surviving name → group link, keyed by name.
#[derive(Debug, Clone)]
pub(crate) struct Link {
    pub(crate) group: String,
    pub(crate) cond_prob: f64,
    /// Size of the original group at the count stage.
    pub(crate) group_count: usize,
}

struct Candidate {
    pair: Pair,
    tied: bool,
}

/// Builds the lookup from alias rows.
///
/// # Errors
///
/// Returns [`crate::NicknameError::SanityCheck`] when the result still
/// contains chains or breaks a threshold, which can happen when the chain
/// pass limit is reached on cyclic data.
pub fn build_lookup(rows: Vec<AliasRow>, options: &LookupOptions) -> Result<LookupTable> {
    let mut report = LookupReport {
        input_rows: rows.len(),
        ..LookupReport::default()
    };

    // Only the first word of a first name takes part in linkage.
    let mut pairs = Vec::with_capacity(rows.len());
    for row in rows {
        let name = row.name.trim().to_uppercase();
        if name.is_empty() {
            continue;
        }
        if name.contains(' ') {
            report.multi_word_names += 1;
            continue;
        }
        let group: String = row
            .alias
            .to_uppercase()
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .collect();
        if group.chars().count() < options.min_group_len {
            report.short_groups += 1;
            continue;
        }
        pairs.push(Pair {
            name,
            group,
            cond_prob: row.cond_prob,
        });
    }

    let mut group_counts: HashMap<String, usize> = HashMap::new();
    for pair in &pairs {
        *group_counts.entry(pair.group.clone()).or_default() += 1;
    }
    let group_count = |group: &str| group_counts.get(group).copied().unwrap_or(0);

    let before = pairs.len();
    pairs.retain(|pair| group_count(&pair.group) >= options.min_group_count);
    report.rare_groups = before - pairs.len();

    let before = pairs.len();
    pairs.retain(|pair| pair.cond_prob >= options.min_cond_prob);
    report.improbable_pairs = before - pairs.len();

    let candidates = pairs.len();
    let mut links = top_ranked(pairs, &group_count);
    report.not_top_ranked = candidates - links.len();

    report.loops_resolved = resolve_loops(&mut links, &group_count);

    let before = links.len();
    links.retain(|name, link| *name != link.group);
    report.identities_dropped = before - links.len();

    report.chain_passes = collapse_chains(&mut links, options.max_chain_passes);

    sanity_check(&links, options)?;

    let mut entries: Vec<LookupEntry> = links
        .into_iter()
        .map(|(name, link)| LookupEntry {
            raw_name: name.to_lowercase(),
            name_group: link.group.to_lowercase(),
        })
        .collect();
    entries.sort();
    report.entries = entries.len();
    info!(
        input_rows = report.input_rows,
        entries = report.entries,
        loops_resolved = report.loops_resolved,
        chain_passes = report.chain_passes,
        "nickname lookup built"
    );
    Ok(LookupTable { entries, report })
}

/// Keeps, per name, the single most probable group. A tie at the top means
/// the name is ambiguous and it is dropped.
fn top_ranked(pairs: Vec<Pair>, group_count: &impl Fn(&str) -> usize) -> BTreeMap<String, Link> {
    let mut best: BTreeMap<String, Candidate> = BTreeMap::new();
    for pair in pairs {
        match best.entry(pair.name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(Candidate { pair, tied: false });
            }
            Entry::Occupied(mut slot) => {
                let current = slot.get_mut();
                if pair.cond_prob > current.pair.cond_prob {
                    *current = Candidate { pair, tied: false };
                } else if pair.cond_prob == current.pair.cond_prob {
                    current.tied = true;
                }
            }
        }
    }
    best.into_iter()
        .filter(|(_, candidate)| !candidate.tied)
        .map(|(name, candidate)| {
            let link = Link {
                group_count: group_count(&candidate.pair.group),
                group: candidate.pair.group,
                cond_prob: candidate.pair.cond_prob,
            };
            (name, link)
        })
        .collect()
}

/// Resolves two-name loops (CHRIS → CHRISTOPHER and CHRISTOPHER → CHRIS)
/// toward the larger group; equal sizes keep the alphabetically first
/// group. Returns the number of loops found.
fn resolve_loops(links: &mut BTreeMap<String, Link>, group_count: &impl Fn(&str) -> usize) -> usize {
    let mut replacements: HashMap<String, String> = HashMap::new();
    let mut loops = 0usize;
    for (name, link) in links.iter() {
        let Some(back) = links.get(&link.group) else {
            continue;
        };
        // Visit each loop once, from its alphabetically first member.
        if back.group != *name || *name >= link.group {
            continue;
        }
        loops += 1;
        let (winner, loser) = if group_count(&link.group) > group_count(name) {
            (link.group.clone(), name.clone())
        } else {
            (name.clone(), link.group.clone())
        };
        debug!(winner = %winner, loser = %loser, "resolved nickname loop");
        replacements.insert(loser, winner);
    }
    for link in links.values_mut() {
        if let Some(winner) = replacements.get(&link.group) {
            link.group = winner.clone();
        }
    }
    loops
}

/// Shortens chains (BACKY → BECKY → REBECCA becomes BACKY → REBECCA).
/// Returns the number of passes that changed something.
fn collapse_chains(links: &mut BTreeMap<String, Link>, max_passes: usize) -> usize {
    let mut passes = 0usize;
    for _ in 0..max_passes {
        let shortened: Vec<(String, String)> = links
            .iter()
            .filter_map(|(name, link)| {
                links
                    .get(&link.group)
                    .map(|next| (name.clone(), next.group.clone()))
            })
            .collect();
        if shortened.is_empty() {
            break;
        }
        passes += 1;
        for (name, group) in shortened {
            if let Some(link) = links.get_mut(&name) {
                link.group = group;
            }
        }
    }
    passes
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Five names per group so every group passes the count threshold.
    fn group_rows(group: &str, names: &[&str], prob: f64) -> Vec<AliasRow> {
        names
            .iter()
            .map(|name| AliasRow::new(name, group, prob))
            .collect()
    }

    #[test]
    fn drops_multi_word_and_short_groups() {
        let mut rows = group_rows("ROBERT", &["BOB", "ROB", "BOBBY", "ROBBIE", "BERT"], 0.9);
        rows.push(AliasRow::new("MARY ANN", "ROBERT", 0.9));
        rows.push(AliasRow::new("DEE", "DE", 0.9));
        let table = build_lookup(rows, &LookupOptions::default()).unwrap();
        assert_eq!(table.report.multi_word_names, 1);
        assert_eq!(table.report.short_groups, 1);
        assert_eq!(table.entries.len(), 5);
        assert!(table.entries.iter().all(|e| e.name_group == "robert"));
    }

    #[test]
    fn drops_rare_groups_and_improbable_pairs() {
        let mut rows = group_rows("ROBERT", &["BOB", "ROB", "BOBBY", "ROBBIE", "BERT"], 0.9);
        rows.extend(group_rows("ZED", &["Z1", "Z2"], 0.9));
        rows[0].cond_prob = 0.1;
        let table = build_lookup(rows, &LookupOptions::default()).unwrap();
        assert_eq!(table.report.rare_groups, 2);
        assert_eq!(table.report.improbable_pairs, 1);
        assert_eq!(table.entries.len(), 4);
    }

    #[test]
    fn ties_at_the_top_are_dropped() {
        let mut rows = group_rows("ROBERT", &["BOB", "ROB", "BOBBY", "ROBBIE", "BERT"], 0.9);
        rows.extend(group_rows("HUBERT", &["BERT", "HUBIE", "HUB", "HUEY", "BERTIE"], 0.9));
        let table = build_lookup(rows, &LookupOptions::default()).unwrap();
        assert!(!table.entries.iter().any(|e| e.raw_name == "bert"));
        assert_eq!(table.report.not_top_ranked, 2);
    }

    #[test]
    fn loops_resolve_toward_larger_group() {
        let mut rows = group_rows(
            "CHRISTOPHER",
            &["CHRIS", "KIT", "TOPHER", "CHRISTY", "KRIS", "CRIS"],
            0.8,
        );
        rows.extend(group_rows(
            "CHRIS",
            &["CHRISTOPHER", "CHRISSY", "CHRISTINA", "CHRISTIAN", "KRISTOFER"],
            0.8,
        ));
        let table = build_lookup(rows, &LookupOptions::default()).unwrap();
        assert_eq!(table.report.loops_resolved, 1);
        let lookup: BTreeMap<&str, &str> = table
            .entries
            .iter()
            .map(|e| (e.raw_name.as_str(), e.name_group.as_str()))
            .collect();
        assert!(!lookup.contains_key("christopher"));
        assert_eq!(table.report.identities_dropped, 1);
        assert_eq!(lookup.get("chris"), Some(&"christopher"));
        assert_eq!(lookup.get("chrissy"), Some(&"christopher"));
        assert_eq!(lookup.get("kit"), Some(&"christopher"));
    }

    #[test]
    fn chains_collapse() {
        let mut rows = group_rows(
            "REBECCA",
            &["BECKY", "BECCA", "REBA", "REBEKAH", "BEX"],
            0.9,
        );
        rows.extend(group_rows(
            "BECKY",
            &["BACKY", "BECKI", "BECKIE", "BEKKY", "BEKI"],
            0.9,
        ));
        let table = build_lookup(rows, &LookupOptions::default()).unwrap();
        assert_eq!(table.report.chain_passes, 1);
        assert!(table.entries.iter().all(|e| e.name_group == "rebecca"));
        assert!(table.entries.contains(&LookupEntry {
            raw_name: "backy".to_string(),
            name_group: "rebecca".to_string(),
        }));
    }

    #[test]
    fn entries_are_sorted_and_lowercase() {
        let rows = group_rows("WILLIAM", &["WILL", "BILL", "LIAM", "BILLY", "WILLY"], 0.7);
        let table = build_lookup(rows, &LookupOptions::default()).unwrap();
        let names: Vec<&str> = table.entries.iter().map(|e| e.raw_name.as_str()).collect();
        assert_eq!(names, vec!["bill", "billy", "liam", "will", "willy"]);
    }
}
