//! Invariants the finished lookup must satisfy before it is written.

use std::collections::BTreeMap;

use crate::builder::{Link, LookupOptions};
use crate::error::{NicknameError, Result};

pub(crate) fn sanity_check(links: &BTreeMap<String, Link>, options: &LookupOptions) -> Result<()> {
    for (name, link) in links {
        if *name == link.group {
            return Err(failure("identity", format!("{name} maps to itself")));
        }
        if links.contains_key(&link.group) {
            return Err(failure(
                "chain",
                format!("{name} -> {} is itself mapped", link.group),
            ));
        }
        if link.cond_prob < options.min_cond_prob {
            return Err(failure(
                "probability",
                format!("{name} -> {} has probability {}", link.group, link.cond_prob),
            ));
        }
        if link.group.chars().count() < options.min_group_len {
            return Err(failure("group_length", format!("group {} is too short", link.group)));
        }
        if link.group_count < options.min_group_count {
            return Err(failure(
                "group_count",
                format!("{name} came from a group of {}", link.group_count),
            ));
        }
    }
    Ok(())
}

fn failure(check: &'static str, detail: String) -> NicknameError {
    NicknameError::SanityCheck { check, detail }
}
