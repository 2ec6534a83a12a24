use mapcut_script::Block;

use crate::title::{looks_like_title, tier, Tier};

/// Locate the block owned by `target` anywhere under `root`, pruning
/// recursion by tier: a title cannot be nested under another title of equal
/// or lower tier, so such siblings are skipped without descending. First
/// match in document order wins.
pub fn find_title<'a>(target: &str, root: &'a Block) -> Option<&'a Block> {
    let target_tier = tier(target)?;

    for stmt in root {
        let Some(t) = stmt.key_str() else { continue };
        if !looks_like_title(t) {
            continue;
        }
        let Some(block) = stmt.value.as_block() else { continue };

        if t == target {
            return Some(block);
        }

        if tier(t) <= Some(target_tier) {
            continue;
        }

        if let Some(found) = find_title(target, block) {
            return Some(found);
        }
    }

    None
}

/// Append every title identifier under `root` in pre-order. Baronies are
/// leaves; their blocks are never descended into.
pub fn titles_under(root: &Block, out: &mut Vec<String>) {
    for stmt in root {
        let Some(t) = stmt.key_str() else { continue };
        if !looks_like_title(t) {
            continue;
        }
        out.push(t.to_string());

        let Some(block) = stmt.value.as_block() else { continue };
        if tier(t) > Some(Tier::Barony) {
            titles_under(block, out);
        }
    }
}
