use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::shared::serde_helpers::{de_id, de_opt_i64, de_string_or_default};

/// Level in the bank's office hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BranchLevel {
    #[serde(alias = "kanwil", alias = "KANWIL")]
    Kanwil,
    #[serde(rename = "KC", alias = "kc")]
    Kc,
    #[serde(rename = "KCP", alias = "kcp")]
    Kcp,
}

impl BranchLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            BranchLevel::Kanwil => "Kantor Wilayah",
            BranchLevel::Kc => "Kantor Cabang",
            BranchLevel::Kcp => "Kantor Cabang Pembantu",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            BranchLevel::Kanwil => "Kanwil",
            BranchLevel::Kc => "KC",
            BranchLevel::Kcp => "KCP",
        }
    }

    /// Level implied by depth below a root office.
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 => BranchLevel::Kanwil,
            1 => BranchLevel::Kc,
            _ => BranchLevel::Kcp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    #[serde(deserialize_with = "de_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de_string_or_default")]
    pub name: String,
    #[serde(default)]
    pub branch_code: Option<String>,
    #[serde(default, alias = "parent_branch_id", deserialize_with = "de_opt_i64")]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub level: Option<BranchLevel>,
}

impl Branch {
    /// "KC Braga (0012)" style label for pickers.
    pub fn display_label(&self) -> String {
        match &self.branch_code {
            Some(code) if !code.is_empty() => format!("{} ({})", self.name, code),
            _ => self.name.clone(),
        }
    }
}

/// Kanwil → KC → KCP tree built from a flat branch list.
#[derive(Debug, Clone, Default)]
pub struct BranchTree {
    by_id: HashMap<i64, Branch>,
    children: HashMap<Option<i64>, Vec<i64>>,
}

impl BranchTree {
    pub fn new(branches: Vec<Branch>) -> Self {
        let mut tree = BranchTree::default();
        for branch in branches {
            tree.children.entry(branch.parent_id).or_default().push(branch.id);
            tree.by_id.insert(branch.id, branch);
        }
        for ids in tree.children.values_mut() {
            ids.sort_unstable();
        }
        tree
    }

    pub fn get(&self, id: i64) -> Option<&Branch> {
        self.by_id.get(&id)
    }

    /// Direct children; `None` gives the roots.
    pub fn children_of(&self, parent: Option<i64>) -> Vec<&Branch> {
        self.children
            .get(&parent)
            .map(|ids| ids.iter().filter_map(|id| self.by_id.get(id)).collect())
            .unwrap_or_default()
    }

    /// Path from the root down to `id` (inclusive). Stops on cycles or unknown parents.
    pub fn ancestry(&self, id: i64) -> Vec<&Branch> {
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.by_id.get(&id);
        while let Some(branch) = current {
            if !seen.insert(branch.id) {
                break;
            }
            path.push(branch);
            current = branch.parent_id.and_then(|p| self.by_id.get(&p));
        }
        path.reverse();
        path
    }

    /// Explicit level if the server sent one, depth-derived otherwise.
    pub fn level_of(&self, id: i64) -> Option<BranchLevel> {
        let branch = self.by_id.get(&id)?;
        Some(
            branch
                .level
                .unwrap_or_else(|| BranchLevel::from_depth(self.ancestry(id).len().saturating_sub(1))),
        )
    }

    /// Ids of `id` and everything below it.
    pub fn subtree_ids(&self, id: i64) -> Vec<i64> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        let mut seen = HashSet::new();
        while let Some(current) = stack.pop() {
            if !seen.insert(current) || !self.by_id.contains_key(&current) {
                continue;
            }
            out.push(current);
            if let Some(kids) = self.children.get(&Some(current)) {
                stack.extend(kids.iter().rev());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(id: i64, name: &str, parent_id: Option<i64>) -> Branch {
        Branch {
            id,
            name: name.to_string(),
            branch_code: None,
            parent_id,
            level: None,
        }
    }

    fn sample() -> BranchTree {
        BranchTree::new(vec![
            branch(1, "Kanwil Jabar", None),
            branch(6, "KC Braga", Some(1)),
            branch(7, "KC Dago", Some(1)),
            branch(60, "KCP Cihampelas", Some(6)),
        ])
    }

    #[test]
    fn test_children_and_roots() {
        let tree = sample();
        let roots: Vec<_> = tree.children_of(None).iter().map(|b| b.id).collect();
        assert_eq!(roots, vec![1]);
        let kcs: Vec<_> = tree.children_of(Some(1)).iter().map(|b| b.id).collect();
        assert_eq!(kcs, vec![6, 7]);
        assert!(tree.children_of(Some(60)).is_empty());
    }

    #[test]
    fn test_ancestry_and_levels() {
        let tree = sample();
        let path: Vec<_> = tree.ancestry(60).iter().map(|b| b.id).collect();
        assert_eq!(path, vec![1, 6, 60]);
        assert_eq!(tree.level_of(1), Some(BranchLevel::Kanwil));
        assert_eq!(tree.level_of(6), Some(BranchLevel::Kc));
        assert_eq!(tree.level_of(60), Some(BranchLevel::Kcp));
        assert_eq!(tree.level_of(999), None);
    }

    #[test]
    fn test_cycle_does_not_loop() {
        let tree = BranchTree::new(vec![branch(1, "A", Some(2)), branch(2, "B", Some(1))]);
        assert_eq!(tree.ancestry(1).len(), 2);
        assert_eq!(tree.subtree_ids(1).len(), 2);
    }

    #[test]
    fn test_subtree() {
        let tree = sample();
        assert_eq!(tree.subtree_ids(1), vec![1, 6, 60, 7]);
        assert_eq!(tree.subtree_ids(7), vec![7]);
    }

    #[test]
    fn test_decode_branch() {
        let b: Branch = serde_json::from_str(
            r#"{"id":6,"name":"KC Braga","branch_code":"0012","parent_branch_id":"1","level":"KC"}"#,
        )
        .unwrap();
        assert_eq!(b.parent_id, Some(1));
        assert_eq!(b.level, Some(BranchLevel::Kc));
        assert_eq!(b.display_label(), "KC Braga (0012)");
    }
}
