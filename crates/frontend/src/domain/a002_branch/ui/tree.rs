//! Kanwil → KC → KCP hierarchy with a name filter.

use contracts::domain::a002_branch::{Branch, BranchTree};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a002_branch::api;
use crate::shared::components::load_state::{EmptyState, ErrorBar, LoadingBlock};
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;

/// Matching branches with their root-to-node path, e.g. "Kanwil Jabar / KC Braga".
fn filter_paths(tree: &BranchTree, branches: &[Branch], term: &str) -> Vec<(Branch, String)> {
    let needle = term.trim().to_lowercase();
    branches
        .iter()
        .filter(|b| {
            b.name.to_lowercase().contains(&needle)
                || b.branch_code
                    .as_deref()
                    .map(|c| c.to_lowercase().contains(&needle))
                    .unwrap_or(false)
        })
        .map(|b| {
            let path = tree
                .ancestry(b.id)
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(" / ");
            (b.clone(), path)
        })
        .collect()
}

fn render_node(tree: &BranchTree, branch: &Branch) -> AnyView {
    let level = tree
        .level_of(branch.id)
        .map(|l| l.short_name())
        .unwrap_or("-");
    let children = tree.children_of(Some(branch.id));
    let label = branch.display_label();

    if children.is_empty() {
        return view! {
            <div class="branch-tree__leaf">
                <Badge appearance=BadgeAppearance::Outline>{level}</Badge>
                <span>{label}</span>
            </div>
        }
        .into_any();
    }

    let count = tree.subtree_ids(branch.id).len() - 1;
    let nested = children
        .into_iter()
        .map(|child| render_node(tree, child))
        .collect_view();

    view! {
        <details class="branch-tree__node" open=true>
            <summary>
                <Badge appearance=BadgeAppearance::Tint>{level}</Badge>
                <span>{label}</span>
                <span class="branch-tree__count">{format!("{} unit", count)}</span>
            </summary>
            <div class="branch-tree__children">{nested}</div>
        </details>
    }
    .into_any()
}

#[component]
pub fn BranchTreePage() -> impl IntoView {
    let branches = RwSignal::new(Vec::<Branch>::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let filter = RwSignal::new(String::new());

    let fetch = move || {
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            match api::list_branches().await {
                Ok(items) => branches.set(items),
                Err(e) if e.is_empty() => branches.set(Vec::new()),
                Err(e) => {
                    log::error!("branch list failed: {}", e);
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    };

    fetch();

    let body = move || {
        if loading.get() {
            return view! { <LoadingBlock /> }.into_any();
        }
        let all = branches.get();
        if all.is_empty() {
            return view! { <EmptyState /> }.into_any();
        }
        let tree = BranchTree::new(all.clone());
        let term = filter.get();

        if term.trim().is_empty() {
            tree.children_of(None)
                .into_iter()
                .map(|root| render_node(&tree, root))
                .collect_view()
                .into_any()
        } else {
            let matches = filter_paths(&tree, &all, &term);
            if matches.is_empty() {
                return view! { <EmptyState /> }.into_any();
            }
            view! {
                <ul class="branch-tree__matches">
                    {matches.into_iter().map(|(branch, path)| view! {
                        <li>
                            <div class="cell-title">{branch.display_label()}</div>
                            <div class="cell-sub">{path}</div>
                        </li>
                    }).collect_view()}
                </ul>
            }
            .into_any()
        }
    };

    view! {
        <PageFrame page_id="a002_branch--list" category=PAGE_CAT_LIST>
            <PageHeader title="Cabang" subtitle="Kanwil, KC dan KCP">
                <SearchInput
                    placeholder="Cari cabang..."
                    on_change=Callback::new(move |v: String| filter.set(v))
                />
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| fetch()>
                    {crate::shared::icons::icon("refresh")}
                </Button>
            </PageHeader>
            <div class="page__content">
                <ErrorBar message=error />
                <div class="branch-tree">{body}</div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(id: i64, name: &str, parent: Option<i64>) -> Branch {
        Branch {
            id,
            name: name.to_string(),
            branch_code: None,
            parent_id: parent,
            level: None,
        }
    }

    #[test]
    fn test_filter_shows_full_path() {
        let all = vec![
            branch(1, "Kanwil Jabar", None),
            branch(2, "KC Braga", Some(1)),
            branch(3, "KCP Dago", Some(2)),
        ];
        let tree = BranchTree::new(all.clone());
        let hits = filter_paths(&tree, &all, "dago");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].1, "Kanwil Jabar / KC Braga / KCP Dago");
    }

    #[test]
    fn test_filter_matches_code() {
        let mut b = branch(7, "KC Cimahi", None);
        b.branch_code = Some("0042".into());
        let all = vec![b];
        let tree = BranchTree::new(all.clone());
        assert_eq!(filter_paths(&tree, &all, "004").len(), 1);
        assert!(filter_paths(&tree, &all, "zzz").is_empty());
    }
}
