// issues.rs — List the issue catalog as a tree.

use clap::Args;
use fixsync_catalog::{load_catalog, IssueTree, JsonIssueSource, NodeId};

use crate::config::ProjectConfig;

#[derive(Args)]
pub struct IssuesArgs {
    /// Hide issues resolved by this patch path.
    #[arg(long)]
    pub resolved_by: Option<String>,

    /// Print only the path to this issue.
    #[arg(long)]
    pub reveal: Option<String>,
}

pub async fn execute(args: &IssuesArgs, config: &ProjectConfig) -> anyhow::Result<()> {
    let source = JsonIssueSource::new(&config.issues_file);
    let mut catalog = load_catalog(&source).await;
    if let Some(patch_path) = &args.resolved_by {
        catalog = catalog.without_resolved(patch_path);
    }

    let tree = IssueTree::build(&catalog);

    if let Some(issue_id) = &args.reveal {
        let Some(path) = tree.reveal(issue_id) else {
            anyhow::bail!("no issue named '{}'", issue_id);
        };
        for (depth, id) in path.into_iter().enumerate() {
            print_node(&tree, id, depth);
        }
        return Ok(());
    }

    if tree.issue_count() == 0 {
        println!("No issues.");
        return Ok(());
    }

    for issue in tree.children(tree.root()) {
        print_node(&tree, *issue, 0);
        for fix in tree.children(*issue) {
            print_node(&tree, *fix, 1);
        }
    }
    println!();
    println!("{} issue(s).", tree.issue_count());

    Ok(())
}

fn print_node(tree: &IssueTree, id: NodeId, depth: usize) {
    let Some(item) = tree.item(id) else {
        return;
    };
    let indent = "  ".repeat(depth);
    match &item.open_patch {
        Some(patch) => println!("{}{}  [{}]", indent, item.label, patch),
        None => println!("{}{}", indent, item.label),
    }
}
