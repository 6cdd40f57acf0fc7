// tree.rs — Arena-backed issue tree for the host's issue list view.
//
// Nodes live in a Vec and refer to each other by NodeId. Every node except
// the root has an explicit parent link, so navigation never has to derive
// identity from string keys.
//
// Shape:
//   root
//   ├── issue "sql-injection-1"
//   │   ├── fix 0 (patch p1)
//   │   └── fix 1 (patch p1b)
//   └── issue "xss-4"
//       └── fix 0 (patch p2)

use crate::catalog::IssueCatalog;

/// Opaque handle to a node in an [`IssueTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Issue {
        issue_id: String,
    },
    Fix {
        issue_id: String,
        index: usize,
        patch_path: String,
        explanation: String,
    },
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
}

/// What the host needs to render one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItem {
    pub label: String,
    pub tooltip: String,
    /// Patch to open when the row is activated.
    pub open_patch: Option<String>,
    pub collapsible: bool,
}

#[derive(Debug, Clone)]
pub struct IssueTree {
    nodes: Vec<TreeNode>,
}

impl IssueTree {
    /// Build the tree from a catalog snapshot.
    pub fn build(catalog: &IssueCatalog) -> Self {
        let mut tree = Self {
            nodes: vec![TreeNode {
                id: NodeId(0),
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Root,
            }],
        };

        for issue in catalog {
            let issue_node = tree.push(
                tree.root(),
                NodeKind::Issue {
                    issue_id: issue.id.clone(),
                },
            );
            for (index, fix) in issue.fixes.iter().enumerate() {
                tree.push(
                    issue_node,
                    NodeKind::Fix {
                        issue_id: issue.id.clone(),
                        index,
                        patch_path: fix.path.clone(),
                        explanation: fix.explanation.clone(),
                    },
                );
            }
        }

        tree
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            id,
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Number of issue nodes (direct children of the root).
    pub fn issue_count(&self) -> usize {
        self.children(self.root()).len()
    }

    /// Find the node for an issue key.
    pub fn find_issue(&self, issue_id: &str) -> Option<NodeId> {
        self.children(self.root()).iter().copied().find(|id| {
            matches!(
                self.node(*id).map(|n| &n.kind),
                Some(NodeKind::Issue { issue_id: key }) if key == issue_id
            )
        })
    }

    /// Path from the root down to the node for `issue_id`, for revealing it
    /// in the host view. The root itself is not included.
    pub fn reveal(&self, issue_id: &str) -> Option<Vec<NodeId>> {
        let target = self.find_issue(issue_id)?;
        let mut path = vec![target];
        let mut current = self.parent(target);
        while let Some(id) = current {
            if id == self.root() {
                break;
            }
            path.push(id);
            current = self.parent(id);
        }
        path.reverse();
        Some(path)
    }

    /// Render data for one node.
    pub fn item(&self, id: NodeId) -> Option<TreeItem> {
        let node = self.node(id)?;
        let item = match &node.kind {
            NodeKind::Root => TreeItem {
                label: "Issues".to_string(),
                tooltip: String::new(),
                open_patch: None,
                collapsible: !node.children.is_empty(),
            },
            NodeKind::Issue { issue_id } => {
                let first_patch = node.children.first().and_then(|child| {
                    match self.node(*child).map(|n| &n.kind) {
                        Some(NodeKind::Fix { patch_path, .. }) => Some(patch_path.clone()),
                        _ => None,
                    }
                });
                TreeItem {
                    label: format!("Found {}", issue_id),
                    tooltip: format!("Click to show the source of {}", issue_id),
                    open_patch: first_patch,
                    collapsible: !node.children.is_empty(),
                }
            }
            NodeKind::Fix {
                index,
                patch_path,
                explanation,
                ..
            } => TreeItem {
                label: format!("Fix {}: {}", index + 1, explanation),
                tooltip: patch_path.clone(),
                open_patch: Some(patch_path.clone()),
                collapsible: false,
            },
        };
        Some(item)
    }
}
