//! File tree model
//!
//! A tree is an owned `Vec<FileNode>`, so it is finite and acyclic by
//! construction. Names are only unique among siblings.

use std::path::Path;

/// Extensions the add-file prompt suggests. Not enforced.
pub const ACCEPTED_EXTENSIONS: &str = ".md,.json,.yaml,.yml";

/// A file or folder shown in the explorer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileNode {
    Folder {
        name: String,
        children: Vec<FileNode>,
    },
    File {
        name: String,
        /// Only used to pick an icon
        mime_type: Option<String>,
    },
}

impl FileNode {
    pub fn folder(name: &str, children: Vec<FileNode>) -> Self {
        FileNode::Folder {
            name: name.to_string(),
            children,
        }
    }

    pub fn file(name: &str, mime_type: Option<&str>) -> Self {
        FileNode::File {
            name: name.to_string(),
            mime_type: mime_type.map(str::to_string),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FileNode::Folder { name, .. } | FileNode::File { name, .. } => name,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            FileNode::Folder { .. } => NodeKind::Folder,
            FileNode::File { .. } => NodeKind::File,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, FileNode::Folder { .. })
    }

    pub fn mime_type(&self) -> Option<&str> {
        match self {
            FileNode::File { mime_type, .. } => mime_type.as_deref(),
            FileNode::Folder { .. } => None,
        }
    }

    /// Children of a folder; empty for files
    pub fn children(&self) -> &[FileNode] {
        match self {
            FileNode::Folder { children, .. } => children,
            FileNode::File { .. } => &[],
        }
    }

    /// Icon for this node given the open state of its own row
    pub fn icon(&self, open: bool) -> FileIcon {
        FileIcon::resolve(self.kind(), self.mime_type(), open)
    }
}

/// Discriminant of [`FileNode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    File,
}

/// The five icon categories. Folders carry their open state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileIcon {
    Folder { open: bool },
    Json,
    Markdown,
    Yaml,
    Generic,
}

impl FileIcon {
    pub fn resolve(kind: NodeKind, mime_type: Option<&str>, open: bool) -> Self {
        if kind == NodeKind::Folder {
            return FileIcon::Folder { open };
        }
        match mime_type {
            Some("application/json") => FileIcon::Json,
            Some("text/markdown") => FileIcon::Markdown,
            Some("application/yaml") => FileIcon::Yaml,
            _ => FileIcon::Generic,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            FileIcon::Folder { open: true } => "▾ ◫",
            FileIcon::Folder { open: false } => "▸ ▭",
            FileIcon::Json => "{}",
            FileIcon::Markdown => "¶",
            FileIcon::Yaml => "≡",
            FileIcon::Generic => "·",
        }
    }
}

/// The tree a fresh session starts with
pub fn demo_tree() -> Vec<FileNode> {
    vec![
        FileNode::folder(
            "Documents",
            vec![
                FileNode::file("config.yaml", Some("application/yaml")),
                FileNode::file("data.json", Some("application/json")),
                FileNode::folder(
                    "Notes",
                    vec![
                        FileNode::file("meeting-notes.md", Some("text/markdown")),
                        FileNode::file("todo.md", Some("text/markdown")),
                    ],
                ),
            ],
        ),
        FileNode::file("README.md", Some("text/markdown")),
    ]
}

/// Build a file node for a user-chosen path.
///
/// Only the file name is used. The file is never opened, and extensions
/// outside [`ACCEPTED_EXTENSIONS`] are accepted too.
pub fn node_from_path(path: &Path) -> Option<FileNode> {
    let name = path.file_name()?.to_str()?;
    if name.trim().is_empty() {
        return None;
    }
    Some(FileNode::File {
        name: name.to_string(),
        mime_type: guess_mime_type(name).map(str::to_string),
    })
}

/// Parse the add-file prompt input: comma separated paths
pub fn nodes_from_input(input: &str) -> Vec<FileNode> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| node_from_path(Path::new(s)))
        .collect()
}

/// The MIME type a browser would report for a picked file
pub fn guess_mime_type(name: &str) -> Option<&'static str> {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())?
        .to_ascii_lowercase();
    match ext.as_str() {
        "md" | "markdown" => Some("text/markdown"),
        "json" => Some("application/json"),
        "yaml" | "yml" => Some("application/yaml"),
        "txt" => Some("text/plain"),
        "html" | "htm" => Some("text/html"),
        "csv" => Some("text/csv"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_resolution() {
        let json = FileNode::file("a.json", Some("application/json"));
        let md = FileNode::file("a.md", Some("text/markdown"));
        let yaml = FileNode::file("a.yaml", Some("application/yaml"));
        let other = FileNode::file("a.bin", None);
        let plain = FileNode::file("a.txt", Some("text/plain"));

        assert_eq!(json.icon(false), FileIcon::Json);
        assert_eq!(md.icon(false), FileIcon::Markdown);
        assert_eq!(yaml.icon(false), FileIcon::Yaml);
        assert_eq!(other.icon(false), FileIcon::Generic);
        assert_eq!(plain.icon(false), FileIcon::Generic);
    }

    #[test]
    fn test_folder_icon_tracks_open_state() {
        let folder = FileNode::folder("Docs", vec![]);
        assert_eq!(folder.icon(true), FileIcon::Folder { open: true });
        assert_eq!(folder.icon(false), FileIcon::Folder { open: false });
        // A file never picks up the folder variant
        assert_eq!(FileNode::file("x", None).icon(true), FileIcon::Generic);
    }

    #[test]
    fn test_demo_tree_shape() {
        let tree = demo_tree();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].name(), "Documents");
        assert_eq!(tree[0].children().len(), 3);
        assert_eq!(tree[0].children()[2].children().len(), 2);
        assert!(!tree[1].is_folder());
    }

    #[test]
    fn test_node_from_path_uses_file_name_only() {
        let node = node_from_path(Path::new("/tmp/some/dir/plan.yml")).unwrap();
        assert_eq!(node.name(), "plan.yml");
        assert_eq!(node.mime_type(), Some("application/yaml"));
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_unlisted_extension_still_accepted() {
        let node = node_from_path(Path::new("image.png")).unwrap();
        assert_eq!(node.name(), "image.png");
        assert_eq!(node.mime_type(), None);
    }

    #[test]
    fn test_nodes_from_input_splits_on_commas() {
        let nodes = nodes_from_input(" a.md, ,b.json ,  ");
        let names: Vec<_> = nodes.iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["a.md", "b.json"]);
    }
}
