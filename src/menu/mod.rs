//! Session menus.
//!
//! Menus are built as a platform-neutral [`MenuTree`] and handed to the
//! window host, which walks it through a [`MenuSink`] to create native items.
//! Backends describe their protocol-specific commands as a flat list with
//! submenu markers; [`MenuTree::from_specials`] nests that list once.

mod actions;

pub use actions::{MenuCommand, SessionMenuState, session_menu};
pub(crate) use actions::specials_tree;

use crate::error::MenuError;

/// One entry of a backend's flat special-command list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialCommand {
    pub name: String,
    pub kind: SpecialKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKind {
    /// A command forwarded to the backend with this code
    Command(u32),
    Separator,
    /// Opens a submenu named by the entry; closed by `EndSubmenu`
    Submenu,
    EndSubmenu,
}

impl SpecialCommand {
    pub fn command(name: impl Into<String>, code: u32) -> Self {
        Self {
            name: name.into(),
            kind: SpecialKind::Command(code),
        }
    }

    pub fn separator() -> Self {
        Self {
            name: String::new(),
            kind: SpecialKind::Separator,
        }
    }

    pub fn submenu(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SpecialKind::Submenu,
        }
    }

    pub fn end_submenu() -> Self {
        Self {
            name: String::new(),
            kind: SpecialKind::EndSubmenu,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuNode {
    Item {
        label: String,
        command: MenuCommand,
        enabled: bool,
        checked: bool,
    },
    Separator,
    Submenu {
        label: String,
        children: Vec<MenuNode>,
    },
}

impl MenuNode {
    pub fn item(label: impl Into<String>, command: MenuCommand) -> Self {
        MenuNode::Item {
            label: label.into(),
            command,
            enabled: true,
            checked: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuTree {
    pub nodes: Vec<MenuNode>,
}

/// Receives a menu tree as a sequence of platform calls.
pub trait MenuSink {
    fn append_item(&mut self, label: &str, command: MenuCommand, enabled: bool, checked: bool);

    fn append_separator(&mut self);

    /// Following calls go into a new submenu until the matching `end_submenu`.
    fn begin_submenu(&mut self, label: &str);

    fn end_submenu(&mut self);
}

impl MenuTree {
    /// Nest a flat special-command list.
    pub fn from_specials(specials: &[SpecialCommand]) -> Result<Self, MenuError> {
        // Each open level holds its label and the nodes collected so far
        let mut stack: Vec<(String, Vec<MenuNode>)> = vec![(String::new(), Vec::new())];

        for (position, special) in specials.iter().enumerate() {
            match special.kind {
                SpecialKind::Command(code) => {
                    if let Some((_, nodes)) = stack.last_mut() {
                        nodes.push(MenuNode::item(special.name.clone(), MenuCommand::Special(code)));
                    }
                }
                SpecialKind::Separator => {
                    if let Some((_, nodes)) = stack.last_mut() {
                        nodes.push(MenuNode::Separator);
                    }
                }
                SpecialKind::Submenu => stack.push((special.name.clone(), Vec::new())),
                SpecialKind::EndSubmenu => {
                    if stack.len() < 2 {
                        return Err(MenuError::UnbalancedEnd(position));
                    }
                    if let Some((label, children)) = stack.pop()
                        && let Some((_, parent)) = stack.last_mut()
                    {
                        parent.push(MenuNode::Submenu { label, children });
                    }
                }
            }
        }

        if stack.len() > 1 {
            let label = stack.pop().map(|(label, _)| label).unwrap_or_default();
            return Err(MenuError::UnclosedSubmenu(label));
        }
        let nodes = stack.pop().map(|(_, nodes)| nodes).unwrap_or_default();
        Ok(Self { nodes })
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Replay the tree into `sink`, depth first.
    pub fn translate(&self, sink: &mut dyn MenuSink) {
        translate_nodes(&self.nodes, sink);
    }

    /// Depth-first search for the item carrying `command`.
    pub fn find(&self, command: MenuCommand) -> Option<&MenuNode> {
        find_in(&self.nodes, command)
    }
}

fn translate_nodes(nodes: &[MenuNode], sink: &mut dyn MenuSink) {
    for node in nodes {
        match node {
            MenuNode::Item {
                label,
                command,
                enabled,
                checked,
            } => sink.append_item(label, *command, *enabled, *checked),
            MenuNode::Separator => sink.append_separator(),
            MenuNode::Submenu { label, children } => {
                sink.begin_submenu(label);
                translate_nodes(children, sink);
                sink.end_submenu();
            }
        }
    }
}

fn find_in(nodes: &[MenuNode], command: MenuCommand) -> Option<&MenuNode> {
    nodes.iter().find_map(|node| match node {
        MenuNode::Item { command: c, .. } if *c == command => Some(node),
        MenuNode::Submenu { children, .. } => find_in(children, command),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct TextSink {
        lines: Vec<String>,
        depth: usize,
    }

    impl MenuSink for TextSink {
        fn append_item(&mut self, label: &str, _command: MenuCommand, enabled: bool, _checked: bool) {
            let marker = if enabled { "" } else { " (disabled)" };
            self.lines.push(format!("{}{label}{marker}", "  ".repeat(self.depth)));
        }

        fn append_separator(&mut self) {
            self.lines.push(format!("{}--", "  ".repeat(self.depth)));
        }

        fn begin_submenu(&mut self, label: &str) {
            self.lines.push(format!("{}{label} >", "  ".repeat(self.depth)));
            self.depth += 1;
        }

        fn end_submenu(&mut self) {
            self.depth -= 1;
        }
    }

    fn ssh_specials() -> Vec<SpecialCommand> {
        vec![
            SpecialCommand::command("Break", 1),
            SpecialCommand::separator(),
            SpecialCommand::submenu("Signals"),
            SpecialCommand::command("SIGINT", 2),
            SpecialCommand::command("SIGTERM", 3),
            SpecialCommand::end_submenu(),
            SpecialCommand::command("Rekey", 4),
        ]
    }

    #[test]
    fn test_flat_list_nests_submenus() {
        let tree = MenuTree::from_specials(&ssh_specials()).expect("balanced");
        assert_eq!(tree.nodes.len(), 4);
        match &tree.nodes[2] {
            MenuNode::Submenu { label, children } => {
                assert_eq!(label, "Signals");
                assert_eq!(children.len(), 2);
            }
            other => panic!("expected submenu, got {other:?}"),
        }
        assert!(tree.find(MenuCommand::Special(3)).is_some());
    }

    #[test]
    fn test_unbalanced_markers_are_errors() {
        let stray = vec![SpecialCommand::command("Break", 1), SpecialCommand::end_submenu()];
        assert_eq!(MenuTree::from_specials(&stray), Err(MenuError::UnbalancedEnd(1)));

        let open = vec![SpecialCommand::submenu("Signals")];
        assert_eq!(
            MenuTree::from_specials(&open),
            Err(MenuError::UnclosedSubmenu("Signals".to_string()))
        );
    }

    #[test]
    fn test_translate_walks_depth_first() {
        let tree = MenuTree::from_specials(&ssh_specials()).expect("balanced");
        let mut sink = TextSink::default();
        tree.translate(&mut sink);
        assert_eq!(
            sink.lines,
            vec!["Break", "--", "Signals >", "  SIGINT", "  SIGTERM", "Rekey"]
        );
    }
}
