//! Session menu commands and the context menu layout.

use super::{MenuNode, MenuTree, SpecialCommand};

/// Commands reachable from the session menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// Close the active session (same path as its tab's close button)
    CloseSession,
    /// Ask for a configuration and open it in a new tab
    NewSession,
    /// Open a copy of the active session right after it
    DuplicateSession,
    /// Restart the backend of a remote-closed session
    RestartSession,
    /// Edit the active session's configuration
    ChangeSettings,
    /// Backend special command with this code
    Special(u32),
    ToggleFullScreen,
    ToggleConfirmPaste,
    /// Close every session and the window
    Exit,
}

/// What the menu needs to know about the window and the active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionMenuState {
    pub remote_closed: bool,
    /// Resizing disabled; full-screen is unavailable
    pub resize_disabled: bool,
    pub full_screen: bool,
    pub confirm_paste: bool,
}

/// Context menu for the active session.
///
/// `specials` is the already nested special-command tree; an empty tree
/// leaves the submenu out.
pub fn session_menu(state: &SessionMenuState, specials: &MenuTree) -> MenuTree {
    let mut nodes = vec![
        MenuNode::item("Close Session", MenuCommand::CloseSession),
        MenuNode::Separator,
        MenuNode::item("New Session...", MenuCommand::NewSession),
        MenuNode::item("Duplicate Session", MenuCommand::DuplicateSession),
    ];
    if state.remote_closed {
        nodes.push(MenuNode::item("Restart Session", MenuCommand::RestartSession));
    }
    nodes.push(MenuNode::item("Change Settings...", MenuCommand::ChangeSettings));

    if !specials.is_empty() {
        nodes.push(MenuNode::Separator);
        nodes.push(MenuNode::Submenu {
            label: "Special Command".to_string(),
            children: specials.nodes.clone(),
        });
    }

    nodes.push(MenuNode::Separator);
    nodes.push(MenuNode::Item {
        label: "Full Screen".to_string(),
        command: MenuCommand::ToggleFullScreen,
        enabled: !state.resize_disabled,
        checked: state.full_screen,
    });
    nodes.push(MenuNode::Item {
        label: "Confirm Paste".to_string(),
        command: MenuCommand::ToggleConfirmPaste,
        enabled: true,
        checked: state.confirm_paste,
    });
    nodes.push(MenuNode::Separator);
    nodes.push(MenuNode::item("Exit", MenuCommand::Exit));

    MenuTree { nodes }
}

/// Nest `specials`, logging and dropping a malformed list.
pub(crate) fn specials_tree(specials: &[SpecialCommand]) -> MenuTree {
    MenuTree::from_specials(specials).unwrap_or_else(|e| {
        log::warn!("Ignoring malformed special-command list: {}", e);
        MenuTree::default()
    })
}
