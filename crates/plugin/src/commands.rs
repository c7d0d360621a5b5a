//! Menu command surface.
//!
//! The host renders these as its plugin menu and hands the chosen
//! [`MenuAction`] back to [`Injector::run`](crate::Injector::run).

/// An action the user can trigger from the host's menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Dump the named installed game to a portable archive.
    DumpGame { app_name: String },
    /// Pick a zip and install it into the library.
    InstallFromZip,
}

/// One entry in the host's plugin menu.
///
/// Either a leaf carrying an action or a submenu carrying children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCommand {
    pub label: String,
    pub action: Option<MenuAction>,
    pub children: Vec<MenuCommand>,
}

impl MenuCommand {
    /// Creates a leaf entry that triggers `action`.
    pub fn action(label: impl Into<String>, action: MenuAction) -> Self {
        Self {
            label: label.into(),
            action: Some(action),
            children: Vec::new(),
        }
    }

    /// Creates a submenu entry.
    pub fn submenu(label: impl Into<String>, children: Vec<MenuCommand>) -> Self {
        Self {
            label: label.into(),
            action: None,
            children,
        }
    }
}
