//! Shared contract types between the desktop window manager runtime and the applications it hosts.
//!
//! An application is described once by an [`ApplicationDescriptor`] and rendered once per running
//! instance through [`ApplicationDescriptor::render`], receiving the [`InstanceId`] the task
//! manager allocated for it.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::{fmt, rc::Rc};

use leptos::View;
use serde::{Deserialize, Serialize};

/// Stable identifier for one running application instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u64);

impl InstanceId {
    /// Returns the DOM id used for the instance's window root element.
    pub fn dom_id(self) -> String {
        format!("window-{}", self.0)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instance-{}", self.0)
    }
}

/// Context passed to an application when one of its instances is mounted into a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppMountContext {
    /// Instance the rendered view belongs to.
    pub instance_id: InstanceId,
}

/// Render callback producing an application's window body.
pub type RenderFn = Rc<dyn Fn(AppMountContext) -> View>;

/// Immutable description of an installable application.
#[derive(Clone)]
pub struct ApplicationDescriptor {
    name: String,
    title: String,
    icon_url: String,
    render: RenderFn,
}

impl ApplicationDescriptor {
    /// Builds a descriptor when `name` conforms to the application naming policy.
    ///
    /// Names are lowercase ASCII letters, digits and `-`, start with a letter, and are at most 32
    /// bytes long so they can be embedded in DOM ids.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        icon_url: impl Into<String>,
        render: impl Fn(AppMountContext) -> View + 'static,
    ) -> Result<Self, String> {
        let name = name.into();
        if !is_valid_application_name(&name) {
            return Err(format!(
                "invalid application name `{name}`; expected a lowercase token"
            ));
        }
        Ok(Self {
            name,
            title: title.into(),
            icon_url: icon_url.into(),
            render: Rc::new(render),
        })
    }

    /// Unique catalog key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Dock icon URL.
    pub fn icon_url(&self) -> &str {
        &self.icon_url
    }

    /// Renders the application body for one instance.
    pub fn render(&self, context: AppMountContext) -> View {
        (self.render)(context)
    }
}

impl fmt::Debug for ApplicationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationDescriptor")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("icon_url", &self.icon_url)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ApplicationDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.title == other.title && self.icon_url == other.icon_url
    }
}

fn is_valid_application_name(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 32 {
        return false;
    }
    let bytes = raw.as_bytes();
    if !bytes[0].is_ascii_lowercase() || raw.ends_with('-') {
        return false;
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
}

/// Returns the DOM id of an application's dock icon.
///
/// The window manager resolves this element to animate minimizing windows into the dock.
pub fn dock_icon_dom_id(application_name: &str) -> String {
    format!("dock-app-{application_name}")
}
