//! Application catalog: the read-only list of launchable applications.

mod placeholders;

use std::rc::Rc;

use desktop_app_contract::ApplicationDescriptor;
use leptos::logging;

use crate::config::{AppManifest, ShellConfig};

/// Read-only application registry built once per desktop session.
///
/// Iteration follows declaration order, which is also the dock order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationCatalog {
    applications: Vec<Rc<ApplicationDescriptor>>,
}

impl ApplicationCatalog {
    /// Builds a catalog, keeping the first descriptor when names collide.
    pub fn new(descriptors: impl IntoIterator<Item = ApplicationDescriptor>) -> Self {
        let mut applications: Vec<Rc<ApplicationDescriptor>> = Vec::new();
        for descriptor in descriptors {
            if applications.iter().any(|app| app.name() == descriptor.name()) {
                logging::warn!(
                    "ignoring duplicate application `{}` in catalog",
                    descriptor.name()
                );
                continue;
            }
            applications.push(Rc::new(descriptor));
        }
        Self { applications }
    }

    /// Builds a catalog from manifests, attaching the bundled body for each known application.
    pub fn from_manifests(manifests: &[AppManifest]) -> Self {
        Self::new(manifests.iter().filter_map(|manifest| {
            match ApplicationDescriptor::new(
                manifest.name.clone(),
                manifest.title.clone(),
                manifest.icon_url.clone(),
                placeholders::mount_fn_for(&manifest.name),
            ) {
                Ok(descriptor) => Some(descriptor),
                Err(err) => {
                    logging::warn!("skipping application manifest: {err}");
                    None
                }
            }
        }))
    }

    /// Catalog declared by the embedded shell configuration.
    pub fn builtin() -> Self {
        Self::from_manifests(&ShellConfig::builtin().applications)
    }

    pub fn find(&self, name: &str) -> Option<&Rc<ApplicationDescriptor>> {
        self.applications.iter().find(|app| app.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<ApplicationDescriptor>> {
        self.applications.iter()
    }

    pub fn len(&self) -> usize {
        self.applications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }
}
