//! Task directory: the set of running application instances.

use leptos::logging;
use thiserror::Error;

use crate::{
    apps::ApplicationCatalog,
    identity::InstanceIdGenerator,
    model::{Instance, InstanceId},
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors for task directory operations.
pub enum TaskError {
    /// No catalog entry with this name.
    #[error("could not find application `{0}`")]
    UnknownApplication(String),
    /// No live instance with this id.
    #[error("could not find instance `{0}`")]
    UnknownInstance(InstanceId),
}

#[derive(Debug, Clone, PartialEq)]
/// Instance-set change delivered to [`TaskManager`] subscribers.
pub enum TaskEvent {
    Created(Instance),
    Closed(Instance),
}

type TaskListener = Box<dyn Fn(&TaskEvent)>;

/// Owns the live instances of a desktop session.
///
/// Instances are kept in creation order, which is also the window stacking order. Subscribers are
/// notified synchronously before a mutating call returns.
pub struct TaskManager {
    catalog: ApplicationCatalog,
    ids: InstanceIdGenerator,
    instances: Vec<Instance>,
    revision: u64,
    listeners: Vec<TaskListener>,
}

impl TaskManager {
    pub fn new(catalog: ApplicationCatalog) -> Self {
        Self {
            catalog,
            ids: InstanceIdGenerator::default(),
            instances: Vec::new(),
            revision: 0,
            listeners: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &ApplicationCatalog {
        &self.catalog
    }

    /// Starts a new instance of `application_name`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::UnknownApplication`] when the catalog has no such application.
    pub fn create_instance(&mut self, application_name: &str) -> Result<Instance, TaskError> {
        let application = self
            .catalog
            .find(application_name)
            .cloned()
            .ok_or_else(|| TaskError::UnknownApplication(application_name.to_string()))?;
        let instance = Instance {
            instance_id: self.ids.next_id(),
            application,
        };
        logging::log!(
            "created {} of `{}`",
            instance.instance_id,
            instance.application_name()
        );
        self.instances.push(instance.clone());
        self.changed(TaskEvent::Created(instance.clone()));
        Ok(instance)
    }

    /// Removes a live instance and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::UnknownInstance`] and leaves the set untouched when `instance_id` is
    /// not live.
    pub fn close_instance(&mut self, instance_id: InstanceId) -> Result<Instance, TaskError> {
        let index = self
            .instances
            .iter()
            .position(|instance| instance.instance_id == instance_id)
            .ok_or(TaskError::UnknownInstance(instance_id))?;
        let instance = self.instances.remove(index);
        logging::log!(
            "closed {} of `{}`",
            instance.instance_id,
            instance.application_name()
        );
        self.changed(TaskEvent::Closed(instance.clone()));
        Ok(instance)
    }

    pub fn get_instance(&self, instance_id: InstanceId) -> Option<&Instance> {
        self.instances
            .iter()
            .find(|instance| instance.instance_id == instance_id)
    }

    /// Returns the oldest live instance of `application_name`.
    pub fn exists_instance_of_app(&self, application_name: &str) -> Option<&Instance> {
        self.instances
            .iter()
            .find(|instance| instance.application_name() == application_name)
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn instance_ids(&self) -> Vec<InstanceId> {
        self.instances
            .iter()
            .map(|instance| instance.instance_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Counter bumped on every instance-set change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers a listener for instance-set changes.
    pub fn subscribe(&mut self, listener: impl Fn(&TaskEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn changed(&mut self, event: TaskEvent) {
        self.revision = self.revision.wrapping_add(1);
        for listener in &self.listeners {
            listener(&event);
        }
    }
}
