use std::sync::Arc;

use indexmap::IndexMap;

use crate::{
    axis::{AxisId, PolarAxis},
    error::{AxisRole, ChartError},
};

/// Change notification emitted by an [`AxisCollection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisEvent {
    Added(AxisId),
    Updated(AxisId),
    Removed(AxisId),
}

/// Callback invoked after every change to an [`AxisCollection`].
pub type AxisObserver = Arc<dyn Fn(&AxisEvent) + Send + Sync>;

/// An ordered, versioned set of axes sharing one role.
///
/// Axes are addressed by position (the index used by hit-testing) or by [`AxisId`].
/// Every mutation bumps the version counter and notifies subscribers.
pub struct AxisCollection {
    role: AxisRole,
    axes: IndexMap<AxisId, PolarAxis>,
    /// Version counter to detect changes
    version: u64,
    observers: Vec<AxisObserver>,
}

impl AxisCollection {
    pub fn new(role: AxisRole) -> Self {
        Self {
            role,
            axes: IndexMap::new(),
            version: 0,
            observers: Vec::new(),
        }
    }

    pub fn role(&self) -> AxisRole {
        self.role
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn get(&self, index: usize) -> Option<&PolarAxis> {
        self.axes.get_index(index).map(|(_, axis)| axis)
    }

    /// Like [`AxisCollection::get`], failing with [`ChartError::AxisNotFound`].
    pub fn try_get(&self, index: usize) -> Result<&PolarAxis, ChartError> {
        self.get(index).ok_or(ChartError::AxisNotFound {
            role: self.role,
            index,
        })
    }

    pub fn get_by_id(&self, id: &AxisId) -> Option<&PolarAxis> {
        self.axes.get(id)
    }

    pub fn index_of(&self, id: &AxisId) -> Option<usize> {
        self.axes.get_index_of(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PolarAxis> {
        self.axes.values()
    }

    /// Register a callback run after every change.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: Fn(&AxisEvent) + Send + Sync + 'static,
    {
        self.observers.push(Arc::new(observer));
    }

    /// A collection holding one default axis.
    pub(crate) fn with_default_axis(role: AxisRole) -> Self {
        let mut collection = Self::new(role);
        let axis = PolarAxis::new();
        let id = axis.id;
        collection.axes.insert(id, axis);
        collection.changed(AxisEvent::Added(id));
        collection
    }

    /// Append an axis. If an axis with the same id exists, it is replaced in place.
    pub fn push(&mut self, axis: PolarAxis) -> Result<AxisId, ChartError> {
        axis.validate()?;
        let id = axis.id;
        let event = match self.axes.insert(id, axis) {
            Some(_) => AxisEvent::Updated(id),
            None => AxisEvent::Added(id),
        };
        self.changed(event);
        Ok(id)
    }

    /// Remove an axis by id, shifting later axes down one index.
    pub fn remove(&mut self, id: &AxisId) -> Option<PolarAxis> {
        let axis = self.axes.shift_remove(id)?;
        self.changed(AxisEvent::Removed(*id));
        Some(axis)
    }

    /// Mutate the axis at `index` and notify subscribers.
    pub fn update<R, F: FnOnce(&mut PolarAxis) -> R>(
        &mut self,
        index: usize,
        f: F,
    ) -> Result<R, ChartError> {
        let role = self.role;
        let (id, axis) = self
            .axes
            .get_index_mut(index)
            .ok_or(ChartError::AxisNotFound { role, index })?;
        let id = *id;
        let out = f(axis);
        self.changed(AxisEvent::Updated(id));
        Ok(out)
    }

    /// Apply `f` to every axis, notifying once per axis it reports as changed.
    pub(crate) fn update_each<F: FnMut(usize, &mut PolarAxis) -> bool>(&mut self, mut f: F) {
        let mut changed = Vec::new();
        for (index, (id, axis)) in self.axes.iter_mut().enumerate() {
            if f(index, axis) {
                changed.push(*id);
            }
        }
        for id in changed {
            self.changed(AxisEvent::Updated(id));
        }
    }

    fn changed(&mut self, event: AxisEvent) {
        self.version = self.version.wrapping_add(1);
        tracing::trace!(role = %self.role, ?event, version = self.version, "axis collection changed");
        for observer in &self.observers {
            observer(&event);
        }
    }
}

impl std::fmt::Debug for AxisCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxisCollection")
            .field("role", &self.role)
            .field("axes", &self.axes)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}
