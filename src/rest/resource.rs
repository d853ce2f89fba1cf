//! A named group of actions.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::rest::action::Action;
use crate::rest::api::ApiContext;
use crate::schema::ResourceSpec;

/// A named group of [`Action`]s, e.g. `Call` or `Message`.
#[derive(Clone, Debug)]
pub struct Resource {
    name: String,
    actions: BTreeMap<String, Action>,
}

impl Resource {
    pub(crate) fn new(name: &str, spec: &ResourceSpec, context: &Arc<ApiContext>) -> Self {
        let actions = spec
            .iter()
            .map(|(action, action_spec)| {
                (
                    action.to_string(),
                    Action::new(name, action, action_spec.clone(), Arc::clone(context)),
                )
            })
            .collect();

        Self {
            name: name.to_string(),
            actions,
        }
    }

    /// Returns the resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up an action by name.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    /// Returns the names of every action, sorted.
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }
}
