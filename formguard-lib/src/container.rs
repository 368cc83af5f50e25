//! Container-level validation.
//!
//! A container (form, panel, tab page) does not own validators. When asked to
//! validate, it scans the registry and picks up every validator whose bound
//! control lies inside it.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::control::{Control, Node, same_node};
use crate::error::ConfigError;
use crate::registry::ValidatorRegistry;
use crate::result::{FieldError, ValidationResult};
use crate::validator::Validator;

/// Which validators a container pulls in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerScope {
    /// Controls whose parent is the container itself.
    DirectChildrenOnly,
    /// Controls anywhere below the container.
    #[default]
    AllDescendants,
}

/// Position of a control in the form's overall tab order.
///
/// Holds the tab index of every element from the outermost ancestor down to
/// the control. Keys compare level by level, so a control in an earlier panel
/// comes before every control of a later panel.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TabOrderKey(Vec<u32>);

impl TabOrderKey {
    pub fn new(indices: Vec<u32>) -> Self {
        Self(indices)
    }

    /// Build the key by walking from the control up to its root.
    pub fn for_control(control: &dyn Control) -> Self {
        let mut indices = vec![control.tab_index()];
        let mut current = control.parent();
        while let Some(node) = current {
            indices.push(node.tab_index());
            current = node.parent();
        }
        indices.reverse();
        Self(indices)
    }

    /// Tab indices, outermost first.
    pub fn indices(&self) -> &[u32] {
        &self.0
    }
}

impl fmt::Display for TabOrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0.")?;
        for index in &self.0 {
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

/// Whether `control` lies inside `candidate` under `scope`.
///
/// With [`ContainerScope::AllDescendants`] the control itself counts as
/// inside. A top-level control is inside nothing but itself.
pub fn is_ancestor(candidate: &dyn Node, control: &dyn Control, scope: ContainerScope) -> bool {
    match scope {
        ContainerScope::DirectChildrenOnly => control
            .parent()
            .is_some_and(|parent| same_node(parent.as_ref(), candidate)),
        ContainerScope::AllDescendants => {
            if control.node_id() == candidate.node_id() {
                return true;
            }
            let mut current = control.parent();
            while let Some(node) = current {
                if same_node(node.as_ref(), candidate) {
                    return true;
                }
                current = node.parent();
            }
            false
        }
    }
}

/// Validators from a registry snapshot whose control lies in the container.
///
/// A registered validator that was never bound cannot be placed in any
/// container and fails the scan with [`ConfigError::UnboundControl`].
fn in_scope(
    registry: &ValidatorRegistry,
    container: &dyn Node,
    scope: ContainerScope,
) -> Result<Vec<(Validator, Arc<dyn Control>)>, ConfigError> {
    let mut found = Vec::new();
    for validator in registry.snapshot() {
        let control = validator
            .control()
            .ok_or_else(|| ConfigError::unbound(validator.id()))?;
        if is_ancestor(container, control.as_ref(), scope) {
            found.push((validator, control));
        }
    }
    Ok(found)
}

/// Validate every in-scope validator and report whether all passed.
///
/// Each validator is evaluated afresh; stale validity is never read.
pub fn is_valid_in(
    registry: &ValidatorRegistry,
    container: &dyn Node,
    scope: ContainerScope,
) -> Result<bool, ConfigError> {
    let mut all_valid = true;
    for (validator, _) in in_scope(registry, container, scope)? {
        all_valid &= validator.validate()?;
    }
    Ok(all_valid)
}

/// Validate every in-scope validator and focus the first invalid control.
///
/// "First" is the smallest [`TabOrderKey`]; on equal keys the validator
/// registered earlier wins.
pub fn validate_in(
    registry: &ValidatorRegistry,
    container: &dyn Node,
    scope: ContainerScope,
) -> Result<ValidationResult, ConfigError> {
    let mut errors = Vec::new();
    let mut first: Option<(TabOrderKey, Arc<dyn Control>)> = None;

    for (validator, control) in in_scope(registry, container, scope)? {
        if validator.validate()? {
            continue;
        }

        let key = TabOrderKey::for_control(control.as_ref());
        errors.push(FieldError {
            validator_id: validator.id().to_string(),
            control_id: control.node_id(),
            message: validator.error_message(),
        });

        let earlier = match &first {
            Some((best, _)) => key < *best,
            None => true,
        };
        if earlier {
            first = Some((key, control));
        }
    }

    let Some((key, control)) = first else {
        log::debug!("container '{}' is valid", container.node_id());
        return Ok(ValidationResult::Valid);
    };

    let focused = control.node_id();
    log::debug!(
        "container '{}' has {} invalid field(s), focusing '{}' ({})",
        container.node_id(),
        errors.len(),
        focused,
        key
    );
    control.focus();

    Ok(ValidationResult::Invalid { errors, focused })
}

/// Validates all validators within one container.
///
/// # Example
///
/// ```ignore
/// let form_check = ContainerValidator::new(&registry)
///     .container(settings_page.clone())
///     .scope(ContainerScope::AllDescendants);
///
/// let result = form_check.validate()?;
/// if result.is_valid() {
///     save_settings();
/// }
/// ```
#[derive(Clone)]
pub struct ContainerValidator {
    registry: ValidatorRegistry,
    container: Option<Arc<dyn Node>>,
    scope: ContainerScope,
}

impl ContainerValidator {
    /// Create a container validator with no container and the default scope.
    pub fn new(registry: &ValidatorRegistry) -> Self {
        Self {
            registry: registry.clone(),
            container: None,
            scope: ContainerScope::default(),
        }
    }

    /// Set the container to validate.
    pub fn container(mut self, container: Arc<dyn Node>) -> Self {
        self.container = Some(container);
        self
    }

    /// Set which validators are included.
    pub fn scope(mut self, scope: ContainerScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn set_container(&mut self, container: Arc<dyn Node>) {
        self.container = Some(container);
    }

    pub fn set_scope(&mut self, scope: ContainerScope) {
        self.scope = scope;
    }

    pub fn current_scope(&self) -> ContainerScope {
        self.scope
    }

    fn target(&self) -> Result<&dyn Node, ConfigError> {
        self.container.as_deref().ok_or(ConfigError::MissingContainer)
    }

    /// See [`is_valid_in`].
    pub fn is_valid(&self) -> Result<bool, ConfigError> {
        is_valid_in(&self.registry, self.target()?, self.scope)
    }

    /// See [`validate_in`].
    pub fn validate(&self) -> Result<ValidationResult, ConfigError> {
        validate_in(&self.registry, self.target()?, self.scope)
    }
}

impl fmt::Debug for ContainerValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerValidator")
            .field("container", &self.container.as_ref().map(|c| c.node_id()))
            .field("scope", &self.scope)
            .finish()
    }
}
