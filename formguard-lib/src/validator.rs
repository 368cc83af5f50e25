//! Validators bound to a single control.

use std::ops::Deref;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::container::TabOrderKey;
use crate::control::Control;
use crate::display::{ErrorHints, ErrorProvider};
use crate::error::ConfigError;
use crate::registry::ValidatorRegistry;
use crate::rule::ValidationRule;
use crate::subscription::Subscription;

/// Unique identifier for a validator instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidatorId(usize);

impl ValidatorId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__validator_{}", self.0)
    }
}

/// Outcome of the most recent evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Validity {
    /// `validate()` has not completed yet.
    #[default]
    NotValidated,
    Valid,
    Invalid,
}

impl Validity {
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }
}

impl From<bool> for Validity {
    fn from(valid: bool) -> Self {
        if valid { Self::Valid } else { Self::Invalid }
    }
}

/// Mutable configuration and state of a validator
struct ValidatorState {
    rule: ValidationRule,
    control: Option<Arc<dyn Control>>,
    error_message: String,
    automatic: bool,
    validity: Validity,
    hints: ErrorHints,
    error_provider: Option<Arc<dyn ErrorProvider>>,
}

struct ValidatorInner {
    id: ValidatorId,
    state: RwLock<ValidatorState>,
    /// Subscription to the bound control's validating event
    subscription: Mutex<Option<Subscription>>,
}

/// Checks one control against one rule.
///
/// A `Validator` is a cheap, shareable reference. Instances are created with
/// [`Validator::new`], which registers them and returns the owning
/// [`ValidatorHandle`].
///
/// # Example
///
/// ```ignore
/// let registry = ValidatorRegistry::new();
/// let age = Validator::new(
///     &registry,
///     RangeRule::new("18", "120").data_type(ValidationDataType::Integer),
/// );
/// age.set_error_message("Age must be between 18 and 120");
/// age.bind(age_input.clone());
///
/// if !age.validate()? {
///     // the error provider now shows the message next to age_input
/// }
/// ```
#[derive(Clone)]
pub struct Validator {
    inner: Arc<ValidatorInner>,
}

impl Validator {
    /// Create a validator and register it.
    ///
    /// The validator stays registered until the returned handle is released
    /// or dropped.
    pub fn new(registry: &ValidatorRegistry, rule: impl Into<ValidationRule>) -> ValidatorHandle {
        let validator = Self {
            inner: Arc::new(ValidatorInner {
                id: ValidatorId::new(),
                state: RwLock::new(ValidatorState {
                    rule: rule.into(),
                    control: None,
                    error_message: String::new(),
                    automatic: true,
                    validity: Validity::NotValidated,
                    hints: ErrorHints::default(),
                    error_provider: None,
                }),
                subscription: Mutex::new(None),
            }),
        };
        registry.register(&validator);
        ValidatorHandle {
            validator,
            registry: registry.clone(),
            released: AtomicBool::new(false),
        }
    }

    /// Get the unique ID for this validator
    pub fn id(&self) -> ValidatorId {
        self.inner.id
    }

    fn state(&self) -> RwLockReadGuard<'_, ValidatorState> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, ValidatorState> {
        self.inner.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------------
    // Binding
    // -------------------------------------------------------------------------

    /// Bind the control to validate.
    ///
    /// Subscribes to the control's validating event so the validator runs
    /// whenever the control finishes an edit while [`is_automatic`] is set.
    /// Rebinding drops the subscription to the previous control.
    ///
    /// [`is_automatic`]: Self::is_automatic
    pub fn bind(&self, control: Arc<dyn Control>) {
        let weak = Arc::downgrade(&self.inner);
        let subscription = control.subscribe_validating(Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let validator = Validator { inner };
            if !validator.is_automatic() {
                return;
            }
            if let Err(e) = validator.validate() {
                log::error!("automatic validation of {} failed: {}", validator.id(), e);
            }
        }));

        log::debug!("validator {} bound to '{}'", self.id(), control.node_id());
        self.state_mut().control = Some(control);

        let previous = self
            .inner
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(subscription);
        drop(previous);
    }

    /// The bound control, if any.
    pub fn control(&self) -> Option<Arc<dyn Control>> {
        self.state().control.clone()
    }

    /// Flattened tab order of the bound control.
    pub fn tab_order_key(&self) -> Option<TabOrderKey> {
        self.control()
            .map(|control| TabOrderKey::for_control(control.as_ref()))
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Evaluate the rule against the bound control.
    ///
    /// Stores the result as the current validity and shows or clears the
    /// error message through the error provider. A configuration error
    /// aborts the call and leaves the previous validity in place.
    pub fn validate(&self) -> Result<bool, ConfigError> {
        // Work on a copy so the rule can call back into this validator.
        let (control, rule, message, hints, provider) = {
            let guard = self.state();
            (
                guard.control.clone(),
                guard.rule.clone(),
                guard.error_message.clone(),
                guard.hints,
                guard.error_provider.clone(),
            )
        };
        let control = control.ok_or_else(|| ConfigError::unbound(self.id()))?;

        let valid = rule.evaluate(control.as_ref()).inspect_err(|e| {
            log::debug!("validator {} misconfigured: {}", self.id(), e);
        })?;

        let validity = Validity::from(valid);
        let previous = std::mem::replace(&mut self.state_mut().validity, validity);
        if previous != validity {
            log::debug!(
                "validator {} on '{}': {:?} -> {:?}",
                self.id(),
                control.node_id(),
                previous,
                validity
            );
        }

        if let Some(provider) = provider {
            let message = if valid { "" } else { message.as_str() };
            provider.set_error(control.as_ref(), message, &hints);
        }

        Ok(valid)
    }

    /// Result of the last completed validation.
    pub fn validity(&self) -> Validity {
        self.state().validity
    }

    /// Whether the last completed validation passed.
    ///
    /// False before the first validation; use [`validity`](Self::validity)
    /// to tell "not yet validated" apart from "invalid".
    pub fn is_valid(&self) -> bool {
        self.validity().is_valid()
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    pub fn error_message(&self) -> String {
        self.state().error_message.clone()
    }

    pub fn set_error_message(&self, message: impl Into<String>) {
        self.state_mut().error_message = message.into();
    }

    /// Whether the control's validating event triggers validation.
    pub fn is_automatic(&self) -> bool {
        self.state().automatic
    }

    pub fn set_automatic(&self, automatic: bool) {
        self.state_mut().automatic = automatic;
    }

    pub fn error_hints(&self) -> ErrorHints {
        self.state().hints
    }

    pub fn set_error_hints(&self, hints: ErrorHints) {
        self.state_mut().hints = hints;
    }

    pub fn set_error_provider(&self, provider: Arc<dyn ErrorProvider>) {
        self.state_mut().error_provider = Some(provider);
    }

    /// A copy of the current rule.
    pub fn rule(&self) -> ValidationRule {
        self.state().rule.clone()
    }

    pub fn set_rule(&self, rule: impl Into<ValidationRule>) {
        self.state_mut().rule = rule.into();
    }

    /// Edit the rule parameters in place.
    pub fn update_rule<R>(&self, f: impl FnOnce(&mut ValidationRule) -> R) -> R {
        f(&mut self.state_mut().rule)
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guard = self.state();
        f.debug_struct("Validator")
            .field("id", &self.inner.id)
            .field("rule", &guard.rule.kind())
            .field("control", &guard.control.as_ref().map(|c| c.node_id()))
            .field("validity", &guard.validity)
            .finish()
    }
}

/// Owning handle returned by [`Validator::new`].
///
/// Releasing the handle removes the validator from its registry exactly
/// once, whether through [`release`](Self::release) or drop.
pub struct ValidatorHandle {
    validator: Validator,
    registry: ValidatorRegistry,
    released: AtomicBool,
}

impl ValidatorHandle {
    /// Deregister the validator.
    ///
    /// Returns true only for the call that actually deregistered it.
    pub fn release(&self) -> bool {
        if self.released.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.registry.deregister(self.validator.id());
        true
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    /// A shareable reference to the validator.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }
}

impl Deref for ValidatorHandle {
    type Target = Validator;

    fn deref(&self) -> &Validator {
        &self.validator
    }
}

impl Drop for ValidatorHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for ValidatorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorHandle")
            .field("validator", &self.validator)
            .field("released", &self.is_released())
            .finish()
    }
}
