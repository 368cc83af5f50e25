//! Form description files.
//!
//! A form file lists the control tree with current values and the validators
//! bound to it. Parents must appear before their children.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result, bail};
use formguard_lib::{
    CompareOperator, CompareRule, ContainerScope, Control, CustomRule, ErrorHints, Node,
    PatternRule, RangeRule, RequiredRule, ValidationDataType, ValidationResult, ValidationRule,
    Validator, ValidatorHandle, ValidatorRegistry, validate_in,
};
use serde::Deserialize;
use serde::Serialize;

use crate::elements::{CollectingErrorProvider, FormElement};

#[derive(Debug, Deserialize)]
pub struct FormSpec {
    pub controls: Vec<ControlSpec>,
    #[serde(default)]
    pub validators: Vec<ValidatorSpec>,
}

#[derive(Debug, Deserialize)]
pub struct ControlSpec {
    pub id: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub tab_index: u32,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidatorSpec {
    pub control: String,
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_true")]
    pub automatic: bool,
    #[serde(default)]
    pub hints: ErrorHints,
    pub rule: RuleSpec,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSpec {
    Required {
        #[serde(default)]
        initial_value: String,
    },
    Pattern {
        expression: String,
        #[serde(default = "default_true")]
        required: bool,
    },
    Range {
        minimum: String,
        maximum: String,
        #[serde(default)]
        data_type: ValidationDataType,
        #[serde(default = "default_true")]
        required: bool,
    },
    Compare {
        #[serde(default)]
        operator: CompareOperator,
        #[serde(default)]
        value_to_compare: Option<String>,
        #[serde(default)]
        control_to_compare: Option<String>,
        #[serde(default)]
        data_type: ValidationDataType,
        #[serde(default = "default_true")]
        required: bool,
    },
    Custom {
        predicate: BuiltinPredicate,
        #[serde(default = "default_true")]
        required: bool,
    },
}

/// Custom checks available from form files.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinPredicate {
    /// An integer other than zero.
    NonZero,
    /// An even integer.
    Even,
}

impl BuiltinPredicate {
    fn rule(self) -> CustomRule {
        match self {
            Self::NonZero => {
                CustomRule::new(|value, _| value.trim().parse::<i64>().is_ok_and(|n| n != 0))
            }
            Self::Even => {
                CustomRule::new(|value, _| value.trim().parse::<i64>().is_ok_and(|n| n % 2 == 0))
            }
        }
    }
}

/// One failed field in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub control: String,
    pub message: String,
}

/// Outcome of validating a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub container: String,
    pub scope: ContainerScope,
    pub valid: bool,
    pub focused: Option<String>,
    pub errors: Vec<ReportEntry>,
}

/// A loaded form with its validators registered.
pub struct Form {
    registry: ValidatorRegistry,
    elements: HashMap<String, Arc<FormElement>>,
    provider: Arc<CollectingErrorProvider>,
    focused: Arc<Mutex<Option<String>>>,
    _validators: Vec<ValidatorHandle>,
}

impl Form {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read form file {}", path.display()))?;
        let spec: FormSpec = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse form file {}", path.display()))?;
        Self::build(spec)
    }

    pub fn build(spec: FormSpec) -> Result<Self> {
        let registry = ValidatorRegistry::new();
        let provider = Arc::new(CollectingErrorProvider::default());
        let focused = Arc::new(Mutex::new(None));

        let mut elements: HashMap<String, Arc<FormElement>> = HashMap::new();
        for control in spec.controls {
            if elements.contains_key(&control.id) {
                bail!("duplicate control id '{}'", control.id);
            }
            let parent = match &control.parent {
                Some(id) => {
                    let parent = elements.get(id).with_context(|| {
                        format!("control '{}' has unknown parent '{id}'", control.id)
                    })?;
                    Some(parent.clone() as Arc<dyn Node>)
                }
                None => None,
            };
            let element = FormElement::new(
                control.id.clone(),
                parent,
                control.tab_index,
                control.text,
                Arc::clone(&focused),
            );
            elements.insert(control.id, Arc::new(element));
        }

        let lookup = |id: &str| -> Result<Arc<dyn Control>> {
            elements
                .get(id)
                .map(|e| e.clone() as Arc<dyn Control>)
                .with_context(|| format!("validator refers to unknown control '{id}'"))
        };

        let mut validators = Vec::with_capacity(spec.validators.len());
        for entry in spec.validators {
            let rule = match entry.rule {
                RuleSpec::Required { initial_value } => {
                    ValidationRule::from(RequiredRule::new().initial_value(initial_value))
                }
                RuleSpec::Pattern {
                    expression,
                    required,
                } => PatternRule::new(expression)?.required(required).into(),
                RuleSpec::Range {
                    minimum,
                    maximum,
                    data_type,
                    required,
                } => RangeRule::new(minimum, maximum)
                    .data_type(data_type)
                    .required(required)
                    .into(),
                RuleSpec::Compare {
                    operator,
                    value_to_compare,
                    control_to_compare,
                    data_type,
                    required,
                } => {
                    let mut rule = CompareRule::new(operator)
                        .data_type(data_type)
                        .required(required);
                    if let Some(value) = value_to_compare {
                        rule = rule.value_to_compare(value);
                    }
                    if let Some(id) = control_to_compare {
                        rule = rule.control_to_compare(lookup(&id)?);
                    }
                    rule.into()
                }
                RuleSpec::Custom {
                    predicate,
                    required,
                } => predicate.rule().required(required).into(),
            };

            let validator = Validator::new(&registry, rule);
            validator.set_error_message(entry.message);
            validator.set_automatic(entry.automatic);
            validator.set_error_hints(entry.hints);
            validator.set_error_provider(provider.clone());
            validator.bind(lookup(&entry.control)?);
            validators.push(validator);
        }

        Ok(Self {
            registry,
            elements,
            provider,
            focused,
            _validators: validators,
        })
    }

    /// The first control without a parent.
    pub fn default_container(&self) -> Option<String> {
        let mut roots: Vec<_> = self
            .elements
            .values()
            .filter(|e| e.parent().is_none())
            .collect();
        roots.sort_by_key(|e| e.tab_index());
        roots.first().map(|e| e.node_id())
    }

    pub fn validate(&self, container: &str, scope: ContainerScope) -> Result<Report> {
        let target = self
            .elements
            .get(container)
            .with_context(|| format!("unknown container '{container}'"))?;

        let result = validate_in(&self.registry, &**target, scope)
            .with_context(|| format!("form is misconfigured for container '{container}'"))?;

        let focused = self
            .focused
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        log::debug!("error provider shows {} message(s)", self.provider.shown().len());

        Ok(Report {
            container: container.to_string(),
            scope,
            valid: result.is_valid(),
            focused: match &result {
                ValidationResult::Valid => None,
                ValidationResult::Invalid { .. } => focused,
            },
            errors: result
                .errors()
                .iter()
                .map(|e| ReportEntry {
                    control: e.control_id.clone(),
                    message: e.message.clone(),
                })
                .collect(),
        })
    }
}
