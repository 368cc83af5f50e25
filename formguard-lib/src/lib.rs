//! Form field validation core.
//!
//! Validators check the text of a bound control against a rule (required,
//! pattern, range, compare or custom) and report the outcome through an
//! error provider. Containers aggregate the validators bound inside them and
//! move focus to the first invalid control in tab order.
//!
//! The toolkit is reached only through the traits in [`control`] and
//! [`display`]; hosts implement them for their own widgets.

pub mod coerce;
pub mod container;
pub mod control;
pub mod display;
pub mod error;
pub mod registry;
pub mod rule;
pub mod subscription;
pub mod validator;

mod result;

pub use coerce::{TypedValue, ValidationDataType};
pub use container::{
    ContainerScope, ContainerValidator, TabOrderKey, is_ancestor, is_valid_in, validate_in,
};
pub use control::{Control, Node, ValidatingCallback};
pub use display::{BlinkStyle, ErrorHints, ErrorProvider, IconAlignment};
pub use error::{ConfigError, ConversionError, RangeBound};
pub use registry::ValidatorRegistry;
pub use result::{FieldError, ValidationResult};
pub use rule::{
    Comparand, CompareOperator, CompareRule, CustomRule, PatternRule, RangeRule, RequiredRule,
    ValidationRule,
};
pub use subscription::Subscription;
pub use validator::{Validator, ValidatorHandle, ValidatorId, Validity};
