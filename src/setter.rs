// Validated setter helper
//
// Builder-style value validation for setters: an optional expected type,
// numeric range, and membership constraints checked in that order. Unrelated
// to the diagram pipeline; ships alongside it as a small utility.
//
// Misusing the builder itself (a minimum above the maximum) is a programming
// error and fails an assertion immediately rather than surfacing later as a
// validation result.

use thiserror::Error;

/// Validation failures raised by [`Setter::check`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SetterError {
    #[error("expected {expected}, got {value:?}")]
    TypeConversion { expected: &'static str, value: String },

    #[error("value {value} out of range [{min:?}, {max:?}]")]
    Range {
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },

    #[error("expecting one of {choices:?}, got {value:?}")]
    Membership { choices: Vec<String>, value: String },
}

/// Expected type of the value being set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dtype {
    #[default]
    Str,
    Float,
    Int,
}

/// A value that passed validation
#[derive(Debug, Clone, PartialEq)]
pub enum CheckedValue {
    Str(String),
    Float(f64),
    Int(i64),
}

/// Declarative constraints for a set method
#[derive(Debug, Clone, Default)]
pub struct Setter {
    dtype: Option<Dtype>,
    min: Option<f64>,
    max: Option<f64>,
    choices: Option<Vec<String>>,
}

impl Setter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require conversion to the given type
    pub fn dtype(mut self, dtype: Dtype) -> Self {
        self.dtype = Some(dtype);
        self
    }

    /// Require `value >= min`
    pub fn min(mut self, min: f64) -> Self {
        if let Some(max) = self.max {
            assert!(min <= max, "min {} exceeds max {}", min, max);
        }
        self.min = Some(min);
        self
    }

    /// Require `value <= max`
    pub fn max(mut self, max: f64) -> Self {
        if let Some(min) = self.min {
            assert!(min <= max, "min {} exceeds max {}", min, max);
        }
        self.max = Some(max);
        self
    }

    /// Require membership in an allowed set
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Validate a raw value against the declared constraints.
    ///
    /// Conversion runs first, then the range check (numeric values only),
    /// then membership.
    pub fn check(&self, raw: &str) -> Result<CheckedValue, SetterError> {
        let value = match self.dtype.unwrap_or_default() {
            Dtype::Str => CheckedValue::Str(raw.to_string()),
            Dtype::Float => {
                let parsed = raw.parse::<f64>().map_err(|_| SetterError::TypeConversion {
                    expected: "float",
                    value: raw.to_string(),
                })?;
                CheckedValue::Float(parsed)
            }
            Dtype::Int => {
                let parsed = raw.parse::<i64>().map_err(|_| SetterError::TypeConversion {
                    expected: "int",
                    value: raw.to_string(),
                })?;
                CheckedValue::Int(parsed)
            }
        };

        if let Some(numeric) = value.as_f64() {
            let below = self.min.map_or(false, |min| numeric < min);
            let above = self.max.map_or(false, |max| numeric > max);
            if below || above {
                return Err(SetterError::Range {
                    value: numeric,
                    min: self.min,
                    max: self.max,
                });
            }
        }

        if let Some(choices) = &self.choices {
            if !choices.iter().any(|c| c == raw) {
                return Err(SetterError::Membership {
                    choices: choices.clone(),
                    value: raw.to_string(),
                });
            }
        }

        Ok(value)
    }

    /// Wrap a set closure so the value is validated before it is applied
    pub fn guard<T, F>(self, set: F) -> impl Fn(&mut T, &str) -> Result<(), SetterError>
    where
        F: Fn(&mut T, CheckedValue),
    {
        move |target, raw| {
            let value = self.check(raw)?;
            set(target, value);
            Ok(())
        }
    }
}

impl CheckedValue {
    /// Numeric view of the value, when it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CheckedValue::Str(_) => None,
            CheckedValue::Float(f) => Some(*f),
            CheckedValue::Int(i) => Some(*i as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn age_setter() -> Setter {
        Setter::new().min(0.0).max(1000.0).dtype(Dtype::Float)
    }

    #[test]
    fn test_value_in_range_passes() {
        assert_eq!(age_setter().check("37"), Ok(CheckedValue::Float(37.0)));
    }

    #[test]
    fn test_below_minimum_fails_range() {
        assert!(matches!(
            age_setter().check("-3"),
            Err(SetterError::Range { .. })
        ));
    }

    #[test]
    fn test_above_maximum_fails_range() {
        assert!(matches!(
            age_setter().check("1003"),
            Err(SetterError::Range { .. })
        ));
    }

    #[test]
    fn test_non_numeric_fails_conversion() {
        assert!(matches!(
            age_setter().check("Hello"),
            Err(SetterError::TypeConversion { .. })
        ));
    }

    #[test]
    fn test_membership_violation() {
        let setter = Setter::new().choices(["Head", "Tail"]);
        assert!(matches!(
            setter.check("Edge"),
            Err(SetterError::Membership { .. })
        ));
        assert_eq!(
            setter.check("Head"),
            Ok(CheckedValue::Str("Head".to_string()))
        );
    }

    #[test]
    fn test_int_dtype() {
        let setter = Setter::new().dtype(Dtype::Int).min(1.0).max(12.0);
        assert_eq!(setter.check("7"), Ok(CheckedValue::Int(7)));
        assert!(matches!(
            setter.check("7.5"),
            Err(SetterError::TypeConversion { .. })
        ));
        assert!(matches!(setter.check("13"), Err(SetterError::Range { .. })));
    }

    #[test]
    fn test_unconstrained_passes_everything() {
        let setter = Setter::new();
        assert_eq!(
            setter.check("anything"),
            Ok(CheckedValue::Str("anything".to_string()))
        );
    }

    #[test]
    #[should_panic(expected = "exceeds max")]
    fn test_min_above_max_panics() {
        let _ = Setter::new().max(1.0).min(2.0);
    }

    #[test]
    fn test_guard_applies_validated_value() {
        struct Person {
            age: f64,
        }

        let set_age = age_setter().guard(|p: &mut Person, value| {
            if let CheckedValue::Float(age) = value {
                p.age = age;
            }
        });

        let mut person = Person { age: 1.0 };
        set_age(&mut person, "42").unwrap();
        assert_eq!(person.age, 42.0);

        assert!(set_age(&mut person, "-3").is_err());
        assert_eq!(person.age, 42.0);
    }

    #[test]
    fn test_error_messages() {
        let err = age_setter().check("-3").unwrap_err();
        assert!(err.to_string().contains("out of range"));

        let err = Setter::new().choices(["a"]).check("b").unwrap_err();
        assert!(err.to_string().contains("expecting one of"));
    }
}
