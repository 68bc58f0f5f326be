//! Parameter values as they travel over the wire.
//!
//! The classic API only ever receives strings. A [`WireValue`] is the closed
//! set of things an argument can hold before that final conversion; an
//! [`Absent`](WireValue::Absent) value contributes no key at all.

use smol_str::SmolStr;

/// One optional scalar parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WireValue {
    /// Sent verbatim
    Str(String),
    /// Sent in base-10
    Int(i64),
    /// Sent as `true` / `false`
    Bool(bool),
    /// Not sent
    #[default]
    Absent,
}

impl WireValue {
    /// Wire string for this value, or `None` when it is absent.
    pub fn to_wire(&self) -> Option<String> {
        match self {
            Self::Str(s) => Some(s.clone()),
            Self::Int(i) => Some(i.to_string()),
            Self::Bool(b) => Some(if *b { "true" } else { "false" }.to_owned()),
            Self::Absent => None,
        }
    }

    /// `true` unless the value is [`Absent`](WireValue::Absent).
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
            Self::Absent => "absent",
        }
    }
}

/// Int-encoded boolean: `true` becomes `1`, `false` becomes `0`.
pub fn int_bool(value: Option<bool>) -> WireValue {
    match value {
        Some(b) => WireValue::Int(b as i64),
        None => WireValue::Absent,
    }
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for WireValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for WireValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<SmolStr> for WireValue {
    fn from(value: SmolStr) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<&SmolStr> for WireValue {
    fn from(value: &SmolStr) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<i64> for WireValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for WireValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for WireValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<bool> for WireValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<WireValue>> From<Option<T>> for WireValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_render() {
        assert_eq!(WireValue::from("hi").to_wire().as_deref(), Some("hi"));
        assert_eq!(WireValue::from(-42i64).to_wire().as_deref(), Some("-42"));
        assert_eq!(WireValue::from(true).to_wire().as_deref(), Some("true"));
        assert_eq!(WireValue::from(false).to_wire().as_deref(), Some("false"));
        assert_eq!(WireValue::from("").to_wire().as_deref(), Some(""));
    }

    #[test]
    fn absent_has_no_wire_form() {
        assert_eq!(WireValue::from(None::<i64>), WireValue::Absent);
        assert_eq!(WireValue::Absent.to_wire(), None);
        assert!(!WireValue::from(None::<&str>).is_present());
        assert_eq!(WireValue::from(Some(7u32)), WireValue::Int(7));
    }

    #[test]
    fn int_encoded_bool() {
        assert_eq!(int_bool(Some(true)).to_wire().as_deref(), Some("1"));
        assert_eq!(int_bool(Some(false)).to_wire().as_deref(), Some("0"));
        assert_eq!(int_bool(None), WireValue::Absent);
    }
}
