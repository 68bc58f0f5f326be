//! Flat argument maps and options-structure marshaling.
//!
//! Every remote procedure takes a flat set of named string parameters. Call
//! sites assemble an [`ApiArgs`] directly for required arguments and merge in
//! options structures through [`ToArgs`], normally derived with
//! `#[derive(ToArgs)]` from the `linode-derive` crate.

use std::collections::{BTreeMap, BTreeSet};

use smol_str::SmolStr;

use crate::error::ConfigError;
use crate::wire::{WireValue, int_bool};

/// Parameter names reserved for the transport itself.
pub const RESERVED: [&str; 2] = ["api_action", "api_key"];

/// Name to value mapping for one call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiArgs {
    inner: BTreeMap<SmolStr, WireValue>,
}

impl ApiArgs {
    /// Empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value under that name.
    pub fn set(&mut self, name: impl Into<SmolStr>, value: impl Into<WireValue>) -> &mut Self {
        self.inner.insert(name.into(), value.into());
        self
    }

    /// Owned-chaining form of [`set`](Self::set).
    pub fn with(mut self, name: impl Into<SmolStr>, value: impl Into<WireValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set an int-encoded boolean parameter.
    pub fn set_int_bool(&mut self, name: impl Into<SmolStr>, value: Option<bool>) -> &mut Self {
        self.inner.insert(name.into(), int_bool(value));
        self
    }

    /// Merge another set into this one. Later values win.
    pub fn extend(&mut self, other: ApiArgs) -> &mut Self {
        self.inner.extend(other.inner);
        self
    }

    /// Value stored under `name`, absent or not.
    pub fn get(&self, name: &str) -> Option<&WireValue> {
        self.inner.get(name)
    }

    /// Iterate over every stored entry, absent ones included.
    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &WireValue)> {
        self.inner.iter()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Wire pairs for every present value, in name order.
    pub fn to_form_pairs(&self) -> Vec<(SmolStr, String)> {
        self.inner
            .iter()
            .filter_map(|(k, v)| v.to_wire().map(|s| (k.clone(), s)))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for ApiArgs
where
    K: Into<SmolStr>,
    V: Into<WireValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// How a field's value is put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgMode {
    /// Rendered by [`WireValue::to_wire`]
    #[default]
    Direct,
    /// Boolean sent as `1` / `0`
    IntBool,
}

/// Tag metadata of one options field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgField {
    /// Rust field name
    pub field: &'static str,
    /// Wire parameter name
    pub name: &'static str,
    /// Encoding mode
    pub mode: ArgMode,
}

impl ArgField {
    /// Parse an `args` tag of the form `name` or `name,int`.
    pub fn from_tag(field: &'static str, tag: &'static str) -> Result<Self, ConfigError> {
        let (name, mode) = match tag.split_once(',') {
            None => (tag, ArgMode::Direct),
            Some((name, "int")) => (name, ArgMode::IntBool),
            Some((_, other)) => {
                return Err(ConfigError::UnknownMode {
                    tag: tag.into(),
                    mode: other.into(),
                });
            }
        };
        Ok(Self { field, name, mode })
    }
}

/// Flatten the tagged fields of an options structure.
///
/// Absent values are dropped here, so merging the result over call-site
/// arguments never clobbers a key the caller already set.
pub fn marshal_fields<I>(type_name: &'static str, fields: I) -> Result<ApiArgs, ConfigError>
where
    I: IntoIterator<Item = (ArgField, WireValue)>,
{
    let mut out = ApiArgs::new();
    let mut seen = BTreeSet::new();
    for (meta, value) in fields {
        if meta.name.is_empty() {
            return Err(ConfigError::MissingTag {
                type_name,
                field: meta.field,
            });
        }
        if !seen.insert(meta.name) {
            return Err(ConfigError::DuplicateName {
                type_name,
                name: meta.name.into(),
            });
        }
        let value = match (meta.mode, value) {
            (ArgMode::Direct, v) => v,
            (ArgMode::IntBool, WireValue::Bool(b)) => int_bool(Some(b)),
            (ArgMode::IntBool, WireValue::Absent) => WireValue::Absent,
            (ArgMode::IntBool, _) => {
                return Err(ConfigError::IntModeNotBool {
                    type_name,
                    field: meta.field,
                });
            }
        };
        if value.is_present() {
            out.set(meta.name, value);
        }
    }
    Ok(out)
}

/// Options structures that flatten into call arguments.
pub trait ToArgs {
    /// Flatten `self` into a name to value mapping.
    fn to_args(&self) -> Result<ApiArgs, ConfigError>;
}

impl ToArgs for ApiArgs {
    fn to_args(&self) -> Result<ApiArgs, ConfigError> {
        Ok(self.clone())
    }
}

impl<T: ToArgs> ToArgs for &T {
    fn to_args(&self) -> Result<ApiArgs, ConfigError> {
        (*self).to_args()
    }
}

impl<T: ToArgs> ToArgs for Option<T> {
    fn to_args(&self) -> Result<ApiArgs, ConfigError> {
        match self {
            Some(t) => t.to_args(),
            None => Ok(ApiArgs::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &'static str, mode: ArgMode) -> ArgField {
        ArgField {
            field: "f",
            name,
            mode,
        }
    }

    #[test]
    fn tag_parsing() {
        assert_eq!(
            ArgField::from_tag("label", "Label").unwrap().mode,
            ArgMode::Direct
        );
        let f = ArgField::from_tag("is_public", "isPublic,int").unwrap();
        assert_eq!(f.name, "isPublic");
        assert_eq!(f.mode, ArgMode::IntBool);
        assert!(matches!(
            ArgField::from_tag("x", "x,float"),
            Err(ConfigError::UnknownMode { .. })
        ));
    }

    #[test]
    fn absent_fields_contribute_no_pairs() {
        let args = marshal_fields(
            "Opts",
            [
                (field("Label", ArgMode::Direct), WireValue::from("web")),
                (field("Group", ArgMode::Direct), WireValue::Absent),
                (field("Count", ArgMode::Direct), WireValue::from(3i64)),
            ],
        )
        .unwrap();
        assert_eq!(
            args.to_form_pairs(),
            vec![
                (SmolStr::new("Count"), "3".to_owned()),
                (SmolStr::new("Label"), "web".to_owned()),
            ]
        );
    }

    #[test]
    fn int_mode_encodes_bools() {
        let args = marshal_fields(
            "Opts",
            [
                (field("a", ArgMode::IntBool), WireValue::Bool(true)),
                (field("b", ArgMode::IntBool), WireValue::Bool(false)),
                (field("c", ArgMode::IntBool), WireValue::Absent),
            ],
        )
        .unwrap();
        assert_eq!(args.get("a"), Some(&WireValue::Int(1)));
        assert_eq!(args.get("b"), Some(&WireValue::Int(0)));
        assert_eq!(args.get("c"), None);
        assert_eq!(args.to_form_pairs().len(), 2);
    }

    #[test]
    fn configuration_errors() {
        let err = marshal_fields("Opts", [(field("", ArgMode::Direct), WireValue::Absent)]);
        assert_eq!(
            err,
            Err(ConfigError::MissingTag {
                type_name: "Opts",
                field: "f"
            })
        );

        let err = marshal_fields("Opts", [(field("x", ArgMode::IntBool), WireValue::Int(1))]);
        assert!(matches!(err, Err(ConfigError::IntModeNotBool { .. })));
        assert_eq!(
            err.unwrap_err().to_string(),
            "Opts.f has an int tag, but is not of type bool"
        );

        let err = marshal_fields(
            "Opts",
            [
                (field("x", ArgMode::Direct), WireValue::Absent),
                (field("x", ArgMode::Direct), WireValue::Absent),
            ],
        );
        assert!(matches!(err, Err(ConfigError::DuplicateName { .. })));
    }

    #[test]
    fn extend_overrides() {
        let mut args = ApiArgs::new().with("LinodeID", 1i64).with("Label", "a");
        args.extend(ApiArgs::from_iter([("Label", "b")]));
        assert_eq!(args.get("Label"), Some(&WireValue::from("b")));
        assert_eq!(args.len(), 2);
    }
}
