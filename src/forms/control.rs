//! Control tree: fields, groups and arrays

use super::validators::{run_validators, ValidationErrors, Validator};
use super::value::FieldValue;

/// Validity of a control and everything below it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Valid,
    Invalid,
}

/// State shared by every kind of control
#[derive(Debug, Clone, Default)]
pub struct ControlMeta {
    validators: Vec<Validator>,
    touched: bool,
    dirty: bool,
    errors: Option<ValidationErrors>,
    status: Status,
}

/// A leaf holding one scalar value
#[derive(Debug, Clone)]
pub struct FieldControl {
    value: FieldValue,
    meta: ControlMeta,
}

impl FieldControl {
    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Replace the value. Validity is not recomputed here.
    pub(crate) fn set_value(&mut self, value: FieldValue) {
        self.value = value;
    }
}

/// Named children in declaration order
#[derive(Debug, Clone)]
pub struct GroupControl {
    controls: Vec<(String, Control)>,
    meta: ControlMeta,
}

impl GroupControl {
    pub fn get(&self, name: &str) -> Option<&Control> {
        self.controls
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Control> {
        self.controls
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.controls.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

/// Ordered, growable sequence of controls
#[derive(Debug, Clone)]
pub struct ArrayControl {
    controls: Vec<Control>,
    meta: ControlMeta,
}

impl ArrayControl {
    pub fn at(&self, index: usize) -> Option<&Control> {
        self.controls.get(index)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Append a control. Validity is not recomputed here.
    pub(crate) fn push(&mut self, control: Control) {
        self.controls.push(control);
    }
}

/// A node of the form tree
#[derive(Debug, Clone)]
pub enum Control {
    Field(FieldControl),
    Group(GroupControl),
    Array(ArrayControl),
}

impl Control {
    /// Create a field with an initial value and validators
    pub fn field(value: impl Into<FieldValue>, validators: Vec<Validator>) -> Self {
        let mut control = Control::Field(FieldControl {
            value: value.into(),
            meta: ControlMeta {
                validators,
                ..Default::default()
            },
        });
        control.update_validity();
        control
    }

    /// Create a group from named children, in order
    pub fn group<N, I>(controls: I, validators: Vec<Validator>) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Control)>,
    {
        let mut control = Control::Group(GroupControl {
            controls: controls
                .into_iter()
                .map(|(name, c)| (name.into(), c))
                .collect(),
            meta: ControlMeta {
                validators,
                ..Default::default()
            },
        });
        control.update_validity();
        control
    }

    /// Create an array from an initial list of controls
    pub fn array(controls: Vec<Control>, validators: Vec<Validator>) -> Self {
        let mut control = Control::Array(ArrayControl {
            controls,
            meta: ControlMeta {
                validators,
                ..Default::default()
            },
        });
        control.update_validity();
        control
    }

    fn meta(&self) -> &ControlMeta {
        match self {
            Control::Field(f) => &f.meta,
            Control::Group(g) => &g.meta,
            Control::Array(a) => &a.meta,
        }
    }

    fn meta_mut(&mut self) -> &mut ControlMeta {
        match self {
            Control::Field(f) => &mut f.meta,
            Control::Group(g) => &mut g.meta,
            Control::Array(a) => &mut a.meta,
        }
    }

    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Control::Field(_) => "field",
            Control::Group(_) => "group",
            Control::Array(_) => "array",
        }
    }

    pub fn as_field(&self) -> Option<&FieldControl> {
        match self {
            Control::Field(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_field_mut(&mut self) -> Option<&mut FieldControl> {
        match self {
            Control::Field(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&GroupControl> {
        match self {
            Control::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayControl> {
        match self {
            Control::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut ArrayControl> {
        match self {
            Control::Array(a) => Some(a),
            _ => None,
        }
    }

    /// The scalar value if this is a field
    pub fn field_value(&self) -> Option<&FieldValue> {
        self.as_field().map(FieldControl::value)
    }

    pub fn touched(&self) -> bool {
        self.meta().touched
    }

    pub fn untouched(&self) -> bool {
        !self.meta().touched
    }

    pub fn dirty(&self) -> bool {
        self.meta().dirty
    }

    pub fn pristine(&self) -> bool {
        !self.meta().dirty
    }

    pub(crate) fn mark_touched(&mut self) {
        self.meta_mut().touched = true;
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.meta_mut().dirty = true;
    }

    /// Errors from this control's own validators
    pub fn errors(&self) -> Option<&ValidationErrors> {
        self.meta().errors.as_ref()
    }

    pub fn has_error(&self, key: &str) -> bool {
        self.errors().is_some_and(|e| e.contains(key))
    }

    pub fn status(&self) -> Status {
        self.meta().status
    }

    pub fn valid(&self) -> bool {
        self.status() == Status::Valid
    }

    pub fn invalid(&self) -> bool {
        self.status() == Status::Invalid
    }

    pub fn validators(&self) -> &[Validator] {
        &self.meta().validators
    }

    pub fn has_validator(&self, name: &str) -> bool {
        self.validators().iter().any(|v| v.name() == name)
    }

    /// Replace the validator list. Call `update_validity` afterwards.
    pub fn set_validators(&mut self, validators: Vec<Validator>) {
        self.meta_mut().validators = validators;
    }

    /// Remove all validators. Call `update_validity` afterwards.
    pub fn clear_validators(&mut self) {
        self.meta_mut().validators.clear();
    }

    /// Direct child by path segment (a name for groups, an index for arrays)
    pub fn child(&self, segment: &str) -> Option<&Control> {
        match self {
            Control::Field(_) => None,
            Control::Group(g) => g.get(segment),
            Control::Array(a) => segment.parse::<usize>().ok().and_then(|i| a.controls.get(i)),
        }
    }

    pub fn child_mut(&mut self, segment: &str) -> Option<&mut Control> {
        match self {
            Control::Field(_) => None,
            Control::Group(g) => g.get_mut(segment),
            Control::Array(a) => segment
                .parse::<usize>()
                .ok()
                .and_then(|i| a.controls.get_mut(i)),
        }
    }

    fn children(&self) -> Box<dyn Iterator<Item = &Control> + '_> {
        match self {
            Control::Field(_) => Box::new(std::iter::empty()),
            Control::Group(g) => Box::new(g.controls.iter().map(|(_, c)| c)),
            Control::Array(a) => Box::new(a.controls.iter()),
        }
    }

    /// Descendant by dot-separated path; the empty path is `self`
    pub fn get(&self, path: &str) -> Option<&Control> {
        split_path(path).try_fold(self, |control, segment| control.child(segment))
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut Control> {
        split_path(path).try_fold(self, |control, segment| control.child_mut(segment))
    }

    /// Recompute this control's errors and status from its validators and
    /// the current status of its children. Children are not revisited.
    pub fn update_validity(&mut self) {
        let errors = run_validators(&self.meta().validators, self);
        let children_invalid = self.children().any(Control::invalid);
        let meta = self.meta_mut();
        meta.status = if errors.is_some() || children_invalid {
            Status::Invalid
        } else {
            Status::Valid
        };
        meta.errors = errors;
    }


    /// Deep copy of the value as JSON
    pub fn value(&self) -> serde_json::Value {
        match self {
            Control::Field(f) => f.value.to_json(),
            Control::Group(g) => serde_json::Value::Object(
                g.controls
                    .iter()
                    .map(|(name, c)| (name.clone(), c.value()))
                    .collect(),
            ),
            Control::Array(a) => {
                serde_json::Value::Array(a.controls.iter().map(Control::value).collect())
            }
        }
    }
}

/// Split a dot-separated path, ignoring the empty root path
pub(crate) fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|s| !s.is_empty())
}
