//! Root of a control tree and the path-addressed operations on it
//!
//! Every mutation recomputes validity for the target control and then for
//! each ancestor up to the root, so no stale status is observable once a
//! call returns. Value-changing operations report the paths whose value
//! changed (target first, root last) so that callers can dispatch reactions.

use super::control::{split_path, Control};
use super::error::FormError;
use super::validators::Validator;
use super::value::FieldValue;

/// Status flags to set on the target and its ancestors
#[derive(Debug, Clone, Copy, Default)]
struct Marks {
    dirty: bool,
    touched: bool,
    revalidate: bool,
}

/// A form: a root group plus path-addressed operations
#[derive(Debug, Clone)]
pub struct Form {
    root: Control,
}

impl Form {
    /// Create a form from the root group's children
    pub fn new<N, I>(controls: I, validators: Vec<Validator>) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Control)>,
    {
        Self {
            root: Control::group(controls, validators),
        }
    }

    pub fn root(&self) -> &Control {
        &self.root
    }

    pub fn get(&self, path: &str) -> Result<&Control, FormError> {
        self.root
            .get(path)
            .ok_or_else(|| FormError::NotFound(path.to_string()))
    }

    /// Mutable access to a control.
    ///
    /// Changes made through this reference are not revalidated; follow up
    /// with [`Form::update_value_and_validity`].
    pub fn get_mut(&mut self, path: &str) -> Result<&mut Control, FormError> {
        self.root
            .get_mut(path)
            .ok_or_else(|| FormError::NotFound(path.to_string()))
    }

    pub fn valid(&self) -> bool {
        self.root.valid()
    }

    pub fn invalid(&self) -> bool {
        self.root.invalid()
    }

    /// Deep copy of the whole form value
    pub fn value(&self) -> serde_json::Value {
        self.root.value()
    }

    /// A user edit: marks the field and its ancestors dirty, then sets the value
    pub fn input(
        &mut self,
        path: &str,
        value: impl Into<FieldValue>,
    ) -> Result<Vec<String>, FormError> {
        let value = value.into();
        let marks = Marks {
            dirty: true,
            revalidate: true,
            ..Default::default()
        };
        self.apply(path, marks, |control| set_field(control, path, value))?;
        Ok(changed_paths(path))
    }

    /// A programmatic set; the field keeps its dirty state
    pub fn set_value(
        &mut self,
        path: &str,
        value: impl Into<FieldValue>,
    ) -> Result<Vec<String>, FormError> {
        let value = value.into();
        let marks = Marks {
            revalidate: true,
            ..Default::default()
        };
        self.apply(path, marks, |control| set_field(control, path, value))?;
        Ok(changed_paths(path))
    }

    /// Focus left the control: marks it and its ancestors touched
    pub fn blur(&mut self, path: &str) -> Result<(), FormError> {
        let marks = Marks {
            touched: true,
            ..Default::default()
        };
        self.apply(path, marks, |_| Ok(()))
    }

    /// Replace a control's validators without revalidating
    pub fn set_validators(
        &mut self,
        path: &str,
        validators: Vec<Validator>,
    ) -> Result<(), FormError> {
        self.get_mut(path)?.set_validators(validators);
        Ok(())
    }

    /// Remove a control's validators without revalidating
    pub fn clear_validators(&mut self, path: &str) -> Result<(), FormError> {
        self.get_mut(path)?.clear_validators();
        Ok(())
    }

    /// Recompute validity of the control and its ancestors
    pub fn update_value_and_validity(&mut self, path: &str) -> Result<Vec<String>, FormError> {
        let marks = Marks {
            revalidate: true,
            ..Default::default()
        };
        self.apply(path, marks, |_| Ok(()))?;
        Ok(changed_paths(path))
    }

    /// Append a control to the array at `path`
    pub fn push(&mut self, path: &str, control: Control) -> Result<Vec<String>, FormError> {
        let marks = Marks {
            revalidate: true,
            ..Default::default()
        };
        self.apply(path, marks, |target| {
            let array = target.as_array_mut().ok_or_else(|| FormError::WrongKind {
                path: path.to_string(),
                expected: "array",
            })?;
            array.push(control);
            Ok(())
        })?;
        Ok(changed_paths(path))
    }

    /// Partial update from a JSON object.
    ///
    /// Keys with no matching control are ignored, controls with no matching
    /// key keep their value, and nothing is marked dirty. Returns changed
    /// paths with children ahead of their parents.
    pub fn patch_value(&mut self, value: &serde_json::Value) -> Vec<String> {
        let mut changes = Vec::new();
        patch_control(&mut self.root, value, "", &mut changes);
        changes
    }

    fn apply<R, F>(&mut self, path: &str, marks: Marks, f: F) -> Result<R, FormError>
    where
        F: FnOnce(&mut Control) -> Result<R, FormError>,
    {
        let segments: Vec<&str> = split_path(path).collect();
        apply_at(&mut self.root, path, &segments, marks, f)
    }
}

/// Walk down to the target, run `f`, then mark and revalidate on the way back up
fn apply_at<R, F>(
    control: &mut Control,
    path: &str,
    segments: &[&str],
    marks: Marks,
    f: F,
) -> Result<R, FormError>
where
    F: FnOnce(&mut Control) -> Result<R, FormError>,
{
    let result = match segments.split_first() {
        None => f(control)?,
        Some((head, rest)) => {
            let child = control
                .child_mut(head)
                .ok_or_else(|| FormError::NotFound(path.to_string()))?;
            apply_at(child, path, rest, marks, f)?
        }
    };

    if marks.dirty {
        control.mark_dirty();
    }
    if marks.touched {
        control.mark_touched();
    }
    if marks.revalidate {
        control.update_validity();
    }
    Ok(result)
}

fn set_field(control: &mut Control, path: &str, value: FieldValue) -> Result<(), FormError> {
    let field = control.as_field_mut().ok_or_else(|| FormError::WrongKind {
        path: path.to_string(),
        expected: "field",
    })?;
    field.set_value(value);
    Ok(())
}

fn patch_control(
    control: &mut Control,
    value: &serde_json::Value,
    path: &str,
    changes: &mut Vec<String>,
) {
    match control {
        Control::Field(field) => match FieldValue::from_json(value) {
            Some(v) => field.set_value(v),
            None => {
                tracing::warn!("Ignoring non-scalar patch for field '{path}'");
                return;
            }
        },
        Control::Group(_) => {
            let Some(entries) = value.as_object() else {
                return;
            };
            for (name, child_value) in entries {
                if let Some(child) = control.child_mut(name) {
                    let child_path = join_path(path, name);
                    patch_control(child, child_value, &child_path, changes);
                }
            }
        }
        Control::Array(_) => {
            let Some(items) = value.as_array() else {
                return;
            };
            for (index, child_value) in items.iter().enumerate() {
                let segment = index.to_string();
                if let Some(child) = control.child_mut(&segment) {
                    let child_path = join_path(path, &segment);
                    patch_control(child, child_value, &child_path, changes);
                }
            }
        }
    }
    control.update_validity();
    changes.push(path.to_string());
}

fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

/// The target path followed by each ancestor, ending with the root ("")
fn changed_paths(path: &str) -> Vec<String> {
    let segments: Vec<&str> = split_path(path).collect();
    (0..=segments.len())
        .rev()
        .map(|n| segments[..n].join("."))
        .collect()
}
