//! Array edits addressed by owner instance and field index.
//!
//! Every operation validates first and mutates only on success, so a
//! returned [`EditError`] means the graph is unchanged.

use std::sync::Arc;

use rsz_core::FieldDescriptor;

use crate::array::{self, DuplicateMode};
use crate::error::EditError;
use crate::instance::{ArrayElement, Instance, InstanceId, create_array_element};
use crate::value::Value;

use super::{Rsz, type_mismatch};

/// The instance last copied in an editing session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Clipboard {
    copied: Option<InstanceId>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copy(&mut self, id: InstanceId) {
        self.copied = Some(id);
    }

    pub fn copied(&self) -> Option<InstanceId> {
        self.copied
    }

    pub fn clear(&mut self) {
        self.copied = None;
    }

    pub fn is_empty(&self) -> bool {
        self.copied.is_none()
    }
}

impl Rsz {
    fn array_field(&self, owner: InstanceId, field: usize) -> Result<&FieldDescriptor, EditError> {
        self.check_instance(owner)?;
        let class = &self.instances[owner.index()].class;
        let descriptor = class.fields.get(field).ok_or_else(|| EditError::NoSuchField {
            class: class.name.clone(),
            index: field,
        })?;
        if !descriptor.array {
            return Err(EditError::NotAnArray(descriptor.name.clone()));
        }
        Ok(descriptor)
    }

    fn reference_array_field(&self, owner: InstanceId, field: usize) -> Result<&FieldDescriptor, EditError> {
        let descriptor = self.array_field(owner, field)?;
        if !descriptor.is_reference() {
            return Err(EditError::NotAReference(descriptor.name.clone()));
        }
        Ok(descriptor)
    }

    /// Elements of an array field. Callers validate with `array_field` first.
    fn items_mut(&mut self, owner: InstanceId, field: usize) -> &mut Vec<Value> {
        let slot = &mut self.instances[owner.index()].values[field];
        if !matches!(slot, Value::Array(_)) {
            *slot = Value::Array(Vec::new());
        }
        match slot {
            Value::Array(items) => items,
            _ => unreachable!("slot was just made an array"),
        }
    }

    /// Elements of an array field, if `owner` has one at `field`.
    pub fn items(&self, owner: InstanceId, field: usize) -> Option<&[Value]> {
        self.instance(owner)?
            .values
            .get(field)?
            .as_array()
            .map(Vec::as_slice)
    }

    /// Insert a value into an array field, appending when `index` is `None`.
    ///
    /// The value must match the field's element type.
    pub fn insert_item(
        &mut self,
        owner: InstanceId,
        field: usize,
        value: Value,
        index: Option<usize>,
    ) -> Result<usize, EditError> {
        let descriptor = self.array_field(owner, field)?;
        if !value.fits_element(descriptor) {
            return Err(type_mismatch(descriptor, &value));
        }
        if let Some(id) = value.as_reference() {
            if !id.is_null() {
                self.check_instance(id)?;
            }
            self.structure_dirty = true;
        }
        array::insert_item(self.items_mut(owner, field), value, index)
    }

    /// Insert a reference to an existing instance into a reference array.
    pub fn insert_instance(
        &mut self,
        owner: InstanceId,
        field: usize,
        id: InstanceId,
        index: Option<usize>,
    ) -> Result<usize, EditError> {
        let field_type = self.reference_array_field(owner, field)?.field_type;
        self.check_instance(id)?;
        check_index(self.items(owner, field).map_or(0, <[Value]>::len), index)?;
        self.insert_item(owner, field, Rsz::reference_value(field_type, id), index)
    }

    /// Register `instance` and insert a reference to it.
    pub fn insert_new_instance(
        &mut self,
        owner: InstanceId,
        field: usize,
        instance: Instance,
        index: Option<usize>,
    ) -> Result<InstanceId, EditError> {
        self.reference_array_field(owner, field)?;
        check_index(self.items(owner, field).map_or(0, <[Value]>::len), index)?;
        let id = self.add_instance(instance);
        self.insert_instance(owner, field, id, index)?;
        Ok(id)
    }

    /// Remove the first element equal to `value`; `false` if none matched.
    pub fn remove_item(&mut self, owner: InstanceId, field: usize, value: &Value) -> Result<bool, EditError> {
        self.array_field(owner, field)?;
        let removed = array::remove_item(self.items_mut(owner, field), value);
        if removed && value.is_reference() {
            self.structure_dirty = true;
        }
        Ok(removed)
    }

    /// Insert `times` copies of the element at `index` right after it.
    ///
    /// With [`DuplicateMode::DeepClone`] each copy of an object reference
    /// points at its own copy of the referenced subtree.
    pub fn duplicate_item(
        &mut self,
        owner: InstanceId,
        field: usize,
        index: usize,
        times: usize,
        mode: DuplicateMode,
    ) -> Result<(), EditError> {
        self.array_field(owner, field)?;
        let len = self.items(owner, field).map_or(0, <[Value]>::len);
        let item = self
            .items(owner, field)
            .and_then(|items| items.get(index))
            .cloned()
            .ok_or(EditError::IndexOutOfBounds { index, len })?;

        match (mode, &item) {
            (DuplicateMode::DeepClone, Value::Object(id)) if !id.is_null() => {
                for _ in 0..times {
                    let copy = self.deep_clone_instance(*id)?;
                    self.items_mut(owner, field).insert(index + 1, Value::Object(copy));
                }
            }
            _ => array::duplicate_item(self.items_mut(owner, field), index, times)?,
        }
        if item.is_reference() {
            self.structure_dirty = true;
        }
        Ok(())
    }

    /// Insert a copy of the clipboard instance after `index`.
    ///
    /// The copied instance must have the class of the destination slot: the
    /// instance currently at `index`, or the field's element class when that
    /// slot is null.
    pub fn paste_after(
        &mut self,
        owner: InstanceId,
        field: usize,
        index: usize,
        clipboard: &Clipboard,
        mode: DuplicateMode,
    ) -> Result<InstanceId, EditError> {
        let descriptor = self.reference_array_field(owner, field)?;
        let element_class = descriptor.element_type_name().map(str::to_string);
        let field_type = descriptor.field_type;

        let copied = clipboard.copied().ok_or(EditError::EmptyClipboard)?;
        self.check_instance(copied)?;

        let items = self.items(owner, field).unwrap_or_default();
        let slot = items.get(index).ok_or(EditError::IndexOutOfBounds {
            index,
            len: items.len(),
        })?;
        let expected = match slot.as_reference().and_then(|id| self.instance(id)) {
            Some(instance) if !instance.is_null() => Some(instance.name().to_string()),
            _ => element_class,
        };
        let copied_name = self.instances[copied.index()].name().to_string();
        if let Some(expected) = expected {
            if expected != copied_name {
                return Err(EditError::ClassMismatch {
                    copied: copied_name,
                    expected,
                });
            }
        }

        let id = match mode {
            DuplicateMode::Alias => copied,
            DuplicateMode::DeepClone => self.deep_clone_instance(copied)?,
        };
        self.items_mut(owner, field)
            .insert(index + 1, Rsz::reference_value(field_type, id));
        self.structure_dirty = true;
        Ok(id)
    }

    /// Append a fresh element to an array field.
    ///
    /// Reference arrays get a new default instance of `class_override` or of
    /// the field's element class.
    pub fn new_array_item(
        &mut self,
        owner: InstanceId,
        field: usize,
        class_override: Option<&str>,
    ) -> Result<usize, EditError> {
        let descriptor = self.array_field(owner, field)?;
        let field_type = descriptor.field_type;
        let element = create_array_element(&self.schema, descriptor, class_override).ok_or_else(|| {
            EditError::UnresolvedClass(
                class_override
                    .or_else(|| descriptor.element_type_name())
                    .unwrap_or(descriptor.original_type.as_str())
                    .to_string(),
            )
        })?;
        let value = match element {
            ArrayElement::Value(value) => value,
            ArrayElement::Instance(instance) => Rsz::reference_value(field_type, self.add_instance(instance)),
        };
        self.insert_item(owner, field, value, None)
    }

    /// Default instance of a class, for callers building subtrees by hand.
    pub fn new_instance(&self, class_name: &str) -> Result<Instance, EditError> {
        self.schema
            .resolve_by_name(class_name)
            .map(|class| Instance::new_default(Arc::clone(class)))
            .ok_or_else(|| EditError::UnresolvedClass(class_name.to_string()))
    }
}

fn check_index(len: usize, index: Option<usize>) -> Result<(), EditError> {
    match index {
        Some(index) if index > len => Err(EditError::IndexOutOfBounds { index, len }),
        _ => Ok(()),
    }
}
