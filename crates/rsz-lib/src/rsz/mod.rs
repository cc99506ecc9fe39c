//! Object graph container.
//!
//! An RSZ block holds a flat instance list (index 0 is the null instance), an
//! object table naming the root instances, and a userdata table. Instances
//! refer to each other by list index; on disk every referenced instance
//! precedes its referrer.

mod data;
mod edit;
mod read;
mod rebuild;
mod render;
mod write;

#[cfg(test)]
mod data_tests;
#[cfg(test)]
mod render_tests;
#[cfg(test)]
mod roundtrip_tests;

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use rsz_core::{FieldDescriptor, FieldType, Schema};
use rsz_format::RszHeader;

use crate::error::EditError;
use crate::instance::{Instance, InstanceId};
use crate::value::Value;

pub use edit::Clipboard;

/// Where a userdata instance's content lives.
#[derive(Clone, Debug)]
pub enum UserdataPayload {
    /// Path of an external user file.
    External { path: String },
    /// Nested block stored inside this one.
    Embedded { json_path_hash: u32, rsz: Box<Rsz> },
}

/// Userdata table entry.
#[derive(Clone, Debug)]
pub struct RszUserdata {
    pub instance: InstanceId,
    pub type_hash: u32,
    pub payload: UserdataPayload,
}

impl RszUserdata {
    pub fn path(&self) -> Option<&str> {
        match &self.payload {
            UserdataPayload::External { path } => Some(path),
            UserdataPayload::Embedded { .. } => None,
        }
    }
}

/// An RSZ object graph.
///
/// Not internally synchronized; edit from one place at a time.
#[derive(Clone, Debug)]
pub struct Rsz {
    schema: Arc<Schema>,
    header: RszHeader,
    instances: Vec<Instance>,
    object_table: Vec<InstanceId>,
    userdata: Vec<RszUserdata>,
    embedded_userdata: bool,
    /// Set when references changed; the next write re-sorts the instance list.
    structure_dirty: bool,
}

impl Rsz {
    /// Empty graph holding only the null instance.
    pub fn new(schema: Arc<Schema>, embedded_userdata: bool) -> Self {
        Self {
            schema,
            header: RszHeader::default(),
            instances: vec![Instance::null()],
            object_table: Vec::new(),
            userdata: Vec::new(),
            embedded_userdata,
            structure_dirty: false,
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Header as last read or written.
    pub fn header(&self) -> &RszHeader {
        &self.header
    }

    /// All instances in list order, the null instance first.
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn instance(&self, id: InstanceId) -> Option<&Instance> {
        self.instances.get(id.index())
    }

    /// Ids of every non-null instance.
    pub fn instance_ids(&self) -> impl Iterator<Item = InstanceId> + '_ {
        (1..self.instances.len()).map(|i| InstanceId(i as u32))
    }

    pub fn object_table(&self) -> &[InstanceId] {
        &self.object_table
    }

    pub fn userdata(&self) -> &[RszUserdata] {
        &self.userdata
    }

    pub fn uses_embedded_userdata(&self) -> bool {
        self.embedded_userdata
    }

    pub fn is_userdata(&self, id: InstanceId) -> bool {
        self.userdata.iter().any(|u| u.instance == id)
    }

    pub fn is_structure_dirty(&self) -> bool {
        self.structure_dirty
    }

    /// Register a new instance and return its id.
    ///
    /// Instances that end up unreachable from the object table are dropped
    /// on the next write.
    pub fn add_instance(&mut self, instance: Instance) -> InstanceId {
        let id = InstanceId(self.instances.len() as u32);
        self.instances.push(instance);
        self.structure_dirty = true;
        id
    }

    /// Append an instance to the object table.
    pub fn push_object(&mut self, id: InstanceId) -> Result<(), EditError> {
        self.check_instance(id)?;
        self.object_table.push(id);
        self.structure_dirty = true;
        Ok(())
    }

    /// Append entries to the object table, returning the position of the first.
    pub(crate) fn append_objects(&mut self, ids: impl IntoIterator<Item = InstanceId>) -> usize {
        let start = self.object_table.len();
        self.object_table.extend(ids);
        self.structure_dirty = true;
        start
    }

    /// Drop the object table entries at `positions`.
    ///
    /// Instances left unreachable are dropped on the next write.
    pub(crate) fn remove_objects(&mut self, positions: &BTreeSet<usize>) {
        let mut position = 0;
        self.object_table.retain(|_| {
            let keep = !positions.contains(&position);
            position += 1;
            keep
        });
        self.structure_dirty = true;
    }

    /// Register a userdata instance pointing at an external file.
    pub fn add_userdata(&mut self, type_hash: u32, path: impl Into<String>) -> Result<InstanceId, EditError> {
        let class = self
            .schema
            .resolve_by_hash(type_hash)
            .ok_or_else(|| EditError::UnresolvedClass(format!("{type_hash:#010x}")))?;
        let id = self.add_instance(Instance::new_default(Arc::clone(class)));
        self.userdata.push(RszUserdata {
            instance: id,
            type_hash,
            payload: UserdataPayload::External { path: path.into() },
        });
        Ok(id)
    }

    /// Register a userdata instance whose content is the nested block `rsz`.
    pub fn add_embedded_userdata(
        &mut self,
        type_hash: u32,
        json_path_hash: u32,
        rsz: Rsz,
    ) -> Result<InstanceId, EditError> {
        let id = self.add_userdata(type_hash, "")?;
        if let Some(entry) = self.userdata.last_mut() {
            entry.payload = UserdataPayload::Embedded {
                json_path_hash,
                rsz: Box::new(rsz),
            };
        }
        Ok(id)
    }

    /// Replace one field value, returning the previous one.
    ///
    /// The value must match the field's type; see [`Value::fits_field`].
    pub fn set_value(&mut self, id: InstanceId, field: usize, value: Value) -> Result<Value, EditError> {
        self.check_instance(id)?;
        let instance = &mut self.instances[id.index()];
        let class = Arc::clone(&instance.class);
        let (Some(descriptor), Some(slot)) = (class.fields.get(field), instance.values.get_mut(field)) else {
            return Err(EditError::NoSuchField {
                class: class.name.clone(),
                index: field,
            });
        };
        if !value.fits_field(descriptor) {
            return Err(type_mismatch(descriptor, &value));
        }
        let touches_references = has_references(slot) || has_references(&value);
        let old = std::mem::replace(slot, value);
        if touches_references {
            self.structure_dirty = true;
        }
        Ok(old)
    }

    /// Copy the subtree under `id` and return the copy's root.
    ///
    /// Object references inside the subtree are cloned once each, so shared
    /// children stay shared within the copy. Userdata references are kept.
    pub fn deep_clone_instance(&mut self, id: InstanceId) -> Result<InstanceId, EditError> {
        self.check_instance(id)?;

        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if current.is_null() || !seen.insert(current) {
                continue;
            }
            order.push(current);
            for value in &self.instances[current.index()].values {
                collect_objects(value, &mut stack);
            }
        }

        let base = self.instances.len() as u32;
        let remap: HashMap<InstanceId, InstanceId> = order
            .iter()
            .enumerate()
            .map(|(i, old)| (*old, InstanceId(base + i as u32)))
            .collect();
        for old in &order {
            let mut copy = self.instances[old.index()].clone();
            for value in &mut copy.values {
                remap_objects(value, &remap);
            }
            self.instances.push(copy);
        }
        self.structure_dirty = true;
        Ok(remap[&id])
    }

    /// Copy the instances reachable from `roots` in `source` into this graph.
    ///
    /// Returns the new id of each root in order, with null roots kept null.
    /// Userdata reached from the roots is copied along with its table entry.
    /// Every class must be known to this graph's schema.
    pub fn import_instances(&mut self, source: &Rsz, roots: &[InstanceId]) -> Result<Vec<InstanceId>, EditError> {
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut stack: Vec<InstanceId> = roots.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if current.is_null() || !seen.insert(current) {
                continue;
            }
            let instance = source.instance(current).ok_or(EditError::NoSuchInstance(current.0))?;
            if instance.is_null() {
                continue;
            }
            if self.schema.resolve_by_hash(instance.type_hash()).is_none() {
                return Err(EditError::UnresolvedClass(instance.name().to_string()));
            }
            order.push(current);
            let mut children = Vec::new();
            for value in &instance.values {
                value.for_each_reference(&mut |child| children.push(child));
            }
            stack.extend(children.into_iter().rev());
        }

        let base = self.instances.len() as u32;
        let remap: HashMap<InstanceId, InstanceId> = order
            .iter()
            .enumerate()
            .map(|(i, old)| (*old, InstanceId(base + i as u32)))
            .collect();
        let lookup = |id: InstanceId| remap.get(&id).copied().unwrap_or(InstanceId::NULL);
        for old in &order {
            let mut copy = source.instances[old.index()].clone();
            for value in &mut copy.values {
                value.map_references(&mut |id| lookup(id));
            }
            self.instances.push(copy);
        }
        for entry in &source.userdata {
            if let Some(&instance) = remap.get(&entry.instance) {
                self.userdata.push(RszUserdata {
                    instance,
                    ..entry.clone()
                });
            }
        }
        self.structure_dirty = true;
        Ok(roots.iter().map(|&id| lookup(id)).collect())
    }

    pub(crate) fn check_instance(&self, id: InstanceId) -> Result<(), EditError> {
        if id.is_null() || id.index() >= self.instances.len() {
            return Err(EditError::NoSuchInstance(id.0));
        }
        Ok(())
    }

    /// Value kind a reference field stores.
    pub(crate) fn reference_value(field_type: FieldType, id: InstanceId) -> Value {
        if field_type == FieldType::UserData {
            Value::UserData(id)
        } else {
            Value::Object(id)
        }
    }
}

pub(crate) fn type_mismatch(field: &FieldDescriptor, value: &Value) -> EditError {
    EditError::TypeMismatch {
        field: field.name.clone(),
        expected: field.display_type().to_string(),
        found: value.kind(),
    }
}

fn has_references(value: &Value) -> bool {
    let mut found = false;
    value.for_each_reference(&mut |_| found = true);
    found
}

fn collect_objects(value: &Value, out: &mut Vec<InstanceId>) {
    match value {
        Value::Object(id) => out.push(*id),
        Value::Array(items) => items.iter().for_each(|v| collect_objects(v, out)),
        _ => {}
    }
}

fn remap_objects(value: &mut Value, remap: &HashMap<InstanceId, InstanceId>) {
    match value {
        Value::Object(id) => {
            if let Some(new) = remap.get(id) {
                *id = *new;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(|v| remap_objects(v, remap)),
        _ => {}
    }
}
