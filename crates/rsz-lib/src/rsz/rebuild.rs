//! Dependency ordering of the instance list.

use std::collections::HashMap;

use crate::instance::{Instance, InstanceId};

use super::Rsz;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Open,
    Done,
}

impl Rsz {
    /// Re-sort instances so every referenced instance precedes its referrer.
    ///
    /// Walks the object table depth first, children in field order, emitting
    /// each instance after its children. Instances the walk never reaches are
    /// dropped together with their userdata entries.
    pub fn rebuild(&mut self) {
        let order = self.post_order();
        let before = self.instances.len();

        let mut remap: HashMap<InstanceId, InstanceId> = HashMap::with_capacity(order.len() + 1);
        remap.insert(InstanceId::NULL, InstanceId::NULL);
        for (i, old) in order.iter().enumerate() {
            remap.insert(*old, InstanceId(i as u32 + 1));
        }
        let lookup = |id: InstanceId| remap.get(&id).copied().unwrap_or(InstanceId::NULL);

        let mut old_instances: Vec<Option<Instance>> = std::mem::take(&mut self.instances).into_iter().map(Some).collect();
        let mut instances = Vec::with_capacity(order.len() + 1);
        instances.push(old_instances[0].take().unwrap_or_else(Instance::null));
        for old in &order {
            let Some(mut instance) = old_instances[old.index()].take() else {
                continue;
            };
            for value in &mut instance.values {
                value.map_references(&mut |id| lookup(id));
            }
            instances.push(instance);
        }
        self.instances = instances;

        for id in &mut self.object_table {
            *id = lookup(*id);
        }
        self.userdata.retain(|entry| remap.contains_key(&entry.instance));
        for entry in &mut self.userdata {
            entry.instance = lookup(entry.instance);
        }

        self.structure_dirty = false;
        tracing::debug!(
            before,
            after = self.instances.len(),
            "rebuilt instance list"
        );
    }

    fn post_order(&self) -> Vec<InstanceId> {
        let mut marks = vec![Mark::Unvisited; self.instances.len()];
        let mut order = Vec::with_capacity(self.instances.len());
        // (instance, children already pushed)
        let mut stack: Vec<(InstanceId, bool)> = Vec::new();

        for root in &self.object_table {
            stack.push((*root, false));
            while let Some((id, expanded)) = stack.pop() {
                if id.is_null() || id.index() >= marks.len() {
                    continue;
                }
                if expanded {
                    marks[id.index()] = Mark::Done;
                    order.push(id);
                    continue;
                }
                if marks[id.index()] != Mark::Unvisited {
                    continue;
                }
                marks[id.index()] = Mark::Open;
                stack.push((id, true));

                let mut children = Vec::new();
                for value in &self.instances[id.index()].values {
                    value.for_each_reference(&mut |child| children.push(child));
                }
                for child in children.into_iter().rev() {
                    if !child.is_null() && marks.get(child.index()) == Some(&Mark::Unvisited) {
                        stack.push((child, false));
                    }
                }
            }
        }
        order
    }
}
