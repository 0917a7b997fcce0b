//! Destination for indirect objects.

use crate::collections::OrderedTree;
use crate::error::{Error, Result};
use crate::object::{Object, ObjectRef};

/// Accepts indirect objects as they are produced.
///
/// References can be reserved ahead of time so that objects may point at
/// each other before either is written.
pub trait ObjectSink {
    /// Allocate the next object number.
    fn reserve_ref(&mut self) -> ObjectRef;

    /// Store `object` under a previously reserved reference.
    fn add_object_at(&mut self, obj_ref: ObjectRef, object: Object) -> Result<()>;

    /// Allocate a reference and store `object` under it.
    fn add_object(&mut self, object: Object) -> Result<ObjectRef> {
        let obj_ref = self.reserve_ref();
        self.add_object_at(obj_ref, object)?;
        Ok(obj_ref)
    }
}

/// In-memory sink keeping objects ordered by reference.
#[derive(Debug, Clone)]
pub struct ObjectCollector {
    next_id: u32,
    objects: OrderedTree<ObjectRef, Object>,
}

impl Default for ObjectCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectCollector {
    /// Empty collector; the first reference is `1 0 R`.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            objects: OrderedTree::new(),
        }
    }

    /// Object stored under `obj_ref`.
    pub fn get(&self, obj_ref: ObjectRef) -> Option<&Object> {
        self.objects.get(&obj_ref)
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Highest object number handed out so far.
    pub fn max_id(&self) -> u32 {
        self.next_id - 1
    }

    /// Stored objects in reference order.
    pub fn iter(&self) -> impl Iterator<Item = (&ObjectRef, &Object)> + '_ {
        self.objects.iter()
    }
}

impl ObjectSink for ObjectCollector {
    fn reserve_ref(&mut self) -> ObjectRef {
        let obj_ref = ObjectRef::new(self.next_id, 0);
        self.next_id += 1;
        obj_ref
    }

    fn add_object_at(&mut self, obj_ref: ObjectRef, object: Object) -> Result<()> {
        if obj_ref.id == 0 || obj_ref.id >= self.next_id {
            return Err(Error::InvalidArgument(format!("reference {obj_ref} was never reserved")));
        }
        self.objects.add(obj_ref, object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_references_are_sequential() {
        let mut sink = ObjectCollector::new();
        assert_eq!(sink.reserve_ref(), ObjectRef::new(1, 0));
        assert_eq!(sink.add_object(Object::Null).unwrap(), ObjectRef::new(2, 0));
        assert_eq!(sink.max_id(), 2);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_object_written_once() {
        let mut sink = ObjectCollector::new();
        let r = sink.reserve_ref();
        sink.add_object_at(r, Object::Integer(1)).unwrap();
        assert!(matches!(sink.add_object_at(r, Object::Integer(2)), Err(Error::DuplicateKey(_))));
        assert_eq!(sink.get(r), Some(&Object::Integer(1)));
    }

    #[test]
    fn test_unreserved_reference_rejected() {
        let mut sink = ObjectCollector::new();
        assert!(sink.add_object_at(ObjectRef::new(5, 0), Object::Null).is_err());
    }

    #[test]
    fn test_iteration_in_reference_order() {
        let mut sink = ObjectCollector::new();
        let a = sink.reserve_ref();
        let b = sink.reserve_ref();
        sink.add_object_at(b, Object::Integer(2)).unwrap();
        sink.add_object_at(a, Object::Integer(1)).unwrap();
        let ids: Vec<u32> = sink.iter().map(|(r, _)| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
