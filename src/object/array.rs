//! Array-like PDF objects.

use crate::object::Object;

/// Common interface of PDF arrays.
///
/// Mutating methods report whether the array accepted the change; frozen
/// arrays such as [`PdfRectangle`](crate::object::PdfRectangle) refuse all of
/// them.
pub trait PdfArray {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether the array is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index` as an object.
    fn get(&self, index: usize) -> Option<Object>;

    /// Append an element.
    fn add(&mut self, object: Object) -> bool;

    /// Prepend an element.
    fn add_first(&mut self, object: Object);

    /// Append reals.
    fn add_floats(&mut self, values: &[f32]) -> bool;

    /// Append integers.
    fn add_ints(&mut self, values: &[i32]) -> bool;

    /// Serializable form.
    fn to_object(&self) -> Object;
}

impl PdfArray for Vec<Object> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<Object> {
        self.as_slice().get(index).cloned()
    }

    fn add(&mut self, object: Object) -> bool {
        self.push(object);
        true
    }

    fn add_first(&mut self, object: Object) {
        self.insert(0, object);
    }

    fn add_floats(&mut self, values: &[f32]) -> bool {
        self.extend(values.iter().map(|&v| Object::Real(v as f64)));
        true
    }

    fn add_ints(&mut self, values: &[i32]) -> bool {
        self.extend(values.iter().map(|&v| Object::Integer(v as i64)));
        true
    }

    fn to_object(&self) -> Object {
        Object::Array(self.clone())
    }
}
