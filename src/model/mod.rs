pub mod aid;
pub mod dues;
pub mod loan;
pub mod member;
pub mod role;
pub mod user;

use bson::oid::ObjectId;
use serde::{de::DeserializeOwned, Serialize};

/// A document stored in its own collection.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    /// Collection name.
    const COLLECTION: &'static str;
    /// Fields carrying a unique index.
    const UNIQUE_FIELDS: &'static [&'static str] = &[];

    fn id(&self) -> Option<ObjectId>;
    fn set_id(&mut self, id: ObjectId);
    /// Stamp `createdAt` (when `created`) and `updatedAt` with `now`.
    fn touch(&mut self, now: &str, created: bool);
}

/// Implements [`Record`] for a model with `id`, `created_at` and `updated_at`
/// fields.
macro_rules! impl_record {
    ($ty:ty, $collection:literal $(, unique = [$($field:literal),*])?) => {
        impl $crate::model::Record for $ty {
            const COLLECTION: &'static str = $collection;
            $(const UNIQUE_FIELDS: &'static [&'static str] = &[$($field),*];)?

            fn id(&self) -> Option<bson::oid::ObjectId> {
                self.id
            }

            fn set_id(&mut self, id: bson::oid::ObjectId) {
                self.id = Some(id);
            }

            fn touch(&mut self, now: &str, created: bool) {
                if created {
                    self.created_at = Some(now.to_string());
                }
                self.updated_at = Some(now.to_string());
            }
        }
    };
}
pub(crate) use impl_record;
