pub mod aid_service;
pub mod dues_service;
pub mod loan_service;
pub mod member_service;
pub mod user_service;

use std::collections::{HashMap, HashSet};

use bson::{doc, oid::ObjectId};

use crate::dto::member_dto::MemberView;
use crate::model::{dues::Dues, member::Member};
use crate::repository::record_repo::Repository;
use crate::repository::repository_error::RepositoryError;
use crate::util::error::ServiceError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// A path id that is not an ObjectId names no record.
pub(crate) fn parse_id(id: &str, not_found: &str) -> ServiceResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| ServiceError::NotFound(not_found.to_string()))
}

/// Keeps the caller's not-found message when the store reports the record gone.
pub(crate) fn not_found_as(msg: &'static str) -> impl Fn(RepositoryError) -> ServiceError {
    move |err| match err {
        RepositoryError::NotFound(_) => ServiceError::NotFound(msg.to_string()),
        other => other.into(),
    }
}

/// Resolve a member reference from a request body, failing validation on
/// `field` when it is malformed or names no member.
pub(crate) async fn resolve_member(
    members: &dyn Repository<Member>,
    field: &str,
    raw: &str,
) -> ServiceResult<ObjectId> {
    let id = ObjectId::parse_str(raw).map_err(|_| ServiceError::field(field, "Identifiant de membre invalide"))?;
    match members.find_by_id(&id).await? {
        Some(_) => Ok(id),
        None => Err(ServiceError::field(field, "Membre non trouvé")),
    }
}

/// Ids of the dues recorded for `member`.
pub(crate) async fn dues_ids_for(dues: &dyn Repository<Dues>, member: ObjectId) -> ServiceResult<Vec<String>> {
    Ok(dues
        .find_many(Some(doc! { "membre": member }))
        .await?
        .into_iter()
        .filter_map(|d| d.id)
        .map(|id| id.to_hex())
        .collect())
}

/// Populated member views keyed by id. Ids with no stored member are absent.
pub(crate) async fn member_views(
    members: &dyn Repository<Member>,
    dues: &dyn Repository<Dues>,
    ids: impl IntoIterator<Item = ObjectId>,
) -> ServiceResult<HashMap<ObjectId, MemberView>> {
    let unique: Vec<ObjectId> = ids.into_iter().collect::<HashSet<_>>().into_iter().collect();
    let mut views = HashMap::with_capacity(unique.len());
    for member in members.find_by_ids(&unique).await? {
        let Some(id) = member.id else { continue };
        let cotisations = dues_ids_for(dues, id).await?;
        views.insert(id, MemberView::new(member, cotisations));
    }
    Ok(views)
}
