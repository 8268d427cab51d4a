use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::dto::dues_dto::{CreateDuesRequest, DuesView, UpdateDuesRequest};
use crate::model::{dues::Dues, member::Member};
use crate::repository::record_repo::Repository;
use crate::service::{member_views, not_found_as, parse_id, resolve_member, ServiceResult};
use crate::util::error::ServiceError;

const NOT_FOUND: &str = "Cotisation non trouvée";

#[async_trait]
pub trait DuesService: Send + Sync {
    async fn add(&self, request: CreateDuesRequest) -> ServiceResult<DuesView>;
    async fn list(&self) -> ServiceResult<Vec<DuesView>>;
    async fn get(&self, id: &str) -> ServiceResult<DuesView>;
    async fn update(&self, id: &str, request: UpdateDuesRequest) -> ServiceResult<DuesView>;
    async fn delete(&self, id: &str) -> ServiceResult<()>;
}

pub struct DuesServiceImpl {
    pub dues: Arc<dyn Repository<Dues>>,
    pub members: Arc<dyn Repository<Member>>,
}

impl DuesServiceImpl {
    pub fn new(dues: Arc<dyn Repository<Dues>>, members: Arc<dyn Repository<Member>>) -> Self {
        Self { dues, members }
    }

    async fn populate(&self, records: Vec<Dues>) -> ServiceResult<Vec<DuesView>> {
        let views = member_views(
            self.members.as_ref(),
            self.dues.as_ref(),
            records.iter().map(|d| d.member),
        )
        .await?;
        Ok(records
            .into_iter()
            .map(|dues| {
                let member = views.get(&dues.member).cloned();
                DuesView::new(dues, member)
            })
            .collect())
    }

    async fn populate_one(&self, dues: Dues) -> ServiceResult<DuesView> {
        self.populate(vec![dues])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::InternalError("populate returned no record".to_string()))
    }
}

#[async_trait]
impl DuesService for DuesServiceImpl {
    #[instrument(skip(self, request), fields(membre = ?request.membre))]
    async fn add(&self, request: CreateDuesRequest) -> ServiceResult<DuesView> {
        let raw_member = request.membre.clone().unwrap_or_default();
        let member = resolve_member(self.members.as_ref(), "membre", &raw_member).await?;
        let stored = self.dues.insert(request.into_dues(member)).await?;
        info!("Dues recorded");
        self.populate_one(stored).await
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ServiceResult<Vec<DuesView>> {
        let records = self.dues.find_many(None).await?;
        self.populate(records).await
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> ServiceResult<DuesView> {
        let id = parse_id(id, NOT_FOUND)?;
        let dues = self
            .dues
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))?;
        self.populate_one(dues).await
    }

    #[instrument(skip(self, request))]
    async fn update(&self, id: &str, request: UpdateDuesRequest) -> ServiceResult<DuesView> {
        let id = parse_id(id, NOT_FOUND)?;
        let mut dues = self
            .dues
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))?;
        let member = match request.membre.as_deref() {
            Some(raw) if raw != dues.member.to_hex() => {
                Some(resolve_member(self.members.as_ref(), "membre", raw).await?)
            }
            _ => None,
        };
        request.apply(&mut dues, member);
        let stored = self.dues.replace(&id, dues).await.map_err(not_found_as(NOT_FOUND))?;
        info!("Dues updated");
        self.populate_one(stored).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ServiceResult<()> {
        let id = parse_id(id, NOT_FOUND)?;
        self.dues.delete(&id).await.map_err(not_found_as(NOT_FOUND))?;
        info!("Dues deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::member_dto::CreateMemberRequest;
    use crate::repository::Repositories;
    use crate::service::member_service::{MemberService, MemberServiceImpl};
    use bson::oid::ObjectId;

    fn request(membre: String) -> CreateDuesRequest {
        CreateDuesRequest {
            membre: Some(membre),
            montant: Some(30.0),
            date: None,
            statut: None,
        }
    }

    #[tokio::test]
    async fn unknown_member_is_a_validation_error() {
        let repos = Repositories::in_memory();
        let service = DuesServiceImpl::new(repos.dues.clone(), repos.members.clone());
        let err = service.add(request(ObjectId::new().to_hex())).await.unwrap_err();
        match err {
            ServiceError::Validation(errors) => assert_eq!(errors[0].field, "membre"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(repos.dues.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn deleted_member_populates_as_null() {
        let repos = Repositories::in_memory();
        let members = MemberServiceImpl::new(repos.members.clone(), repos.dues.clone());
        let service = DuesServiceImpl::new(repos.dues.clone(), repos.members.clone());
        let member = members
            .add(CreateMemberRequest {
                nom: Some("Dupont".to_string()),
                prenom: Some("Jean".to_string()),
                email: Some("d@x.com".to_string()),
                adresse: Some("1 rue de la Paix".to_string()),
                telephone: Some("0600000000".to_string()),
            })
            .await
            .unwrap();

        let dues = service.add(request(member.id.clone())).await.unwrap();
        let populated = dues.membre.unwrap();
        assert_eq!(populated.email, "d@x.com");
        assert_eq!(populated.cotisations, vec![dues.id.clone()]);

        members.delete(&member.id).await.unwrap();
        assert!(service.get(&dues.id).await.unwrap().membre.is_none());
    }
}
