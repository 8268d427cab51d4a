use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use tracing::{info, instrument, warn};

use crate::dto::member_dto::{CreateMemberRequest, MemberView, UpdateMemberRequest};
use crate::model::{dues::Dues, member::Member};
use crate::repository::record_repo::Repository;
use crate::service::{dues_ids_for, not_found_as, parse_id, ServiceResult};
use crate::util::error::ServiceError;

const NOT_FOUND: &str = "Membre non trouvé";
const DUPLICATE: &str = "Un membre avec cet email existe déjà";

#[async_trait]
pub trait MemberService: Send + Sync {
    async fn add(&self, request: CreateMemberRequest) -> ServiceResult<MemberView>;
    async fn list(&self) -> ServiceResult<Vec<MemberView>>;
    async fn get(&self, id: &str) -> ServiceResult<MemberView>;
    async fn update(&self, id: &str, request: UpdateMemberRequest) -> ServiceResult<MemberView>;
    async fn delete(&self, id: &str) -> ServiceResult<()>;
}

pub struct MemberServiceImpl {
    pub members: Arc<dyn Repository<Member>>,
    pub dues: Arc<dyn Repository<Dues>>,
}

impl MemberServiceImpl {
    pub fn new(members: Arc<dyn Repository<Member>>, dues: Arc<dyn Repository<Dues>>) -> Self {
        Self { members, dues }
    }

    /// Fails when a member other than `except` already uses `email`.
    async fn ensure_email_free(&self, email: &str, except: Option<ObjectId>) -> ServiceResult<()> {
        match self.members.find_one(doc! { "email": email }).await? {
            Some(other) if other.id != except => {
                warn!("Member email already in use: {}", email);
                Err(ServiceError::DuplicateEmail(DUPLICATE.to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl MemberService for MemberServiceImpl {
    #[instrument(skip(self, request), fields(email = ?request.email))]
    async fn add(&self, request: CreateMemberRequest) -> ServiceResult<MemberView> {
        let member = request.into_member();
        self.ensure_email_free(&member.email, None).await?;
        let stored = self.members.insert(member).await?;
        info!("Member created");
        Ok(MemberView::new(stored, Vec::new()))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ServiceResult<Vec<MemberView>> {
        let members = self.members.find_many(None).await?;
        let mut by_member: HashMap<ObjectId, Vec<String>> = HashMap::new();
        for dues in self.dues.find_many(None).await? {
            if let Some(id) = dues.id {
                by_member.entry(dues.member).or_default().push(id.to_hex());
            }
        }
        Ok(members
            .into_iter()
            .map(|member| {
                let cotisations = member.id.and_then(|id| by_member.remove(&id)).unwrap_or_default();
                MemberView::new(member, cotisations)
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> ServiceResult<MemberView> {
        let id = parse_id(id, NOT_FOUND)?;
        let member = self
            .members
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))?;
        let cotisations = dues_ids_for(self.dues.as_ref(), id).await?;
        Ok(MemberView::new(member, cotisations))
    }

    #[instrument(skip(self, request))]
    async fn update(&self, id: &str, request: UpdateMemberRequest) -> ServiceResult<MemberView> {
        let id = parse_id(id, NOT_FOUND)?;
        let mut member = self
            .members
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))?;
        if let Some(email) = request.email.as_deref() {
            if email != member.email {
                self.ensure_email_free(email, Some(id)).await?;
            }
        }
        request.apply(&mut member);
        let stored = self.members.replace(&id, member).await.map_err(not_found_as(NOT_FOUND))?;
        let cotisations = dues_ids_for(self.dues.as_ref(), id).await?;
        info!("Member updated");
        Ok(MemberView::new(stored, cotisations))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ServiceResult<()> {
        let id = parse_id(id, NOT_FOUND)?;
        self.members.delete(&id).await.map_err(not_found_as(NOT_FOUND))?;
        info!("Member deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repositories;
    use chrono::Utc;

    fn service(repos: &Repositories) -> MemberServiceImpl {
        MemberServiceImpl::new(repos.members.clone(), repos.dues.clone())
    }

    fn request(email: &str) -> CreateMemberRequest {
        CreateMemberRequest {
            nom: Some("Dupont".to_string()),
            prenom: Some("Jean".to_string()),
            email: Some(email.to_string()),
            adresse: Some("1 rue de la Paix".to_string()),
            telephone: Some("0600000000".to_string()),
        }
    }

    #[tokio::test]
    async fn views_list_the_member_dues() {
        let repos = Repositories::in_memory();
        let members = service(&repos);
        let member = members.add(request("d@x.com")).await.unwrap();
        let member_id = ObjectId::parse_str(&member.id).unwrap();
        let dues = repos
            .dues
            .insert(Dues {
                id: None,
                member: member_id,
                amount: 20.0,
                date: Utc::now(),
                status: Default::default(),
                created_at: None,
                updated_at: None,
            })
            .await
            .unwrap();
        let dues_id = dues.id.unwrap().to_hex();

        assert_eq!(members.get(&member.id).await.unwrap().cotisations, vec![dues_id.clone()]);
        assert_eq!(members.list().await.unwrap()[0].cotisations, vec![dues_id]);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_before_the_store() {
        let repos = Repositories::in_memory();
        let members = service(&repos);
        members.add(request("d@x.com")).await.unwrap();
        let err = members.add(request("d@x.com")).await.unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateEmail(_)));
        assert_eq!(repos.members.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_to_another_members_email_is_rejected() {
        let repos = Repositories::in_memory();
        let members = service(&repos);
        members.add(request("a@x.com")).await.unwrap();
        let second = members.add(request("b@x.com")).await.unwrap();
        let update = UpdateMemberRequest {
            email: Some("a@x.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            members.update(&second.id, update).await,
            Err(ServiceError::DuplicateEmail(_))
        ));
    }

    #[tokio::test]
    async fn malformed_id_is_not_found() {
        let repos = Repositories::in_memory();
        let members = service(&repos);
        assert!(matches!(members.get("nope").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(members.delete("nope").await, Err(ServiceError::NotFound(_))));
    }
}
