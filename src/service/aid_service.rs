use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::dto::aid_dto::{CreateAidRequest, AidView, UpdateAidRequest};
use crate::model::{aid::Aid, dues::Dues, member::Member};
use crate::repository::record_repo::Repository;
use crate::service::{member_views, not_found_as, parse_id, resolve_member, ServiceResult};
use crate::util::error::ServiceError;

const NOT_FOUND: &str = "Aide non trouvée";

#[async_trait]
pub trait AidService: Send + Sync {
    async fn add(&self, request: CreateAidRequest) -> ServiceResult<AidView>;
    async fn list(&self) -> ServiceResult<Vec<AidView>>;
    async fn get(&self, id: &str) -> ServiceResult<AidView>;
    async fn update(&self, id: &str, request: UpdateAidRequest) -> ServiceResult<AidView>;
    async fn delete(&self, id: &str) -> ServiceResult<()>;
}

pub struct AidServiceImpl {
    pub aids: Arc<dyn Repository<Aid>>,
    pub dues: Arc<dyn Repository<Dues>>,
    pub members: Arc<dyn Repository<Member>>,
}

impl AidServiceImpl {
    pub fn new(
        aids: Arc<dyn Repository<Aid>>,
        dues: Arc<dyn Repository<Dues>>,
        members: Arc<dyn Repository<Member>>,
    ) -> Self {
        Self { aids, dues, members }
    }

    async fn populate(&self, records: Vec<Aid>) -> ServiceResult<Vec<AidView>> {
        let views = member_views(
            self.members.as_ref(),
            self.dues.as_ref(),
            records.iter().map(|r| r.beneficiary),
        )
        .await?;
        Ok(records
            .into_iter()
            .map(|aid| {
                let beneficiary = views.get(&aid.beneficiary).cloned();
                AidView::new(aid, beneficiary)
            })
            .collect())
    }

    async fn populate_one(&self, aid: Aid) -> ServiceResult<AidView> {
        self.populate(vec![aid])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::InternalError("populate returned no record".to_string()))
    }
}

#[async_trait]
impl AidService for AidServiceImpl {
    #[instrument(skip(self, request), fields(beneficiaire = ?request.beneficiaire))]
    async fn add(&self, request: CreateAidRequest) -> ServiceResult<AidView> {
        let raw_beneficiary = request.beneficiaire.clone().unwrap_or_default();
        let beneficiary = resolve_member(self.members.as_ref(), "beneficiaire", &raw_beneficiary).await?;
        let stored = self.aids.insert(request.into_aid(beneficiary)).await?;
        info!("Aid recorded");
        self.populate_one(stored).await
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ServiceResult<Vec<AidView>> {
        let records = self.aids.find_many(None).await?;
        self.populate(records).await
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> ServiceResult<AidView> {
        let id = parse_id(id, NOT_FOUND)?;
        let aid = self
            .aids
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))?;
        self.populate_one(aid).await
    }

    #[instrument(skip(self, request))]
    async fn update(&self, id: &str, request: UpdateAidRequest) -> ServiceResult<AidView> {
        let id = parse_id(id, NOT_FOUND)?;
        let mut aid = self
            .aids
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))?;
        let beneficiary = match request.beneficiaire.as_deref() {
            Some(raw) if raw != aid.beneficiary.to_hex() => {
                Some(resolve_member(self.members.as_ref(), "beneficiaire", raw).await?)
            }
            _ => None,
        };
        request.apply(&mut aid, beneficiary);
        let stored = self.aids.replace(&id, aid).await.map_err(not_found_as(NOT_FOUND))?;
        info!("Aid updated");
        self.populate_one(stored).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ServiceResult<()> {
        let id = parse_id(id, NOT_FOUND)?;
        self.aids.delete(&id).await.map_err(not_found_as(NOT_FOUND))?;
        info!("Aid deleted");
        Ok(())
    }
}
